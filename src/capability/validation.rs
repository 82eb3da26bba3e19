use super::Capability;
use crate::shared::ids::{CapabilityId, MembershipSetId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityValidationError {
    #[error(
        "capabilities `{first}` and `{second}` cannot be enabled together; both belong to membership set `{membership_set}`"
    )]
    MutualExclusionViolation {
        membership_set: MembershipSetId,
        first: CapabilityId,
        second: CapabilityId,
    },
    #[error("capability `{capability}` requires `{prerequisite}`, which is not enabled")]
    UnresolvedPrerequisite {
        capability: CapabilityId,
        prerequisite: CapabilityId,
    },
}

/// Checks a proposed capability set: membership sets first, then prerequisites.
/// Reports the first violation in set order.
pub fn validate_capability_set(set: &[&Capability]) -> Result<(), CapabilityValidationError> {
    let mut set_owners: HashMap<&str, &Capability> = HashMap::new();
    for capability in set {
        for membership_set in &capability.membership_sets {
            match set_owners.get(membership_set.as_str()) {
                Some(owner) if owner.id != capability.id => {
                    return Err(CapabilityValidationError::MutualExclusionViolation {
                        membership_set: membership_set.clone(),
                        first: owner.id.clone(),
                        second: capability.id.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    set_owners.insert(membership_set.as_str(), capability);
                }
            }
        }
    }

    let present: HashSet<&str> = set.iter().map(|capability| capability.id.as_str()).collect();
    for capability in set {
        for prerequisite in &capability.prerequisites {
            if !present.contains(prerequisite.as_str()) {
                return Err(CapabilityValidationError::UnresolvedPrerequisite {
                    capability: capability.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
    }
    Ok(())
}
