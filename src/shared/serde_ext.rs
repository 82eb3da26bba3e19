use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub fn parse_via_string<'de, D, T, F>(deserializer: D, kind: &str, parser: F) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    F: FnOnce(&str) -> Result<T, String>,
{
    let raw = String::deserialize(deserializer)?;
    parser(&raw).map_err(|err| D::Error::custom(format!("invalid {kind} `{raw}`: {err}")))
}

/// Deserializes a YAML scalar-or-sequence of ids, dropping repeats while keeping first-seen order.
pub fn parse_id_list<'de, D, T, F>(deserializer: D, kind: &str, parser: F) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: PartialEq,
    F: Fn(&str) -> Result<T, String>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    let raws = match value {
        serde_yaml::Value::Null => Vec::new(),
        serde_yaml::Value::String(raw) => vec![raw],
        serde_yaml::Value::Sequence(values) => {
            let mut raws = Vec::new();
            for value in values {
                let raw = value.as_str().ok_or_else(|| {
                    D::Error::custom(format!("{kind} list must be a sequence of strings"))
                })?;
                raws.push(raw.to_string());
            }
            raws
        }
        _ => {
            return Err(D::Error::custom(format!(
                "{kind} list must be a sequence of strings"
            )))
        }
    };

    let mut parsed = Vec::new();
    for raw in raws {
        let trimmed = raw.trim();
        let id = parser(trimmed)
            .map_err(|err| D::Error::custom(format!("invalid {kind} `{trimmed}`: {err}")))?;
        if !parsed.contains(&id) {
            parsed.push(id);
        }
    }
    Ok(parsed)
}
