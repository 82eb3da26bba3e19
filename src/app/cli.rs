#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Init,
    Catalog,
    Validate,
    Project,
    Plan,
    Apply,
    PathVar,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "init" => CliVerb::Init,
        "catalog" => CliVerb::Catalog,
        "validate" => CliVerb::Validate,
        "project" => CliVerb::Project,
        "plan" => CliVerb::Plan,
        "apply" => CliVerb::Apply,
        "path-var" => CliVerb::PathVar,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  init [--catalog empty|sample]        Create state root, settings and catalogue"
            .to_string(),
        "  catalog list                         List capabilities by category".to_string(),
        "  catalog show <id>                    Show one capability".to_string(),
        "  validate <ids>                       Check a comma-separated capability set"
            .to_string(),
        "  project list                         List known projects".to_string(),
        "  project show <name>                  Show a project's natures and capabilities"
            .to_string(),
        "  project create <name> [--with ids] [--keys k]".to_string(),
        "                                       Run the new-project wizard".to_string(),
        "  plan <name> <ids>                    Show the steps to reach a capability set"
            .to_string(),
        "  apply <name> <ids> [--keys k]        Run the capability update wizard".to_string(),
        "  path-var preferred <vars> <paths...> Pick the closest enclosing path variable"
            .to_string(),
    ]
}

pub fn key_help_lines() -> Vec<String> {
    vec![
        "Wizard keys (--keys, comma-separated):".to_string(),
        "  right,n                              Next page".to_string(),
        "  left,b                               Previous page".to_string(),
        "  enter,f                              Finish the current step or the review".to_string(),
        "  esc,ctrl-c                           Cancel".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.extend(key_help_lines());
    lines.join("\n")
}
