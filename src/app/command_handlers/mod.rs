use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod catalog;
pub mod init;
pub mod path_vars;
pub mod projects;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Init => init::cmd_init(&args[1..]),
        CliVerb::Catalog => catalog::cmd_catalog(&args[1..]),
        CliVerb::Validate => catalog::cmd_validate(&args[1..]),
        CliVerb::Project => projects::cmd_project(&args[1..]),
        CliVerb::Plan => projects::cmd_plan(&args[1..]),
        CliVerb::Apply => projects::cmd_apply(&args[1..]),
        CliVerb::PathVar => path_vars::cmd_path_var(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
