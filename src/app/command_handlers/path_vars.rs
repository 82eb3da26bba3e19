use crate::path_variables::{common_root, preferred_variable, PathVariables};

pub fn cmd_path_var(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("preferred") => cmd_path_var_preferred(&args[1..]),
        _ => Err("usage: path-var preferred <NAME=/path,...> <paths...>".to_string()),
    }
}

fn cmd_path_var_preferred(args: &[String]) -> Result<String, String> {
    let Some((raw_variables, paths)) = args.split_first() else {
        return Err("usage: path-var preferred <NAME=/path,...> <paths...>".to_string());
    };
    if paths.is_empty() {
        return Err("path-var preferred requires at least one path".to_string());
    }
    let variables =
        PathVariables::parse_assignments(raw_variables).map_err(|err| err.to_string())?;
    let Some(root) = common_root(paths) else {
        return Err("paths must be absolute".to_string());
    };

    let preferred = preferred_variable(&variables, paths).unwrap_or("none");
    Ok(format!(
        "common_root={}\npreferred={preferred}",
        root.display()
    ))
}
