use capsteps::path_variables::{common_root, preferred_variable, PathVariables};
use std::path::PathBuf;

fn vars(raw: &str) -> PathVariables {
    PathVariables::parse_assignments(raw).expect("parse variables")
}

#[test]
fn path_variables_prefer_enclosing_variable_over_one_inside_the_root() {
    let variables = vars("V1=/work,V2=/work/src/app/lib");
    let paths = ["/work/src/app/a.txt", "/work/src/app/b/c.txt"];

    assert_eq!(common_root(&paths), Some(PathBuf::from("/work/src/app")));
    assert_eq!(preferred_variable(&variables, &paths), Some("V1"));
}

#[test]
fn path_variables_pick_the_nearest_enclosing_location() {
    let variables = vars("ROOT=/,WORK=/work,SRC=/work/src");
    let paths = ["/work/src/app/a.txt", "/work/src/lib/b.txt"];
    assert_eq!(preferred_variable(&variables, &paths), Some("SRC"));

    let at_root = vars("APP=/work/src/app,WORK=/work");
    assert_eq!(
        preferred_variable(&at_root, &["/work/src/app/a.txt", "/work/src/app/b.txt"]),
        Some("APP")
    );
}

#[test]
fn path_variables_return_none_without_enclosing_variable_or_paths() {
    let variables = vars("LIB=/work/src/app/lib,OTHER=/elsewhere");
    assert_eq!(
        preferred_variable(&variables, &["/work/src/app/a.txt", "/work/src/app/b.txt"]),
        None
    );
    assert_eq!(preferred_variable::<&str>(&variables, &[]), None);
}

#[test]
fn path_variables_reject_bad_names() {
    let err = PathVariables::parse_assignments("bad name=/x").expect_err("space in name");
    assert!(err.to_string().contains("invalid path variable name `bad name`"));
    assert!(vars("").is_empty());
    assert_eq!(vars("A=/x").len(), 1);
}
