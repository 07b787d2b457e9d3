use super::*;
use crate::error::ScriptError;

#[test]
fn test_parse_counts_commands_in_order() {
    let script = "\
# integration script
CreateProject(name=\"Quotes\")

Initialize()
# comment between commands
Transform()
";
    let commands = parse_script(script).unwrap();
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0].name, "CreateProject");
    assert_eq!(commands[1].name, "Initialize");
    assert_eq!(commands[2].name, "Transform");
    assert_eq!(commands[0].line, 2);
    assert_eq!(commands[2].line, 6);
}

#[test]
fn test_parse_quoted_and_bare_arguments() {
    let commands =
        parse_script("UseCsv(configFile=\"a b.yml\", database=quotes.duckdb)").unwrap();
    let cmd = &commands[0];
    assert_eq!(cmd.arg("configFile"), Some("a b.yml"));
    assert_eq!(cmd.arg("database"), Some("quotes.duckdb"));
    assert_eq!(cmd.arg("missing"), None);
}

#[test]
fn test_parse_tolerates_surrounding_whitespace() {
    let commands = parse_script("   Extract( file = data.csv )   ").unwrap();
    assert_eq!(commands[0].name, "Extract");
    assert_eq!(commands[0].arg("file"), Some("data.csv"));
}

#[test]
fn test_parse_empty_argument_list() {
    let commands = parse_script("Transform()").unwrap();
    assert!(commands[0].args.is_empty());
}

#[test]
fn test_malformed_line_fails_with_line_number() {
    let script = "CreateProject(name=\"x\")\nthis is not a command\nTransform()";
    let result = parse_script(script);
    match result {
        Err(ScriptError::ParseError { line, text }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "this is not a command");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_close_paren_fails() {
    assert!(parse_script("Transform(").is_err());
}

#[test]
fn test_unterminated_quote_fails() {
    assert!(parse_script("Extract(file=\"data.csv)").is_err());
}

#[test]
fn test_missing_value_fails() {
    assert!(parse_script("Extract(file=)").is_err());
}

#[test]
fn test_trailing_comma_fails() {
    assert!(parse_script("Extract(file=a,)").is_err());
}

#[test]
fn test_required_arg_missing_parameter() {
    let commands = parse_script("Extract()").unwrap();
    let result = commands[0].required_arg("file");
    assert!(matches!(
        result,
        Err(ScriptError::MissingParameter { .. })
    ));
}

#[test]
fn test_flag_argument() {
    let commands = parse_script("Initialize(overwrite=true)").unwrap();
    assert!(commands[0].flag("overwrite"));
    let commands = parse_script("Initialize()").unwrap();
    assert!(!commands[0].flag("overwrite"));
}
