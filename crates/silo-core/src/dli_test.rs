use super::*;
use std::io::Write;

#[test]
fn test_load_dli() {
    let yaml = r#"
name: quotes
parts:
  - file_name: f_quotes.csv
    table: f_quotes
    columns: [id, f_price, company_id]
  - file_name: lk_quotes_company.csv
    table: lk_quotes_company
    columns: [id, value]
"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let dli = Dli::load(file.path()).unwrap();
    assert_eq!(dli.name, "quotes");
    assert_eq!(dli.parts.len(), 2);
    assert_eq!(
        dli.parts[0].columns,
        vec!["id", "f_price", "company_id"]
    );
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = "name: x\nparts: []\nextra: 1\n";
    let result: Result<Dli, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}
