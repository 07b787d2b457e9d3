use super::*;
use std::io::Write;

const QUOTES_YAML: &str = r#"
name: quotes
columns:
  - name: company
    kind: attribute
  - name: sector
    kind: attribute
    lookup: industry
  - name: subsector
    kind: attribute
    lookup: industry
  - name: price
    kind: fact
  - name: traded_on
    kind: date
    format: yyyy-MM-dd
"#;

fn quotes_config() -> SourceConfig {
    let config: SourceConfig = serde_yaml::from_str(QUOTES_YAML).unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(QUOTES_YAML.as_bytes()).unwrap();
    let config = SourceConfig::load(file.path()).unwrap();
    assert_eq!(config.name, "quotes");
    assert_eq!(config.columns.len(), 5);
}

#[test]
fn test_load_missing_file() {
    let result = SourceConfig::load(std::path::Path::new("/nonexistent/project.yml"));
    assert!(matches!(result, Err(CoreError::IoWithPath { .. })));
}

#[test]
fn test_date_without_format_rejected() {
    let yaml = "name: p\ncolumns:\n  - name: d\n    kind: date\n";
    let config: SourceConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_duplicate_column_rejected() {
    let yaml = "name: p\ncolumns:\n  - name: a\n    kind: fact\n  - name: A\n    kind: fact\n";
    let config: SourceConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_build_pdm_tables() {
    let schema = quotes_config().build_pdm().unwrap();
    assert_eq!(schema.source_table().name, "o_quotes");
    assert_eq!(schema.fact_table().name, "f_quotes");

    // company gets its own lookup; sector+subsector share "industry"
    let lookups = schema.lookup_tables();
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[0].name, "lk_quotes_company");
    assert_eq!(lookups[1].name, "lk_quotes_industry");
    assert_eq!(lookups[1].source_columns, vec!["sector", "subsector"]);
}

#[test]
fn test_build_pdm_fact_columns() {
    let schema = quotes_config().build_pdm().unwrap();
    let fact = schema.fact_table();

    assert_eq!(fact.fact_columns()[0].name, "f_price");
    let date = fact.date_columns()[0];
    assert_eq!(date.name, "dt_traded_on");
    assert_eq!(date.format.as_deref(), Some("%Y-%m-%d"));

    let fks: Vec<&str> = fact
        .foreign_key_columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(fks, vec!["company_id", "industry_id"]);
}

#[test]
fn test_build_pdm_source_columns_raw() {
    let schema = quotes_config().build_pdm().unwrap();
    let source = schema.source_table();
    assert_eq!(source.columns.len(), 6);
    assert_eq!(source.autoincrement_column().unwrap().name, "genid");
}
