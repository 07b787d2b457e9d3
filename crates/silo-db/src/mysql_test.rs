use super::*;
use crate::dialect::SqlDialect;
use silo_core::config::SourceConfig;
use silo_core::pdm::PdmSchema;

fn quotes_schema() -> PdmSchema {
    let yaml = r#"
name: quotes
columns:
  - name: company
    kind: attribute
  - name: price
    kind: fact
  - name: traded_on
    kind: date
    format: yyyy-MM-dd
"#;
    let config: SourceConfig = serde_yaml::from_str(yaml).unwrap();
    config.build_pdm().unwrap()
}

#[test]
fn test_autoincrement_syntax() {
    let syntax = MySqlDialect.autoincrement_column("o_quotes", "genid");
    assert!(syntax.setup.is_empty());
    assert_eq!(syntax.type_clause, "INT AUTO_INCREMENT PRIMARY KEY");
}

#[test]
fn test_extract_uses_load_data_infile() {
    let sql = MySqlDialect.extract_sql(&quotes_schema(), "/data/quotes.csv");
    assert!(sql.starts_with("LOAD DATA INFILE '/data/quotes.csv' INTO TABLE o_quotes"));
    assert!(sql.contains("OPTIONALLY ENCLOSED BY '\"'"));
    assert!(sql.ends_with("(company, price, traded_on)"));
}

#[test]
fn test_unload_uses_into_outfile() {
    let sql = MySqlDialect.unload_sql("SELECT id FROM f_quotes", "/out/f.csv");
    assert!(sql.starts_with("SELECT id FROM f_quotes INTO OUTFILE '/out/f.csv'"));
    assert!(sql.contains("FIELDS TERMINATED BY ','"));
}

#[test]
fn test_date_offset_uses_str_to_date() {
    let expr = MySqlDialect.date_to_day_offset("traded_on", "%Y-%m-%d");
    assert_eq!(
        expr,
        "IFNULL(DATEDIFF(STR_TO_DATE(traded_on, '%Y-%m-%d'), '1900-01-01'), 2147483646) + 1"
    );
}

#[test]
fn test_helper_function_strips_discard_chars() {
    let ddl = MySqlDialect.helper_function_ddl();
    assert_eq!(ddl[0], "DROP FUNCTION IF EXISTS ATOD");
    assert!(ddl[1].contains("REPLACE(REPLACE(str, ',', ''), '$', '')"));
    assert!(ddl[1].contains("RETURNS DECIMAL(15,4)"));
}

#[test]
fn test_update_with_join_multi_table_form() {
    let sql = MySqlDialect.update_with_join_sql(
        "f_quotes",
        &["o_quotes", "lk_quotes_company"],
        "company_id",
        "lk_quotes_company.id",
        "f_quotes.id = o_quotes.genid",
    );
    assert!(sql.starts_with("UPDATE f_quotes, o_quotes, lk_quotes_company SET f_quotes.company_id"));
}

#[test]
fn test_shared_dml_uses_mysql_hooks() {
    let sql = MySqlDialect.insert_facts_sql(&quotes_schema());
    assert!(sql.contains("ATOD(price)"));
    assert!(sql.contains("STR_TO_DATE(traded_on, '%Y-%m-%d')"));
}
