use super::*;
use crate::duckdb::DuckDbDialect;
use silo_core::config::SourceConfig;
use silo_core::pdm::PdmSchema;
use silo_core::snapshot::SnapshotRange;

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
fn test_quote_literal_escapes() {
    assert_eq!(quote_literal("o'brien"), "'o''brien'");
}

#[test]
fn test_concat_prefix_infix_suffix() {
    let dialect = DuckDbDialect;
    let key = dialect.concat(&["a".to_string(), "b".to_string()]);
    assert_eq!(key, "CONCAT(a, '#', b)");
}

#[test]
fn test_initialize_ddl_sequences_before_tables() {
    let dialect = DuckDbDialect;
    let stmts = dialect.initialize_ddl(&quotes_schema());

    let first_table = stmts
        .iter()
        .position(|s| s.starts_with("CREATE TABLE"))
        .unwrap();
    let last_sequence = stmts
        .iter()
        .rposition(|s| s.starts_with("CREATE SEQUENCE"))
        .unwrap();
    assert!(last_sequence < first_table);
}

#[test]
fn test_initialize_ddl_creates_bookkeeping_table() {
    let dialect = DuckDbDialect;
    let stmts = dialect.initialize_ddl(&quotes_schema());
    let snapshots = stmts
        .iter()
        .find(|s| s.starts_with("CREATE TABLE snapshots"))
        .unwrap();
    assert!(snapshots.contains("table_name"));
    assert!(snapshots.contains("last_loaded_id"));
}

#[test]
fn test_insert_facts_is_watermark_gated() {
    let dialect = DuckDbDialect;
    let sql = dialect.insert_facts_sql(&quotes_schema());
    assert!(sql.starts_with("INSERT INTO f_quotes"));
    assert!(sql.contains("genid > (SELECT COALESCE(MAX(last_loaded_id), 0) FROM snapshots WHERE table_name = 'f_quotes')"));
    assert!(sql.contains("atod(price)"));
    assert!(sql.contains("TRY_STRPTIME(traded_on, '%Y-%m-%d')"));
}

#[test]
fn test_populate_lookup_deduplicates() {
    let dialect = DuckDbDialect;
    let schema = quotes_schema();
    let lookup = schema.lookup_tables()[0];
    let sql = dialect.populate_lookup_sql(&schema, lookup);
    assert_eq!(
        sql,
        "INSERT INTO lk_quotes_company (value) SELECT DISTINCT CONCAT(company) FROM o_quotes \
         WHERE CONCAT(company) NOT IN (SELECT value FROM lk_quotes_company)"
    );
}

#[test]
fn test_resolve_lookup_fk_joins_source() {
    let dialect = DuckDbDialect;
    let schema = quotes_schema();
    let fk = schema.fact_table().foreign_key_columns()[0];
    let lookup = schema.lookup_tables()[0];
    let sql = dialect.resolve_lookup_fk_sql(&schema, fk, lookup);
    assert!(sql.starts_with("UPDATE f_quotes SET company_id = lk_quotes_company.id"));
    assert!(sql.contains("f_quotes.id = o_quotes.genid"));
    assert!(sql.contains("lk_quotes_company.value = CONCAT(o_quotes.company)"));
}

#[test]
fn test_record_snapshot_uses_fact_watermark() {
    let dialect = DuckDbDialect;
    let sql = dialect.record_snapshot_sql(&quotes_schema());
    assert_eq!(
        sql,
        "INSERT INTO snapshots (table_name, last_loaded_id) SELECT 'f_quotes', COALESCE(MAX(id), 0) FROM f_quotes"
    );
}

#[test]
fn test_load_part_without_filter() {
    let dialect = DuckDbDialect;
    let sql = dialect.load_part_sql(
        "lk_quotes_company",
        &["id".to_string(), "value".to_string()],
        "/tmp/out.csv",
        None,
    );
    assert!(sql.contains("SELECT id, value FROM lk_quotes_company"));
    assert!(!sql.contains("WHERE"));
}

#[test]
fn test_load_part_with_ranges() {
    let dialect = DuckDbDialect;
    let ranges = vec![
        SnapshotRange {
            id: 1,
            first: 1,
            last: 5,
        },
        SnapshotRange {
            id: 3,
            first: 10,
            last: 20,
        },
    ];
    let sql = dialect.load_part_sql(
        "f_quotes",
        &["id".to_string()],
        "/tmp/out.csv",
        Some(&ranges),
    );
    assert!(sql.contains("WHERE id BETWEEN 1 AND 5 OR id BETWEEN 10 AND 20"));
}

#[test]
fn test_load_part_with_empty_selection() {
    let dialect = DuckDbDialect;
    let sql = dialect.load_part_sql("f_quotes", &["id".to_string()], "/tmp/out.csv", Some(&[]));
    assert!(sql.contains("WHERE 1 = 0"));
}

#[test]
fn test_drop_ddl_tolerates_missing_objects() {
    let dialect = DuckDbDialect;
    let stmts = dialect.drop_ddl(&quotes_schema());
    assert!(stmts.iter().all(|s| s.contains("IF EXISTS")));
    assert!(stmts
        .iter()
        .any(|s| s == "DROP TABLE IF EXISTS snapshots"));
}
