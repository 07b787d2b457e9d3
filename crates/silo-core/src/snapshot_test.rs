use super::*;

fn record(id: i64, last: i64) -> SnapshotRecord {
    SnapshotRecord {
        id,
        table_name: "f_quotes".to_string(),
        last_loaded_id: last,
    }
}

#[test]
fn test_ranges_empty() {
    assert!(snapshot_ranges(&[]).is_empty());
}

#[test]
fn test_ranges_single() {
    let ranges = snapshot_ranges(&[record(1, 5)]);
    assert_eq!(
        ranges,
        vec![SnapshotRange {
            id: 1,
            first: 1,
            last: 5
        }]
    );
}

#[test]
fn test_ranges_successive() {
    let ranges = snapshot_ranges(&[record(1, 5), record(2, 9), record(3, 20)]);
    assert_eq!(ranges[1].first, 6);
    assert_eq!(ranges[1].last, 9);
    assert_eq!(ranges[2].first, 10);
    assert_eq!(ranges[2].last, 20);
}

#[test]
fn test_display() {
    let text = record(2, 9).to_string();
    assert!(text.contains("snapshot 2"));
    assert!(text.contains("watermark=9"));
}
