use super::*;

#[test]
fn test_format_identifier_lowercases() {
    assert_eq!(format_identifier("Quotes"), "quotes");
}

#[test]
fn test_format_identifier_squashes_separators() {
    assert_eq!(format_identifier("Stock  Quotes (EU)"), "stock_quotes_eu");
}

#[test]
fn test_format_identifier_strips_leading_and_trailing() {
    assert_eq!(format_identifier("  %name% "), "name");
}

#[test]
fn test_convert_date_format_date_only() {
    assert_eq!(convert_date_format("yyyy-MM-dd"), "%Y-%m-%d");
}

#[test]
fn test_convert_date_format_datetime() {
    assert_eq!(
        convert_date_format("yyyy-MM-dd HH:mm:ss"),
        "%Y-%m-%d %H:%M:%S"
    );
}

#[test]
fn test_convert_date_format_two_digit_year() {
    assert_eq!(convert_date_format("MM/dd/yy"), "%m/%d/%y");
}

#[test]
fn test_convert_date_format_passthrough() {
    assert_eq!(convert_date_format("dd.MM.yyyy"), "%d.%m.%Y");
}
