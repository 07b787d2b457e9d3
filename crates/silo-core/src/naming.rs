//! Identifier and date-format conventions shared by the PDM and the SQL
//! dialect drivers.

/// Autoincrement row id on the source table.
pub const SOURCE_ROW_ID: &str = "genid";

/// Row id on the fact table; carries the source row id it was loaded from.
pub const FACT_ROW_ID: &str = "id";

/// Synthetic primary key on lookup tables.
pub const LOOKUP_ID: &str = "id";

/// Natural-key column on lookup tables (concatenated source values).
pub const LOOKUP_VALUE: &str = "value";

/// Snapshot bookkeeping table; its existence marks an initialized project.
pub const SNAPSHOTS_TABLE: &str = "snapshots";

/// Separator used when hashing several source columns into one lookup value.
pub const HASH_SEPARATOR: &str = "#";

/// Day offset assigned to dates that are empty or fail to parse. The
/// transform adds one to every offset, so the stored sentinel is this
/// value plus one.
pub const DATE_OFFSET_CEILING: i64 = 2_147_483_646;

/// Characters stripped from fact values before the decimal cast
/// (thousands separators, currency symbols).
pub const DISCARD_CHARS: &[&str] = &[",", "$"];

/// Table name prefixes for the staging schema.
pub const SOURCE_PREFIX: &str = "o_";
pub const FACT_PREFIX: &str = "f_";
pub const LOOKUP_PREFIX: &str = "lk_";

/// Normalize a user-supplied name into a safe SQL identifier: lowercase,
/// with every run of non-alphanumeric characters squashed to a single `_`.
pub fn format_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Convert a Java-style date pattern (`yyyy-MM-dd HH:mm:ss`) into a
/// strptime pattern (`%Y-%m-%d %H:%M:%S`) understood by the database
/// date-parsing functions. Unrecognized characters pass through verbatim.
pub fn convert_date_format(java_format: &str) -> String {
    let chars: Vec<char> = java_format.chars().collect();
    let mut out = String::with_capacity(java_format.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        match c {
            'y' if run >= 4 => {
                out.push_str("%Y");
                i += run;
            }
            'y' => {
                out.push_str("%y");
                i += run;
            }
            'M' => {
                out.push_str("%m");
                i += run;
            }
            'd' => {
                out.push_str("%d");
                i += run;
            }
            'H' => {
                out.push_str("%H");
                i += run;
            }
            'm' => {
                out.push_str("%M");
                i += run;
            }
            's' => {
                out.push_str("%S");
                i += run;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
