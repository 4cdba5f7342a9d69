use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

pub type RawRow = Map<String, Value>;

/// Reads a cell, treating JSON null and absent keys the same way.
pub fn cell<'a>(row: &'a RawRow, col: &str) -> Option<&'a Value> {
    match row.get(col) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

pub fn cell_str<'a>(row: &'a RawRow, col: &str) -> Option<&'a str> {
    cell(row, col)?.as_str()
}

/// String cell with surrounding whitespace removed; blank cells read as missing.
pub fn cell_trimmed(row: &RawRow, col: &str) -> Option<String> {
    let s = cell_str(row, col)?.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Lenient numeric read over the raw files: accepts numbers and numeric
/// strings. The placeholder sentinels the files use for "no value" ("NR",
/// empty or blank strings) read as missing; anything else non-numeric is a
/// data-integrity error for the caller to surface.
pub fn cell_f64(row: &RawRow, col: &str) -> Result<Option<f64>> {
    let Some(v) = cell(row, col) else {
        return Ok(None);
    };
    match v {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() || t.eq_ignore_ascii_case("NR") {
                return Ok(None);
            }
            t.parse::<f64>()
                .map(Some)
                .map_err(|_| anyhow!("non-numeric value {s:?} in column {col:?}"))
        }
        other => Err(anyhow!("unexpected {other} in numeric column {col:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> RawRow {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn cell_f64_accepts_numbers_and_numeric_strings() {
        let r = row(json!({"a": 3, "b": "2.5", "c": "1 "}));
        assert_eq!(cell_f64(&r, "a").unwrap(), Some(3.0));
        assert_eq!(cell_f64(&r, "b").unwrap(), Some(2.5));
        assert_eq!(cell_f64(&r, "c").unwrap(), Some(1.0));
    }

    #[test]
    fn cell_f64_reads_placeholders_as_missing() {
        let r = row(json!({"a": " ", "b": "", "c": "NR", "d": null}));
        for col in ["a", "b", "c", "d", "absent"] {
            assert_eq!(cell_f64(&r, col).unwrap(), None, "column {col}");
        }
    }

    #[test]
    fn cell_f64_rejects_garbage() {
        let r = row(json!({"a": "w/o", "b": true}));
        assert!(cell_f64(&r, "a").is_err());
        assert!(cell_f64(&r, "b").is_err());
    }

    #[test]
    fn cell_trimmed_strips_whitespace() {
        let r = row(json!({"Winner": " Player A ", "Loser": "  "}));
        assert_eq!(cell_trimmed(&r, "Winner").as_deref(), Some("Player A"));
        assert_eq!(cell_trimmed(&r, "Loser"), None);
    }
}
