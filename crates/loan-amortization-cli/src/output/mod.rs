pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Envelopes, chart figures and bare schedule rows all print as-is.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to serialize loan output: {e}"),
    }
}

/// The first array of row objects inside a result: the schedule table or
/// the chart's point series.
pub(crate) fn find_rows(result: &Value) -> Option<(&str, &Vec<Value>)> {
    result.as_object()?.iter().find_map(|(key, val)| match val {
        Value::Array(items) if items.first().is_some_and(Value::is_object) => {
            Some((key.as_str(), items))
        }
        _ => None,
    })
}

/// Render a scalar JSON value the way a person would type it.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_rows_picks_object_array() {
        let result = json!({
            "payment": "659.96",
            "tags": ["a", "b"],
            "schedule": [{"Period": 0, "Balance": "1000"}],
        });
        let (key, rows) = find_rows(&result).unwrap();
        assert_eq!(key, "schedule");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_find_rows_none_for_flat_result() {
        assert!(find_rows(&json!({"payment": "1.00"})).is_none());
    }
}
