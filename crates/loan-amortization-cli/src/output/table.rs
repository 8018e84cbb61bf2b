use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{find_rows, format_scalar};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields (nested objects flattened with dotted keys) go in a
/// Field/Value table; a schedule or point series is printed as its own
/// table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_result_table(value, &Map::new());
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut fields = Vec::new();
        flatten_fields("", res_map, &mut fields);
        if !fields.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in fields {
                builder.push_record([key, val]);
            }
            println!("{}", Table::from(builder));
        }

        if let Some((key, rows)) = find_rows(result) {
            println!("\n{}:", section_heading(key));
            print_array_table(rows);
        }
    } else {
        println!("{}", format_value(result));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Collect scalar fields, descending into nested objects. Arrays of rows
/// are left for their own table.
fn flatten_fields(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_fields(&name, inner, out),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {}
            _ => out.push((name, format_value(val))),
        }
    }
}

fn section_heading(key: &str) -> &str {
    match key {
        "schedule" => "Loan Schedule",
        "points" => "Loan Balance",
        other => other,
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        other => format_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_summary() {
        let result = json!({
            "payment": "659.9557",
            "summary": {"payment": "659.96", "final_balance": "0.05"},
            "schedule": [{"Period": 0}],
        });
        let mut fields = Vec::new();
        flatten_fields("", result.as_object().unwrap(), &mut fields);
        assert_eq!(
            fields,
            vec![
                ("payment".to_string(), "659.9557".to_string()),
                ("summary.payment".to_string(), "659.96".to_string()),
                ("summary.final_balance".to_string(), "0.05".to_string()),
            ]
        );
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(section_heading("schedule"), "Loan Schedule");
        assert_eq!(section_heading("rows"), "rows");
    }
}
