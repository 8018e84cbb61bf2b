use serde_json::Value;

use super::format_scalar;

/// Print just the periodic payment (or the closest headline figure).
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", headline(result_obj));
}

fn headline(result: &Value) -> String {
    // Schedules carry the rounded payment in their summary
    if let Some(payment) = result.get("summary").and_then(|s| s.get("payment")) {
        return format_scalar(payment);
    }

    let priority_keys = ["payment_rounded", "payment", "final_balance"];
    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }
        if let Some(points) = map.get("points").and_then(Value::as_array) {
            return format!("{} points", points.len());
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_headline_is_rounded_payment() {
        let result = json!({"payment": "659.9557", "summary": {"payment": "659.96"}});
        assert_eq!(headline(&result), "659.96");
    }

    #[test]
    fn test_payment_headline() {
        let result = json!({"payment": "659.9557", "payment_rounded": "659.96"});
        assert_eq!(headline(&result), "659.96");
    }

    #[test]
    fn test_chart_headline() {
        let result = json!({"title": "Loan Amortization Graph", "points": [{}, {}]});
        assert_eq!(headline(&result), "2 points");
    }
}
