use serde_json::Value;

use super::record_field;

/// Print just the headline answer: the best retained plan's net profit.
pub fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    if let Some(qualified) = result.get("qualified").and_then(Value::as_array) {
        let near_best = result
            .get("near_qualified")
            .and_then(Value::as_array)
            .and_then(|rows| rows.first());
        if let Some(best) = qualified.first() {
            println!(
                "{} qualified; best net profit {}",
                qualified.len(),
                record_field(best, "net_profit")
            );
        } else if let Some(best) = near_best {
            println!(
                "no qualified plans; best near miss {}",
                record_field(best, "net_profit")
            );
        } else {
            println!("no qualifying plans");
        }
        return;
    }

    // Cardinality estimates and other flat reports fall back to their
    // first field.
    if let Some((key, val)) = result.as_object().and_then(|map| map.iter().next()) {
        println!("{}: {}", key, super::display_value(val));
        return;
    }

    println!("{}", result);
}
