use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::record_field;

/// Render the two result sets as tables, followed by warnings and the
/// methodology line.
pub fn print_table(value: &Value) {
    let Some(result) = value.get("result") else {
        println!("{}", value);
        return;
    };

    print_result_set("Qualified", result.get("qualified"));
    println!();
    print_result_set("Near qualified", result.get("near_qualified"));

    if let Some(evaluated) = result.get("candidates_evaluated") {
        println!("\nCandidates evaluated: {}", evaluated);
    }
    if result.get("cancelled").and_then(Value::as_bool) == Some(true) {
        println!("Run was cancelled before the full candidate space was covered.");
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_result_set(title: &str, rows: Option<&Value>) {
    let rows = match rows.and_then(Value::as_array) {
        Some(rows) => rows,
        None => return,
    };

    println!("{} ({})", title, rows.len());
    if rows.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "#",
        "Net profit",
        "Total revenue",
        "Deal revenue",
        "Coaching revenue",
        "Clients",
        "Workload",
        "Plan",
    ]);
    for (i, row) in rows.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            record_field(row, "net_profit"),
            record_field(row, "total_revenue"),
            record_field(row, "deal_revenue"),
            record_field(row, "coaching_revenue"),
            record_field(row, "coaching_total"),
            record_field(row, "workload_score"),
            record_field(row, "plan_summary"),
        ]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}
