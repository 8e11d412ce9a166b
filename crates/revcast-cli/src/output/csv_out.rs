use serde_json::Value;
use std::io;

use super::record_field;

const COLUMNS: [&str; 9] = [
    "classification",
    "net_profit",
    "total_revenue",
    "deal_revenue",
    "coaching_revenue",
    "total_expense",
    "coaching_total",
    "workload_score",
    "plan_summary",
];

/// Write both result sets as one flat CSV to stdout, with a leading
/// `set` column distinguishing qualified from near-qualified rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let mut header = vec!["set"];
    header.extend(COLUMNS);
    let _ = wtr.write_record(&header);

    if let Some(result) = value.get("result") {
        for set in ["qualified", "near_qualified"] {
            if let Some(rows) = result.get(set).and_then(Value::as_array) {
                for row in rows {
                    let mut record = vec![set.to_string()];
                    record.extend(COLUMNS.iter().map(|key| record_field(row, key)));
                    let _ = wtr.write_record(&record);
                }
            }
        }
    }

    let _ = wtr.flush();
}
