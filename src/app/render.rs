use crate::domain::model::Record;
use std::fmt::Write;

/// Names grouped under a heading per primary type. Expects `records` already
/// sorted by primary type.
pub fn grouped_by_type(title: &str, records: &[&Record]) -> String {
    let mut out = format!("{}:\n", title);
    let mut current_type: Option<&str> = None;

    for record in records {
        if current_type != Some(record.type1.as_str()) {
            current_type = Some(record.type1.as_str());
            let _ = writeln!(out, "\n{}:", record.type1);
        }
        let _ = writeln!(out, "- {}", record.name);
    }

    out
}

/// Numbered listing in store order.
pub fn numbered_table(records: &[&Record]) -> String {
    let mut out = String::from("All available records:\n\n");
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:3}. {:<15} - Type: {:<10} - Pokedex: #{}",
            i + 1,
            record.name,
            record.type1,
            record.pokedex_number
        );
    }
    out
}

pub fn ability_matches(ability: &str, records: &[&Record]) -> String {
    if records.is_empty() {
        return format!("No records found with ability '{}'.\n", ability);
    }

    let mut out = format!("Records with ability '{}':\n\n", ability);
    for record in records {
        let _ = writeln!(out, "- {}", record.name);
    }
    out
}
