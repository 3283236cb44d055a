use serde_json::{Map, Value};
use std::fmt::Write;
use tabled::{builder::Builder, Table};

use super::{format_cell, is_row_array};

/// Render output as tables using the tabled crate.
pub fn render_table(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => render_result(&mut out, result, map),
            _ => render_object(&mut out, map),
        },
        Value::Array(arr) => render_rows(&mut out, arr),
        _ => {
            let _ = writeln!(out, "{}", value);
        }
    }
    out
}

fn render_result(out: &mut String, result: &Map<String, Value>, envelope: &Map<String, Value>) {
    render_object(out, result);

    for (key, val) in result {
        if let Value::Array(rows) = val {
            if is_row_array(val) {
                let _ = writeln!(out, "\n{}:", key);
                render_rows(out, rows);
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                let _ = writeln!(out, "  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        let _ = writeln!(out, "\nMethodology: {}", meth);
    }
}

/// Two-column field/value table of the scalar fields of an object.
fn render_object(out: &mut String, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map.iter().filter(|(_, v)| !is_row_array(v)) {
        builder.push_record([key.as_str(), &format_cell(val)]);
    }
    let _ = writeln!(out, "{}", Table::from(builder));
}

fn render_rows(out: &mut String, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        let _ = writeln!(out, "(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(format_cell).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    let _ = writeln!(out, "{}", Table::from(builder));
}
