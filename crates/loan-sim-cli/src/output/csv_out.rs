use serde_json::{Map, Value};
use std::io;

use super::{format_cell, is_row_array};

/// Write output as CSV to stdout.
///
/// A simulation writes its schedule as rows; a product listing writes one
/// row per product; anything else becomes `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        tracing::error!(error = %e, "CSV output failed");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match body.values().find(|v| is_row_array(v)) {
                Some(Value::Array(rows)) => write_rows(wtr, rows)?,
                _ => write_pairs(wtr, body)?,
            }
        }
        Value::Array(arr) => write_rows(wtr, arr)?,
        _ => wtr.write_record([format_cell(value)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_pairs<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_cell(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for item in arr {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(format_cell).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
