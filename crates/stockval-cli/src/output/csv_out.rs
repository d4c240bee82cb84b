use serde_json::Value;
use std::io;

use super::render_value;

/// Format output as CSV on stdout: field,value rows for objects, one
/// record per element for arrays of objects. Envelopes are unwrapped to
/// their result section.
pub fn print_csv(value: &Value) {
    let unwrapped = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut writer = csv::Writer::from_writer(io::stdout());
    let outcome = match unwrapped {
        Value::Object(map) => write_object(&mut writer, map),
        Value::Array(arr) => write_array(&mut writer, arr),
        other => writer
            .write_record([render_value(other)])
            .map_err(Into::into),
    };

    if let Err(e) = outcome.and_then(|_| writer.flush().map_err(Into::into)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_object(
    writer: &mut csv::Writer<io::Stdout>,
    map: &serde_json::Map<String, Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_record(["field", "value"])?;
    for (key, val) in map {
        if let Value::Object(nested) = val {
            for (nested_key, nested_val) in nested {
                writer.write_record([
                    format!("{key}.{nested_key}"),
                    render_value(nested_val),
                ])?;
            }
        } else {
            writer.write_record([key.clone(), render_value(val)])?;
        }
    }
    Ok(())
}

fn write_array(
    writer: &mut csv::Writer<io::Stdout>,
    arr: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            writer.write_record([render_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    writer.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }
    }
    Ok(())
}
