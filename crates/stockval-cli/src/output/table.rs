use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_value;

/// Format output as a table. Computation envelopes get their result
/// section as the table body with warnings and methodology as footers.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_object_table(result);
                print_envelope_footer(map);
            } else {
                print_object_table(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_object_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        // Nested maps (e.g. intrinsic values per rate) get one row each.
        if let Value::Object(nested) = val {
            for (nested_key, nested_val) in nested {
                builder.push_record([
                    format!("{key}.{nested_key}"),
                    render_value(nested_val),
                ]);
            }
        } else {
            builder.push_record([key.clone(), render_value(val)]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", render_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(render_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_footer(envelope: &serde_json::Map<String, Value>) {
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
    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}
