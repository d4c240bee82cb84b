use serde_json::Value;

use super::render_value;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls
/// back to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "discount_rate",
        "intrinsic_values",
        "f_score",
        "score",
        "beta",
        "one_year_momentum",
        "cagr",
    ];

    if let Value::Object(map) = result {
        for key in priority_keys {
            if let Some(val) = map.get(key) {
                println!("{}", render_value(val));
                return;
            }
        }
        if let Some((_, val)) = map.iter().next() {
            println!("{}", render_value(val));
            return;
        }
    }
    println!("{}", render_value(result));
}
