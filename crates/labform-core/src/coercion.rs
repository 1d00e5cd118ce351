//! Coercion and rendering of loosely-typed entered values.
//!
//! Entered values come straight from form widgets, so a numeric reading may
//! arrive as a JSON number or as text. Nothing here fails loudly: a value
//! that cannot be read as a number is simply `None`.

use serde_json::Value;

/// Read a value as a number.
///
/// Numbers pass through, booleans read as `1.0`/`0.0`, strings are parsed
/// after trimming (underscores between digits allowed, as in `1_000`), and
/// every other shape (null, list, object) yields `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse::<f64>().ok();
    }

    let chars: Vec<char> = text.chars().collect();
    let separators_ok = chars.iter().enumerate().all(|(i, c)| {
        *c != '_'
            || (i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit()))
    });
    if !separators_ok {
        return None;
    }

    text.replace('_', "").parse::<f64>().ok()
}

/// True for a string that is empty once trimmed.
pub fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

/// Render a float the way form messages show bounds: `10.0`, `12.5`, `1e+16`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return scientific(value);
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn scientific(value: f64) -> String {
    let rendered = format!("{:e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

/// Render a value as text, used for exact-length checks.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr(other),
    }
}

fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(format_number).unwrap_or_default(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(key, item)| format!("'{}': {}", key, repr(item)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}
