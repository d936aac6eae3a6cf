use serde_json::Value;

/// Loose readers for values coming out of the OS Places JSON, where numbers
/// are sometimes sent as strings and the other way around.
pub trait LenientValueExtension {
    fn as_text(&self) -> Option<String>;
    fn as_float(&self) -> Option<f64>;
    fn as_grid_unit(&self) -> Option<u32>;
    fn coerce_integer(&self) -> i64;
    fn is_truthy(&self) -> bool;
}

impl LenientValueExtension for Option<&Value> {
    fn as_text(&self) -> Option<String> {
        match self {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        let value = match self {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    fn as_grid_unit(&self) -> Option<u32> {
        self.as_float()
            .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v.trunc() as u32)
    }

    fn coerce_integer(&self) -> i64 {
        match self {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|v| v.trunc() as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => leading_integer(s),
            Some(Value::Bool(true)) => 1,
            _ => 0,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty() && s != "0",
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }
}

// "1445abc" -> 1445, "abc" -> 0
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
