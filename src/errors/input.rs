use serde_json::{Map, Value};

/// Keys read from the error value and never forwarded through the extra bag
pub const RECOGNIZED_KEYS: [&str; 6] = [
    "code",
    "field",
    "fieldMessage",
    "message",
    "status",
    "statusMessage",
];

/// An error value the formatter owns: a JSON object with a numeric HTTP `status`
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredError {
    pub status: u16,
    pub message: Option<Value>,
    pub status_message: Option<Value>,
    pub field: Option<Value>,
    pub field_message: Option<Value>,
    /// Remaining caller-supplied members, in input order
    pub other: Map<String, Value>,
}

impl StructuredError {
    /// Returns `None` for anything that is not an object carrying an integer
    /// `status` in the HTTP range.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let status = object.get("status").and_then(http_status)?;

        let other = object
            .iter()
            .filter(|(key, _)| !RECOGNIZED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            status,
            message: present(object.get("message")),
            status_message: present(object.get("statusMessage")),
            field: object.get("field").cloned(),
            field_message: present(object.get("fieldMessage")),
            other,
        })
    }

    /// Text of `field` as it reads inside the default field message
    pub fn field_text(&self) -> String {
        match &self.field {
            None => "undefined".to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Integral numbers in the HTTP status range, whether stored as int or float
fn http_status(value: &Value) -> Option<u16> {
    let code = match value.as_u64() {
        Some(code) => code,
        None => {
            let float = value.as_f64()?;
            if float.fract() != 0.0 || !(100.0..=999.0).contains(&float) {
                return None;
            }
            float as u64
        }
    };
    u16::try_from(code)
        .ok()
        .filter(|code| (100..=999).contains(code))
}

/// Null and absent values count as "not supplied"; empty strings and zero do not.
pub fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
