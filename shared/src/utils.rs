use serde_json::{Map, Value};
use std::collections::BTreeMap;

const SENSITIVE_MARKERS: [&str; 3] = ["password", "secret", "token"];

/// Whether an attribute name should never reach the logs verbatim
pub fn is_sensitive_attribute(name: &str) -> bool {
    let name = name.to_lowercase();
    SENSITIVE_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Copy of the user attributes safe to log, sorted by name
pub fn redacted_attributes(attributes: &Map<String, Value>) -> BTreeMap<&str, String> {
    attributes
        .iter()
        .map(|(name, value)| {
            let shown = if is_sensitive_attribute(name) {
                "[REDACTED]".to_string()
            } else {
                match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                }
            };
            (name.as_str(), shown)
        })
        .collect()
}
