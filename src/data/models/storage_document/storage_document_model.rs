use serde::Deserialize;
use serde_json::{Map, Value};

/// On-disk layout of document storage:
/// `{ productId: { deviceId: { "status": 0|1 } } }`.
///
/// Only the root is required to be an object. Entries are inspected lazily so
/// that one malformed entry does not hide the others.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct StorageDocumentModel(Map<String, Value>);

impl StorageDocumentModel {
    pub(crate) fn status(&self, product_id: &str, device_id: &str) -> Option<&Value> {
        self.0.get(product_id)?.get(device_id)?.get("status")
    }
}

/// Whether a stored status loosely equals 1.
pub(crate) fn is_active_status(status: &Value) -> bool {
    match status {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|f| f == 1.0),
        _ => false,
    }
}
