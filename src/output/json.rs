use super::Record;

pub fn format<R: Record>(record: &R) -> String {
    serde_json::to_string(record).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
}
