//! Request body decoding.
//!
//! Bodies are read as raw text so an empty body and broken JSON can be told
//! apart and reported with details. Property names are matched without
//! regard to case.

use serde_json::{Map, Value};
use shared::TaskRequest;

use crate::error::TaskError;

const FIELD_NAMES: &[&str] = &[
    "id",
    "titulo",
    "descricao",
    "status",
    "concluida",
    "criadaEm",
    "concluidaEm",
];

pub fn decode_task_request(body: &str) -> Result<TaskRequest, TaskError> {
    if body.trim().is_empty() {
        return Err(TaskError::invalid("Body is null or empty"));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| TaskError::invalid(format!("Invalid JSON format: {}", e)))?;

    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return Err(TaskError::invalid("Failed to deserialize task")),
        other => {
            return Err(TaskError::invalid(format!(
                "Invalid JSON format: expected an object, found {}",
                json_kind(&other)
            )))
        }
    };

    serde_json::from_value(Value::Object(canonical_keys(fields)))
        .map_err(|e| TaskError::invalid(format!("Invalid JSON format: {}", e)))
}

/// Both spellings of the completed flag land on `concluida`. When a body
/// carries both, `concluida` wins.
fn canonical_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let mut canonical = Map::new();
    for (key, value) in fields {
        if key.eq_ignore_ascii_case("concluido") {
            canonical.entry("concluida").or_insert(value);
            continue;
        }
        let key = FIELD_NAMES
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&key))
            .map(|name| name.to_string())
            .unwrap_or(key);
        canonical.insert(key, value);
    }
    canonical
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TaskStatus;

    fn message(err: TaskError) -> String {
        match err {
            TaskError::InvalidRequest(message) => message,
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_eq!(message(decode_task_request("").unwrap_err()), "Body is null or empty");
        assert_eq!(message(decode_task_request(" \n").unwrap_err()), "Body is null or empty");
    }

    #[test]
    fn null_body_is_rejected() {
        assert_eq!(
            message(decode_task_request("null").unwrap_err()),
            "Failed to deserialize task"
        );
    }

    #[test]
    fn broken_json_reports_details() {
        let msg = message(decode_task_request("{\"titulo\": ").unwrap_err());
        assert!(msg.starts_with("Invalid JSON format:"), "{}", msg);
    }

    #[test]
    fn non_object_is_rejected() {
        let msg = message(decode_task_request("[1, 2]").unwrap_err());
        assert!(msg.contains("an array"), "{}", msg);
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let msg = message(decode_task_request(r#"{"id": "seven"}"#).unwrap_err());
        assert!(msg.starts_with("Invalid JSON format:"), "{}", msg);
    }

    #[test]
    fn keys_match_case_insensitively() {
        let request = decode_task_request(
            r#"{"ID": 4, "Titulo": "Buy milk", "DESCRICAO": "2L", "Status": "concluído", "CRIADAEM": "2024-02-02T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(request.target_id(), 4);
        assert_eq!(request.title.as_deref(), Some("Buy milk"));
        assert_eq!(request.description.as_deref(), Some("2L"));
        assert_eq!(request.status, Some(TaskStatus::Completed));
        assert!(request.created_at.is_some());
    }

    #[test]
    fn both_completed_spellings_are_accepted_together() {
        let request =
            decode_task_request(r#"{"titulo": "x", "concluida": false, "Concluido": true}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("x"));
        assert_eq!(request.completed, Some(false));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let request = decode_task_request(r#"{"titulo": "x", "priority": 3}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("x"));
    }
}
