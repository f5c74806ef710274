//! Inspection request parsed from the host's hook payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the host laid out the tool arguments in the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{"tool_name": ..., "tool_input": {"file_path": ..., ...}}`
    Nested,
    /// `{"file_path": ..., "content": ...}` at the top level
    Flat,
}

/// One proposed write/edit, as seen by a hook.
///
/// Every field resolves to a defined default when the payload omits it or
/// carries a non-string value, so predicates never have to deal with absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRequest {
    /// Host tool being attempted (e.g. "Write", "Edit"); empty when absent
    pub tool_name: String,
    /// Target path of the write/edit; empty when absent
    pub file_path: String,
    /// Full proposed content (Write); empty when absent
    pub content: String,
    /// Replacement fragment (Edit); empty when absent
    pub new_string: String,
    pub shape: PayloadShape,
}

impl InspectionRequest {
    /// Parse raw stdin bytes.
    ///
    /// Returns `None` for anything that is not a JSON object: empty input,
    /// truncated documents, arrays, scalars.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(raw).ok()?;
        Self::from_value(&value)
    }

    /// Build a request from an already-decoded payload.
    pub fn from_value(value: &Value) -> Option<Self> {
        let top = value.as_object()?;

        let (args, shape) = match top.get("tool_input").and_then(Value::as_object) {
            Some(nested) => (nested, PayloadShape::Nested),
            None => (top, PayloadShape::Flat),
        };

        Some(Self {
            tool_name: string_field(top, "tool_name"),
            file_path: string_field(args, "file_path"),
            content: string_field(args, "content"),
            new_string: string_field(args, "new_string"),
            shape,
        })
    }

    /// The text being written: `content` if non-empty, else `new_string`.
    pub fn text(&self) -> &str {
        if self.content.is_empty() {
            &self.new_string
        } else {
            &self.content
        }
    }

    /// Final path component of `file_path`.
    pub fn basename(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(self.file_path.as_str())
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_payload() {
        let raw = json!({
            "tool_name": "Write",
            "tool_input": {"file_path": "a/b.ts", "content": "x"}
        })
        .to_string();

        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.tool_name, "Write");
        assert_eq!(req.file_path, "a/b.ts");
        assert_eq!(req.text(), "x");
        assert_eq!(req.shape, PayloadShape::Nested);
    }

    #[test]
    fn test_parse_flat_payload() {
        let raw = r#"{"file_path": "agent.py", "new_string": "Agent("}"#;

        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.tool_name, "");
        assert_eq!(req.file_path, "agent.py");
        assert_eq!(req.text(), "Agent(");
        assert_eq!(req.shape, PayloadShape::Flat);
    }

    #[test]
    fn test_malformed_input_is_none() {
        assert!(InspectionRequest::parse(b"").is_none());
        assert!(InspectionRequest::parse(b"{\"tool_name\": \"Wri").is_none());
        assert!(InspectionRequest::parse(b"[1, 2]").is_none());
        assert!(InspectionRequest::parse(b"\"Write\"").is_none());
    }

    #[test]
    fn test_non_string_fields_default_to_empty() {
        let raw = json!({
            "tool_name": 7,
            "tool_input": {"file_path": null, "content": ["x"]}
        })
        .to_string();

        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.tool_name, "");
        assert_eq!(req.file_path, "");
        assert_eq!(req.text(), "");
    }

    #[test]
    fn test_non_object_tool_input_falls_back_to_flat() {
        let raw = json!({"tool_input": "oops", "file_path": "x.py"}).to_string();

        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.shape, PayloadShape::Flat);
        assert_eq!(req.file_path, "x.py");
    }

    #[test]
    fn test_first_non_empty_text_wins() {
        let raw = json!({
            "tool_input": {"file_path": "f", "content": "", "new_string": "edit"}
        })
        .to_string();
        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.text(), "edit");

        let raw = json!({
            "tool_input": {"file_path": "f", "content": "full", "new_string": "edit"}
        })
        .to_string();
        let req = InspectionRequest::parse(raw.as_bytes()).unwrap();
        assert_eq!(req.text(), "full");
    }

    #[test]
    fn test_basename() {
        let req = InspectionRequest::from_value(&json!({"file_path": "ios/Models/UserModel.swift"}))
            .unwrap();
        assert_eq!(req.basename(), "UserModel.swift");

        let req = InspectionRequest::from_value(&json!({"file_path": "plain.kt"})).unwrap();
        assert_eq!(req.basename(), "plain.kt");
    }
}
