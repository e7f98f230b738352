//! Top-level input documents
//!
//! Accepted shapes:
//!
//! ```text
//! { "definitions": { ... } }
//! { "definitions": { ... }, "schema": { <root fragment> } }
//! { "schema": { ..., "definitions": { ... } } }
//! ```

use crate::fragment::{Definitions, SchemaFragment};
use crate::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    pub definitions: Definitions,
    /// Root schema, walked under the `#/root` identity
    pub root: Option<SchemaFragment>,
}

impl SchemaDocument {
    pub fn from_definitions(definitions: Definitions) -> Self {
        Self {
            definitions,
            root: None,
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::InvalidDocument("document must be a JSON object".to_string()))?;

        let schema = obj.get("schema");
        let definitions = match (obj.get("definitions"), schema) {
            (Some(definitions), _) => Definitions::from_value(definitions)?,
            (None, Some(schema)) => match schema.get("definitions") {
                Some(nested) => Definitions::from_value(nested)?,
                None => Definitions::new(),
            },
            (None, None) => return Err(Error::MissingDefinitions),
        };

        Ok(Self {
            definitions,
            root: schema.map(SchemaFragment::from_value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definitions_only() {
        let doc = SchemaDocument::from_value(&json!({"definitions": {"A": {}}})).unwrap();
        assert_eq!(doc.definitions.len(), 1);
        assert!(doc.root.is_none());
    }

    #[test]
    fn test_nested_definitions_under_schema() {
        let doc = SchemaDocument::from_json_str(
            r##"{"schema": {"$ref": "#/definitions/A", "definitions": {"A": {"type": "string"}}}}"##,
        )
        .unwrap();
        assert!(doc.definitions.contains_key("A"));
        assert_eq!(doc.root.as_ref().map(SchemaFragment::kind), Some("ref"));
    }

    #[test]
    fn test_top_level_definitions_take_precedence() {
        let doc = SchemaDocument::from_value(&json!({
            "definitions": {"Top": {}},
            "schema": {"definitions": {"Nested": {}}}
        }))
        .unwrap();
        assert!(doc.definitions.contains_key("Top"));
        assert!(!doc.definitions.contains_key("Nested"));
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            SchemaDocument::from_value(&json!({"title": "nothing"})),
            Err(Error::MissingDefinitions)
        ));
        assert!(matches!(
            SchemaDocument::from_value(&json!("text")),
            Err(Error::InvalidDocument(_))
        ));
        assert!(matches!(
            SchemaDocument::from_json_str("{not json"),
            Err(Error::Serialization(_))
        ));
    }
}
