//! Schema fragments
//!
//! A fragment is classified once, when it is parsed, into exactly one of the
//! shapes the graph builder understands. When a JSON object populates several
//! of the recognized keywords the first shape in this order wins:
//! `$ref`, `anyOf`, `allOf`, `properties`, array with `items`, `type`.
//! Anything else becomes [`SchemaFragment::Unknown`].

use crate::{Error, Result};
use ahash::AHashMap;
use serde_json::{Map, Value};

/// Element schema(s) of an array fragment
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItems {
    /// `items` is a single schema applied to every element
    Single(Box<SchemaFragment>),
    /// `items` is a list of positional schemas
    Tuple(Vec<SchemaFragment>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaFragment {
    Ref {
        reference: String,
        title: Option<String>,
    },
    AnyOf {
        variants: Vec<SchemaFragment>,
        title: Option<String>,
    },
    AllOf {
        parts: Vec<SchemaFragment>,
        title: Option<String>,
    },
    Properties {
        properties: Vec<(String, SchemaFragment)>,
        title: Option<String>,
    },
    Array {
        items: ArrayItems,
        title: Option<String>,
    },
    Type {
        types: Vec<String>,
        title: Option<String>,
    },
    Unknown {
        title: Option<String>,
    },
}

impl SchemaFragment {
    /// Classify a JSON value. Non-object values become `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self::from_object(obj),
            None => SchemaFragment::Unknown { title: None },
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let title = obj.get("title").and_then(Value::as_str).map(str::to_string);

        if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
            return SchemaFragment::Ref {
                reference: reference.to_string(),
                title,
            };
        }

        if let Some(variants) = obj.get("anyOf").and_then(Value::as_array) {
            return SchemaFragment::AnyOf {
                variants: variants.iter().map(Self::from_value).collect(),
                title,
            };
        }

        if let Some(parts) = obj.get("allOf").and_then(Value::as_array) {
            return SchemaFragment::AllOf {
                parts: parts.iter().map(Self::from_value).collect(),
                title,
            };
        }

        if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
            return SchemaFragment::Properties {
                properties: properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), Self::from_value(schema)))
                    .collect(),
                title,
            };
        }

        let is_array = obj.get("type").and_then(Value::as_str) == Some("array");
        if let (true, Some(items)) = (is_array, obj.get("items")) {
            let items = match items {
                Value::Array(list) => {
                    ArrayItems::Tuple(list.iter().map(Self::from_value).collect())
                }
                other => ArrayItems::Single(Box::new(Self::from_value(other))),
            };
            return SchemaFragment::Array { items, title };
        }

        match obj.get("type").and_then(parse_types) {
            Some(types) => SchemaFragment::Type { types, title },
            None => SchemaFragment::Unknown { title },
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            SchemaFragment::Ref { title, .. }
            | SchemaFragment::AnyOf { title, .. }
            | SchemaFragment::AllOf { title, .. }
            | SchemaFragment::Properties { title, .. }
            | SchemaFragment::Array { title, .. }
            | SchemaFragment::Type { title, .. }
            | SchemaFragment::Unknown { title } => title.as_deref(),
        }
    }

    /// Short name of the shape, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaFragment::Ref { .. } => "ref",
            SchemaFragment::AnyOf { .. } => "anyOf",
            SchemaFragment::AllOf { .. } => "allOf",
            SchemaFragment::Properties { .. } => "properties",
            SchemaFragment::Array { .. } => "array",
            SchemaFragment::Type { .. } => "type",
            SchemaFragment::Unknown { .. } => "unknown",
        }
    }
}

// `type` is either a single name or a list of names
fn parse_types(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(name) => Some(vec![name.clone()]),
        Value::Array(names) => Some(
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Named fragments in declaration order with lookup by key
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entries: Vec<(String, SchemaFragment)>,
    index: AHashMap<String, usize>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `definitions` JSON object
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            Error::InvalidDocument("'definitions' must be a JSON object".to_string())
        })?;

        let mut definitions = Self::new();
        for (key, schema) in obj {
            definitions.insert(key.clone(), SchemaFragment::from_value(schema));
        }
        Ok(definitions)
    }

    /// Add or replace a definition. Replacing keeps the original position.
    pub fn insert(&mut self, key: String, fragment: SchemaFragment) {
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 = fragment;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, fragment));
        }
    }

    pub fn get(&self, key: &str) -> Option<&SchemaFragment> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaFragment)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SchemaFragment)> for Definitions {
    fn from_iter<I: IntoIterator<Item = (String, SchemaFragment)>>(iter: I) -> Self {
        let mut definitions = Self::new();
        for (key, fragment) in iter {
            definitions.insert(key, fragment);
        }
        definitions
    }
}
