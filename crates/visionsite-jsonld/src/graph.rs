//! Serialization of assembled nodes into JSON-LD documents and `<script>` tags.

use serde::Serialize;
use serde_json::{Map, Value};
use visionsite_core::Result;

use crate::schema::SCHEMA_CONTEXT;

/// Serializes one node as a standalone document with its own `@context`.
pub fn standalone<T: Serialize>(node: &T) -> Result<Value> {
    let value = serde_json::to_value(node)?;
    Ok(with_context(value))
}

fn with_context(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut doc = Map::with_capacity(fields.len() + 1);
            doc.insert("@context".to_string(), Value::String(SCHEMA_CONTEXT.into()));
            doc.extend(fields);
            Value::Object(doc)
        }
        other => other,
    }
}

/// Several nodes sharing one `@context` under `@graph`.
#[derive(Debug, Default, Clone)]
pub struct JsonLdGraph {
    nodes: Vec<Value>,
}

impl JsonLdGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: Serialize>(&mut self, node: &T) -> Result<&mut Self> {
        self.nodes.push(serde_json::to_value(node)?);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("@context".to_string(), Value::String(SCHEMA_CONTEXT.into()));
        doc.insert("@graph".to_string(), Value::Array(self.nodes.clone()));
        Value::Object(doc)
    }

    pub fn to_script_tag(&self) -> Result<String> {
        script_tag(&self.to_value())
    }
}

/// Renders a `application/ld+json` script element. `</` is escaped so text
/// content can never close the element early.
pub fn script_tag(doc: &Value) -> Result<String> {
    let json = serde_json::to_string(doc)?;
    Ok(format!(
        r#"<script type="application/ld+json">{}</script>"#,
        json.replace("</", "<\\/")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Named;
    use serde_json::json;

    #[test]
    fn test_standalone_puts_context_first() {
        let doc = standalone(&Named::new("City", "Irvine")).unwrap();
        assert_eq!(doc["@context"], "https://schema.org");
        assert_eq!(doc["@type"], "City");
        let first = doc.as_object().unwrap().keys().next().unwrap().clone();
        assert_eq!(first, "@context");
    }

    #[test]
    fn test_graph_shares_context() {
        let mut graph = JsonLdGraph::new();
        graph.push(&Named::new("City", "Irvine")).unwrap();
        graph.push(&Named::new("City", "Tustin")).unwrap();

        let doc = graph.to_value();
        assert_eq!(graph.len(), 2);
        assert_eq!(doc["@graph"][1]["name"], "Tustin");
        assert!(doc["@graph"][0].get("@context").is_none());
    }

    #[test]
    fn test_script_tag_escapes_closing_tags() {
        let doc = json!({"text": "ends here </script><b>"});
        let tag = script_tag(&doc).unwrap();
        assert!(tag.starts_with(r#"<script type="application/ld+json">"#));
        assert_eq!(tag.matches("</script>").count(), 1);
        assert!(tag.contains(r"<\/script><b>"));
    }
}
