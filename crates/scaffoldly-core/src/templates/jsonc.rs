//! JSON-with-comments documents (package.json, devcontainer.json)
//!
//! Documents are edited through a concrete syntax tree, so comments,
//! indentation and key order of untouched properties are written back as
//! they were read.

use jsonc_parser::cst::{CstInputValue, CstObject, CstRootNode};
use jsonc_parser::ParseOptions;

/// Comments and trailing commas are accepted
pub fn parse_options() -> ParseOptions {
    ParseOptions {
        allow_comments: true,
        allow_trailing_commas: true,
        ..Default::default()
    }
}

/// A parsed document whose top-level value must be an object
pub struct Document {
    root: CstRootNode,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self, String> {
        let root = CstRootNode::parse(text, &parse_options()).map_err(|e| e.to_string())?;
        if root.object_value().is_none() {
            return Err("expected a JSON object".to_string());
        }
        Ok(Self { root })
    }

    fn object(&self) -> Result<CstObject, String> {
        self.root
            .object_value()
            .ok_or_else(|| "expected a JSON object".to_string())
    }

    /// Replace a property's value in place, appending the property if absent
    pub fn set_string(&self, key: &str, value: &str) -> Result<(), String> {
        let object = self.object()?;
        let value = CstInputValue::String(value.to_string());
        match object.get(key) {
            Some(prop) => {
                prop.set_value(value);
            }
            None => {
                object.append(key, value);
            }
        }
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), String> {
        if let Some(prop) = self.object()?.get(key) {
            prop.remove();
        }
        Ok(())
    }

    /// Document text with trailing whitespace trimmed
    pub fn to_text(&self) -> String {
        self.root.to_string().trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn value(text: &str) -> Value {
        jsonc_parser::parse_to_serde_value(text, &parse_options())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_set_string_keeps_comments_and_layout() {
        let doc = Document::parse("{\n  // The display name\n  \"name\": \"tpl\"\n}\n").unwrap();
        doc.set_string("name", "my-app").unwrap();
        assert_eq!(
            doc.to_text(),
            "{\n  // The display name\n  \"name\": \"my-app\"\n}"
        );
    }

    #[test]
    fn test_remove_keeps_other_properties_in_order() {
        let text = r#"{
  /* header */
  "name": "tpl",
  "version": "1.0.0",
  "description": "Template",
  "license": "MIT",
  "scripts": { "dev": "vite" }
}"#;
        let doc = Document::parse(text).unwrap();
        doc.remove("description").unwrap();
        doc.remove("license").unwrap();
        doc.remove("missing").unwrap();

        let out = doc.to_text();
        assert!(out.contains("/* header */"));
        let parsed = value(&out);
        assert_eq!(
            parsed,
            json!({ "name": "tpl", "version": "1.0.0", "scripts": { "dev": "vite" } })
        );
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "version", "scripts"]);
    }

    #[test]
    fn test_set_string_appends_missing_property() {
        let doc = Document::parse(r#"{"image": "node"}"#).unwrap();
        doc.set_string("name", "my-app").unwrap();
        assert_eq!(
            value(&doc.to_text()),
            json!({ "image": "node", "name": "my-app" })
        );
    }

    #[test]
    fn test_trailing_commas_are_accepted() {
        let doc = Document::parse("{\n  \"name\": \"tpl\",\n  \"a\": [1, 2,],\n}").unwrap();
        doc.set_string("name", "x").unwrap();
        assert_eq!(value(&doc.to_text())["name"], "x");
    }

    #[test]
    fn test_comment_markers_inside_strings_are_kept() {
        let text = r#"{"url": "https://example.com/*path*/", "q": "a // b"}"#;
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.to_text(), text);
    }

    #[test]
    fn test_rejects_non_object_and_invalid_documents() {
        assert!(Document::parse("[1, 2]").is_err());
        assert!(Document::parse("{\"name\": ").is_err());
    }
}
