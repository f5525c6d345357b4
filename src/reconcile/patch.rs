//! JSON Patch documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Patch operation kinds the reconciler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
    Add,
}

/// One operation addressed by a JSON pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: Value,
}

/// Ordered list of patch operations, serialised as a JSON Patch array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument {
    operations: Vec<PatchOperation>,
}

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, path: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push(PatchOp::Replace, path, value)
    }

    pub fn add(&mut self, path: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push(PatchOp::Add, path, value)
    }

    fn push(&mut self, op: PatchOp, path: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.operations.push(PatchOperation {
            op,
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    /// Paths in emission order.
    pub fn paths(&self) -> Vec<&str> {
        self.operations.iter().map(|o| o.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply the operations to a document in order.
    ///
    /// `replace` requires the target to exist. `add` inserts into an array
    /// (`-` appends) or sets an object member.
    pub fn apply(&self, document: &mut Value) -> Result<()> {
        for operation in &self.operations {
            match operation.op {
                PatchOp::Replace => {
                    let target = document.pointer_mut(&operation.path).ok_or_else(|| {
                        Error::structural(format!("patch target {} does not exist", operation.path))
                    })?;
                    *target = operation.value.clone();
                }
                PatchOp::Add => add_at(document, &operation.path, operation.value.clone())?,
            }
        }
        Ok(())
    }
}

fn add_at(document: &mut Value, path: &str, value: Value) -> Result<()> {
    let (parent_path, key) = match path.rfind('/') {
        Some(split) => (&path[..split], unescape(&path[split + 1..])),
        None => return Err(Error::structural(format!("invalid patch path {}", path))),
    };
    let parent = document
        .pointer_mut(parent_path)
        .ok_or_else(|| Error::structural(format!("patch parent {} does not exist", parent_path)))?;

    match parent {
        Value::Array(items) if key == "-" => items.push(value),
        Value::Array(items) => {
            let index: usize = key
                .parse()
                .ok()
                .filter(|i| *i <= items.len())
                .ok_or_else(|| Error::structural(format!("invalid array index in {}", path)))?;
            items.insert(index, value);
        }
        Value::Object(members) => {
            members.insert(key, value);
        }
        _ => return Err(Error::structural(format!("patch parent {} is not a container", parent_path))),
    }
    Ok(())
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let mut patch = PatchDocument::new();
        patch
            .replace("/expression", "return 1;")
            .add("/subjects/-", json!({ "username": "admin" }));

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([
                { "op": "replace", "path": "/expression", "value": "return 1;" },
                { "op": "add", "path": "/subjects/-", "value": { "username": "admin" } },
            ])
        );
    }

    #[test]
    fn test_apply_replace_and_add() {
        let mut document = json!({
            "expression": "old",
            "subjects": [{ "username": "a" }],
            "states": [{ "name": "Draft", "assignToExpression": "" }],
        });

        let mut patch = PatchDocument::new();
        patch
            .replace("/expression", "new")
            .replace("/states/0/assignToExpression", "x")
            .add("/subjects/-", json!({ "username": "b" }))
            .add("/description", "d");
        patch.apply(&mut document).unwrap();

        assert_eq!(
            document,
            json!({
                "expression": "new",
                "description": "d",
                "subjects": [{ "username": "a" }, { "username": "b" }],
                "states": [{ "name": "Draft", "assignToExpression": "x" }],
            })
        );
    }

    #[test]
    fn test_replace_missing_target_fails() {
        let mut document = json!({ "states": [] });
        let mut patch = PatchDocument::new();
        patch.replace("/states/0/assignToExpression", "x");
        assert!(patch.apply(&mut document).is_err());
    }

    #[test]
    fn test_empty_document() {
        let patch = PatchDocument::new();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "[]");
    }
}
