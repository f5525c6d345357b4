//! Read-only view over a fetched model document.

use serde_json::Value;

/// A model document as currently stored remotely.
///
/// Only used to find array positions and to check that entries exist; it is
/// never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDocument {
    root: Value,
}

impl RemoteDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> RemoteNode<'_> {
        RemoteNode { value: &self.root }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.root().get_string(key)
    }

    pub fn get_array(&self, key: &str) -> Option<RemoteArray<'_>> {
        self.root().get_array(key)
    }

    /// Whether the document's `name` is exactly `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.get_string("name") == Some(name)
    }

    /// The definition type an entity document is an instance of.
    pub fn instance_of(&self) -> Option<&str> {
        self.get_string("instanceOf")
    }

    pub fn into_value(self) -> Value {
        self.root
    }
}

impl From<Value> for RemoteDocument {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// A node of a [`RemoteDocument`].
#[derive(Debug, Clone, Copy)]
pub struct RemoteNode<'a> {
    value: &'a Value,
}

impl<'a> RemoteNode<'a> {
    pub fn get_string(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    pub fn get_array(&self, key: &str) -> Option<RemoteArray<'a>> {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(|items| RemoteArray { items })
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get_string("name")
    }
}

/// An array of a [`RemoteDocument`], addressed by position.
#[derive(Debug, Clone, Copy)]
pub struct RemoteArray<'a> {
    items: &'a [Value],
}

impl<'a> RemoteArray<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Nodes with their positions, in array order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, RemoteNode<'a>)> + 'a {
        let items = self.items;
        items
            .iter()
            .enumerate()
            .map(|(index, value)| (index, RemoteNode { value }))
    }

    /// Position of the first node matching `predicate`.
    pub fn index_where<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(RemoteNode<'a>) -> bool,
    {
        self.iter()
            .find(|(_, node)| predicate(*node))
            .map(|(index, _)| index)
    }
}
