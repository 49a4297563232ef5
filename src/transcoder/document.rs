//! Document model
//!
//! An owned tree of ordered mappings, sequences and classified scalars.
//! Mapping order is preserved because it is the output order.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::classifier::ScalarValue;

/// Ordered mapping with unique string keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite. An existing key keeps its position and the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// One node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(ScalarValue),
}

impl Node {
    /// String scalar node
    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(ScalarValue::Str(s.into()))
    }

    pub fn null() -> Self {
        Node::Scalar(ScalarValue::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(_) => "scalar",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Node::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow a string scalar
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }

    /// Child addressed by one path segment: a key for mappings, an index
    /// for sequences.
    fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Node::Mapping(m) => m.get(segment),
            Node::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Node::Scalar(_) => None,
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut Node> {
        match self {
            Node::Mapping(m) => m.get_mut(segment),
            Node::Sequence(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            Node::Scalar(_) => None,
        }
    }
}

impl From<ScalarValue> for Node {
    fn from(value: ScalarValue) -> Self {
        Node::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Node::Mapping(mapping)
    }
}

/// A parsed document; the root is always a mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    /// Look up a node by path
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get(first)?, |node, segment| node.child(segment))
    }

    pub fn get_mut(&mut self, path: &[&str]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get_mut(first)?;
        for segment in rest {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    /// Store `value` at `path`, creating intermediate mappings as needed.
    ///
    /// Scalars in the way are replaced by mappings; sequences are walked by
    /// index. Returns `false` for an empty path or an out-of-range index.
    pub fn set(&mut self, path: &[&str], value: Node) -> bool {
        set_in_mapping(&mut self.root, path, value)
    }

    /// Remove the key at `path`; returns whether it existed
    pub fn delete_key(&mut self, path: &[&str]) -> bool {
        let Some((last, parents)) = path.split_last() else {
            return false;
        };

        let parent = if parents.is_empty() {
            Some(&mut self.root)
        } else {
            self.get_mut(parents).and_then(Node::as_mapping_mut)
        };
        parent.is_some_and(|m| m.remove(last).is_some())
    }
}

fn set_in_mapping(mapping: &mut Mapping, path: &[&str], value: Node) -> bool {
    let Some((key, rest)) = path.split_first() else {
        return false;
    };
    if rest.is_empty() {
        mapping.insert(*key, value);
        return true;
    }

    if !mapping.contains_key(key) {
        mapping.insert(*key, Node::Mapping(Mapping::new()));
    }
    match mapping.get_mut(key) {
        Some(child) => set_in_node(child, rest, value),
        None => false,
    }
}

fn set_in_node(node: &mut Node, path: &[&str], value: Node) -> bool {
    match node {
        Node::Mapping(m) => set_in_mapping(m, path, value),
        Node::Sequence(items) => {
            let Some((index, rest)) = path.split_first() else {
                return false;
            };
            let Some(item) = index.parse::<usize>().ok().and_then(|i| items.get_mut(i)) else {
                return false;
            };
            if rest.is_empty() {
                *item = value;
                true
            } else {
                set_in_node(item, rest, value)
            }
        }
        Node::Scalar(_) => {
            *node = Node::Mapping(Mapping::new());
            set_in_node(node, path, value)
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(m) => m.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Scalar(value) => match value {
                ScalarValue::Null => serializer.serialize_unit(),
                ScalarValue::Bool(b) => serializer.serialize_bool(*b),
                ScalarValue::Int(i) => serializer.serialize_i64(*i),
                ScalarValue::Float(x) => serializer.serialize_f64(*x),
                ScalarValue::Str(s) => serializer.serialize_str(s),
                other => serializer.collect_str(other),
            },
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
