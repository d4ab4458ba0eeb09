use std::collections::HashMap;

use yaml_rust2::yaml::{Array, Hash, Yaml};

/// A node of a values document, as seen by the merge.
///
/// Only mappings are merged structurally; scalars and sequences are leaves
/// that keep the parser's representation untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Yaml),
    Sequence(Array),
    Mapping(Mapping),
}

impl Value {
    /// Short name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(Yaml::Null)
    }
}

impl From<Yaml> for Value {
    fn from(yaml: Yaml) -> Self {
        match yaml {
            Yaml::Hash(hash) => Value::Mapping(Mapping::from(hash)),
            Yaml::Array(items) => Value::Sequence(items),
            other => Value::Scalar(other),
        }
    }
}

impl From<Value> for Yaml {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(yaml) => yaml,
            Value::Sequence(items) => Yaml::Array(items),
            Value::Mapping(mapping) => mapping.into(),
        }
    }
}

/// Insertion-ordered mapping with unique keys.
///
/// Entries live in a vector so iteration follows insertion order; `index`
/// maps every key to its slot in `entries`. Replacing the value of an existing
/// key never moves it.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Yaml, Value)>,
    index: HashMap<Yaml, usize>,
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

    pub fn contains_key(&self, key: &Yaml) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &Yaml) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &Yaml) -> Option<&mut Value> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: Yaml, value: Value) -> Option<Value> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Yaml, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Yaml> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl IntoIterator for Mapping {
    type Item = (Yaml, Value);
    type IntoIter = std::vec::IntoIter<(Yaml, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Yaml, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Yaml, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<Hash> for Mapping {
    fn from(hash: Hash) -> Self {
        hash.into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

impl From<Mapping> for Yaml {
    fn from(mapping: Mapping) -> Self {
        let mut hash = Hash::new();
        for (key, value) in mapping {
            hash.insert(key, value.into());
        }
        Yaml::Hash(hash)
    }
}
