use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use log::{debug, warn};
use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlLoader};

use crate::error::ValuesError;
use crate::value::{Mapping, Value};

/// Token that selects standard input instead of a file.
pub const STDIN_TOKEN: &str = "-";

/// Key whose mapping (or sequence of mappings) is folded into its parent.
pub const MERGE_KEY: &str = "<<";

/// Where a values document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn parse(token: &str) -> Self {
        if token.trim() == STDIN_TOKEN {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(token))
        }
    }

    /// Reads the whole source into memory.
    pub fn read(&self) -> Result<Vec<u8>, ValuesError> {
        match self {
            Source::Stdin => self.read_with_stdin(io::stdin().lock()),
            Source::File(_) => self.read_with_stdin(io::empty()),
        }
    }

    /// Like [`Source::read`], taking standard input from `stdin`.
    pub fn read_with_stdin<R: Read>(&self, mut stdin: R) -> Result<Vec<u8>, ValuesError> {
        match self {
            Source::Stdin => {
                let mut bytes = Vec::new();
                stdin
                    .read_to_end(&mut bytes)
                    .map_err(|e| ValuesError::io("<stdin>", e))?;
                Ok(bytes)
            }
            Source::File(path) => fs::read(path).map_err(|e| ValuesError::io(path, e)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parses the raw contents of one values source into a mapping.
///
/// An empty stream or a `null` document yields an empty mapping. Anything other
/// than a single document rooted at a mapping is an error naming `source_name`.
pub fn parse_document(source_name: &str, bytes: &[u8]) -> Result<Mapping, ValuesError> {
    let content = std::str::from_utf8(bytes).map_err(|source| ValuesError::Utf8 {
        source_name: source_name.to_string(),
        source,
    })?;

    let mut docs = YamlLoader::load_from_str(content).map_err(|source| ValuesError::Parse {
        source_name: source_name.to_string(),
        source,
    })?;

    if docs.len() > 1 {
        return Err(ValuesError::MultipleDocuments {
            source_name: source_name.to_string(),
            count: docs.len(),
        });
    }

    match docs.pop() {
        None | Some(Yaml::Null) => {
            warn!("No values in {}", source_name);
            Ok(Mapping::new())
        }
        Some(doc) => match Value::from(expand_merge_keys(doc)) {
            Value::Mapping(mapping) => Ok(mapping),
            other => Err(ValuesError::NotAMapping {
                source_name: source_name.to_string(),
                kind: other.kind(),
            }),
        },
    }
}

/// Resolves `<<` merge keys throughout `yaml`.
///
/// Keys written explicitly in a mapping win over merged ones, and within a
/// sequence of merged mappings the earlier mapping wins. Merged keys take the
/// position of the `<<` entry. A `<<` whose value is not a mapping or a
/// sequence of mappings is kept as an ordinary key.
pub fn expand_merge_keys(yaml: Yaml) -> Yaml {
    match yaml {
        Yaml::Hash(hash) => Yaml::Hash(expand_hash(hash)),
        Yaml::Array(items) => Yaml::Array(items.into_iter().map(expand_merge_keys).collect()),
        other => other,
    }
}

fn expand_hash(hash: Hash) -> Hash {
    let merge_key = Yaml::String(MERGE_KEY.to_string());
    let explicit: HashSet<Yaml> = hash.keys().filter(|k| **k != merge_key).cloned().collect();

    let mut expanded = Hash::new();
    for (key, value) in hash {
        if key != merge_key {
            expanded.insert(key, expand_merge_keys(value));
            continue;
        }
        let sources = match expand_merge_keys(value) {
            Yaml::Hash(source) => vec![source],
            Yaml::Array(items) if items.iter().all(|i| matches!(i, Yaml::Hash(_))) => items
                .into_iter()
                .filter_map(|i| match i {
                    Yaml::Hash(source) => Some(source),
                    _ => None,
                })
                .collect(),
            other => {
                expanded.insert(key, other);
                continue;
            }
        };
        for source in sources {
            for (k, v) in source {
                if !explicit.contains(&k) && !expanded.contains_key(&k) {
                    expanded.insert(k, v);
                }
            }
        }
    }
    expanded
}

/// Reads and parses every source in order, stopping at the first failure.
pub fn load_documents(sources: &[Source]) -> Result<Vec<Mapping>, ValuesError> {
    let mut docs = Vec::with_capacity(sources.len());
    for source in sources {
        debug!("Reading values from {}", source);
        let bytes = source.read()?;
        docs.push(parse_document(&source.to_string(), &bytes)?);
    }
    Ok(docs)
}
