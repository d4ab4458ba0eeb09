use std::mem;

use crate::value::{Mapping, Value};

/// Merges `src` on top of `dest` and returns the result.
///
/// Keys missing from `dest` are appended in `src` order. When both sides hold a
/// mapping the two are merged recursively; in every other case the value from
/// `src` replaces the one in `dest`, keeping the key where it was.
pub fn merge(mut dest: Mapping, src: Mapping) -> Mapping {
    for (key, value) in src {
        if let Some(slot) = dest.get_mut(&key) {
            *slot = match (mem::take(slot), value) {
                (Value::Mapping(dest_map), Value::Mapping(src_map)) => {
                    Value::Mapping(merge(dest_map, src_map))
                }
                // Sequences are leaves too: never merged element-wise.
                (_, value) => value,
            };
        } else {
            dest.insert(key, value);
        }
    }
    dest
}

/// Folds `docs` left to right through [`merge`], starting from an empty mapping.
///
/// Later documents take precedence over earlier ones.
pub fn fold_merge<I>(docs: I) -> Mapping
where
    I: IntoIterator<Item = Mapping>,
{
    docs.into_iter().fold(Mapping::new(), merge)
}
