use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

use crate::error::ValuesError;
use crate::value::Mapping;

/// Serializes a merged mapping as a single YAML document.
///
/// The emitted text is parsed again and must read back as the same document:
/// a string the emitter leaves unquoted but that loads as another type (such
/// as `0o17`) is reported instead of being written with a changed type.
pub fn emit(mapping: &Mapping) -> Result<String, ValuesError> {
    let yaml: Yaml = mapping.clone().into();
    let mut out_str = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out_str);
        emitter.dump(&yaml)?;
    }

    let reloaded = YamlLoader::load_from_str(&out_str).map_err(|source| ValuesError::Parse {
        source_name: "<output>".to_string(),
        source,
    })?;
    let reloaded = reloaded.into_iter().next().unwrap_or(Yaml::Null);
    if let Some(value) = find_mismatch(&yaml, &reloaded) {
        return Err(ValuesError::Unrepresentable {
            value: format!("{value:?}"),
        });
    }

    let mut out_str = out_str.trim_start_matches("---\n").to_string();
    out_str.push('\n');
    Ok(out_str)
}

/// Returns the first node of `expected` that `actual` does not reproduce.
fn find_mismatch<'a>(expected: &'a Yaml, actual: &Yaml) -> Option<&'a Yaml> {
    match (expected, actual) {
        (Yaml::Hash(e), Yaml::Hash(a)) => e
            .iter()
            .find_map(|(k, v)| match a.get(k) {
                Some(av) => find_mismatch(v, av),
                None => Some(k),
            })
            .or_else(|| (e.len() != a.len()).then_some(expected)),
        (Yaml::Array(e), Yaml::Array(a)) if e.len() == a.len() => {
            e.iter().zip(a).find_map(|(ev, av)| find_mismatch(ev, av))
        }
        _ if expected == actual => None,
        _ => Some(expected),
    }
}

pub fn write_stdout(text: &str) -> Result<(), ValuesError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| ValuesError::io("<stdout>", e))
}

/// Writes `text` to `<output_dir>/<name>` and returns the written path.
///
/// The directory is created when missing. An existing file is first copied to
/// `<name><backup_suffix>`, shifting older backups one suffix further. The new
/// content goes to a temporary sibling that is then renamed onto the target.
pub fn write_to_dir(
    output_dir: &Path,
    name: &str,
    backup_suffix: &str,
    text: &str,
) -> Result<PathBuf, ValuesError> {
    fs::create_dir_all(output_dir).map_err(|e| ValuesError::io(output_dir, e))?;

    let target = output_dir.join(name);
    backup_existing(&target, backup_suffix)?;

    let tmp = with_suffix(&target, ".tmp");
    if let Err(e) = fs::write(&tmp, text).and_then(|_| fs::rename(&tmp, &target)) {
        let _ = fs::remove_file(&tmp);
        return Err(ValuesError::io(&target, e));
    }

    info!("wrote {}", target.display());
    Ok(target)
}

/// Copies `file` to its backup path if it exists. Returns the backup path.
///
/// The copy lands under a temporary name first; older backups are only shifted
/// once it has succeeded.
fn backup_existing(file: &Path, suffix: &str) -> Result<Option<PathBuf>, ValuesError> {
    if suffix.is_empty() || !file.exists() {
        return Ok(None);
    }
    let backup = with_suffix(file, suffix);
    let staged = with_suffix(&backup, ".tmp");
    fs::copy(file, &staged).map_err(|e| ValuesError::io(&staged, e))?;

    let shifted = shift_backup(&backup, suffix)
        .and_then(|_| fs::rename(&staged, &backup).map_err(|e| ValuesError::io(&backup, e)));
    if let Err(e) = shifted {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }

    info!("backed up {} to {}", file.display(), backup.display());
    Ok(Some(backup))
}

/// Moves an existing backup out of the way, recursively.
fn shift_backup(backup: &Path, suffix: &str) -> Result<(), ValuesError> {
    if !backup.exists() {
        return Ok(());
    }
    let next = with_suffix(backup, suffix);
    shift_backup(&next, suffix)?;
    fs::rename(backup, &next).map_err(|e| ValuesError::io(backup, e))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
