use std::path::PathBuf;

use log::debug;

use crate::error::ValuesError;
use crate::merge::fold_merge;
use crate::sink::{emit, write_stdout, write_to_dir};
use crate::source::{load_documents, Source};

pub const DEFAULT_VALUES_FILENAME: &str = "values.yaml";
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// The `values` command: merge a chart's defaults with user overrides.
#[derive(Debug, Clone)]
pub struct ValuesCmd {
    pub chart_path: PathBuf,
    /// Override sources in precedence order, lowest first.
    pub values: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub backup_suffix: String,
}

impl ValuesCmd {
    pub fn new(chart_path: impl Into<PathBuf>) -> Self {
        ValuesCmd {
            chart_path: chart_path.into(),
            values: Vec::new(),
            output_dir: None,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }

    /// The chart's own values file followed by the user's overrides.
    pub fn sources(&self) -> Vec<Source> {
        let base = Source::File(self.chart_path.join(DEFAULT_VALUES_FILENAME));
        std::iter::once(base)
            .chain(self.values.iter().map(|v| Source::parse(v)))
            .collect()
    }

    /// Loads, merges and serializes every source.
    pub fn render(&self) -> Result<String, ValuesError> {
        let sources = self.sources();
        debug!(
            "merging values: {}",
            sources
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let docs = load_documents(&sources)?;
        emit(&fold_merge(docs))
    }

    pub fn run(&self) -> Result<(), ValuesError> {
        if !self.chart_path.is_dir() {
            return Err(ValuesError::ChartNotFound(self.chart_path.clone()));
        }
        let merged = self.render()?;
        match &self.output_dir {
            Some(dir) => {
                write_to_dir(dir, DEFAULT_VALUES_FILENAME, &self.backup_suffix, &merged)?;
            }
            None => write_stdout(&merged)?,
        }
        Ok(())
    }
}
