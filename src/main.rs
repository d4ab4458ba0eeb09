use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use helm_values::cmd::{ValuesCmd, DEFAULT_BACKUP_SUFFIX};
use log::debug;

/// Merge one or more YAML files of values
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chart directory containing the default values.yaml
    #[arg(value_name = "CHART")]
    chart: PathBuf,

    /// Values files to merge on top of the chart defaults ('-' reads stdin)
    #[arg(short = 'f', long = "values", value_name = "FILE", value_delimiter = ',')]
    values: Vec<String>,

    /// Write <DIR>/values.yaml instead of stdout
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Suffix appended to an existing output file when backing it up
    #[arg(long = "backup-suffix", default_value = DEFAULT_BACKUP_SUFFIX)]
    backup_suffix: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let cmd = ValuesCmd {
        chart_path: args.chart,
        values: args.values,
        output_dir: args.output_dir,
        backup_suffix: args.backup_suffix,
    };
    debug!("{:?}", cmd);

    cmd.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_flags_keep_order() {
        let args = Args::try_parse_from([
            "helm-values", "chart", "-f", "a,b", "-f", "-", "--values", "c",
        ])
        .unwrap();

        assert_eq!(args.chart, PathBuf::from("chart"));
        assert_eq!(args.values, vec!["a", "b", "-", "c"]);
        assert_eq!(args.backup_suffix, DEFAULT_BACKUP_SUFFIX);
        assert!(args.output_dir.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_output_flags() {
        let args = Args::try_parse_from([
            "helm-values",
            "-o",
            "out",
            "--backup-suffix",
            ".orig",
            "-v",
            "chart",
        ])
        .unwrap();

        assert!(args.values.is_empty());
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.backup_suffix, ".orig");
        assert!(args.verbose);
    }

    #[test]
    fn test_chart_is_required() {
        assert!(Args::try_parse_from(["helm-values", "-f", "a.yaml"]).is_err());
    }
}
