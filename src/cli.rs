use std::path::PathBuf;

use clap::Parser;

use crate::viewer::DEFAULT_SNAPSHOT_PATH;

/// Recognizing characters from the Naruto Face Dataset from kaggle:
/// https://www.kaggle.com/neetuk/naruto-face-dataset/
#[derive(Parser, Debug)]
#[command(name = "dataset_eda", version, about, long_about = None)]
pub struct Args {
    /// Path to an image or to the folder containing files in the dataset
    #[arg(value_name = "DATASETPATH")]
    pub dataset_path: PathBuf,

    /// Only scan and summarize the dataset, skip decoding
    #[arg(long, default_value_t = false, conflicts_with = "snapshot")]
    pub scan_only: bool,

    /// Save a snapshot of the first processed samples
    #[arg(long, default_value_t = false)]
    pub snapshot: bool,

    /// Where the snapshot image is written
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SNAPSHOT_PATH)]
    pub snapshot_output: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn dataset_path_is_positional() {
        let args = Args::try_parse_from(["dataset_eda", "data/naruto"]).unwrap();

        assert_eq!(args.dataset_path, PathBuf::from("data/naruto"));
        assert!(!args.scan_only);
        assert!(!args.snapshot);
        assert_eq!(args.snapshot_output, PathBuf::from("snapshot.png"));
    }

    #[test]
    fn dataset_path_is_required() {
        assert!(Args::try_parse_from(["dataset_eda"]).is_err());
    }

    #[test]
    fn snapshot_output_is_configurable() {
        let args = Args::try_parse_from([
            "dataset_eda",
            "data",
            "--snapshot",
            "--snapshot-output",
            "/tmp/plot.png",
        ])
        .unwrap();

        assert!(args.snapshot);
        assert_eq!(args.snapshot_output, PathBuf::from("/tmp/plot.png"));
    }

    #[test]
    fn scan_only_excludes_snapshot() {
        assert!(Args::try_parse_from(["dataset_eda", "data", "--scan-only", "--snapshot"]).is_err());
    }
}
