mod cli;
mod error;
mod logging;
mod registry;
mod scanner;
mod tensor_tools;
mod viewer;

use clap::Parser;
use cli::Args;
use logging::create_console_logger;
use scanner::{DatasetProcessor, PlainImageScanner, ScannerConfig};
use tensor_tools::TensorImageScanner;
use viewer::{SampleViewer, ViewerConfig};

fn main() -> anyhow::Result<()> {
    // Console logger shared by every component
    let logger = create_console_logger("Anime Project Logger");

    let args = Args::parse();
    let config = ScannerConfig {
        dataset_path: args.dataset_path,
    };

    if args.scan_only {
        PlainImageScanner::new(config, logger)?.get_processed_data(false)?;
        return Ok(());
    }

    // Decode, resize and normalize every image
    let mut data_processor = TensorImageScanner::new(config, logger.clone())?;
    let data = data_processor.get_processed_data(false)?;

    if !data.is_empty() {
        logger.info(format!(
            "Stacked {} samples into a tensor of shape {:?}",
            data.len(),
            data.stack()?.dims()
        ));
    }

    if args.snapshot {
        let config = ViewerConfig {
            output_path: args.snapshot_output,
        };
        SampleViewer::new(&data, config, logger).view_snapshot()?;
    }

    Ok(())
}
