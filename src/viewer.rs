use std::path::PathBuf;

use candle_core::{DType, Tensor};
use image::RgbImage;

use crate::error::{EdaError, Result};
use crate::logging::ConsoleLogger;
use crate::tensor_tools::{ProcessedDataset, CHANNELS, WHITE};

pub const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.png";

/// How many samples a snapshot draws
pub const SNAPSHOT_SAMPLES: usize = 2;

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Where rendered samples are written; the format follows the extension
    pub output_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

pub struct SampleViewer<'a> {
    image_data: &'a ProcessedDataset,
    output_path: PathBuf,
    logger: ConsoleLogger,
}

impl<'a> SampleViewer<'a> {
    pub fn new(image_data: &'a ProcessedDataset, config: ViewerConfig, logger: ConsoleLogger) -> Self {
        Self {
            image_data,
            output_path: config.output_path,
            logger,
        }
    }

    /// Render the first samples of the dataset to the output path.
    ///
    /// Every sample is written to the same file, so only the last one drawn
    /// remains on disk.
    pub fn view_snapshot(&self) -> Result<()> {
        if self.image_data.is_empty() {
            self.logger.warn("The dataset has no samples to show");
            return Ok(());
        }

        for (index, sample) in self.image_data.take(SNAPSHOT_SAMPLES).iter().enumerate() {
            let image = sample_to_rgb8(sample).map_err(|err| self.log_failure(err))?;
            image.save(&self.output_path).map_err(|source| {
                self.log_failure(EdaError::Encode {
                    path: self.output_path.clone(),
                    source,
                })
            })?;

            self.logger.info(format!(
                "Snapshot of sample {index} saved to {}",
                self.output_path.display()
            ));
        }

        Ok(())
    }

    fn log_failure(&self, err: EdaError) -> EdaError {
        self.logger.error(&err);
        err
    }
}

/// Convert a normalized `(height, width, 3)` sample back to 8-bit pixels.
pub fn sample_to_rgb8(sample: &Tensor) -> Result<RgbImage> {
    let dims = sample.dims().to_vec();
    let (height, width, channels) = sample
        .dims3()
        .map_err(|_| EdaError::SampleShape(dims.clone()))?;
    if channels != CHANNELS {
        return Err(EdaError::SampleShape(dims));
    }

    let pixels = sample
        .to_dtype(DType::F32)?
        .affine(WHITE, 0.0)?
        .clamp(0f32, WHITE as f32)?
        .round()?
        .to_dtype(DType::U8)?
        .flatten_all()?
        .to_vec1::<u8>()?;

    RgbImage::from_raw(width as u32, height as u32, pixels).ok_or(EdaError::SampleShape(dims))
}
