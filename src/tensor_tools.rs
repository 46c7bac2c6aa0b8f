use std::fs;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::{EdaError, Result};
use crate::logging::ConsoleLogger;
use crate::registry::{decode_jpeg, DecodeFn, ExtensionRegistry, FormatEntry};
use crate::scanner::{DatasetProcessor, DatasetScanner, ScannerConfig};

/// Side length every sample is resized to
pub const RESIZE: u32 = 224;
/// Maximum channel value of an 8-bit image
pub const WHITE: f64 = 255.0;
pub const CHANNELS: usize = 3;

/// Ordered collection of processed samples, one `(RESIZE, RESIZE, 3)` f32 tensor per file.
#[derive(Debug, Default)]
pub struct ProcessedDataset {
    samples: Vec<Tensor>,
}

impl ProcessedDataset {
    pub fn new(samples: Vec<Tensor>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Tensor] {
        &self.samples
    }

    /// The first `n` samples, or all of them when there are fewer.
    pub fn take(&self, n: usize) -> &[Tensor] {
        &self.samples[..n.min(self.samples.len())]
    }

    /// All samples stacked into a single `(N, RESIZE, RESIZE, 3)` tensor.
    pub fn stack(&self) -> Result<Tensor> {
        stack_tensors_on_axis(&self.samples, 0)
    }
}

pub fn tensor_from_image(img: &RgbImage, device: &Device) -> Result<Tensor> {
    let (width, height) = img.dimensions();
    let img_ten = Tensor::from_raw_buffer(
        img.as_raw(),
        DType::U8,
        &[height as usize, width as usize, CHANNELS],
        device,
    )?;
    Ok(img_ten)
}

pub fn stack_tensors_on_axis(tensor_list: &[Tensor], axis: usize) -> Result<Tensor> {
    Ok(Tensor::stack(tensor_list, axis)?)
}

/// Scanner that decodes, resizes and normalizes every image it finds.
#[derive(Debug)]
pub struct TensorImageScanner {
    scanner: DatasetScanner,
    device: Device,
}

impl TensorImageScanner {
    pub fn new(config: ScannerConfig, logger: ConsoleLogger) -> Result<Self> {
        Ok(Self {
            scanner: DatasetScanner::new(config, logger)?,
            device: Device::Cpu,
        })
    }

    pub fn scanner(&self) -> &DatasetScanner {
        &self.scanner
    }

    /// Read, decode, resize and normalize a single image file.
    pub fn process_data(&self, file_path: &Path, file_extension: &str) -> Result<Tensor> {
        let bytes = fs::read(file_path).map_err(|source| EdaError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        let decode = Self::REGISTRY
            .decoder(file_extension)
            .ok_or_else(|| EdaError::MissingDecoder(file_extension.to_owned()))?;
        let image = decode(&bytes)
            .map_err(|source| EdaError::Decode {
                path: file_path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let image = imageops::resize(&image, RESIZE, RESIZE, FilterType::Triangle);

        // Scale to [0, 1]
        let tensor = tensor_from_image(&image, &self.device)?
            .to_dtype(DType::F32)?
            .affine(1.0 / WHITE, 0.0)?;
        Ok(tensor)
    }
}

impl DatasetProcessor for TensorImageScanner {
    const REGISTRY: ExtensionRegistry = ExtensionRegistry::new(&[FormatEntry {
        extension: ".jpg",
        label: "JPEG",
        decode: Some(decode_jpeg as DecodeFn),
    }]);

    type Output = ProcessedDataset;

    fn get_processed_data(&mut self, _split: bool) -> Result<ProcessedDataset> {
        // Get basic information
        let summary = self.scanner.scan_and_summarize(&Self::REGISTRY)?;

        let samples = summary
            .manifest
            .iter()
            .map(|(path, extension)| {
                self.process_data(path, extension)
                    .map_err(|err| self.scanner.log_failure(err))
            })
            .collect::<Result<Vec<_>>>()?;

        self.scanner.logger().debug(format!(
            "Processed {} images into {}x{}x{} tensors",
            samples.len(),
            RESIZE,
            RESIZE,
            CHANNELS
        ));

        Ok(ProcessedDataset::new(samples))
    }
}
