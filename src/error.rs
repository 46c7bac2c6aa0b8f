use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    /// The dataset path handed to a scanner does not exist
    #[error("{} does not exist.", .0.display())]
    PathNotFound(PathBuf),

    #[error("File {} has an invalid extension.", .0.display())]
    InvalidExtension(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image at '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No decoder registered for extension '{0}'")]
    MissingDecoder(String),

    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("Failed to write snapshot to '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Sample has shape {0:?}, expected (height, width, 3)")]
    SampleShape(Vec<usize>),
}

pub type Result<T> = std::result::Result<T, EdaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_extension_names_the_file() {
        let err = EdaError::InvalidExtension(PathBuf::from("/data/c.txt"));
        assert_eq!(err.to_string(), "File /data/c.txt has an invalid extension.");
    }

    #[test]
    fn path_not_found_names_the_path() {
        let err = EdaError::PathNotFound(PathBuf::from("/nowhere"));
        assert!(err.to_string().contains("/nowhere"));
    }
}
