use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageResult};

/// Turns the raw bytes of a file into an image.
pub type DecodeFn = fn(&[u8]) -> ImageResult<DynamicImage>;

#[derive(Clone, Copy, Debug)]
pub struct FormatEntry {
    /// Extension including the leading dot, e.g. `.jpg`
    pub extension: &'static str,
    pub label: &'static str,
    pub decode: Option<DecodeFn>,
}

/// Fixed table of the file extensions a scanner accepts.
#[derive(Clone, Copy, Debug)]
pub struct ExtensionRegistry {
    entries: &'static [FormatEntry],
}

impl ExtensionRegistry {
    pub const fn new(entries: &'static [FormatEntry]) -> Self {
        Self { entries }
    }

    pub fn get(&self, extension: &str) -> Option<&FormatEntry> {
        self.entries.iter().find(|entry| entry.extension == extension)
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.get(extension).is_some()
    }

    pub fn label(&self, extension: &str) -> Option<&'static str> {
        self.get(extension).map(|entry| entry.label)
    }

    pub fn decoder(&self, extension: &str) -> Option<DecodeFn> {
        self.get(extension).and_then(|entry| entry.decode)
    }
}

pub fn decode_jpeg(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
}

/// Extension of `path` with its leading dot, or an empty string when it has none.
///
/// Matching is case sensitive, so `photo.JPG` yields `.JPG`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: ExtensionRegistry = ExtensionRegistry::new(&[FormatEntry {
        extension: ".jpg",
        label: "JPEG",
        decode: Some(decode_jpeg as DecodeFn),
    }]);

    #[test]
    fn looks_up_registered_extension() {
        assert!(REGISTRY.contains(".jpg"));
        assert_eq!(REGISTRY.label(".jpg"), Some("JPEG"));
        assert!(REGISTRY.decoder(".jpg").is_some());
    }

    #[test]
    fn unknown_extensions_are_absent() {
        assert!(!REGISTRY.contains(".txt"));
        assert!(!REGISTRY.contains(".JPG"));
        assert!(!REGISTRY.contains(""));
        assert_eq!(REGISTRY.label(".png"), None);
    }

    #[test]
    fn extension_keeps_the_leading_dot() {
        assert_eq!(extension_of(Path::new("/data/naruto_1.jpg")), ".jpg");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
        assert_eq!(extension_of(Path::new(".hidden")), "");
    }

    #[test]
    fn jpeg_decoder_rejects_garbage() {
        assert!(decode_jpeg(b"definitely not a jpeg").is_err());
    }
}
