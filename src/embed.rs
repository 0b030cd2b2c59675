//! Byte Exporter - Embeddable Array Literals
//!
//! Decodes an image to its raw pixel buffer and emits the bytes as a
//! C `uint8_t` array literal, ready to compile into a binary as
//! constant data.

use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Emitted symbols are always `g_`-prefixed.
pub const SYMBOL_PREFIX: &str = "g_";

/// Output files take the input's stem with this extension.
pub const EMBED_EXTENSION: &str = "embed";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("input path has no usable file stem: {0}")]
    NoFileStem(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub input: PathBuf,
    /// Suffix for the emitted constant's name: `g_<suffix>`.
    pub symbol_suffix: String,
    /// Directory the `.embed` file lands in. Defaults to the working
    /// directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// What an export produced, for manifest building.
#[derive(Debug, Clone)]
pub struct EmbedArtifact {
    pub output: PathBuf,
    pub symbol: String,
    pub byte_count: usize,
    pub size: [u32; 2],
    pub rendered: String,
}

/// Render raw bytes as a fixed-size `uint8_t` array declaration.
///
/// Empty input renders as the empty string, not an empty declaration.
pub fn render_array_literal(bytes: &[u8], symbol_suffix: &str) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let body: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();

    format!(
        "const uint8_t {}{}[] = \n{{\n{}\n}};",
        SYMBOL_PREFIX,
        symbol_suffix,
        body.join(", ")
    )
}

/// Derive `<output_dir>/<input-stem>.embed`.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf, ExportError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ExportError::NoFileStem(input.to_path_buf()))?;

    let filename = format!("{}.{}", stem, EMBED_EXTENSION);
    Ok(match output_dir {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    })
}

/// Render `bytes` and write the literal to `output`.
pub fn export_bytes(bytes: &[u8], symbol_suffix: &str, output: &Path) -> Result<String, ExportError> {
    let rendered = render_array_literal(bytes, symbol_suffix);
    fs::write(output, &rendered).map_err(|source| ExportError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(rendered)
}

/// Decode the request's image and write its pixel bytes as an array
/// literal. Decode failures are fatal and propagate.
pub fn export_image(request: &ExportRequest) -> Result<EmbedArtifact, ExportError> {
    let decoded = image::open(&request.input).map_err(|source| ExportError::Decode {
        path: request.input.clone(),
        source,
    })?;

    let (width, height) = decoded.dimensions();
    let bytes = decoded.as_bytes();
    let output = output_path_for(&request.input, request.output_dir.as_deref())?;
    let rendered = export_bytes(bytes, &request.symbol_suffix, &output)?;

    Ok(EmbedArtifact {
        output,
        symbol: format!("{}{}", SYMBOL_PREFIX, request.symbol_suffix),
        byte_count: bytes.len(),
        size: [width, height],
        rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_three_bytes() {
        let rendered = render_array_literal(&[0xFF, 0x00, 0x7F], "Test");
        assert_eq!(
            rendered,
            "const uint8_t g_Test[] = \n{\n0xff, 0x00, 0x7f\n};"
        );
    }

    #[test]
    fn test_render_empty_bytes_is_empty_string() {
        assert_eq!(render_array_literal(&[], "Test"), "");
    }

    #[test]
    fn test_render_single_byte_has_no_separator() {
        let rendered = render_array_literal(&[0x0A], "Dot");
        assert_eq!(rendered, "const uint8_t g_Dot[] = \n{\n0x0a\n};");
    }

    #[test]
    fn test_output_path_uses_input_stem() {
        let path = output_path_for(Path::new("Tester/qiyana.jpg"), None).unwrap();
        assert_eq!(path, PathBuf::from("qiyana.embed"));
    }

    #[test]
    fn test_output_path_honors_output_dir() {
        let path =
            output_path_for(Path::new("icons/cursor.png"), Some(Path::new("build"))).unwrap();
        assert_eq!(path, PathBuf::from("build/cursor.embed"));
    }

    #[test]
    fn test_output_path_without_stem_is_rejected() {
        assert!(matches!(
            output_path_for(Path::new("/"), None),
            Err(ExportError::NoFileStem(_))
        ));
    }
}
