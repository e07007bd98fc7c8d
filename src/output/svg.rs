//! SVG chart output writer.
//!
//! Writes SVG content to files with proper encoding.

use super::validate_path;
use crate::charts::Figure;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    debug!("Writing SVG to: {}", output_path.display());

    validate_path(output_path)?;
    if let Some(ext) = output_path.extension() {
        if ext != "svg" {
            debug!("Warning: File does not have .svg extension: {}", output_path.display());
        }
    }
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(svg_content.as_bytes()).map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    debug!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        svg_content.len(),
        svg_content.len() as f64 / 1024.0
    );

    Ok(())
}

/// Write every figure as `<dir>/<name>.svg`
///
/// **Public** - returns the written paths in figure order
pub fn write_figures(
    figures: &[Figure],
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, OutputError> {
    let dir = dir.as_ref();

    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let path = dir.join(format!("{}.svg", figure.name));
        write_svg(&figure.svg, &path)?;
        written.push(path);
    }

    info!("Wrote {} charts to: {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const VALID_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect x="0" y="0" width="100" height="100" fill="red"/>
</svg>"#;

    #[test]
    fn test_write_and_read_svg() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_svg(VALID_SVG, path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, VALID_SVG);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/funnel.svg");

        write_svg(VALID_SVG, &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_figures() {
        let temp_dir = tempfile::tempdir().unwrap();
        let figures = vec![
            Figure {
                name: "funnel",
                svg: VALID_SVG.to_string(),
            },
            Figure {
                name: "exit_distribution",
                svg: VALID_SVG.to_string(),
            },
        ];

        let paths = write_figures(&figures, temp_dir.path().join("charts")).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("charts/exit_distribution.svg"));
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_write_figures_into_file_fails() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = write_figures(&[], temp_file.path());
        assert!(result.is_err());
    }
}
