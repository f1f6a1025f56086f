//! Sprite post-processing.
//!
//! Trims the fully transparent border off each image and fits what remains,
//! aspect preserved, into a transparent square.

use crate::atlas::{encode_png, write_atomic};
use crate::error::{AtlasError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default output square size.
pub const DEFAULT_PROCESS_SIZE: u32 = 256;

/// Name of the report written next to processed images.
pub const REPORT_FILE: &str = "process_report.json";

/// Bounding box of all pixels with nonzero alpha, as `(x, y, width, height)`.
pub fn content_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0u32, 0u32);
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] != 0 {
            found = true;
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }

    found.then(|| (min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1))
}

/// Remove fully transparent rows and columns from the edges.
///
/// An entirely transparent image is returned unchanged.
pub fn trim_transparent(image: &RgbaImage) -> RgbaImage {
    match content_bounds(image) {
        Some((x, y, w, h)) => imageops::crop_imm(image, x, y, w, h).to_image(),
        None => image.clone(),
    }
}

/// Scale to fit inside a `size` square, centered on a transparent background.
pub fn fit_square(image: &RgbaImage, size: u32, filter: FilterType) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || size == 0 {
        return canvas;
    }

    let scale = (size as f64 / width as f64).min(size as f64 / height as f64);
    let fit_w = ((width as f64 * scale).round() as u32).clamp(1, size);
    let fit_h = ((height as f64 * scale).round() as u32).clamp(1, size);

    let resized = if (fit_w, fit_h) == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, fit_w, fit_h, filter)
    };

    let x = (size - fit_w) / 2;
    let y = (size - fit_h) / 2;
    imageops::replace(&mut canvas, &resized, x as i64, y as i64);
    canvas
}

/// Trim then fit.
pub fn process_image(image: &RgbaImage, size: u32) -> RgbaImage {
    fit_square(&trim_transparent(image), size, FilterType::Lanczos3)
}

/// Settings for [`process_directory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Copy originals here before processing.
    pub backup_dir: Option<PathBuf>,
    pub target_size: u32,
    /// Only process files whose stem is listed. Empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub only: Vec<String>,
}

impl ProcessOptions {
    /// Process `input_dir` into `output_dir`, no backup, default size.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            backup_dir: None,
            target_size: DEFAULT_PROCESS_SIZE,
            only: Vec::new(),
        }
    }

    pub fn with_backup(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(backup_dir.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.target_size = size;
        self
    }

    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Whether processing writes back over the inputs.
    pub fn overwrites(&self) -> bool {
        self.input_dir == self.output_dir
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub name: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Outcome of a directory run, written as `process_report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// RFC 3339 time the run finished.
    pub timestamp: String,
    pub settings: ProcessOptions,
    pub summary: ProcessSummary,
    pub files: Vec<ProcessedFile>,
}

/// PNG files in `dir`, sorted by name, optionally limited to the listed stems.
pub fn list_png_files(dir: &Path, only: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .filter(|path| {
            only.is_empty()
                || path
                    .file_stem()
                    .map(|stem| only.iter().any(|o| stem.to_string_lossy() == o.as_str()))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Trim and fit every PNG in the input directory.
///
/// Individual failures are recorded in the report and do not stop the run.
pub fn process_directory(options: &ProcessOptions) -> Result<ProcessReport> {
    if options.target_size == 0 {
        return Err(AtlasError::InvalidCellSize(0));
    }
    if options.overwrites() && options.backup_dir.is_none() {
        return Err(AtlasError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "overwriting originals requires a backup directory",
        )));
    }

    let files = list_png_files(&options.input_dir, &options.only)?;

    if let Some(backup_dir) = &options.backup_dir {
        std::fs::create_dir_all(backup_dir)?;
        for file in &files {
            if let Some(name) = file.file_name() {
                std::fs::copy(file, backup_dir.join(name))?;
            }
        }
        info!(dir = %backup_dir.display(), count = files.len(), "backed up originals");
    }

    std::fs::create_dir_all(&options.output_dir)?;

    let mut summary = ProcessSummary {
        total: files.len(),
        ..Default::default()
    };
    let mut processed = Vec::with_capacity(files.len());

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_path = options.output_dir.join(&name);

        match process_file(file, &out_path, options.target_size) {
            Ok(()) => {
                summary.success += 1;
                processed.push(ProcessedFile {
                    name,
                    path: out_path,
                    error: None,
                });
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "failed to process image");
                summary.failed += 1;
                processed.push(ProcessedFile {
                    name,
                    path: out_path,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let report = ProcessReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        settings: options.clone(),
        summary,
        files: processed,
    };

    let report_path = options.output_dir.join(REPORT_FILE);
    write_atomic(&report_path, serde_json::to_string_pretty(&report)?.as_bytes())?;
    info!(
        path = %report_path.display(),
        success = summary.success,
        failed = summary.failed,
        "processed images"
    );

    Ok(report)
}

fn process_file(input: &Path, output: &Path, size: u32) -> Result<()> {
    let image = image::open(input)
        .map_err(|source| AtlasError::ImageLoad {
            path: input.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let out = process_image(&image, size);

    write_atomic(output, &encode_png(&out)?)?;
    Ok(())
}
