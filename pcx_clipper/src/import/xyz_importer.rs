/// XYZ text importer.
///
/// One point per line, whitespace separated:
///
/// ```text
/// <a> <b> <c> <red> <green> <blue>
/// ```
///
/// The file stores the vertical axis first, so the imported position
/// is `(b, c, a)`. Color channels are 0-255 and imported opaque.
/// Blank lines are skipped and fields after the sixth are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use glam::Vec3;
use crate::error::{Error, Result};
use crate::engine_err;
use crate::resource::{PointCloud, Color32};

/// Default cap on imported points
pub const DEFAULT_MAX_POINTS: usize = 10_000;

const FIELD_COUNT: usize = 6;

/// Importer for `.xyz` point files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XyzImporter {
    max_points: usize,
}

impl XyzImporter {
    pub fn new() -> Self {
        Self { max_points: DEFAULT_MAX_POINTS }
    }

    /// Stop after `max_points` points; the rest of the file is not read.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Import a file from disk. The cloud is named after the file stem.
    ///
    /// # Errors
    ///
    /// `Error::ImportFailed` if the file cannot be opened or read, or if
    /// any record within the point cap is malformed.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<PointCloud> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| engine_err!("pcx::XyzImporter", ImportFailed,
            "failed importing {}: {}", path.display(), e))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Already logged where it was raised; only prefix the path
        self.import_reader(name, BufReader::new(file)).map_err(|e| match e {
            Error::ImportFailed(msg) => Error::ImportFailed(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Import from an in-memory string.
    pub fn import_str(&self, name: impl Into<String>, text: &str) -> Result<PointCloud> {
        self.import_reader(name, text.as_bytes())
    }

    /// Import from any buffered reader.
    pub fn import_reader<R: BufRead>(&self, name: impl Into<String>, reader: R) -> Result<PointCloud> {
        let name = name.into();
        let mut positions = Vec::new();
        let mut colors = Vec::new();

        for (line_index, line) in reader.lines().enumerate() {
            if positions.len() >= self.max_points {
                break;
            }
            let line_number = line_index + 1;
            let line = line.map_err(|e| engine_err!("pcx::XyzImporter", ImportFailed,
                "line {}: {}", line_number, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let (position, color) = parse_record(&line, line_number)?;
            positions.push(position);
            colors.push(color);
        }

        crate::engine_info!("pcx::XyzImporter", "Imported {} points into '{}'", positions.len(), name);
        PointCloud::new(name, positions, Some(colors))
    }
}

impl Default for XyzImporter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_record(line: &str, line_number: usize) -> Result<(Vec3, Color32)> {
    let fields: Vec<&str> = line.split_whitespace().take(FIELD_COUNT).collect();
    if fields.len() < FIELD_COUNT {
        return Err(engine_err!("pcx::XyzImporter", ImportFailed,
            "line {}: expected {} fields, found {}", line_number, FIELD_COUNT, fields.len()));
    }

    let coord = |i: usize| -> Result<f32> {
        fields[i].parse::<f32>().map_err(|_| engine_err!("pcx::XyzImporter", ImportFailed,
            "line {}: invalid coordinate '{}'", line_number, fields[i]))
    };
    let channel = |i: usize| -> Result<u8> {
        fields[i].parse::<u8>().map_err(|_| engine_err!("pcx::XyzImporter", ImportFailed,
            "line {}: invalid color channel '{}'", line_number, fields[i]))
    };

    let position = Vec3::new(coord(1)?, coord(2)?, coord(0)?);
    let color = Color32::rgb(channel(3)?, channel(4)?, channel(5)?);
    Ok((position, color))
}

#[cfg(test)]
#[path = "xyz_importer_tests.rs"]
mod tests;
