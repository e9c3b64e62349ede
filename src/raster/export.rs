use super::fonts::FontSet;
use crate::card::Card;
use crate::params::ParamError;
use std::cell::Cell;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Output pixels per card pixel in exported images
pub const PIXEL_RATIO: f32 = 2.0;

/// The file name an export of the given month is saved under
pub fn file_name(year: i32, month: u8) -> String {
    format!("calendar-{year:04}-{month:02}.png")
}

/// Renders `card` at `ratio` and writes it to `path` as a PNG
pub fn export_png(
    card: &Card,
    fonts: &FontSet,
    path: &Path,
    ratio: f32,
) -> Result<(), ExportError> {
    let img = super::render(card, fonts, ratio)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ExportError::Write {
            path: path.display().to_string(),
            source,
        })?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "exported card");
    Ok(())
}

/// Allows at most one export at a time.
///
/// [`ExportGate::begin`] hands out a guard while no other guard is alive; the
/// gate reopens when the guard is dropped, whether or not the export
/// succeeded.  An advisory flag: the editor exports synchronously within a
/// single key press, so there it only ever sees an open gate.
#[derive(Debug, Default)]
pub struct ExportGate {
    busy: Cell<bool>,
}

impl ExportGate {
    pub fn new() -> ExportGate {
        ExportGate::default()
    }

    pub fn begin(&self) -> Result<ExportGuard<'_>, ExportError> {
        if self.busy.replace(true) {
            Err(ExportError::Busy)
        } else {
            Ok(ExportGuard { gate: self })
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

#[derive(Debug)]
pub struct ExportGuard<'a> {
    gate: &'a ExportGate,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,
    #[error(transparent)]
    Params(#[from] ParamError),
    #[error("failed to write {path}")]
    Write {
        path: String,
        source: image::ImageError,
    },
}
