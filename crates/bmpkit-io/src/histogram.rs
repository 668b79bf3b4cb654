//! Histogram export
//!
//! The library does not draw plots. It produces the intensity distribution
//! as a whitespace-separated text table with the columns
//! `Intensity Red Green Blue` and hands that table plus an output path to a
//! [`HistogramRenderer`], which is supplied by the caller (a gnuplot
//! wrapper, a web service, a test double, ...).
//!
//! A renderer that is not installed is an expected situation: it is
//! reported as [`RenderOutcome::RendererUnavailable`], not as an error.

use crate::{IoError, IoResult};
use bmpkit_core::{Bitmap, ChannelHistograms, HISTOGRAM_BINS};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column header line of the table
pub const TABLE_HEADER: &str = "Intensity Red Green Blue";

/// Tabular intensity distribution of a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTable {
    histograms: ChannelHistograms,
}

impl HistogramTable {
    /// Wrap precomputed histograms.
    pub fn new(histograms: ChannelHistograms) -> Self {
        Self { histograms }
    }

    /// Compute the histograms of `bitmap`.
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        Self::new(bitmap.color_histogram())
    }

    /// The underlying histograms.
    pub fn histograms(&self) -> &ChannelHistograms {
        &self.histograms
    }

    /// `(intensity, red, green, blue)` for each of the 256 intensities.
    pub fn rows(&self) -> impl Iterator<Item = (usize, u64, u64, u64)> + '_ {
        (0..HISTOGRAM_BINS).map(|i| {
            (
                i,
                self.histograms.red[i],
                self.histograms.green[i],
                self.histograms.blue[i],
            )
        })
    }

    /// Write the table: the header line then one line per intensity.
    pub fn write_to<W: Write>(&self, mut writer: W) -> IoResult<()> {
        write!(writer, "{self}").map_err(|e| IoError::CannotWrite(e.to_string()))
    }
}

impl fmt::Display for HistogramTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TABLE_HEADER}")?;
        for (i, r, g, b) in self.rows() {
            writeln!(f, "{i} {r} {g} {b}")?;
        }
        Ok(())
    }
}

/// Failure reported by a renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendering tool is not installed or cannot be reached
    #[error("renderer unavailable: {0}")]
    Unavailable(String),

    /// The renderer ran and failed
    #[error("renderer failed: {0}")]
    Failed(String),
}

/// A backend that turns a histogram table into an image file.
pub trait HistogramRenderer {
    /// Render `table` to `output`.
    fn render(&self, table: &HistogramTable, output: &Path) -> Result<(), RenderError>;
}

/// Result of [`export_histogram`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The renderer produced `output`
    Rendered(PathBuf),
    /// No renderer could be used; nothing was produced
    RendererUnavailable(String),
}

/// Build the histogram table of `bitmap` and hand it to `renderer`.
///
/// # Errors
///
/// Returns [`IoError::Render`] if the renderer ran and failed. An
/// unavailable renderer is reported through the `Ok` value.
pub fn export_histogram(
    bitmap: &Bitmap,
    renderer: &dyn HistogramRenderer,
    output: &Path,
) -> IoResult<RenderOutcome> {
    let table = HistogramTable::from_bitmap(bitmap);
    match renderer.render(&table, output) {
        Ok(()) => Ok(RenderOutcome::Rendered(output.to_path_buf())),
        Err(RenderError::Unavailable(reason)) => {
            log::warn!("histogram not rendered to {}: {}", output.display(), reason);
            Ok(RenderOutcome::RendererUnavailable(reason))
        }
        Err(RenderError::Failed(reason)) => Err(IoError::Render(reason)),
    }
}
