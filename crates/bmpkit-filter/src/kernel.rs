//! Gaussian blur kernel
//!
//! The kernel is a fixed 10x10 grid. Cell `(ky, kx)` sits at offset
//! `(ky - 5, kx - 5)` from the output pixel, so offsets run from -5 to 4
//! and the grid is not centered. Cell weights are `G(dx) * G(dy)` with
//! `sigma = radius`, evaluated with [`fast_exp`].

use crate::{FilterError, FilterResult};
use bmpkit_core::fastmath::fast_exp;
use std::f64::consts::TAU;

/// Cells per kernel side
pub const KERNEL_SIZE: usize = 10;

/// Offset of cell 0 from the output pixel
pub const KERNEL_ORIGIN: i32 = -5;

/// Smallest accepted blur radius
pub const MIN_RADIUS: u32 = 2;

/// How raw Gaussian weights are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelNormalization {
    /// Divide by the corner weight and truncate to integers; the corner
    /// cell weighs 1 and every other cell at least 1
    #[default]
    CornerWeight,
    /// Divide by the sum of all weights, keeping fractions
    UnitSum,
}

/// Blur settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurOptions {
    /// Gaussian sigma in pixels; at least [`MIN_RADIUS`]
    pub radius: u32,
    pub normalization: KernelNormalization,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            radius: MIN_RADIUS,
            normalization: KernelNormalization::CornerWeight,
        }
    }
}

impl BlurOptions {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn with_normalization(mut self, normalization: KernelNormalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// A 10x10 Gaussian weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: [f64; KERNEL_SIZE * KERNEL_SIZE],
    normalization: KernelNormalization,
}

fn gaussian(x: f64, sigma: f64) -> f64 {
    fast_exp(-(x * x) / (2.0 * sigma * sigma)) / (TAU.sqrt() * sigma)
}

impl GaussianKernel {
    /// Build the kernel for `radius`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `radius < 2`.
    pub fn new(radius: u32, normalization: KernelNormalization) -> FilterResult<Self> {
        if radius < MIN_RADIUS {
            return Err(FilterError::InvalidParameters(format!(
                "blur radius {radius} is below {MIN_RADIUS}"
            )));
        }
        let sigma = radius as f64;

        let mut weights = [0.0; KERNEL_SIZE * KERNEL_SIZE];
        for ky in 0..KERNEL_SIZE {
            for kx in 0..KERNEL_SIZE {
                let dy = (KERNEL_ORIGIN + ky as i32) as f64;
                let dx = (KERNEL_ORIGIN + kx as i32) as f64;
                weights[ky * KERNEL_SIZE + kx] = gaussian(dx, sigma) * gaussian(dy, sigma);
            }
        }

        match normalization {
            KernelNormalization::CornerWeight => {
                let corner = weights[0];
                for w in weights.iter_mut() {
                    *w = (*w / corner).trunc();
                }
            }
            KernelNormalization::UnitSum => {
                let total: f64 = weights.iter().sum();
                for w in weights.iter_mut() {
                    *w /= total;
                }
            }
        }

        Ok(Self {
            weights,
            normalization,
        })
    }

    pub fn from_options(options: &BlurOptions) -> FilterResult<Self> {
        Self::new(options.radius, options.normalization)
    }

    pub fn normalization(&self) -> KernelNormalization {
        self.normalization
    }

    /// Weight of the cell at offset `(dy, dx)`, both in `-5..=4`.
    pub fn weight(&self, dy: i32, dx: i32) -> Option<f64> {
        let ky = usize::try_from(dy - KERNEL_ORIGIN).ok()?;
        let kx = usize::try_from(dx - KERNEL_ORIGIN).ok()?;
        if ky >= KERNEL_SIZE || kx >= KERNEL_SIZE {
            return None;
        }
        Some(self.weights[ky * KERNEL_SIZE + kx])
    }

    /// `(dy, dx, weight)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, f64)> + '_ {
        self.weights.iter().enumerate().map(|(i, &w)| {
            (
                KERNEL_ORIGIN + (i / KERNEL_SIZE) as i32,
                KERNEL_ORIGIN + (i % KERNEL_SIZE) as i32,
                w,
            )
        })
    }

    /// Sum of all weights; the divisor when no cell falls off the image.
    pub fn max_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}
