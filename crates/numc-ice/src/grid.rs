//! Fixed-size rasters of 32-bit float samples.

use crate::{IceError, Result};
use std::path::Path;
use tracing::debug;

/// Byte order of the samples in a raster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first (BEDMAP2 `.flt` files).
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Shape and georeferencing of a raster.
///
/// Coordinates are planar grid coordinates in km; `(xllcorner, yllcorner)` is
/// the outer corner of the lower-left cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Number of columns (x direction).
    pub ncols: usize,
    /// Number of rows (y direction). Row 0 is the top (largest y).
    pub nrows: usize,
    /// x of the lower-left corner (km).
    pub xllcorner: f64,
    /// y of the lower-left corner (km).
    pub yllcorner: f64,
    /// Cell edge length (km).
    pub cellsize: f64,
    /// Sentinel marking missing data.
    pub nodata: f32,
    /// Byte order of the file.
    pub byte_order: ByteOrder,
}

impl GridSpec {
    /// The 1 km BEDMAP2 grid centred on the South pole.
    pub const fn bedmap2() -> Self {
        Self {
            ncols: 6667,
            nrows: 6667,
            xllcorner: -3333.5,
            yllcorner: -3333.5,
            cellsize: 1.0,
            nodata: -9999.0,
            byte_order: ByteOrder::Little,
        }
    }

    /// Number of samples in the grid.
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Whether the grid has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// y of the upper edge of the grid (km).
    pub fn ytop(&self) -> f64 {
        self.yllcorner + self.nrows as f64 * self.cellsize
    }

    /// x of the right edge of the grid (km).
    pub fn xright(&self) -> f64 {
        self.xllcorner + self.ncols as f64 * self.cellsize
    }

    /// Convert grid coordinates (km) to fractional (column, row) indices.
    pub fn to_index(&self, x: f64, y: f64) -> (f64, f64) {
        let col = (x - self.xllcorner) / self.cellsize - 0.5;
        let row = (self.ytop() - y) / self.cellsize - 0.5;
        (col, row)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::bedmap2()
    }
}

/// An immutable raster with bilinear point queries.
///
/// Sentinel samples are stored as NaN, so any interpolation touching them
/// yields NaN.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// Samples in row-major order, row 0 at the top.
    data: Vec<f32>,
    spec: GridSpec,
}

impl RasterGrid {
    /// Load a raster from a binary file of `ncols * nrows` 32-bit floats.
    pub fn load<P: AsRef<Path>>(path: P, spec: GridSpec) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| IceError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;

        let expected = 4 * spec.len() as u64;
        let actual = bytes.len() as u64;
        if actual != expected {
            return Err(IceError::SizeMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }

        let data = bytes
            .chunks_exact(4)
            .map(|chunk| {
                let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
                match spec.byte_order {
                    ByteOrder::Little => f32::from_le_bytes(raw),
                    ByteOrder::Big => f32::from_be_bytes(raw),
                }
            })
            .collect();

        debug!(path = %path.display(), ncols = spec.ncols, nrows = spec.nrows, "loaded raster");
        Ok(Self::with_sentinels_masked(data, spec))
    }

    /// Build a raster from samples in row-major order (row 0 at the top).
    pub fn from_values(values: Vec<f32>, spec: GridSpec) -> Result<Self> {
        if values.len() != spec.len() {
            return Err(IceError::ShapeMismatch {
                ncols: spec.ncols,
                nrows: spec.nrows,
                expected: spec.len(),
                actual: values.len(),
            });
        }
        Ok(Self::with_sentinels_masked(values, spec))
    }

    fn with_sentinels_masked(mut data: Vec<f32>, spec: GridSpec) -> Self {
        let threshold = spec.nodata + 0.5;
        for value in data.iter_mut() {
            if *value <= threshold {
                *value = f32::NAN;
            }
        }
        Self { data, spec }
    }

    /// The grid's shape and georeferencing.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Raw sample at `(col, row)`, or `None` if outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.spec.ncols || row >= self.spec.nrows {
            return None;
        }
        self.data.get(row * self.spec.ncols + col).copied()
    }

    /// Bilinearly interpolated value at grid coordinates `(x, y)` in km.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (col, row) = self.spec.to_index(x, y);
        self.sample_index(col, row)
    }

    /// Bilinearly interpolated value at fractional `(col, row)` indices.
    ///
    /// Indices are clamped onto the grid. Grid-aligned positions read exactly
    /// one sample.
    pub fn sample_index(&self, col: f64, row: f64) -> f64 {
        if self.data.is_empty() || col.is_nan() || row.is_nan() {
            return f64::NAN;
        }
        let col = col.clamp(0.0, (self.spec.ncols - 1) as f64);
        let row = row.clamp(0.0, (self.spec.nrows - 1) as f64);

        let (c0, c1) = (col.floor() as usize, col.ceil() as usize);
        let (r0, r1) = (row.floor() as usize, row.ceil() as usize);
        let u = col - c0 as f64;
        let v = row - r0 as f64;

        let at = |c: usize, r: usize| self.data[r * self.spec.ncols + c] as f64;
        let f00 = at(c0, r0);
        let f10 = at(c1, r0);
        let f01 = at(c0, r1);
        let f11 = at(c1, r1);

        f00 * (1.0 - u) * (1.0 - v) + f10 * u * (1.0 - v) + f01 * (1.0 - u) * v + f11 * u * v
    }
}
