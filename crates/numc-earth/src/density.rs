//! Radial density profile of the Earth (PREM-like tables).

use crate::{EarthError, Result};
use std::path::Path;
use tracing::debug;

/// Minimum number of columns on a profile line.
pub const PROFILE_COLUMNS: usize = 10;

const RADIUS_COLUMN: usize = 0;
const DENSITY_COLUMN: usize = 2;

/// Density as a function of radius, linearly interpolated.
///
/// Radii are in km and densities in g/cm^3, stored in increasing radius
/// order. Radii below the innermost entry take the innermost density and
/// radii above the outermost entry take the outermost density.
#[derive(Debug, Clone)]
pub struct RadialDensityModel {
    radii: Vec<f64>,
    densities: Vec<f64>,
}

impl RadialDensityModel {
    /// Load a profile with radius in column 0 and density in column 2.
    ///
    /// Fields are separated by whitespace and/or commas. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EarthError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut radii = Vec::new();
        let mut densities = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |reason: String| EarthError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                reason,
            };

            let fields = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|field| !field.is_empty())
                .map(|field| {
                    field
                        .parse::<f64>()
                        .map_err(|_| malformed(format!("invalid number '{field}'")))
                })
                .collect::<Result<Vec<f64>>>()?;

            if fields.len() < PROFILE_COLUMNS {
                return Err(malformed(format!(
                    "expected at least {PROFILE_COLUMNS} columns, found {}",
                    fields.len()
                )));
            }
            radii.push(fields[RADIUS_COLUMN]);
            densities.push(fields[DENSITY_COLUMN]);
        }

        debug!(path = %path.display(), entries = radii.len(), "loaded density profile");
        Self::from_table(radii, densities)
    }

    /// Build a profile from parallel radius/density columns in either order.
    pub fn from_table(mut radii: Vec<f64>, mut densities: Vec<f64>) -> Result<Self> {
        if radii.len() != densities.len() {
            return Err(EarthError::ProfileMismatch {
                radii: radii.len(),
                densities: densities.len(),
            });
        }
        if radii.is_empty() {
            return Err(EarthError::EmptyProfile);
        }
        if radii[0] > radii[radii.len() - 1] {
            radii.reverse();
            densities.reverse();
        }
        Ok(Self { radii, densities })
    }

    /// Outermost tabulated radius (km).
    pub fn max_radius(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }

    /// Number of tabulated entries.
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Whether the profile has no entries. Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Density (g/cm^3) at radius `r` (km).
    pub fn density(&self, r: f64) -> f64 {
        let upper = self.radii.partition_point(|&radius| radius < r);
        if upper == 0 {
            return self.densities[0];
        }
        if upper == self.radii.len() {
            return self.densities[upper - 1];
        }

        let lower = upper - 1;
        let (r0, r1) = (self.radii[lower], self.radii[upper]);
        let (d0, d1) = (self.densities[lower], self.densities[upper]);
        d0 + (r - r0) * (d1 - d0) / (r1 - r0)
    }
}
