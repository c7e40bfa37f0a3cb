//! Tabulated incident neutrino flux spectra.

use crate::spline::CubicSpline;
use crate::{PhysicsError, Result};
use numc_common::{RandomEngine, RandomError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Spectrum used when none is configured.
pub const DEFAULT_SPECTRUM: &str = "Kotera2010_mix_max";

/// An energy spectrum with spline interpolation.
///
/// Files list `N` followed by `N` pairs of `log10(E/eV)` and
/// `q = log10(E^2 dN/dE)` in GeV units. The stored flux is
/// `q + 9 - log10(E)`.
#[derive(Debug, Clone)]
pub struct FluxSpectrum {
    energies: Vec<f64>,
    spline: CubicSpline,
    min_flux: f64,
    max_flux: f64,
}

impl FluxSpectrum {
    /// Load the spectrum `<dir>/<name>.dat`.
    pub fn named<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        Self::load(dir.as_ref().join(format!("{name}.dat")))
    }

    /// Load a spectrum file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PhysicsError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;
        let malformed = |reason: String| PhysicsError::Malformed {
            path: PathBuf::from(path),
            reason,
        };

        let mut tokens = text.split_whitespace();
        let count: usize = tokens
            .next()
            .ok_or_else(|| malformed("missing entry count".to_string()))?
            .parse()
            .map_err(|_| malformed("invalid entry count".to_string()))?;

        let values = tokens
            .take(2 * count)
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("invalid value '{token}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        if values.len() != 2 * count {
            return Err(malformed(format!(
                "expected {count} entries, found {}",
                values.len() / 2
            )));
        }

        let points = values
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1] + 9.0 - pair[0]))
            .collect();
        let spectrum = Self::from_points(points).map_err(|_| malformed("no entries".to_string()))?;
        debug!(path = %path.display(), entries = count, "loaded flux spectrum");
        Ok(spectrum)
    }

    /// Build a spectrum from already converted `(log10 E, flux)` points.
    ///
    /// Points are sorted by energy; a repeated energy keeps the last value.
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Result<Self> {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|later, earlier| {
            if later.0 == earlier.0 {
                earlier.1 = later.1;
                true
            } else {
                false
            }
        });
        if points.is_empty() {
            return Err(PhysicsError::Malformed {
                path: PathBuf::new(),
                reason: "flux spectrum has no entries".to_string(),
            });
        }

        let (energies, fluxes): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let min_flux = fluxes.iter().copied().fold(f64::INFINITY, f64::min);
        let max_flux = fluxes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spline = CubicSpline::new(&energies, &fluxes);

        Ok(Self {
            energies,
            spline,
            min_flux,
            max_flux,
        })
    }

    /// Lowest tabulated energy (log10 eV).
    pub fn min_energy(&self) -> f64 {
        self.energies[0]
    }

    /// Highest tabulated energy (log10 eV).
    pub fn max_energy(&self) -> f64 {
        self.energies[self.energies.len() - 1]
    }

    pub fn min_flux(&self) -> f64 {
        self.min_flux
    }

    pub fn max_flux(&self) -> f64 {
        self.max_flux
    }

    /// Interpolated flux at `energy`, clamped outside the table.
    pub fn flux(&self, energy: f64) -> f64 {
        self.spline.evaluate(energy)
    }

    /// Draw an energy in `[min_energy, max_energy]` from the spectrum by
    /// acceptance/rejection against the tabulated flux range.
    pub fn sample_energy(
        &self,
        rng: &mut RandomEngine,
        min_energy: f64,
        max_energy: f64,
    ) -> std::result::Result<f64, RandomError> {
        rng.sample_from_function(
            |energy| self.flux(energy),
            min_energy,
            max_energy,
            self.min_flux,
            self.max_flux,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_sorts_and_records_range() {
        let spectrum =
            FluxSpectrum::from_points(vec![(18.0, -17.0), (16.0, -15.0), (20.0, -19.5)]).unwrap();
        assert_eq!(spectrum.min_energy(), 16.0);
        assert_eq!(spectrum.max_energy(), 20.0);
        assert_eq!(spectrum.min_flux(), -19.5);
        assert_eq!(spectrum.max_flux(), -15.0);
        assert_relative_eq!(spectrum.flux(18.0), -17.0, epsilon = 1e-12);
        assert_eq!(spectrum.flux(10.0), -15.0);
    }

    #[test]
    fn test_empty_spectrum() {
        assert!(FluxSpectrum::from_points(vec![]).is_err());
    }

    #[test]
    fn test_sample_energy_in_range() {
        let spectrum = FluxSpectrum::from_points(vec![(16.0, -15.0), (18.0, -16.0), (20.0, -17.0)])
            .unwrap();
        let mut rng = RandomEngine::new(12);
        let n = 5_000;
        let mut total = 0.0;
        for _ in 0..n {
            let e = spectrum.sample_energy(&mut rng, 16.0, 20.0).unwrap();
            assert!((16.0..20.0).contains(&e));
            total += e;
        }
        // Density falls linearly from 2 to 0 above the minimum; mean is 16 + 4/3
        assert_relative_eq!(total / n as f64, 16.0 + 4.0 / 3.0, epsilon = 0.05);
    }
}
