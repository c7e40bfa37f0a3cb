//! Metrics for the numc propagation engine.
//!
//! Every metric the engine emits is declared once here as a [`Metric`]
//! constant, so names and descriptions cannot drift between call sites. The
//! crate re-exports [`metrics`]; without an installed recorder all calls are
//! no-ops.
//!
//! # Example
//!
//! ```rust
//! use numc_metrics::{metric_defs, Metric, MetricKind};
//!
//! assert_eq!(metric_defs::PARTICLES.kind, MetricKind::Counter);
//! metrics::counter!(metric_defs::PARTICLES.name).increment(1);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// The kind of metric (counter, gauge, or histogram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// A monotonically increasing counter.
    Counter,
    /// A gauge that can go up and down.
    Gauge,
    /// A histogram for recording distributions.
    Histogram,
}

impl MetricKind {
    /// Returns the kind as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric declaration with its metadata.
///
/// ```rust
/// use numc_metrics::{Metric, MetricKind};
/// use metrics::Unit;
///
/// const STEPS: Metric = Metric::counter("numc.test.steps")
///     .with_description("Chord steps taken")
///     .with_unit(Unit::Count);
///
/// assert_eq!(STEPS.kind, MetricKind::Counter);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric name (e.g., "numc.propagation.particles").
    pub name: &'static str,
    /// The kind of metric (counter, gauge, histogram).
    pub kind: MetricKind,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// The unit of measurement (optional).
    pub unit: Option<Unit>,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    const fn with_kind(name: &'static str, kind: MetricKind) -> Self {
        Self {
            name,
            kind,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new counter metric with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Counter)
    }

    /// Creates a new gauge metric with the given name.
    pub const fn gauge(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Gauge)
    }

    /// Creates a new histogram metric with the given name.
    pub const fn histogram(name: &'static str) -> Self {
        Self::with_kind(name, MetricKind::Histogram)
    }

    /// Sets the description for the metric.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the unit for the metric.
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the expected label keys for the metric.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers this metric's description with the installed recorder.
    pub fn describe(&self) {
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(self.name, unit, self.description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(self.name, self.description);
            }
            (MetricKind::Gauge, Some(unit)) => {
                describe_gauge!(self.name, unit, self.description);
            }
            (MetricKind::Gauge, None) => {
                describe_gauge!(self.name, self.description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(self.name, unit, self.description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(self.name, self.description);
            }
        }
    }
}

/// All metric definitions emitted by the propagation engine.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Source neutrinos propagated.
    pub const PARTICLES: Metric = Metric::counter("numc.propagation.particles")
        .with_description("Source neutrinos propagated")
        .with_unit(Unit::Count);

    /// Interaction vertices recorded.
    ///
    /// Labels: interaction (charged, neutral, decay), kind (neutrino, lepton)
    pub const INTERACTIONS: Metric = Metric::counter("numc.propagation.interactions")
        .with_description("Interaction vertices recorded")
        .with_unit(Unit::Count)
        .with_labels(&["interaction", "kind"]);

    /// Trajectories that reached the end of their chord.
    pub const EXITED: Metric = Metric::counter("numc.propagation.exited")
        .with_description("Trajectories that exited the surface")
        .with_unit(Unit::Count);

    /// Trajectories that ended inside the Earth.
    pub const ABSORBED: Metric = Metric::counter("numc.propagation.absorbed")
        .with_description("Trajectories absorbed before exiting")
        .with_unit(Unit::Count);

    /// Chord length through the Earth of each sampled trajectory (km).
    pub const CHORD_LENGTH: Metric = Metric::histogram("numc.propagation.chord_length_km")
        .with_description("Chord length of sampled trajectories in km");

    /// Every metric above, for [`describe_metrics`](super::describe_metrics).
    pub const ALL: &[&Metric] = &[&PARTICLES, &INTERACTIONS, &EXITED, &ABSORBED, &CHORD_LENGTH];
}

/// Registers the descriptions of every metric in [`metric_defs::ALL`].
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_definitions() {
        assert_eq!(metric_defs::PARTICLES.name, "numc.propagation.particles");
        assert_eq!(metric_defs::INTERACTIONS.labels, &["interaction", "kind"]);
        assert_eq!(metric_defs::CHORD_LENGTH.kind, MetricKind::Histogram);
        assert_eq!(metric_defs::ALL.len(), 5);
    }

    #[test]
    fn test_metric_minimal() {
        const MINIMAL: Metric = Metric::gauge("minimal");

        assert_eq!(MINIMAL.name, "minimal");
        assert_eq!(MINIMAL.kind, MetricKind::Gauge);
        assert_eq!(MINIMAL.description, "");
        assert_eq!(MINIMAL.unit, None);
        assert_eq!(MINIMAL.labels, &[] as &[&str]);
    }

    #[test]
    fn test_describe_without_recorder() {
        describe_metrics();
        assert_eq!(MetricKind::Counter.to_string(), "counter");
    }
}
