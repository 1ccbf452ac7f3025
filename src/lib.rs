//! bench-compare - cross-system benchmark comparison
//!
//! Ingests repeated timing measurements of several systems over a shared
//! benchmark corpus and produces one joined dataset comparing the systems
//! instance by instance.

pub mod aggregate;
pub mod config;
pub mod join;
pub mod label;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod scorer;
pub mod summary;

pub use aggregate::{aggregate, AggregatedRecord, Aggregates, IdentityKey};
pub use bench_classifier::{classify, AlgorithmVariant, BenchType, ClassifyError, Group, Identity};
pub use config::{CompareConfig, ConfigError, EffectiveConfig};
pub use join::{join, join_with_stats, JoinOutcome, JoinedRecord, SystemCell};
pub use label::{plot_points, LabelPolicy, PlotPoint};
pub use pipeline::{compare_file, compare_text, Comparison, PipelineError};
pub use record::{normalize, normalize_text, NormalizeError, Normalized, RawMeasurement, ResolvedRecord};
pub use summary::{ExitCode, RunSummary};
