//! Configuration merge system
//!
//! Implements the 3-layer configuration merge:
//! 1. Built-in defaults
//! 2. Config file (TOML, e.g. `bench-compare.toml`)
//! 3. CLI flags

mod compare;
mod defaults;
mod effective;
mod merge;

pub use compare::{CompareConfig, LabelConfig};
pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};
