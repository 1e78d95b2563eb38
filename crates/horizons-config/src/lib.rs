//! Configuration system for the Horizons world generator.
//!
//! Generation tunables, density policy and logging settings persist to disk
//! as RON files. Supports CLI overrides via clap, hot-reload detection, and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AxisWeights, Config, DebugConfig, GroundConfig, SpawnConfig, WorldGenConfig,
    default_config_dir,
};
pub use error::ConfigError;
