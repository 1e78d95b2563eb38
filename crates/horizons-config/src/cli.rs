//! Command-line argument parsing for the Horizons tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Horizons command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "horizons", about = "Deterministic 2D world generator")]
pub struct CliArgs {
    /// World seed. A random seed is chosen when omitted.
    #[arg(long)]
    pub seed: Option<i64>,

    /// Path to a world definition (`.ron` or `.json`).
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Number of chunks to generate in each direction around the origin.
    #[arg(long, default_value_t = 2)]
    pub radius: u32,

    /// Chunk side length in world units.
    #[arg(long)]
    pub chunk_size: Option<f64>,

    /// Spawn point spacing in world units.
    #[arg(long)]
    pub spawn_step: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.chunk_size {
            self.worldgen.chunk_size = size;
        }
        if let Some(step) = args.spawn_step {
            self.worldgen.spawn_step = step;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            seed: None,
            world: None,
            radius: 2,
            chunk_size: None,
            spawn_step: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            chunk_size: Some(1000.0),
            log_level: Some("trace".to_string()),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.worldgen.chunk_size, 1000.0);
        assert_eq!(config.debug.log_level, "trace");
        // Non-overridden fields retain defaults
        assert_eq!(config.worldgen.spawn_step, 100.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["horizons", "--seed", "42", "--radius", "4"]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.radius, 4);
        assert!(args.world.is_none());
    }
}
