//! Errors produced while building a world or generating chunks.

use horizons_assets::AssetError;
use thiserror::Error;

use crate::biome::BiomeRegistryError;
use crate::spawn::CandidateKind;

/// Configuration faults detected by the world generator.
///
/// "No valid placement" is not an error: a spawn point that fits nothing
/// simply stays empty.
#[derive(Debug, Error, PartialEq)]
pub enum WorldGenError {
    #[error("biome registry: {0}")]
    Biome(#[from] BiomeRegistryError),
    #[error("asset registry: {0}")]
    Asset(#[from] AssetError),
    #[error("unknown structure layout {0:?}")]
    UnknownLayout(String),
    #[error("layout {layout:?} has invalid cell marker {marker:?}")]
    InvalidMarker { layout: String, marker: String },
    #[error("layout {0:?} is empty or not rectangular")]
    MalformedLayout(String),
    #[error("biome {biome:?} {kind} entry {entry:?} has density {density} outside [0, 1]")]
    InvalidDensity {
        biome: String,
        kind: CandidateKind,
        entry: String,
        density: f64,
    },
    #[error("invalid world generation tuning: {0}")]
    InvalidTuning(String),
}
