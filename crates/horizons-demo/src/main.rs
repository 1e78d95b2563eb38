//! Demo binary that generates the chunks around the origin and logs what it made.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p horizons-demo -- --seed 42 --radius 3` for a fixed world,
//! or pass `--world path/to/world.ron` (or `.json`) to use your own definitions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use glam::DVec2;
use horizons_config::{CliArgs, Config, default_config_dir};
use horizons_worldgen::{ChunkCoord, World, WorldBundle, WorldGenError};
use thiserror::Error;
use tracing::info;

/// World definition used when `--world` is not given.
const SAMPLE_WORLD: &str = include_str!("../data/sample_world.json");

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid RON world definition: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid JSON world definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    WorldGen(#[from] WorldGenError),
}

/// Parses a bundle, choosing the format from the file extension.
fn parse_bundle(source: &str, path: Option<&Path>) -> Result<WorldBundle, DemoError> {
    let is_ron = path
        .and_then(Path::extension)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"));
    if is_ron {
        Ok(ron::from_str(source)?)
    } else {
        Ok(serde_json::from_str(source)?)
    }
}

fn load_bundle(path: Option<&Path>) -> Result<WorldBundle, DemoError> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Loading world definition from {}", path.display());
            parse_bundle(&source, Some(path))
        }
        None => {
            info!("Using built-in sample world");
            parse_bundle(SAMPLE_WORLD, None)
        }
    }
}

fn build_world(args: &CliArgs, config: &Config) -> Result<World, DemoError> {
    let bundle = load_bundle(args.world.as_deref())?;
    let (def, layouts, assets) = bundle.into_parts()?;
    let world = match args.seed {
        Some(seed) => World::new(seed, config, def, layouts, assets)?,
        None => World::with_random_seed(config, def, layouts, assets)?,
    };
    Ok(world)
}

/// Generates every chunk within `radius` of the origin, row by row.
fn generate_area(world: &mut World, radius: i64) -> Result<(), WorldGenError> {
    for y in -radius..=radius {
        for x in -radius..=radius {
            world.generate_chunk_data(ChunkCoord::new(x, y))?;
        }
    }
    Ok(())
}

/// One letter per chunk: the initial of the biome at its centre.
fn biome_map(world: &World, radius: i64) -> Vec<String> {
    let size = world.config().chunk_size;
    (-radius..=radius)
        .map(|y| {
            (-radius..=radius)
                .map(|x| {
                    let center = (DVec2::new(x as f64, y as f64) + 0.5) * size;
                    let point = world.biome_at_location(center);
                    world.biomes().get(point.biome).name.chars().next().unwrap_or('?')
                })
                .collect()
        })
        .collect()
}

fn log_summary(world: &World, radius: i64) {
    let mut props = 0;
    let mut tiles = 0;
    for (_, chunk) in world.chunks().iter() {
        props += chunk.props().len();
        tiles += chunk.tiles().len();
    }
    info!(
        "Seed {}: {} chunks, {} props, {} tiles, {} entities, {} items",
        world.seed(),
        world.chunks().len(),
        props,
        tiles,
        world.entities().len(),
        world.items().len()
    );

    let mut per_biome: BTreeMap<&str, usize> = BTreeMap::new();
    for coord in world.chunks().coords() {
        let center = (DVec2::new(coord.x as f64, coord.y as f64) + 0.5) * world.config().chunk_size;
        let point = world.biome_at_location(center);
        *per_biome
            .entry(world.biomes().get(point.biome).name.as_str())
            .or_default() += 1;
    }
    for (name, count) in &per_biome {
        info!("  {name}: {count} chunks");
    }

    info!("Biome map (chunk centres, north up):");
    for row in biome_map(world, radius) {
        info!("  {row}");
    }

    let origin = DVec2::ZERO;
    info!(
        "Ground at origin: {} (low quality {})",
        world.ground_color_at(origin, true),
        world.ground_color_at(origin, false)
    );
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    horizons_log::init_logging(Some(&config));

    let mut world = match build_world(&args, &config) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("Failed to create world: {e}");
            std::process::exit(1);
        }
    };

    let radius = i64::from(args.radius);
    if let Err(e) = generate_area(&mut world, radius) {
        tracing::error!("Chunk generation failed: {e}");
        std::process::exit(1);
    }

    log_summary(&world, radius);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world(seed: i64) -> World {
        let bundle = parse_bundle(SAMPLE_WORLD, None).unwrap();
        World::from_bundle(seed, &Config::default(), bundle).unwrap()
    }

    #[test]
    fn test_sample_world_is_valid() {
        let world = sample_world(42);
        assert_eq!(world.biomes().len(), 6);
        assert_eq!(world.settings().player_texture, "hero");
    }

    #[test]
    fn test_sample_world_generates() {
        let mut world = sample_world(7);
        generate_area(&mut world, 1).unwrap();
        assert_eq!(world.chunks().len(), 9);
        let props: usize = world.chunks().iter().map(|(_, c)| c.props().len()).sum();
        assert!(props > 0);
    }

    #[test]
    fn test_biome_map_shape() {
        let world = sample_world(3);
        let map = biome_map(&world, 2);
        assert_eq!(map.len(), 5);
        assert!(map.iter().all(|row| row.chars().count() == 5));
    }

    #[test]
    fn test_ron_extension_selects_ron() {
        let ron_src = r##"(
            biomes: [(
                name: "plains",
                category: REGION,
                generation_axes: Some((primary: 0.5, secondary: 0.5)),
                visuals: (ground_color: "#80a040"),
            )],
        )"##;
        let bundle = parse_bundle(ron_src, Some(Path::new("world.ron"))).unwrap();
        assert_eq!(bundle.biomes[0].name, "plains");
        assert!(parse_bundle(ron_src, Some(Path::new("world.json"))).is_err());
    }

    #[test]
    fn test_missing_world_file() {
        let err = load_bundle(Some(Path::new("/definitely/not/here.ron"))).unwrap_err();
        assert!(matches!(err, DemoError::Read { .. }));
    }
}
