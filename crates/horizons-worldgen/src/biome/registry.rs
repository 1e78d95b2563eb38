//! Biome registry: maps [`BiomeId`] to [`BiomeDef`] with name-based lookup.
//!
//! Registration order matters: it is the tie-break for both `ABOVE` and
//! `REGION` selection, and the first registered biome is the fallback.

use hashbrown::HashMap;

use super::{BiomeCategory, BiomeDef};

/// Unique identifier for a biome (its registration index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
    /// A `REGION` biome has no generation axes to be classified by.
    #[error("region biome {0} has no generation axes")]
    MissingAxes(String),
    /// Rarity must lie in `[0.0, 1.0]`.
    #[error("biome {name} has rarity {rarity} outside [0, 1]")]
    InvalidRarity { name: String, rarity: f64 },
    /// A world needs at least one biome.
    #[error("biome registry is empty")]
    Empty,
    /// All `u16` slots are consumed.
    #[error("biome registry is full")]
    Full,
}

/// Stores all registered biome definitions with O(1) lookup by ID.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    biomes: Vec<BiomeDef>,
    name_to_id: HashMap<String, BiomeId>,
    above: Vec<BiomeId>,
    region: Vec<BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
            above: Vec::new(),
            region: Vec::new(),
        }
    }

    /// Builds a registry from definitions in order.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::Empty`] for an empty list, or the first
    /// registration error.
    pub fn from_defs(defs: impl IntoIterator<Item = BiomeDef>) -> Result<Self, BiomeRegistryError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        if registry.is_empty() {
            return Err(BiomeRegistryError::Empty);
        }
        Ok(registry)
    }

    /// Registers a new biome definition, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists,
    /// [`BiomeRegistryError::MissingAxes`] for a `REGION` biome without axes, and
    /// [`BiomeRegistryError::InvalidRarity`] for a rarity outside `[0, 1]`.
    pub fn register(&mut self, def: BiomeDef) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(BiomeRegistryError::DuplicateName(def.name));
        }
        if def.category == BiomeCategory::Region && def.generation_axes.is_none() {
            return Err(BiomeRegistryError::MissingAxes(def.name));
        }
        if !(0.0..=1.0).contains(&def.rarity) {
            return Err(BiomeRegistryError::InvalidRarity {
                name: def.name,
                rarity: def.rarity,
            });
        }
        if self.biomes.len() > u16::MAX as usize {
            return Err(BiomeRegistryError::Full);
        }

        let id = BiomeId(self.biomes.len() as u16);
        match def.category {
            BiomeCategory::Above => self.above.push(id),
            BiomeCategory::Region => self.region.push(id),
        }
        self.name_to_id.insert(def.name.clone(), id);
        self.biomes.push(def);
        Ok(id)
    }

    /// Returns the definition for the given biome ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range. IDs are only produced by the registry itself.
    pub fn get(&self, id: BiomeId) -> &BiomeDef {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// `ABOVE` biomes in registration order.
    pub fn above(&self) -> &[BiomeId] {
        &self.above
    }

    /// `REGION` biomes in registration order.
    pub fn region(&self) -> &[BiomeId] {
        &self.region
    }

    /// The first registered biome, used when nothing else matches.
    pub fn fallback(&self) -> Option<BiomeId> {
        (!self.biomes.is_empty()).then_some(BiomeId(0))
    }

    /// Iterates over `(id, definition)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &BiomeDef)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, def)| (BiomeId(i as u16), def))
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeVisuals, GenerationAxes};
    use crate::color::Rgb;

    fn biome(name: &str, category: BiomeCategory, axes: Option<(f64, f64)>) -> BiomeDef {
        BiomeDef {
            name: name.into(),
            category,
            generation_axes: axes.map(|(primary, secondary)| GenerationAxes {
                primary,
                secondary,
                tertiary: None,
            }),
            rarity: 0.0,
            visuals: BiomeVisuals {
                ground_color: Rgb::new(40, 120, 40),
                ground_noise_intensity: 0.0,
            },
            props: Vec::new(),
            entities: Vec::new(),
            items: Vec::new(),
            structures: Vec::new(),
        }
    }

    #[test]
    fn test_register_splits_categories_in_order() {
        let mut reg = BiomeRegistry::new();
        let plains = reg
            .register(biome("plains", BiomeCategory::Region, Some((0.5, 0.5))))
            .unwrap();
        let oasis = reg
            .register(biome("oasis", BiomeCategory::Above, None))
            .unwrap();
        let desert = reg
            .register(biome("desert", BiomeCategory::Region, Some((0.9, 0.1))))
            .unwrap();

        assert_eq!(reg.region(), &[plains, desert]);
        assert_eq!(reg.above(), &[oasis]);
        assert_eq!(reg.fallback(), Some(plains));
        assert_eq!(reg.get(desert).name, "desert");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = BiomeRegistry::new();
        reg.register(biome("desert", BiomeCategory::Region, Some((0.9, 0.1))))
            .unwrap();
        let err = reg
            .register(biome("desert", BiomeCategory::Above, None))
            .unwrap_err();
        assert_eq!(err, BiomeRegistryError::DuplicateName("desert".into()));
    }

    #[test]
    fn test_region_without_axes_rejected() {
        let mut reg = BiomeRegistry::new();
        let err = reg
            .register(biome("void", BiomeCategory::Region, None))
            .unwrap_err();
        assert_eq!(err, BiomeRegistryError::MissingAxes("void".into()));
    }

    #[test]
    fn test_invalid_rarity_rejected() {
        let mut def = biome("rare", BiomeCategory::Above, None);
        def.rarity = 1.5;
        let err = BiomeRegistry::new().register(def).unwrap_err();
        assert!(matches!(err, BiomeRegistryError::InvalidRarity { .. }));
    }

    #[test]
    fn test_from_defs_empty_is_error() {
        let err = BiomeRegistry::from_defs(Vec::new()).unwrap_err();
        assert_eq!(err, BiomeRegistryError::Empty);
    }

    #[test]
    fn test_lookup_by_name() {
        let reg = BiomeRegistry::from_defs([
            biome("forest", BiomeCategory::Region, Some((0.3, 0.8))),
            biome("tundra", BiomeCategory::Region, Some((0.1, 0.2))),
        ])
        .unwrap();
        assert_eq!(reg.lookup_by_name("tundra"), Some(BiomeId(1)));
        assert!(reg.lookup_by_name("jungle").is_none());
        assert_eq!(reg.iter().count(), 2);
    }
}
