//! Serialized world definitions.
//!
//! A [`WorldBundle`] is the on-disk form (RON or JSON) holding everything a
//! world needs besides the seed and the engine configuration.

use std::collections::BTreeMap;

use horizons_assets::{AssetManifest, AssetRegistry};
use serde::{Deserialize, Serialize};

use crate::biome::BiomeDef;
use crate::error::WorldGenError;
use crate::structure::{LayoutDef, StructureLayouts};

/// World-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Entity texture used for the player. Empty means "none".
    #[serde(alias = "playerTexture")]
    pub player_texture: String,
}

/// Settings plus biome definitions in registration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDef {
    #[serde(default)]
    pub settings: WorldSettings,
    pub biomes: Vec<BiomeDef>,
}

/// A complete world definition as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldBundle {
    #[serde(default)]
    pub settings: WorldSettings,
    pub biomes: Vec<BiomeDef>,
    /// Structure templates by id.
    #[serde(default)]
    pub layouts: BTreeMap<String, LayoutDef>,
    #[serde(default)]
    pub assets: AssetManifest,
}

impl WorldBundle {
    /// Splits the bundle into a definition and its parsed registries.
    ///
    /// # Errors
    ///
    /// Returns the first layout or asset manifest error.
    pub fn into_parts(self) -> Result<(WorldDef, StructureLayouts, AssetRegistry), WorldGenError> {
        let layouts = StructureLayouts::from_defs(self.layouts)?;
        let assets = AssetRegistry::from_manifest(self.assets)?;
        let def = WorldDef {
            settings: self.settings,
            biomes: self.biomes,
        };
        Ok((def, layouts, assets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizons_assets::ElementKind;

    const BUNDLE_JSON: &str = r##"{
        "settings": { "playerTexture": "hero" },
        "biomes": [{
            "biomeName": "plains",
            "biomeType": "REGION",
            "generationAxes": { "primary": 0.5, "secondary": 0.5 },
            "visuals": { "groundColor": "#5a8c3c", "groundNoiseIntensity": 0.05 },
            "props": [{ "texture": "bush", "density": 0.3 }],
            "structures": [{
                "layout": "hut", "density": 0.2,
                "wallTexture": "stone", "floorTexture": "planks"
            }]
        }],
        "layouts": { "hut": { "layout": [["W", "W"], ["W", "F"]] } },
        "assets": {
            "props": { "bush": { "hasCollision": false, "naturalWidth": 8, "naturalHeight": 6 } },
            "entities": { "hero": { "hasCollision": true, "naturalWidth": 10, "naturalHeight": 16 } }
        }
    }"##;

    #[test]
    fn test_json_bundle_into_parts() {
        let bundle: WorldBundle = serde_json::from_str(BUNDLE_JSON).unwrap();
        let (def, layouts, assets) = bundle.into_parts().unwrap();

        assert_eq!(def.settings.player_texture, "hero");
        assert_eq!(def.biomes.len(), 1);
        assert_eq!(def.biomes[0].props[0].scale, 1.0);
        assert!(layouts.get("hut").is_ok());
        assert!(assets.contains(ElementKind::Entity, "hero"));
        assert!(!assets.get(ElementKind::Prop, "bush").unwrap().collidable);
    }

    #[test]
    fn test_ron_bundle_defaults() {
        let ron_src = r#"(
            biomes: [(
                name: "tundra",
                category: REGION,
                generation_axes: Some((primary: 0.1, secondary: 0.2)),
                visuals: (ground_color: "rgb(220, 230, 240)"),
            )],
        )"#;
        let bundle: WorldBundle = ron::from_str(ron_src).unwrap();
        assert!(bundle.layouts.is_empty());
        assert!(bundle.settings.player_texture.is_empty());
        let (def, _, assets) = bundle.into_parts().unwrap();
        assert_eq!(def.biomes[0].name, "tundra");
        assert!(assets.is_empty());
    }

    #[test]
    fn test_bad_layout_fails_split() {
        let mut bundle: WorldBundle = serde_json::from_str(BUNDLE_JSON).unwrap();
        bundle.layouts.insert(
            "broken".into(),
            LayoutDef {
                layout: vec![vec!["Q".into()]],
            },
        );
        assert!(matches!(
            bundle.into_parts(),
            Err(WorldGenError::InvalidMarker { .. })
        ));
    }
}
