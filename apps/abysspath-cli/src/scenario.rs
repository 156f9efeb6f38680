use std::path::Path;

use abysspath_common::EntityId;
use abysspath_overlay::OverlaySettings;
use abysspath_projection::{HostSnapshot, PerspectiveCamera, TerrainHeight};
use abysspath_tracker::EntitySighting;
use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;

/// Planar terrain: `base + slope · grid`, in world units.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PlaneTerrain {
    pub base: f32,
    pub slope: Vec2,
}

impl TerrainHeight for PlaneTerrain {
    fn height_at(&self, grid: Vec2) -> Option<f32> {
        Some(self.base + self.slope.dot(grid))
    }
}

/// One recorded frame of host state to replay through the overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: OverlaySettings,
    pub host: HostSnapshot,
    #[serde(default)]
    pub camera: PerspectiveCamera,
    #[serde(default)]
    pub terrain: PlaneTerrain,
    #[serde(default)]
    pub entities: Vec<EntitySighting>,
    /// Ids removed after all sightings, before the frame is drawn.
    #[serde(default)]
    pub removed: Vec<EntityId>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            _ => bail!("unsupported scenario format: {}", path.display()),
        };
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_terrain_height() {
        let t = PlaneTerrain {
            base: -10.0,
            slope: Vec2::new(2.0, 0.5),
        };
        assert_eq!(t.height_at(Vec2::new(3.0, 4.0)), Some(-2.0));
    }

    #[test]
    fn minimal_yaml_scenario() {
        let yaml = r#"
host:
  player_grid: [10.0, 10.0]
  player_elevation: 0.0
  camera_height: 677.0
  minimap:
    visible: true
    zoom: 1.0
    rect: { x: 0.0, y: 0.0, width: 1920.0, height: 1080.0 }
    shift: [0.0, 0.0]
    default_shift: [960.0, 540.0]
  window: { x: 0.0, y: 0.0, width: 1920.0, height: 1080.0 }
entities:
  - { id: 1, category: "Metadata/MiscellaneousObjects/Abyss/AbyssNodeSmall", grid: [12.0, 10.0] }
removed: [7]
"#;
        let s: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(s.entities.len(), 1);
        assert_eq!(s.removed, vec![EntityId(7)]);
        assert!(!s.settings.enable);
        assert_eq!(s.host.minimap.default_shift, Vec2::new(960.0, 540.0));
    }

    #[test]
    fn bundled_demo_parses() {
        let s: Scenario =
            serde_yaml::from_str(include_str!("../../../demos/abyss_path.yaml")).unwrap();
        assert!(s.settings.enable);
        assert_eq!(s.entities.len(), 7);
        assert_eq!(s.removed, vec![EntityId(1005)]);
        assert_eq!(s.camera.fov_degrees, 60.0);
    }
}
