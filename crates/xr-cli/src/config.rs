//! Scenario files: a box scene plus scripted pointer devices, loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use xr_core::{PointerEventKind, Pose};
use xr_pointer::{BallisticConfig, HapticConfig};
use xr_router::RouterConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Frames to run
    #[serde(default = "default_frames")]
    pub frames: u64,

    pub router: RouterConfig,

    pub objects: Vec<ObjectDef>,

    pub devices: Vec<DeviceDef>,
}

fn default_frames() -> u64 {
    10
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            router: RouterConfig::default(),
            objects: Vec::new(),
            devices: Vec::new(),
        }
    }
}

/// Axis-aligned box in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDef {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    pub min: Vec3,
    pub max: Vec3,

    /// Layer index (0..32)
    #[serde(default)]
    pub layer: u32,

    #[serde(default)]
    pub parent: Option<u64>,

    /// Event kinds this object declares handlers for
    #[serde(default)]
    pub handlers: Vec<PointerEventKind>,
}

impl ObjectDef {
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{}", self.id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    #[default]
    Straight,
    Ballistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDef {
    #[serde(default)]
    pub kind: DeviceKind,

    #[serde(default)]
    pub pose: Pose,

    /// Pose changes applied at the start of the given frame
    #[serde(default)]
    pub path: Vec<PoseKey>,

    /// Frames with a press edge
    #[serde(default)]
    pub presses: Vec<u64>,

    /// Frames with a release edge
    #[serde(default)]
    pub releases: Vec<u64>,

    #[serde(default)]
    pub haptics: HapticConfig,

    #[serde(default)]
    pub ballistic: BallisticConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseKey {
    pub frame: u64,
    pub pose: Pose,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for object in &self.objects {
            anyhow::ensure!(
                object.layer < 32,
                "object {} has layer {} (max 31)",
                object.id,
                object.layer
            );
            anyhow::ensure!(
                object.min.cmple(object.max).all(),
                "object {} has min > max",
                object.id
            );
        }
        for (index, device) in self.devices.iter().enumerate() {
            if device.kind == DeviceKind::Ballistic {
                device
                    .ballistic
                    .validate()
                    .with_context(|| format!("device {index}: invalid ballistic config"))?;
            }
        }
        Ok(())
    }
}
