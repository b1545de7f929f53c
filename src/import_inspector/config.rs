use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::panel::SliderRanges;
use crate::import_inspector::settings::{
    BoneOffset, ImportConfig, MaterialNaming, NormalMode, SecondaryUvSettings, TangentMode,
};
use crate::import_inspector::{DEFAULT_SELECTION_PATH, INSPECTOR_CONFIG_PATH};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Mesh Import Inspector".to_string(),
            width: 1400,
            height: 900,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub window: WindowSettings,
    pub selection_path: String,
    pub secondary_uv_defaults: SecondaryUvSettings,
    pub ranges: SliderRanges,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            selection_path: DEFAULT_SELECTION_PATH.to_string(),
            secondary_uv_defaults: SecondaryUvSettings::default(),
            ranges: SliderRanges::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionFile {
    pub records: Vec<ImportConfig>,
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| InspectorError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    ron::de::from_str::<T>(&text).map_err(|source| InspectorError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_inspector_config(path: &Path) -> Result<InspectorConfig> {
    read_ron(path)
}

pub fn load_selection(path: &Path) -> Result<Vec<ImportConfig>> {
    let file: SelectionFile = read_ron(path)?;
    if file.records.is_empty() {
        return Err(InspectorError::EmptySelection);
    }
    Ok(file.records)
}

pub fn save_selection(path: &Path, records: &[ImportConfig]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| InspectorError::ConfigWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = SelectionFile {
        records: records.to_vec(),
    };
    let content = ron::ser::to_string_pretty(&file, PrettyConfig::new()).map_err(|source| {
        InspectorError::Serialize {
            what: "selection",
            source,
        }
    })?;
    fs::write(path, content).map_err(|source| InspectorError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config_or_default() -> InspectorConfig {
    let path = Path::new(INSPECTOR_CONFIG_PATH);
    if !path.exists() {
        return InspectorConfig::default();
    }
    load_inspector_config(path).unwrap_or_else(|err| {
        warn!("Falling back to built-in inspector config: {err}");
        InspectorConfig::default()
    })
}

pub fn load_selection_or_demo(path: &Path) -> Vec<ImportConfig> {
    load_selection(path).unwrap_or_else(|err| {
        warn!("Falling back to built-in demo selection: {err}");
        demo_selection()
    })
}

fn bone(name: &str, parent: Option<usize>, position: [f32; 3]) -> BoneOffset {
    BoneOffset {
        name: name.to_string(),
        parent,
        position,
    }
}

pub fn demo_selection() -> Vec<ImportConfig> {
    vec![ImportConfig {
        name: "Knight".to_string(),
        source_path: "assets/models/knight.fbx".to_string(),
        normal_mode: NormalMode::Import,
        tangent_mode: TangentMode::Import,
        material_naming: MaterialNaming::ModelMaterial,
        skeleton: vec![
            bone("hips", None, [0.0, 0.0, 0.95]),
            bone("spine", Some(0), [0.0, 0.0, 0.25]),
            bone("chest", Some(1), [0.0, 0.0, 0.25]),
            bone("neck", Some(2), [0.0, 0.0, 0.2]),
            bone("head", Some(3), [0.0, 0.0, 0.12]),
            bone("upper_arm.l", Some(2), [0.2, 0.0, 0.12]),
            bone("forearm.l", Some(5), [0.28, 0.0, 0.0]),
            bone("upper_arm.r", Some(2), [-0.2, 0.0, 0.12]),
            bone("forearm.r", Some(7), [-0.28, 0.0, 0.0]),
            bone("thigh.l", Some(0), [0.1, 0.0, -0.05]),
            bone("shin.l", Some(9), [0.0, 0.0, -0.45]),
            bone("thigh.r", Some(0), [-0.1, 0.0, -0.05]),
            bone("shin.r", Some(11), [0.0, 0.0, -0.45]),
        ],
        ..ImportConfig::default()
    }]
}
