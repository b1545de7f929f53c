use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::field::FieldKey;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub trait OptionEnum: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn code(self) -> i32 {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .map_or(-1, |idx| idx as i32)
    }

    fn from_code(field: FieldKey, code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| InspectorError::contract(field, code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalMode {
    Import,
    Calculate,
    None,
}

impl OptionEnum for NormalMode {
    const ALL: &'static [Self] = &[Self::Import, Self::Calculate, Self::None];

    fn label(self) -> &'static str {
        match self {
            Self::Import => "Import",
            Self::Calculate => "Calculate",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TangentMode {
    Import,
    CalculateMikk,
    CalculateLegacy,
    CalculateLegacySplit,
    None,
}

impl OptionEnum for TangentMode {
    const ALL: &'static [Self] = &[
        Self::Import,
        Self::CalculateMikk,
        Self::CalculateLegacy,
        Self::CalculateLegacySplit,
        Self::None,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Import => "Import",
            Self::CalculateMikk => "Calculate Tangent Space",
            Self::CalculateLegacy => "Calculate Legacy",
            Self::CalculateLegacySplit => "Calculate Legacy - Split Tangents",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalCalculationMode {
    UnweightedLegacy,
    Unweighted,
    AreaWeighted,
    AngleWeighted,
    AreaAndAngleWeighted,
}

impl OptionEnum for NormalCalculationMode {
    const ALL: &'static [Self] = &[
        Self::UnweightedLegacy,
        Self::Unweighted,
        Self::AreaWeighted,
        Self::AngleWeighted,
        Self::AreaAndAngleWeighted,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::UnweightedLegacy => "Unweighted Legacy",
            Self::Unweighted => "Unweighted",
            Self::AreaWeighted => "Area Weighted",
            Self::AngleWeighted => "Angle Weighted",
            Self::AreaAndAngleWeighted => "Area and Angle Weighted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshCompression {
    Off,
    Low,
    Medium,
    High,
}

impl OptionEnum for MeshCompression {
    const ALL: &'static [Self] = &[Self::Off, Self::Low, Self::Medium, Self::High];

    fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialNaming {
    BaseTextureName,
    ModelMaterial,
    ModelNameAndMaterial,
    // Obsolete, offered only while a record uses it.
    TextureOrModelNameAndMaterial,
}

impl OptionEnum for MaterialNaming {
    const ALL: &'static [Self] = &[
        Self::BaseTextureName,
        Self::ModelMaterial,
        Self::ModelNameAndMaterial,
        Self::TextureOrModelNameAndMaterial,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::BaseTextureName => "By Base Texture Name",
            Self::ModelMaterial => "From Model's Material",
            Self::ModelNameAndMaterial => "Model Name + Model's Material",
            Self::TextureOrModelNameAndMaterial => {
                "Texture Name or Model Name + Model's Material (Obsolete)"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialSearch {
    LocalFolder,
    RecursiveUp,
    ProjectWide,
}

impl OptionEnum for MaterialSearch {
    const ALL: &'static [Self] = &[Self::LocalFolder, Self::RecursiveUp, Self::ProjectWide];

    fn label(self) -> &'static str {
        match self {
            Self::LocalFolder => "Local Materials Folder",
            Self::RecursiveUp => "Recursive-Up",
            Self::ProjectWide => "Project-Wide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Fbx,
    Gltf,
    Collada,
    Blend,
    Obj,
    ThreeDs,
    Unknown,
}

impl SourceFormat {
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("fbx") => Self::Fbx,
            Some("gltf") | Some("glb") => Self::Gltf,
            Some("dae") => Self::Collada,
            Some("blend") => Self::Blend,
            Some("obj") => Self::Obj,
            Some("3ds") => Self::ThreeDs,
            _ => Self::Unknown,
        }
    }

    pub fn supports_tangent_import(self) -> bool {
        matches!(self, Self::Fbx | Self::Gltf | Self::Collada | Self::Blend)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneOffset {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    pub position: [f32; 3],
}

impl BoneOffset {
    pub fn scaled(&self, factor: f32) -> [f32; 3] {
        [
            self.position[0] * factor,
            self.position[1] * factor,
            self.position[2] * factor,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryUvSettings {
    pub hard_angle: f32,
    pub pack_margin: f32,
    pub angle_distortion: f32,
    pub area_distortion: f32,
}

impl Default for SecondaryUvSettings {
    fn default() -> Self {
        Self {
            hard_angle: 88.0,
            pack_margin: 4.0,
            angle_distortion: 8.0,
            area_distortion: 15.0,
        }
    }
}

impl SecondaryUvSettings {
    pub fn rounded(self) -> Self {
        Self {
            hard_angle: self.hard_angle.round(),
            pack_margin: self.pack_margin.round(),
            angle_distortion: self.angle_distortion.round(),
            area_distortion: self.area_distortion.round(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub name: String,
    pub source_path: String,

    pub global_scale: f32,
    pub use_file_scale: bool,
    pub file_scale: f32,
    pub mesh_compression: MeshCompression,
    pub is_readable: bool,
    pub optimize_mesh: bool,
    pub import_blend_shapes: bool,
    pub add_colliders: bool,
    pub keep_quads: bool,
    pub weld_vertices: bool,
    pub swap_uv_channels: bool,
    pub generate_secondary_uv: bool,
    pub secondary_uv: SecondaryUvSettings,

    pub normal_mode: NormalMode,
    pub normal_calculation_mode: NormalCalculationMode,
    pub normal_smoothing_angle: f32,
    pub tangent_mode: TangentMode,

    pub import_materials: bool,
    pub material_naming: MaterialNaming,
    pub material_search: MaterialSearch,

    pub skeleton: Vec<BoneOffset>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_path: String::new(),
            global_scale: 1.0,
            use_file_scale: true,
            file_scale: 1.0,
            mesh_compression: MeshCompression::Off,
            is_readable: true,
            optimize_mesh: true,
            import_blend_shapes: true,
            add_colliders: false,
            keep_quads: false,
            weld_vertices: true,
            swap_uv_channels: false,
            generate_secondary_uv: false,
            secondary_uv: SecondaryUvSettings::default(),
            normal_mode: NormalMode::Import,
            normal_calculation_mode: NormalCalculationMode::AreaAndAngleWeighted,
            normal_smoothing_angle: 60.0,
            tangent_mode: TangentMode::CalculateMikk,
            import_materials: true,
            material_naming: MaterialNaming::BaseTextureName,
            material_search: MaterialSearch::RecursiveUp,
            skeleton: Vec::new(),
        }
    }
}

impl ImportConfig {
    pub fn source_format(&self) -> SourceFormat {
        SourceFormat::from_path(&self.source_path)
    }
}
