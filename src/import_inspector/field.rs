use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::settings::{
    ImportConfig, MaterialNaming, MaterialSearch, MeshCompression, NormalCalculationMode,
    NormalMode, OptionEnum, TangentMode,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKey {
    GlobalScale,
    UseFileScale,
    FileScale,
    MeshCompression,
    IsReadable,
    OptimizeMesh,
    ImportBlendShapes,
    AddColliders,
    KeepQuads,
    WeldVertices,
    SwapUvChannels,
    GenerateSecondaryUv,
    SecondaryUvHardAngle,
    SecondaryUvPackMargin,
    SecondaryUvAngleDistortion,
    SecondaryUvAreaDistortion,
    NormalMode,
    NormalCalculationMode,
    NormalSmoothingAngle,
    TangentMode,
    ImportMaterials,
    MaterialNaming,
    MaterialSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Int(i32),
    Float(f32),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<T> {
    Uniform(T),
    Divergent,
}

impl<T: PartialEq> FieldValue<T> {
    pub fn gather<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        for value in iter {
            if value != first {
                return Some(Self::Divergent);
            }
        }
        Some(Self::Uniform(first))
    }
}

impl<T> FieldValue<T> {
    pub fn uniform(&self) -> Option<&T> {
        match self {
            Self::Uniform(value) => Some(value),
            Self::Divergent => None,
        }
    }

    pub fn is_divergent(&self) -> bool {
        matches!(self, Self::Divergent)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldValue<U> {
        match self {
            Self::Uniform(value) => FieldValue::Uniform(f(value)),
            Self::Divergent => FieldValue::Divergent,
        }
    }
}

pub trait FieldType: Sized + Copy + PartialEq {
    fn from_property(field: FieldKey, value: PropertyValue) -> Result<Self>;
    fn into_property(self) -> PropertyValue;
}

impl FieldType for bool {
    fn from_property(field: FieldKey, value: PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::Bool(flag) => Ok(flag),
            other => Err(InspectorError::contract(field, format!("{other:?}"))),
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Bool(self)
    }
}

impl FieldType for f32 {
    fn from_property(field: FieldKey, value: PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::Float(number) => Ok(number),
            other => Err(InspectorError::contract(field, format!("{other:?}"))),
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Float(self)
    }
}

macro_rules! option_field_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn from_property(field: FieldKey, value: PropertyValue) -> Result<Self> {
                    match value {
                        PropertyValue::Int(code) => <$ty as OptionEnum>::from_code(field, code),
                        other => Err(InspectorError::contract(field, format!("{other:?}"))),
                    }
                }

                fn into_property(self) -> PropertyValue {
                    PropertyValue::Int(self.code())
                }
            }
        )*
    };
}

option_field_type!(
    NormalMode,
    TangentMode,
    NormalCalculationMode,
    MeshCompression,
    MaterialNaming,
    MaterialSearch,
);

impl ImportConfig {
    pub fn property(&self, field: FieldKey) -> PropertyValue {
        match field {
            FieldKey::GlobalScale => self.global_scale.into_property(),
            FieldKey::UseFileScale => self.use_file_scale.into_property(),
            FieldKey::FileScale => self.file_scale.into_property(),
            FieldKey::MeshCompression => self.mesh_compression.into_property(),
            FieldKey::IsReadable => self.is_readable.into_property(),
            FieldKey::OptimizeMesh => self.optimize_mesh.into_property(),
            FieldKey::ImportBlendShapes => self.import_blend_shapes.into_property(),
            FieldKey::AddColliders => self.add_colliders.into_property(),
            FieldKey::KeepQuads => self.keep_quads.into_property(),
            FieldKey::WeldVertices => self.weld_vertices.into_property(),
            FieldKey::SwapUvChannels => self.swap_uv_channels.into_property(),
            FieldKey::GenerateSecondaryUv => self.generate_secondary_uv.into_property(),
            FieldKey::SecondaryUvHardAngle => self.secondary_uv.hard_angle.into_property(),
            FieldKey::SecondaryUvPackMargin => self.secondary_uv.pack_margin.into_property(),
            FieldKey::SecondaryUvAngleDistortion => {
                self.secondary_uv.angle_distortion.into_property()
            }
            FieldKey::SecondaryUvAreaDistortion => {
                self.secondary_uv.area_distortion.into_property()
            }
            FieldKey::NormalMode => self.normal_mode.into_property(),
            FieldKey::NormalCalculationMode => self.normal_calculation_mode.into_property(),
            FieldKey::NormalSmoothingAngle => self.normal_smoothing_angle.into_property(),
            FieldKey::TangentMode => self.tangent_mode.into_property(),
            FieldKey::ImportMaterials => self.import_materials.into_property(),
            FieldKey::MaterialNaming => self.material_naming.into_property(),
            FieldKey::MaterialSearch => self.material_search.into_property(),
        }
    }

    pub fn set_property(&mut self, field: FieldKey, value: PropertyValue) -> Result<()> {
        match field {
            FieldKey::GlobalScale => self.global_scale = f32::from_property(field, value)?,
            FieldKey::UseFileScale => self.use_file_scale = bool::from_property(field, value)?,
            FieldKey::FileScale => self.file_scale = f32::from_property(field, value)?,
            FieldKey::MeshCompression => {
                self.mesh_compression = MeshCompression::from_property(field, value)?
            }
            FieldKey::IsReadable => self.is_readable = bool::from_property(field, value)?,
            FieldKey::OptimizeMesh => self.optimize_mesh = bool::from_property(field, value)?,
            FieldKey::ImportBlendShapes => {
                self.import_blend_shapes = bool::from_property(field, value)?
            }
            FieldKey::AddColliders => self.add_colliders = bool::from_property(field, value)?,
            FieldKey::KeepQuads => self.keep_quads = bool::from_property(field, value)?,
            FieldKey::WeldVertices => self.weld_vertices = bool::from_property(field, value)?,
            FieldKey::SwapUvChannels => {
                self.swap_uv_channels = bool::from_property(field, value)?
            }
            FieldKey::GenerateSecondaryUv => {
                self.generate_secondary_uv = bool::from_property(field, value)?
            }
            FieldKey::SecondaryUvHardAngle => {
                self.secondary_uv.hard_angle = f32::from_property(field, value)?
            }
            FieldKey::SecondaryUvPackMargin => {
                self.secondary_uv.pack_margin = f32::from_property(field, value)?
            }
            FieldKey::SecondaryUvAngleDistortion => {
                self.secondary_uv.angle_distortion = f32::from_property(field, value)?
            }
            FieldKey::SecondaryUvAreaDistortion => {
                self.secondary_uv.area_distortion = f32::from_property(field, value)?
            }
            FieldKey::NormalMode => self.normal_mode = NormalMode::from_property(field, value)?,
            FieldKey::NormalCalculationMode => {
                self.normal_calculation_mode = NormalCalculationMode::from_property(field, value)?
            }
            FieldKey::NormalSmoothingAngle => {
                self.normal_smoothing_angle = f32::from_property(field, value)?
            }
            FieldKey::TangentMode => {
                self.tangent_mode = TangentMode::from_property(field, value)?
            }
            FieldKey::ImportMaterials => {
                self.import_materials = bool::from_property(field, value)?
            }
            FieldKey::MaterialNaming => {
                self.material_naming = MaterialNaming::from_property(field, value)?
            }
            FieldKey::MaterialSearch => {
                self.material_search = MaterialSearch::from_property(field, value)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gather_marks_differing_values() {
        assert_eq!(FieldValue::gather([1, 1, 1]), Some(FieldValue::Uniform(1)));
        assert_eq!(FieldValue::gather([1, 2, 1]), Some(FieldValue::Divergent));
        assert_eq!(FieldValue::gather(Vec::<i32>::new()), None);
    }

    #[test]
    fn divergent_maps_to_divergent() {
        let value: FieldValue<i32> = FieldValue::Divergent;
        assert!(value.map(|v| v * 2).is_divergent());
        assert_eq!(FieldValue::Uniform(3).map(|v| v * 2), FieldValue::Uniform(6));
    }

    #[test]
    fn property_write_then_read() {
        let mut config = ImportConfig::default();
        config
            .set_property(FieldKey::TangentMode, PropertyValue::Int(3))
            .unwrap();
        assert_eq!(config.tangent_mode, TangentMode::CalculateLegacySplit);
        assert_eq!(
            config.property(FieldKey::TangentMode),
            PropertyValue::Int(3)
        );
    }

    #[test]
    fn wrong_kind_leaves_record_untouched() {
        let mut config = ImportConfig::default();
        let before = config.clone();
        let err = config
            .set_property(FieldKey::GlobalScale, PropertyValue::Bool(true))
            .unwrap_err();
        assert!(matches!(
            err,
            InspectorError::ContractViolation {
                field: FieldKey::GlobalScale,
                ..
            }
        ));
        assert_eq!(config, before);
    }

    #[test]
    fn out_of_table_code_is_rejected() {
        let mut config = ImportConfig::default();
        assert!(
            config
                .set_property(FieldKey::NormalMode, PropertyValue::Int(7))
                .is_err()
        );
        assert_eq!(config.normal_mode, NormalMode::Import);
    }
}
