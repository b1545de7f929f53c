use crate::import_inspector::correction::apply_scale_correction;
use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::field::{FieldKey, FieldType, FieldValue};
use crate::import_inspector::material::shows_obsolete_naming;
use crate::import_inspector::reconcile::{TangentChoices, reconcile, tangent_choices};
use crate::import_inspector::settings::{
    ImportConfig, MaterialNaming, NormalMode, OptionEnum, SecondaryUvSettings, TangentMode,
};
use crate::import_inspector::store::{
    FormatCapability, RecordStore, SelectionProvider, SelectionStore, TangentCapability,
    tangent_support_flag,
};
use tracing::{debug, info};

const SECONDARY_UV_FIELDS: [FieldKey; 4] = [
    FieldKey::SecondaryUvHardAngle,
    FieldKey::SecondaryUvPackMargin,
    FieldKey::SecondaryUvAngleDistortion,
    FieldKey::SecondaryUvAreaDistortion,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TangentView {
    pub choices: TangentChoices,
    pub selected: FieldValue<Option<usize>>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    pub fields_written: usize,
    pub bones_rescaled: usize,
}

pub struct InspectorSession {
    store: SelectionStore,
    capability: Box<dyn TangentCapability + Send + Sync>,
    show_obsolete_naming: bool,
    secondary_uv_defaults: SecondaryUvSettings,
    pub secondary_uv_advanced_open: bool,
}

impl InspectorSession {
    pub fn open(records: Vec<ImportConfig>) -> Result<Self> {
        Self::with_capability(records, FormatCapability)
    }

    pub fn with_capability(
        records: Vec<ImportConfig>,
        capability: impl TangentCapability + Send + Sync + 'static,
    ) -> Result<Self> {
        let store = SelectionStore::new(records)?;
        let show_obsolete_naming = shows_obsolete_naming(store.current_selection());
        info!(records = store.record_count(), "opened import inspector session");
        Ok(Self {
            store,
            capability: Box::new(capability),
            show_obsolete_naming,
            secondary_uv_defaults: SecondaryUvSettings::default(),
            secondary_uv_advanced_open: false,
        })
    }

    pub fn with_secondary_uv_defaults(mut self, defaults: SecondaryUvSettings) -> Self {
        self.secondary_uv_defaults = defaults;
        self
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn selection(&self) -> &[ImportConfig] {
        self.store.current_selection()
    }

    pub fn target_count(&self) -> usize {
        self.store.record_count()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn show_obsolete_naming(&self) -> bool {
        self.show_obsolete_naming
    }

    pub fn tangent_import_supported(&self) -> bool {
        tangent_support_flag(self.selection(), self.capability.as_ref())
    }

    pub fn get<T: FieldType>(&self, field: FieldKey) -> Result<FieldValue<T>> {
        self.store.field(field)
    }

    pub fn set<T: FieldType>(&mut self, field: FieldKey, value: T) -> Result<()> {
        self.store.set_uniform(field, value)
    }

    // Each record reconciles against its own previous normal mode.
    pub fn set_normal_mode(&mut self, mode: NormalMode) -> Result<bool> {
        let previous = self.get::<NormalMode>(FieldKey::NormalMode)?;
        if previous == FieldValue::Uniform(mode) {
            return Ok(false);
        }

        let supported = self.tangent_import_supported();
        for index in 0..self.store.record_count() {
            let record_normal = NormalMode::from_property(
                FieldKey::NormalMode,
                self.store.get_field(index, FieldKey::NormalMode)?,
            )?;
            let record_tangent = TangentMode::from_property(
                FieldKey::TangentMode,
                self.store.get_field(index, FieldKey::TangentMode)?,
            )?;
            let result = reconcile(mode, record_normal, supported, record_tangent);
            self.store
                .set_field(index, FieldKey::NormalMode, mode.into_property())?;
            self.store
                .set_field(index, FieldKey::TangentMode, result.tangent_mode.into_property())?;
        }
        Ok(true)
    }

    pub fn tangent_view(&self) -> Result<TangentView> {
        let supported = self.tangent_import_supported();
        let tangent = self.get::<TangentMode>(FieldKey::TangentMode)?;
        let view = match self.get::<NormalMode>(FieldKey::NormalMode)? {
            FieldValue::Uniform(normal) => {
                let choices = tangent_choices(normal, supported);
                TangentView {
                    choices,
                    selected: tangent.map(|mode| choices.index_of(mode)),
                    enabled: normal != NormalMode::None,
                }
            }
            FieldValue::Divergent => TangentView {
                choices: TangentChoices::All,
                selected: FieldValue::Divergent,
                enabled: false,
            },
        };
        Ok(view)
    }

    pub fn select_tangent(&mut self, index: usize) -> Result<TangentMode> {
        let view = self.tangent_view()?;
        if !view.enabled {
            return Err(InspectorError::contract(FieldKey::TangentMode, index));
        }
        let mode = view.choices.mode_at(index)?;
        self.set(FieldKey::TangentMode, mode)?;
        Ok(mode)
    }

    pub fn select_option<E: OptionEnum + FieldType>(
        &mut self,
        field: FieldKey,
        options: &[E],
        index: usize,
    ) -> Result<E> {
        let value = options
            .get(index)
            .copied()
            .ok_or_else(|| InspectorError::contract(field, index))?;
        self.set(field, value)?;
        Ok(value)
    }

    pub fn naming_options(&self) -> &'static [MaterialNaming] {
        crate::import_inspector::material::naming_options(self.show_obsolete_naming)
    }

    pub fn set_smoothing_angle(&mut self, degrees: f32) -> Result<()> {
        self.set(FieldKey::NormalSmoothingAngle, degrees.round())
    }

    pub fn set_secondary_uv(&mut self, field: FieldKey, value: f32) -> Result<()> {
        if !SECONDARY_UV_FIELDS.contains(&field) {
            return Err(InspectorError::contract(field, value));
        }
        self.set(field, value)?;
        for key in SECONDARY_UV_FIELDS {
            if let FieldValue::Uniform(current) = self.get::<f32>(key)? {
                self.set(key, current.round())?;
            }
        }
        Ok(())
    }

    pub fn reset_secondary_uv(&mut self) -> Result<()> {
        let defaults = self.secondary_uv_defaults.rounded();
        self.set(FieldKey::SecondaryUvHardAngle, defaults.hard_angle)?;
        self.set(FieldKey::SecondaryUvPackMargin, defaults.pack_margin)?;
        self.set(FieldKey::SecondaryUvAngleDistortion, defaults.angle_distortion)?;
        self.set(FieldKey::SecondaryUvAreaDistortion, defaults.area_distortion)
    }

    // Offsets are rescaled on the staged copies inside the same commit.
    pub fn apply(&mut self) -> Result<ApplyReport> {
        let new_scale = self.get::<f32>(FieldKey::GlobalScale)?;
        let mut bones_rescaled = 0;
        let fields_written = self.store.commit_with(&mut |previous, staged| {
            let previous_scale = previous.first().map_or(0.0, |config| config.global_scale);
            bones_rescaled = apply_scale_correction(staged, previous_scale, new_scale);
        })?;
        self.show_obsolete_naming = shows_obsolete_naming(self.selection());
        Ok(ApplyReport {
            fields_written,
            bones_rescaled,
        })
    }

    pub fn revert(&mut self) {
        self.store.discard();
        self.show_obsolete_naming = shows_obsolete_naming(self.selection());
        debug!("reverted import inspector edits");
    }

    pub fn close(self) -> Vec<ImportConfig> {
        self.store.into_records()
    }
}
