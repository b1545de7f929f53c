use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::field::FieldKey;
use crate::import_inspector::settings::{ImportConfig, NormalMode, OptionEnum, TangentMode};
use tracing::debug;

const ALL_MODES: &[TangentMode] = &[
    TangentMode::Import,
    TangentMode::CalculateMikk,
    TangentMode::CalculateLegacy,
    TangentMode::CalculateLegacySplit,
    TangentMode::None,
];

const CALCULATED_MODES: &[TangentMode] = &[
    TangentMode::CalculateMikk,
    TangentMode::CalculateLegacy,
    TangentMode::CalculateLegacySplit,
    TangentMode::None,
];

const NONE_MODES: &[TangentMode] = &[TangentMode::None];

pub const NORMALS_REQUIRED_LABEL: &str = "None - (Normals required)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TangentChoices {
    All,
    Calculated,
    NormalsRequired,
}

impl TangentChoices {
    pub fn modes(self) -> &'static [TangentMode] {
        match self {
            Self::All => ALL_MODES,
            Self::Calculated => CALCULATED_MODES,
            Self::NormalsRequired => NONE_MODES,
        }
    }

    pub fn labels(self) -> Vec<&'static str> {
        match self {
            Self::NormalsRequired => vec![NORMALS_REQUIRED_LABEL],
            _ => self.modes().iter().map(|mode| mode.label()).collect(),
        }
    }

    pub fn contains(self, mode: TangentMode) -> bool {
        self.modes().contains(&mode)
    }

    pub fn index_of(self, mode: TangentMode) -> Option<usize> {
        self.modes().iter().position(|candidate| *candidate == mode)
    }

    pub fn mode_at(self, index: usize) -> Result<TangentMode> {
        self.modes()
            .get(index)
            .copied()
            .ok_or_else(|| InspectorError::contract(FieldKey::TangentMode, index))
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::NormalsRequired)
    }
}

pub fn tangent_choices(normal_mode: NormalMode, tangent_import_supported: bool) -> TangentChoices {
    match (normal_mode, tangent_import_supported) {
        (NormalMode::None, _) => TangentChoices::NormalsRequired,
        (NormalMode::Import, true) => TangentChoices::All,
        (NormalMode::Import, false) | (NormalMode::Calculate, _) => TangentChoices::Calculated,
    }
}

// A deliberate legacy choice is replaced by CalculateMikk as well.
pub fn propagate_tangent_mode(normal_mode: NormalMode, tangent_import_supported: bool) -> TangentMode {
    match (normal_mode, tangent_import_supported) {
        (NormalMode::None, _) => TangentMode::None,
        (NormalMode::Import, true) => TangentMode::Import,
        _ => TangentMode::CalculateMikk,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub tangent_mode: TangentMode,
    pub choices: TangentChoices,
    pub selected: Option<usize>,
}

impl Reconciliation {
    pub fn changed_from(&self, current: TangentMode) -> bool {
        self.tangent_mode != current
    }
}

pub fn reconcile(
    normal_mode: NormalMode,
    previous_normal_mode: NormalMode,
    tangent_import_supported: bool,
    current_tangent_mode: TangentMode,
) -> Reconciliation {
    let tangent_mode = if normal_mode != previous_normal_mode {
        let next = propagate_tangent_mode(normal_mode, tangent_import_supported);
        debug!(
            ?previous_normal_mode,
            ?normal_mode,
            from = ?current_tangent_mode,
            to = ?next,
            "tangent mode follows normal mode"
        );
        next
    } else {
        current_tangent_mode
    };

    let choices = tangent_choices(normal_mode, tangent_import_supported);
    Reconciliation {
        tangent_mode,
        choices,
        selected: choices.index_of(tangent_mode),
    }
}

pub fn legal_tangent_mode(config: &ImportConfig) -> Option<TangentMode> {
    let supported = config.source_format().supports_tangent_import();
    if tangent_choices(config.normal_mode, supported).contains(config.tangent_mode) {
        return None;
    }
    Some(propagate_tangent_mode(config.normal_mode, supported))
}
