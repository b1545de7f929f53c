use crate::import_inspector::config::{InspectorConfig, load_config_or_default, load_selection_or_demo};
use crate::import_inspector::error::Result;
use crate::import_inspector::session::InspectorSession;
use bevy::prelude::Resource;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Resource)]
pub struct InspectorState {
    pub config: InspectorConfig,
    pub selection_path: PathBuf,
    pub session: InspectorSession,
    pub status: String,
}

impl InspectorState {
    pub fn open(config: InspectorConfig) -> Result<Self> {
        let selection_path = PathBuf::from(&config.selection_path);
        let records = load_selection_or_demo(&selection_path);
        let session = InspectorSession::open(records)?
            .with_secondary_uv_defaults(config.secondary_uv_defaults);
        info!(path = %selection_path.display(), "loaded import selection");
        Ok(Self {
            config,
            selection_path,
            session,
            status: "Ready".to_string(),
        })
    }

    pub fn selection_label(&self) -> String {
        match self.session.selection() {
            [single] => single.name.clone(),
            many => format!("{} import settings", many.len()),
        }
    }

    pub fn apply(&mut self) {
        match self.session.apply() {
            Ok(report) if report.bones_rescaled > 0 => {
                self.status = format!(
                    "Applied {} field(s), rescaled {} bone offset(s)",
                    report.fields_written, report.bones_rescaled
                );
            }
            Ok(report) => {
                self.status = format!("Applied {} field(s)", report.fields_written);
            }
            Err(err) => self.report_error(&err),
        }
    }

    pub fn revert(&mut self) {
        self.session.revert();
        self.status = "Reverted".to_string();
    }

    pub fn reload(&mut self) {
        match Self::open(self.config.clone()) {
            Ok(state) => {
                *self = state;
                self.status = "Selection reloaded".to_string();
            }
            Err(err) => self.report_error(&err),
        }
    }

    pub fn report_error(&mut self, err: &dyn std::error::Error) {
        error!("{err}");
        self.status = format!("Error: {err}");
    }

    pub fn selection_path(&self) -> &Path {
        &self.selection_path
    }
}

pub fn load_initial_state() -> Result<InspectorState> {
    InspectorState::open(load_config_or_default())
}
