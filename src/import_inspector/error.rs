use crate::import_inspector::field::FieldKey;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectorError {
    // Version skew between the option tables and stored data.
    #[error("contract violation on {field:?}: unsupported value {value}")]
    ContractViolation { field: FieldKey, value: String },

    #[error("selection is empty")]
    EmptySelection,

    #[error("no record at selection index {0}")]
    UnknownRecord(usize),

    #[error("failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: ron::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InspectorError {
    pub fn contract(field: FieldKey, value: impl ToString) -> Self {
        Self::ContractViolation {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T, E = InspectorError> = std::result::Result<T, E>;
