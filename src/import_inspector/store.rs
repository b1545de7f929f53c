use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::field::{FieldKey, FieldType, FieldValue, PropertyValue};
use crate::import_inspector::settings::ImportConfig;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub trait RecordStore {
    fn record_count(&self) -> usize;

    fn get_field(&self, index: usize, field: FieldKey) -> Result<PropertyValue>;

    fn set_field(&mut self, index: usize, field: FieldKey, value: PropertyValue) -> Result<()>;

    fn has_multiple_values(&self, field: FieldKey) -> bool;

    // Nothing is written if staging fails.
    fn commit_with(
        &mut self,
        pre_commit: &mut dyn FnMut(&[ImportConfig], &mut [ImportConfig]),
    ) -> Result<usize>;

    fn discard(&mut self);

    fn field<T: FieldType>(&self, field: FieldKey) -> Result<FieldValue<T>>
    where
        Self: Sized,
    {
        if self.record_count() == 0 {
            return Err(InspectorError::EmptySelection);
        }
        if self.has_multiple_values(field) {
            return Ok(FieldValue::Divergent);
        }
        let value = self.get_field(0, field)?;
        T::from_property(field, value).map(FieldValue::Uniform)
    }

    fn set_uniform<T: FieldType>(&mut self, field: FieldKey, value: T) -> Result<()>
    where
        Self: Sized,
    {
        for index in 0..self.record_count() {
            self.set_field(index, field, value.into_property())?;
        }
        Ok(())
    }
}

pub trait SelectionProvider {
    fn current_selection(&self) -> &[ImportConfig];
}

pub trait TangentCapability {
    fn supports_tangent_import(&self, config: &ImportConfig) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FormatCapability;

impl TangentCapability for FormatCapability {
    fn supports_tangent_import(&self, config: &ImportConfig) -> bool {
        config.source_format().supports_tangent_import()
    }
}

pub fn tangent_support_flag(selection: &[ImportConfig], capability: &dyn TangentCapability) -> bool {
    selection
        .iter()
        .all(|config| capability.supports_tangent_import(config))
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    committed: Vec<ImportConfig>,
    pending: Vec<BTreeMap<FieldKey, PropertyValue>>,
}

impl SelectionStore {
    pub fn new(records: Vec<ImportConfig>) -> Result<Self> {
        if records.is_empty() {
            return Err(InspectorError::EmptySelection);
        }
        let pending = vec![BTreeMap::new(); records.len()];
        Ok(Self {
            committed: records,
            pending,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.pending.iter().any(|edits| !edits.is_empty())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.iter().map(BTreeMap::len).sum()
    }

    pub fn into_records(self) -> Vec<ImportConfig> {
        self.committed
    }

    fn staged_record(&self, index: usize) -> Result<ImportConfig> {
        let mut record = self
            .committed
            .get(index)
            .cloned()
            .ok_or(InspectorError::UnknownRecord(index))?;
        for (field, value) in &self.pending[index] {
            record.set_property(*field, *value)?;
        }
        Ok(record)
    }
}

impl RecordStore for SelectionStore {
    fn record_count(&self) -> usize {
        self.committed.len()
    }

    fn get_field(&self, index: usize, field: FieldKey) -> Result<PropertyValue> {
        let record = self
            .committed
            .get(index)
            .ok_or(InspectorError::UnknownRecord(index))?;
        Ok(self.pending[index]
            .get(&field)
            .copied()
            .unwrap_or_else(|| record.property(field)))
    }

    fn set_field(&mut self, index: usize, field: FieldKey, value: PropertyValue) -> Result<()> {
        let mut probe = self.staged_record(index)?;
        probe.set_property(field, value)?;

        let edits = &mut self.pending[index];
        if self.committed[index].property(field) == value {
            edits.remove(&field);
        } else {
            edits.insert(field, value);
        }
        Ok(())
    }

    fn has_multiple_values(&self, field: FieldKey) -> bool {
        let values = (0..self.committed.len()).filter_map(|index| self.get_field(index, field).ok());
        FieldValue::gather(values).is_some_and(|value| value.is_divergent())
    }

    fn commit_with(
        &mut self,
        pre_commit: &mut dyn FnMut(&[ImportConfig], &mut [ImportConfig]),
    ) -> Result<usize> {
        let written = self.pending_count();
        let mut staged = (0..self.committed.len())
            .map(|index| self.staged_record(index))
            .collect::<Result<Vec<_>>>()?;

        pre_commit(&self.committed, &mut staged);

        self.committed = staged;
        for edits in &mut self.pending {
            edits.clear();
        }
        info!(records = self.committed.len(), fields = written, "committed import settings");
        Ok(written)
    }

    fn discard(&mut self) {
        if self.is_dirty() {
            debug!(fields = self.pending_count(), "discarded pending edits");
        }
        for edits in &mut self.pending {
            edits.clear();
        }
    }
}

impl SelectionProvider for SelectionStore {
    fn current_selection(&self) -> &[ImportConfig] {
        &self.committed
    }
}
