use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::calculator::CalculatorKind;
use crate::models::record::{Calculation, CalculationRecord};
use crate::models::settings::DEFAULT_MAX_LABEL_LEN;

/// Saved calculations, most recent first.
///
/// Pure in-memory list. Persisting after each mutation is the caller's job
/// (see `StockCalculator`). Serializes as a plain JSON array of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationStore {
    records: Vec<CalculationRecord>,

    #[serde(skip, default = "default_max_label_len")]
    max_label_len: usize,
}

fn default_max_label_len() -> usize {
    DEFAULT_MAX_LABEL_LEN
}

impl Default for CalculationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }

    /// Change the label length limit applied by `save`, `update` and `rename`.
    pub fn set_max_label_len(&mut self, max_label_len: usize) {
        self.max_label_len = max_label_len;
    }

    /// Save a new named calculation at the front of the list.
    ///
    /// A label is mandatory for new records: `None` or a blank label is rejected.
    pub fn save(
        &mut self,
        kind: CalculatorKind,
        calculation: Calculation,
        label: Option<&str>,
    ) -> Result<Uuid, CoreError> {
        if calculation.kind() != kind {
            return Err(CoreError::ValidationError(format!(
                "Cannot save a '{}' calculation as '{kind}'",
                calculation.kind()
            )));
        }
        let label = label.ok_or_else(|| {
            CoreError::ValidationError("A name is required to save a calculation".into())
        })?;
        let label = self.check_label(label)?;

        let record = CalculationRecord::new(calculation, Some(label));
        let id = record.id;
        self.records.insert(0, record);
        tracing::debug!(%id, %kind, "saved calculation");
        Ok(id)
    }

    /// Replace the inputs/outputs of an existing record in place.
    /// `label` is optional here; `None` keeps the current one.
    pub fn update(
        &mut self,
        id: Uuid,
        calculation: Calculation,
        label: Option<&str>,
    ) -> Result<(), CoreError> {
        let label = label.map(|l| self.check_label(l)).transpose()?;
        let record = self.find_mut(id)?;

        if record.kind() != calculation.kind() {
            return Err(CoreError::ValidationError(format!(
                "Record {id} is a '{}' calculation, got '{}'",
                record.kind(),
                calculation.kind()
            )));
        }

        record.replace_calculation(calculation);
        if let Some(label) = label {
            record.set_label(label);
        }
        tracing::debug!(%id, "updated calculation");
        Ok(())
    }

    /// Change only the display name.
    pub fn rename(&mut self, id: Uuid, label: &str) -> Result<(), CoreError> {
        let label = self.check_label(label)?;
        self.find_mut(id)?.set_label(label);
        tracing::debug!(%id, "renamed calculation");
        Ok(())
    }

    /// Remove a record by id and hand it back.
    pub fn delete(&mut self, id: Uuid) -> Result<CalculationRecord, CoreError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;
        tracing::debug!(%id, "deleted calculation");
        Ok(self.records.remove(idx))
    }

    /// Drop every record. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        tracing::debug!(removed, "cleared saved calculations");
        removed
    }

    /// Records of one calculator kind, most recent first.
    #[must_use]
    pub fn list_by_kind(&self, kind: CalculatorKind) -> Vec<&CalculationRecord> {
        self.records.iter().filter(|r| r.kind() == kind).collect()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, most recent first.
    #[must_use]
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    /// Case-insensitive substring match on labels.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CalculationRecord> {
        let q = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.label
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&q)
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn find_mut(&mut self, id: Uuid) -> Result<&mut CalculationRecord, CoreError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))
    }

    fn check_label(&self, label: &str) -> Result<String, CoreError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Calculation name must not be empty".into(),
            ));
        }
        let chars = trimmed.chars().count();
        if chars > self.max_label_len {
            return Err(CoreError::ValidationError(format!(
                "Calculation name is {chars} characters long, maximum is {}",
                self.max_label_len
            )));
        }
        Ok(trimmed.to_string())
    }
}
