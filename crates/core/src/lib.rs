pub mod calculators;
pub mod errors;
pub mod input;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    calculator::CalculatorKind,
    record::{Calculation, CalculationInputs, CalculationRecord},
    settings::Settings,
    state::PersistedState,
};
use services::calculation_store::CalculationStore;
use storage::{backend::KeyValueStorage, manager::StorageManager};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Stock Calculator core library.
/// Holds the persisted state, the storage backend and the host settings.
///
/// Every mutating call is all-or-nothing: the change is applied to a copy,
/// the whole blob is written, and only then does the copy replace the live
/// state. On a storage failure the in-memory state is left exactly as the
/// last successfully written blob.
#[must_use]
pub struct StockCalculator {
    state: PersistedState,
    storage: Box<dyn KeyValueStorage>,
    settings: Settings,
}

impl std::fmt::Debug for StockCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockCalculator")
            .field("selected_calculator", &self.state.selected_calculator)
            .field("saved_calculations", &self.state.saved_calculations.len())
            .field("storage", &self.storage.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl StockCalculator {
    /// Start with an empty state without reading the backend.
    /// Nothing is written until the first mutation or [`flush`](Self::flush).
    pub fn create_new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::build(PersistedState::default(), storage, Settings::default())
    }

    /// Load the state stored under the default key (empty if none).
    pub async fn open(storage: Box<dyn KeyValueStorage>) -> Result<Self, CoreError> {
        Self::open_with_settings(storage, Settings::default()).await
    }

    /// Load the state stored under `settings.storage_key` (empty if none).
    pub async fn open_with_settings(
        storage: Box<dyn KeyValueStorage>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let state = StorageManager::restore(storage.as_ref(), &settings.storage_key).await?;
        Ok(Self::build(state, storage, settings))
    }

    // ── Evaluation ──────────────────────────────────────────────────

    /// Run the evaluator for the inputs' kind. Pure; touches no state.
    pub fn evaluate(inputs: CalculationInputs) -> Result<Calculation, CoreError> {
        Calculation::evaluate(inputs)
    }

    // ── Selected Calculator ─────────────────────────────────────────

    #[must_use]
    pub fn selected_calculator(&self) -> Option<CalculatorKind> {
        self.state.selected_calculator
    }

    /// Remember which calculator is open (`None` = back on the menu).
    pub async fn select_calculator(
        &mut self,
        kind: Option<CalculatorKind>,
    ) -> Result<(), CoreError> {
        self.commit(|state| {
            state.selected_calculator = kind;
            Ok(())
        })
        .await
    }

    // ── Saved Calculations ──────────────────────────────────────────

    /// Save a new named calculation. `label` is required for new records.
    pub async fn save_calculation(
        &mut self,
        kind: CalculatorKind,
        calculation: Calculation,
        label: Option<&str>,
    ) -> Result<Uuid, CoreError> {
        self.commit(|state| state.saved_calculations.save(kind, calculation, label))
            .await
    }

    /// Evaluate `inputs` and save the result under `label` in one step.
    pub async fn evaluate_and_save(
        &mut self,
        inputs: CalculationInputs,
        label: &str,
    ) -> Result<Uuid, CoreError> {
        let calculation = Calculation::evaluate(inputs)?;
        let kind = calculation.kind();
        self.save_calculation(kind, calculation, Some(label)).await
    }

    /// Replace a saved record's inputs/outputs; `None` keeps the label.
    pub async fn update_calculation(
        &mut self,
        id: Uuid,
        calculation: Calculation,
        label: Option<&str>,
    ) -> Result<(), CoreError> {
        self.commit(|state| state.saved_calculations.update(id, calculation, label))
            .await
    }

    pub async fn rename_calculation(&mut self, id: Uuid, label: &str) -> Result<(), CoreError> {
        self.commit(|state| state.saved_calculations.rename(id, label))
            .await
    }

    /// Delete a saved record and return it (e.g. for an undo snackbar).
    pub async fn delete_calculation(&mut self, id: Uuid) -> Result<CalculationRecord, CoreError> {
        self.commit(|state| state.saved_calculations.delete(id))
            .await
    }

    /// Delete every saved record. Returns how many were removed.
    pub async fn clear_calculations(&mut self) -> Result<usize, CoreError> {
        self.commit(|state| Ok(state.saved_calculations.clear()))
            .await
    }

    #[must_use]
    pub fn list_by_kind(&self, kind: CalculatorKind) -> Vec<&CalculationRecord> {
        self.state.saved_calculations.list_by_kind(kind)
    }

    #[must_use]
    pub fn get_calculation(&self, id: Uuid) -> Option<&CalculationRecord> {
        self.state.saved_calculations.get(id)
    }

    #[must_use]
    pub fn saved_calculations(&self) -> &CalculationStore {
        &self.state.saved_calculations
    }

    /// Search saved records by label (case-insensitive).
    #[must_use]
    pub fn search_calculations(&self, query: &str) -> Vec<&CalculationRecord> {
        self.state.saved_calculations.search(query)
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write the current state again (e.g. after `create_new`).
    pub async fn flush(&self) -> Result<(), CoreError> {
        StorageManager::persist(self.storage.as_ref(), &self.settings.storage_key, &self.state)
            .await
    }

    /// Drop the stored blob and reset to an empty state.
    pub async fn reset(&mut self) -> Result<(), CoreError> {
        self.storage.remove_item(&self.settings.storage_key).await?;
        self.state = PersistedState::default();
        self.apply_settings();
        Ok(())
    }

    /// Saved calculations as pretty JSON (for sharing or debugging).
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state.saved_calculations)
            .map_err(|e| CoreError::Serialization(format!("Failed to export calculations: {e}")))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: PersistedState, storage: Box<dyn KeyValueStorage>, settings: Settings) -> Self {
        let mut calculator = Self {
            state,
            storage,
            settings,
        };
        calculator.apply_settings();
        calculator
    }

    fn apply_settings(&mut self) {
        self.state
            .saved_calculations
            .set_max_label_len(self.settings.max_label_len);
    }

    /// Apply `change` to a copy of the state, persist the copy, then adopt it.
    async fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut PersistedState) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut next = self.state.clone();
        let out = change(&mut next)?;
        StorageManager::persist(self.storage.as_ref(), &self.settings.storage_key, &next).await?;
        self.state = next;
        Ok(out)
    }
}
