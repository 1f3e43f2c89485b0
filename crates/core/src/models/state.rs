use serde::{Deserialize, Serialize};

use super::calculator::CalculatorKind;
use crate::services::calculation_store::CalculationStore;

/// The part of the app state that survives restarts.
///
/// UI-only state (open modals, focused fields) is not part of it; hosts
/// rebuild that on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Calculator the user last had open
    #[serde(default)]
    pub selected_calculator: Option<CalculatorKind>,

    /// Saved calculations, most recent first
    #[serde(default)]
    pub saved_calculations: CalculationStore,
}
