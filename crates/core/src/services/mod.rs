pub mod calculation_store;
