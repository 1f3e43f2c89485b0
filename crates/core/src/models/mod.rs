pub mod calculator;
pub mod record;
pub mod settings;
pub mod state;
