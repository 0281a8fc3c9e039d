uniffi::setup_scaffolding!();

pub mod api;
pub mod trace_init;
