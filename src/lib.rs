// Library surface for headless/integration tests and reuse.
// The binary in main.rs is a thin terminal loop over these modules.
pub mod config;
pub mod keyboard;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod words;
pub mod wrap;
