// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod bank;
pub mod config;
pub mod game;
pub mod keyboard;
pub mod runtime;
pub mod snapshot;
pub mod stats;
pub mod ui;
pub mod util;

pub const TICK_RATE_MS: u64 = 100;
