//! TUI application layer
//!
//! Owns the terminal, the navigator and the quiz session, and wires
//! session events, persisted progress and the rewarded-ad gate together
//! in a single tick loop.

pub mod ads;
pub mod app;
pub mod screens;
pub mod tui;

pub use ads::SimulatedAdGate;
pub use app::App;
pub use tui::Tui;
