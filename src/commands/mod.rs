//! Command handlers: thin dispatch over the service layer.
//!
//! - `runtime.rs` — scriptable commands (zones/questions/check/inspect).
//! - `wizard.rs` — the interactive two-screen inspection flow.

pub mod runtime;
pub mod wizard;
