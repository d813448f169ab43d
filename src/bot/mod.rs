//! Bot module - dispatcher wiring, run modes and the notification gateway.

pub mod dispatcher;
pub mod notifier;
mod runtime;
pub mod webhook;

pub use dispatcher::build_dispatcher;
pub use runtime::run;
