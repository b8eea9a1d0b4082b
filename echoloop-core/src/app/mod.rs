//! Application state machine
//!
//! One state variable, advanced by `tick()`. Driver callbacks never touch it;
//! they only set flags in the shared [`Context`].

pub mod machine;
pub mod state;

pub use machine::{App, Context};
pub use state::ApplicationState;
