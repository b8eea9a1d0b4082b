//! Embassy async tasks
//!
//! The driver tasks live in `echoloop-hal-rp2040`; this crate only owns the
//! cooperative application loop.

pub mod app;

pub use app::app_task;
