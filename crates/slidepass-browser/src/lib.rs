//! Browser-side drag replay for slidepass.
//!
//! Provides an owned Chromium session, a CDP pointer, and an executor that
//! turns a solver drag plan into ordered pointer events.

pub mod error;
pub mod executor;
pub mod fingerprint;
pub mod pointer;
pub mod retry;
pub mod session;

pub use error::{BrowserError, Result};
pub use executor::DragExecutor;
pub use pointer::{CdpPointer, PointerDevice};
pub use retry::RetryPolicy;
pub use session::BrowserSession;
