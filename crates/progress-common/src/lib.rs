//! Shared progress domain types for the wp-progress engine.
//!
//! The [`calculator`] module holds the stateless conversions between work,
//! remaining work and % complete. Nothing here does I/O.

pub mod calculator;
pub mod mode;
pub mod status;
pub mod values;

pub use calculator::CalculationError;
pub use mode::ProgressMode;
pub use status::{Status, StatusCatalog};
pub use values::{ProgressField, ProgressValues, round_hours};
