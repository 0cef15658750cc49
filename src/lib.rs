//! Work-package progress engine: derivation, validation, durations and
//! hierarchy totals on top of the `progress_common` calculator.

pub mod derive;
pub mod duration;
pub mod errors;
pub mod init;
pub mod progress_config;
pub mod rollup;
pub mod ui;
pub mod validation;

