//! Helper functions shared across layers.
//!
//! - [`alias_generator`] - Random alias generation and alias validation
//! - [`db_error`] - SQLite error classification
//! - [`url_check`] - Target URL checks

pub mod alias_generator;
pub mod db_error;
pub mod url_check;
