//! # hostelcare-shared
//!
//! Types shared by every HostelCare crate: the fixed category, status and
//! role vocabularies, storage keys, identifier generation, input validation
//! and the error taxonomy surfaced to front-ends.

pub mod constants;
pub mod display;
pub mod error;
pub mod ids;
pub mod types;
pub mod validation;

pub use error::{HostelError, ValidationError};
pub use types::*;
