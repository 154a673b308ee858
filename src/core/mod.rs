//! Core types, fixed-width formatting, grouping and period resolution.
//!
//! Everything in here is pure, synchronous computation shared by all record
//! types; the async collaborator seams live in [`crate::source`] and
//! [`crate::sink`].

mod error;
mod format;
mod grouping;
mod period;
mod types;

pub use error::*;
pub use format::*;
pub use grouping::*;
pub use period::*;
pub use types::*;
