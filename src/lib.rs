//! # posfeed
//!
//! Fixed-width POS summary extracts for back-office reconciliation:
//! byte-exact STX, SSB and SDC flat files generated from point-of-sale
//! transaction logs over daily, weekly or ad-hoc reporting windows.
//!
//! All monetary values use [`rust_decimal::Decimal`] or integer cents —
//! never floating point. Every record line is exactly 128 bytes; values
//! that would overflow their field fail loudly instead of truncating.
//!
//! The crate is pure computation between two async seams: a
//! [`source::TransactionSource`] supplying transaction logs and a
//! [`sink::ExtractSink`] receiving the named `.dat` payload. Runners hold
//! no shared mutable state; concurrent runs need no coordination.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use posfeed::core::*;
//! use rust_decimal_macros::dec;
//!
//! // Fields are sign-prefixed, zero-padded, byte-exact.
//! assert_eq!(signed_amount(dec!(-12.345), 11).unwrap(), "-0000001235");
//! assert_eq!(pad_descriptor("STATE TAX", DESC_BYTES).len(), 18);
//!
//! // Reporting windows resolve from UTC calendar fields only.
//! let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! let period = resolve_period(RunType::Weekly, DailyMode::Range, today, None, None).unwrap();
//! assert_eq!(period.as_of, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `stx` (default) | Tax-summary extract, one line per store per tax plan |
//! | `ssb` (default) | Store summary by tax-plan bucket, one line per store |
//! | `sdc` (default) | Store net-sales summary via the aggregation route |

pub mod core;
pub mod sink;
pub mod source;

#[cfg(feature = "stx")]
pub mod stx;

#[cfg(feature = "ssb")]
pub mod ssb;

#[cfg(feature = "sdc")]
pub mod sdc;

// Re-export core types at crate root for convenience
pub use crate::core::*;
