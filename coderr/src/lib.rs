//! # coderr
//!
//! Structured errors with hierarchical codes.
//!
//! ## Design Philosophy
//!
//! - **Code**: Know what went wrong (`storage/tx/done`), machine readable and scoped
//! - **Reason**: Tell a developer what happened, in plain English
//! - **Cause**: Keep the lower-level error that led here instead of hiding it
//! - **Syntax**: Every error renders to, and parses from, one fixed format
//!
//! ## Error syntax
//!
//! ```text
//! error      = "[" code "] " reason [ ": " wrapped ] .
//! code       = code_segment { "/" code_segment } .
//! code_segment = code_char { code_char } .
//! code_char  = "a".."z" | "0".."9" | "_" | "-" | "." .
//! wrapped    = error | free_text .
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use coderr::{Error, Failure};
//!
//! static ERR_STORAGE: Error = Error::from_static("storage", "storage failure");
//! static ERR_TX_DONE: Error = Error::from_static(
//!     "storage/tx/done",
//!     "transaction has already been committed or rolled back",
//! );
//!
//! fn commit(done: bool) -> Result<(), Failure> {
//!     if done {
//!         return Err(ERR_TX_DONE.wrap(Failure::msg("tx 42")).into());
//!     }
//!     Ok(())
//! }
//!
//! let err = commit(true).unwrap_err();
//! assert!(coderr::is(&err, &ERR_TX_DONE));
//! assert!(coderr::of(&err, &ERR_STORAGE));
//! assert_eq!(
//!     err.to_string(),
//!     "[storage/tx/done] transaction has already been committed or rolled back: tx 42",
//! );
//! ```
//!
//! ## Principles
//!
//! - Errors are identified by code only; reasons are free to change
//! - Define sentinels once as `static` values and compare against them
//! - Wrapping never mutates: `wrap` returns a new value
//! - Foreign errors become [`Opaque`] failures instead of leaking raw types

pub mod chain;
pub mod code;
mod error;
mod failure;
mod group;
mod parse;
mod predicate;

pub use chain::{unwrap_all, wrap, wrap_all};
pub use code::Code;
pub use error::Error;
pub use failure::{Causal, Causes, Failure, FailureRef, Opaque};
pub use group::{group, split, Group};
pub use parse::{
    must_parse, parse, EMPTY_MESSAGE, INVALID_CODE, INVALID_CODE_CHAR, INVALID_REASON,
    INVALID_SYNTAX, NO_CODE, NO_REASON, NO_REASON_SEPARATOR,
};
pub use predicate::{all, any, is, of};

/// Root of every error code defined by this crate.
pub static ERR: Error = Error::from_static("coderr", "");

/// Result type alias using coderr Error
pub type Result<T, E = Error> = std::result::Result<T, E>;
