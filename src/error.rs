//! Error handling for slz operations
//!
//! This module re-exports the error type used throughout the crate. The
//! type itself lives in [`crate::common`] next to the stream states its
//! variants refer to.

pub use crate::common::Result;
pub use crate::common::SlzError;
