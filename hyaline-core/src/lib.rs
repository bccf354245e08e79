#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod macros;

// Dynamic values and the static <-> dynamic bridge
mod value;
pub use value::*;

// Type definitions
mod types;
pub use types::*;

#[doc(hidden)]
pub mod __private {
    pub use std::sync::OnceLock;
}
