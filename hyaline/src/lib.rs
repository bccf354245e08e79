#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

pub use hyaline_core::*;
pub use hyaline_reflect::*;

#[cfg(feature = "pretty")]
pub use hyaline_pretty as pretty;

mod error;
pub use error::*;

mod shape;
pub use shape::*;
