#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Logging macros, visible to every module declared below
#[cfg(feature = "log")]
macro_rules! trace {
    ($($tt:tt)*) => { ::log::trace!($($tt)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($tt:tt)*) => { ::log::debug!($($tt)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($tt:tt)*) => { ::log::warn!($($tt)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($tt:tt)*) => {};
}

mod error;
pub use error::*;

mod scalar;
pub use scalar::*;

mod convert;
pub use convert::*;

mod template;
pub use template::*;

mod merge;
pub use merge::*;

mod registry;
pub use registry::*;

mod builder;
pub use builder::*;

mod instance;
pub use instance::*;
