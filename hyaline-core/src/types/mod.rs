//! Shapes, metadata capabilities and their portable descriptors

mod value_type;
pub use value_type::*;

mod record;
pub use record::*;

mod member;
pub use member::*;

mod metadata;
pub use metadata::*;
