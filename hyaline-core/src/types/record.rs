use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{MetadataInstance, Reflect, Value, ValueType};

/// Describes a field declared on a record type
#[derive(Clone)]
#[non_exhaustive]
pub struct FieldDef {
    /// Name of the field
    pub name: &'static str,

    /// Declared type of the field
    pub ty: ValueType,

    /// Metadata attached at the field's declaration site
    pub metadata: Vec<Arc<dyn MetadataInstance>>,
}

impl FieldDef {
    /// Creates a field definition without metadata
    pub fn new(name: &'static str, ty: ValueType) -> Self {
        Self {
            name,
            ty,
            metadata: Vec::new(),
        }
    }

    /// Attaches a metadata instance to this field
    pub fn with_metadata(mut self, metadata: impl MetadataInstance) -> Self {
        self.metadata.push(Arc::new(metadata));
        self
    }
}

impl core::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field(
                "metadata",
                &self.metadata.iter().map(|m| m.kind_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The declared layout of a record type
#[derive(Debug)]
pub struct RecordShape {
    /// Qualified name of the type
    pub type_name: &'static str,

    /// Declared fields, in declaration order
    pub fields: Vec<FieldDef>,
}

impl RecordShape {
    /// Looks a field up by its exact (case-sensitive) name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A type whose fields can be enumerated and read at runtime.
///
/// Use [`record!`](crate::record) to declare one.
pub trait Record: Reflect {
    /// The declared layout of this type
    fn record_shape() -> &'static RecordShape;

    /// Snapshots every declared field, in declaration order
    fn field_values(&self) -> Vec<(&'static str, Value)>;
}
