use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use bitflags::bitflags;
use hyaline_core::{MetadataDescriptor, Record, ValueType};
#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use crate::{FieldOrigin, MergePlan, ReflectError, Synthesized, TypeRegistry};

bitflags! {
    /// How a field slot of a synthesized type can be reached
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u8 {
        /// The source's static type declares a field by this name, so the
        /// slot has a typed getter/setter pair
        const ACCESSOR = 1 << 0;

        /// Declared only by the template; reachable through dynamic
        /// attributes alone
        const SYNTHETIC = 1 << 1;

        /// Declared by the template over a source field of the same name
        const OVERRIDDEN = 1 << 2;
    }
}

/// A field slot of a [`SynthesizedType`]
#[derive(Clone, Debug, PartialEq)]
pub struct SlotDef {
    /// Field name
    pub name: String,

    /// Declared type
    pub ty: ValueType,

    /// Which side declared the field
    pub origin: FieldOrigin,

    /// Reachability flags
    pub flags: FieldFlags,

    /// Runtime-visible metadata
    pub metadata: Vec<MetadataDescriptor>,
}

impl SlotDef {
    /// Returns true if the slot has a typed getter/setter pair
    #[inline]
    pub fn has_accessor(&self) -> bool {
        self.flags.contains(FieldFlags::ACCESSOR)
    }

    /// Returns the attached descriptor of the given kind, if any
    pub fn metadata_of(&self, kind: &str) -> Option<&MetadataDescriptor> {
        self.metadata.iter().find(|d| d.kind == kind)
    }
}

/// A type defined at runtime from a [`MergePlan`]
#[derive(Debug)]
pub struct SynthesizedType {
    name: String,
    source_type: &'static str,
    metadata: Vec<MetadataDescriptor>,
    fields: Vec<SlotDef>,
}

impl SynthesizedType {
    /// The type's registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the source's static type
    pub fn source_type(&self) -> &'static str {
        self.source_type
    }

    /// Metadata attached to the type itself
    pub fn metadata(&self) -> &[MetadataDescriptor] {
        &self.metadata
    }

    /// Field slots, in plan order
    pub fn fields(&self) -> &[SlotDef] {
        &self.fields
    }

    /// Looks a field slot up by name
    pub fn field(&self, name: &str) -> Option<&SlotDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn slot_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Materializes instances from merge plans.
pub trait TypeBuilder {
    /// Defines the plan's type and returns one instance of it, its slots
    /// initialized from the plan's initial values.
    ///
    /// Fails without defining anything if the type name is taken.
    fn define_type<S: Record>(&self, plan: MergePlan) -> Result<Synthesized<S>, ReflectError>;
}

/// The default [`TypeBuilder`]: a name-indexed slot table per instance, with
/// type names registered in a [`TypeRegistry`].
#[derive(Clone, Copy, Debug)]
pub struct FieldBagBuilder<'r> {
    registry: &'r TypeRegistry,
}

impl Default for FieldBagBuilder<'static> {
    fn default() -> Self {
        Self::new(TypeRegistry::global())
    }
}

impl<'r> FieldBagBuilder<'r> {
    /// Creates a builder that registers types in `registry`
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// The registry types are registered in
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }
}

impl TypeBuilder for FieldBagBuilder<'_> {
    fn define_type<S: Record>(&self, plan: MergePlan) -> Result<Synthesized<S>, ReflectError> {
        let shape = S::record_shape();

        let mut slots = Vec::with_capacity(plan.fields.len());
        let mut values = Vec::with_capacity(plan.fields.len());
        for spec in plan.fields {
            let mut flags = FieldFlags::empty();
            if shape.field(&spec.name).is_some() {
                flags |= FieldFlags::ACCESSOR;
                if spec.origin == FieldOrigin::Template {
                    flags |= FieldFlags::OVERRIDDEN;
                }
            } else {
                flags |= FieldFlags::SYNTHETIC;
            }

            slots.push(SlotDef {
                name: spec.name,
                ty: spec.ty,
                origin: spec.origin,
                flags,
                metadata: spec.annotations,
            });
            values.push(spec.initial_value);
        }

        let ty = Arc::new(SynthesizedType {
            name: plan.type_name,
            source_type: plan.source_type,
            metadata: plan.metadata,
            fields: slots,
        });
        self.registry.register(Arc::clone(&ty))?;

        debug!(
            "Defined {} with {} slots",
            ty.name().green(),
            ty.fields().len()
        );
        Ok(Synthesized::new(ty, values))
    }
}
