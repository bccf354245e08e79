use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::marker::PhantomData;
use std::collections::HashMap;

use hyaline_core::{MetadataDescriptor, Record, RecordValue, Reflect, Value};

use crate::{ReflectError, SlotDef, SynthesizedType};

/// String-keyed access to every field of an instance, independent of its
/// typed accessors.
///
/// Reads fall through to the field's live value until the first write; from
/// then on the written value shadows the field for dynamic reads, and typed
/// writes no longer show through. Writes never touch the field itself.
pub trait DynamicAttributes {
    /// Reads an attribute: the stored value if one was written, else the
    /// field's current value.
    fn get_attribute(&self, name: &str) -> Result<Value, ReflectError>;

    /// Stores a value for an attribute, shadowing the field for
    /// [`Self::get_attribute`].
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ReflectError>;

    /// Returns true if `name` can be read
    fn has_attribute(&self, name: &str) -> bool;

    /// Every readable name, in field order
    fn attribute_names(&self) -> Vec<&str>;
}

/// An instance of a [`SynthesizedType`] built over source type `S`.
///
/// Instances are not internally synchronized; share one across threads
/// behind a lock.
pub struct Synthesized<S> {
    ty: Arc<SynthesizedType>,
    slots: Vec<Value>,
    attributes: HashMap<String, Value>,
    source: PhantomData<fn() -> S>,
}

impl<S> Synthesized<S> {
    pub(crate) fn new(ty: Arc<SynthesizedType>, slots: Vec<Value>) -> Self {
        Self {
            ty,
            slots,
            attributes: HashMap::new(),
            source: PhantomData,
        }
    }

    /// The instance's type
    pub fn synthesized_type(&self) -> &Arc<SynthesizedType> {
        &self.ty
    }

    /// Name of the instance's type
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Field slots, in plan order
    pub fn fields(&self) -> &[SlotDef] {
        self.ty.fields()
    }

    /// Metadata attached to the named field; `None` if there is no such field
    pub fn field_metadata(&self, name: &str) -> Option<&[MetadataDescriptor]> {
        self.ty.field(name).map(|f| f.metadata.as_slice())
    }

    /// Metadata attached to the type itself
    pub fn metadata(&self) -> &[MetadataDescriptor] {
        self.ty.metadata()
    }

    /// The live value of the named field, as the typed accessors see it
    pub fn field_value(&self, name: &str) -> Option<&Value> {
        self.ty.slot_index(name).map(|index| &self.slots[index])
    }

    /// Names written through [`DynamicAttributes::set_attribute`]
    pub fn overridden_attributes(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.ty.fields().iter().filter_map(|f| {
            self.attributes
                .get_key_value(f.name.as_str())
                .map(|(k, v)| (k.as_str(), v))
        })
    }
}

impl<S: Record> Synthesized<S> {
    /// Typed getter for a field the source type declares
    pub fn get<T: Reflect>(&self, name: &str) -> Result<T, ReflectError> {
        let index = self.accessor_slot::<T>(name)?;
        T::from_value(self.slots[index].clone()).map_err(|error| ReflectError::Value {
            field: name.to_string(),
            error,
        })
    }

    /// Typed setter for a field the source type declares.
    ///
    /// Writes the slot only; a value stored with
    /// [`DynamicAttributes::set_attribute`] keeps shadowing it.
    pub fn set<T: Reflect>(&mut self, name: &str, value: T) -> Result<(), ReflectError> {
        let index = self.accessor_slot::<T>(name)?;
        self.slots[index] = value.to_value();
        Ok(())
    }

    /// Rebuilds a value of the source's static type from the current slot
    /// values; synthetic fields and dynamic attributes are left out.
    pub fn to_source(&self) -> Result<S, ReflectError> {
        let shape = S::record_shape();
        let fields = shape
            .fields
            .iter()
            .map(|field| {
                let value = self.field_value(field.name).cloned().unwrap_or_default();
                (field.name, value)
            })
            .collect();

        S::from_value(Value::Record(RecordValue::new(shape.type_name, fields))).map_err(|error| {
            ReflectError::Value {
                field: shape.type_name.to_string(),
                error,
            }
        })
    }

    fn accessor_slot<T: Reflect>(&self, name: &str) -> Result<usize, ReflectError> {
        let no_accessor = || ReflectError::NoTypedAccessor {
            type_name: self.ty.name().to_string(),
            field: name.to_string(),
        };
        let index = self.ty.slot_index(name).ok_or_else(no_accessor)?;
        let slot = &self.ty.fields()[index];
        if !slot.has_accessor() {
            return Err(no_accessor());
        }

        let requested = T::value_type();
        if requested != slot.ty {
            return Err(ReflectError::WrongType {
                field: name.to_string(),
                expected: slot.ty.clone(),
                actual: requested,
            });
        }
        Ok(index)
    }
}

impl<S> DynamicAttributes for Synthesized<S> {
    fn get_attribute(&self, name: &str) -> Result<Value, ReflectError> {
        if let Some(value) = self.attributes.get(name) {
            return Ok(value.clone());
        }
        self.field_value(name)
            .cloned()
            .ok_or_else(|| ReflectError::UnknownAttribute {
                type_name: self.ty.name().to_string(),
                name: name.to_string(),
            })
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ReflectError> {
        if !self.attributes.contains_key(name) && self.ty.field(name).is_none() {
            return Err(ReflectError::UnknownAttribute {
                type_name: self.ty.name().to_string(),
                name: name.to_string(),
            });
        }
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name) || self.ty.field(name).is_some()
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.ty.fields().iter().map(|f| f.name.as_str()).collect()
    }
}

impl<S> core::fmt::Debug for Synthesized<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct(self.ty.name());
        for (slot, value) in self.ty.fields().iter().zip(&self.slots) {
            s.field(&slot.name, value);
        }
        s.finish_non_exhaustive()
    }
}
