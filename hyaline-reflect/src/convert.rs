use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use hyaline_core::{ArrayView, MemberSource, MemberValue, MetadataDescriptor, MetadataInstance};
#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use crate::{ReflectError, ScalarType};

/// What the converter does with a member value whose type maps to no member
/// kind (unsigned integers, `()`, foreign types).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalarPolicy {
    /// Fail with [`ReflectError::UnrecognizedScalarKind`]
    #[default]
    Strict,

    /// Leave the member (or array element) out of the descriptor, logging a
    /// warning
    Permissive,
}

/// Converts live metadata instances into [`MetadataDescriptor`] trees.
///
/// Holds no state besides its policy; a converter can be shared freely and
/// used from several threads at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetadataConverter {
    policy: ScalarPolicy,
}

impl MetadataConverter {
    /// Creates a converter with the given policy for unrecognized scalars
    pub fn new(policy: ScalarPolicy) -> Self {
        Self { policy }
    }

    /// The policy for unrecognized scalars
    pub fn policy(&self) -> ScalarPolicy {
        self.policy
    }

    /// Converts a metadata instance, recursing into nested instances.
    ///
    /// Every member accessor the kind declares is invoked once, in
    /// declaration order.
    pub fn convert(
        &self,
        instance: &dyn MetadataInstance,
    ) -> Result<MetadataDescriptor, ReflectError> {
        let kind = instance.kind_name();
        trace!("Converting metadata {}", kind.blue());

        let mut descriptor = MetadataDescriptor::new(kind);
        for name in instance.member_names() {
            let value =
                instance
                    .member(name)
                    .map_err(|source| ReflectError::UnbuildableMetadata {
                        kind: kind.to_string(),
                        member: name.to_string(),
                        source,
                    })?;

            match self
                .classify_and_convert(value)
                .map_err(|e| e.in_member(kind, name))?
            {
                Some(member) => descriptor.add_member(name, member),
                None => {
                    warn!(
                        "Dropped member {}::{} of unrecognized type {}",
                        kind,
                        name.yellow(),
                        value.type_name().red()
                    );
                }
            }
        }
        Ok(descriptor)
    }

    /// Classifies one runtime value and converts it.
    ///
    /// Capabilities are probed in order: nested metadata, array, enumerated
    /// constant, then the concrete scalar type. An array whose element type
    /// has no static member kind takes the kind of its first converted
    /// element, and is unrecognized only if no element converts. `Ok(None)` means the value
    /// was unrecognized and the policy is [`ScalarPolicy::Permissive`].
    pub fn classify_and_convert(
        &self,
        value: &dyn MemberSource,
    ) -> Result<Option<MemberValue>, ReflectError> {
        if let Some(nested) = value.as_metadata() {
            return self.convert(nested).map(|d| Some(MemberValue::Metadata(d)));
        }

        if let Some(array) = value.as_array() {
            return self.convert_array(value, array);
        }

        if let Some(constant) = value.as_enum() {
            return Ok(Some(MemberValue::Enum(constant)));
        }

        let any: &dyn Any = value;
        let converted = match ScalarType::of(any) {
            Some(ScalarType::Bool) => any.downcast_ref::<bool>().map(|v| MemberValue::Bool(*v)),
            Some(ScalarType::I8) => any.downcast_ref::<i8>().map(|v| MemberValue::Byte(*v)),
            Some(ScalarType::I16) => any.downcast_ref::<i16>().map(|v| MemberValue::Short(*v)),
            Some(ScalarType::I32) => any.downcast_ref::<i32>().map(|v| MemberValue::Int(*v)),
            Some(ScalarType::I64) => any.downcast_ref::<i64>().map(|v| MemberValue::Long(*v)),
            Some(ScalarType::F32) => any.downcast_ref::<f32>().map(|v| MemberValue::Float(*v)),
            Some(ScalarType::F64) => any.downcast_ref::<f64>().map(|v| MemberValue::Double(*v)),
            Some(ScalarType::Char) => any.downcast_ref::<char>().map(|v| MemberValue::Char(*v)),
            Some(ScalarType::String) => any
                .downcast_ref::<alloc::string::String>()
                .map(|v| MemberValue::String(v.clone())),
            Some(ScalarType::Str) => any
                .downcast_ref::<&'static str>()
                .map(|v| MemberValue::String(v.to_string())),
            Some(ScalarType::TypeRef) => any
                .downcast_ref::<hyaline_core::TypeRef>()
                .map(|v| MemberValue::Type(v.name.to_string())),
            _ => None,
        };

        match converted {
            Some(member) => Ok(Some(member)),
            None => self.unrecognized(value.type_name()),
        }
    }

    fn convert_array(
        &self,
        value: &dyn MemberSource,
        array: ArrayView<'_>,
    ) -> Result<Option<MemberValue>, ReflectError> {
        let mut values = Vec::with_capacity(array.elements.len());
        for item in array.elements {
            match self.classify_and_convert(item)? {
                Some(member) => values.push(member),
                None => {
                    warn!("Dropped an element of {}", value.type_name().red());
                }
            }
        }

        // without a static component kind, the elements say what they are
        let element = array
            .component
            .or_else(|| values.first().map(MemberValue::kind));
        match element {
            Some(element) => Ok(Some(MemberValue::Array { element, values })),
            None => self.unrecognized(value.type_name()),
        }
    }

    fn unrecognized(&self, type_name: &'static str) -> Result<Option<MemberValue>, ReflectError> {
        match self.policy {
            ScalarPolicy::Strict => Err(ReflectError::UnrecognizedScalarKind {
                type_name,
                member: None,
            }),
            ScalarPolicy::Permissive => Ok(None),
        }
    }
}
