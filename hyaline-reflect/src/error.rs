use alloc::string::String;

use hyaline_core::{MemberAccessError, ValueError, ValueType};
use owo_colors::OwoColorize;

/// Errors that can occur while converting metadata, merging shapes, or
/// accessing a synthesized instance.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ReflectError {
    /// One of a metadata instance's members could not be read
    UnbuildableMetadata {
        /// The metadata kind being converted
        kind: String,
        /// The member whose accessor failed
        member: String,
        /// Why the accessor failed
        source: MemberAccessError,
    },

    /// A member value's type maps to no member kind
    UnrecognizedScalarKind {
        /// Concrete type of the offending value
        type_name: &'static str,
        /// `kind::member` where the value was found, innermost first
        member: Option<String>,
    },

    /// A type with this name is already registered
    DuplicateTypeName {
        /// The contested name
        name: String,
    },

    /// Dynamic access to a name that is neither a stored attribute nor a field
    UnknownAttribute {
        /// The synthesized type
        type_name: String,
        /// The name that was requested
        name: String,
    },

    /// Typed access to a field the source's static type doesn't declare
    NoTypedAccessor {
        /// The synthesized type
        type_name: String,
        /// The field that was requested
        field: String,
    },

    /// Typed access with a type other than the field's declared type
    WrongType {
        /// The field that was accessed
        field: String,
        /// The field's declared type
        expected: ValueType,
        /// The type the caller asked for
        actual: ValueType,
    },

    /// A field's current value could not be turned into its static type
    Value {
        /// The field being read, or the type being rebuilt
        field: String,
        /// The underlying conversion error
        error: ValueError,
    },
}

impl ReflectError {
    /// Attributes an unrecognized value to `kind::member`, unless a nested
    /// conversion already did.
    pub(crate) fn in_member(self, kind: &str, member: &str) -> Self {
        match self {
            ReflectError::UnrecognizedScalarKind {
                type_name,
                member: None,
            } => ReflectError::UnrecognizedScalarKind {
                type_name,
                member: Some(alloc::format!("{kind}::{member}")),
            },
            other => other,
        }
    }
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::UnbuildableMetadata {
                kind,
                member,
                source,
            } => {
                write!(
                    f,
                    "Could not copy metadata {}: member '{}' failed: {}",
                    kind.blue(),
                    member.yellow(),
                    source
                )
            }
            ReflectError::UnrecognizedScalarKind { type_name, member } => {
                write!(f, "No member kind for values of type {}", type_name.red())?;
                if let Some(member) = member {
                    write!(f, " (in {})", member.yellow())?;
                }
                Ok(())
            }
            ReflectError::DuplicateTypeName { name } => {
                write!(f, "A type named {} is already defined", name.red())
            }
            ReflectError::UnknownAttribute { type_name, name } => {
                write!(
                    f,
                    "{} has no attribute or field named '{}'",
                    type_name.blue(),
                    name.red()
                )
            }
            ReflectError::NoTypedAccessor { type_name, field } => {
                write!(
                    f,
                    "{} has no typed accessor for '{}'",
                    type_name.blue(),
                    field.red()
                )
            }
            ReflectError::WrongType {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Wrong type for field '{}': declared as {}, accessed as {}",
                    field.yellow(),
                    expected.green(),
                    actual.red()
                )
            }
            ReflectError::Value { field, error } => {
                write!(f, "Bad value for '{}': {}", field.yellow(), error)
            }
        }
    }
}

impl core::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ReflectError::UnbuildableMetadata { source, .. } => Some(source),
            ReflectError::Value { error, .. } => Some(error),
            _ => None,
        }
    }
}
