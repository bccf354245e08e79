use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{EnumConstant, ValueType};

/// A dynamically-typed field value.
///
/// Every slot of a synthesized shape holds one of these, and so does every
/// entry of its dynamic attribute map.
#[derive(Clone, Debug, PartialEq, Default)]
#[non_exhaustive]
pub enum Value {
    /// The absent value: what a reference-like slot holds before anything is
    /// assigned to it.
    #[default]
    Null,
    /// `bool`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `char`
    Char(char),
    /// `String`
    String(String),
    /// An ordered sequence of values
    List(Vec<Value>),
    /// A snapshot of a nested record
    Record(RecordValue),
    /// A constant of an enumerated kind
    Enum(EnumConstant),
}

impl Value {
    /// Returns true if this is [`Value::Null`]
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string slice if this is a [`Value::String`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the record snapshot if this is a [`Value::Record`]
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::String(_) => "String",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Enum(_) => "enum",
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v:?}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(record) => write!(f, "{record}"),
            Value::Enum(constant) => write!(f, "{constant}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Value::Record(record)
    }
}

impl From<EnumConstant> for Value {
    fn from(constant: EnumConstant) -> Self {
        Value::Enum(constant)
    }
}

/// A snapshot of a record: its type name and its fields in declaration order
#[derive(Clone, Debug, PartialEq)]
pub struct RecordValue {
    /// Qualified name of the record's type
    pub type_name: &'static str,

    /// Field values, in declaration order
    pub fields: Vec<(&'static str, Value)>,
}

impl RecordValue {
    /// Creates a new record snapshot
    pub fn new(type_name: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { type_name, fields }
    }

    /// Returns the value of the named field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Moves the named field's value out, leaving [`Value::Null`] behind
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields
            .iter_mut()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| core::mem::take(value))
    }
}

impl core::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {name}: {value}")?;
        }
        write!(f, " }}")
    }
}

/// Errors that occur when moving between [`Value`] and a static type
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    /// The value's variant doesn't fit the requested type
    Mismatch {
        /// The type that was requested
        expected: ValueType,
        /// The variant that was found
        found: &'static str,
    },

    /// A record snapshot lacks one of the type's declared fields
    MissingField {
        /// The record type being rebuilt
        record: &'static str,
        /// The field that was missing
        field: &'static str,
    },

    /// A constant name doesn't belong to the enumerated kind
    UnknownConstant {
        /// The enumerated kind
        kind: &'static str,
        /// The constant that was requested
        constant: String,
    },

    /// Rebuilding one of a record's fields failed
    InField {
        /// The field being rebuilt
        field: &'static str,
        /// What went wrong
        inner: Box<ValueError>,
    },
}

impl ValueError {
    /// Builds a [`ValueError::Mismatch`] for the given value
    pub fn mismatch(expected: ValueType, found: &Value) -> Self {
        ValueError::Mismatch {
            expected,
            found: found.kind_name(),
        }
    }
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueError::Mismatch { expected, found } => {
                write!(f, "expected a value of type {expected}, found {found}")
            }
            ValueError::MissingField { record, field } => {
                write!(f, "record {record} has no value for field '{field}'")
            }
            ValueError::UnknownConstant { kind, constant } => {
                write!(f, "{kind} has no constant named '{constant}'")
            }
            ValueError::InField { field, inner } => write!(f, "in field '{field}': {inner}"),
        }
    }
}

impl core::error::Error for ValueError {}

/// Moves values of a static type in and out of the dynamic [`Value`] model.
///
/// Implemented for the primitive types, `String`, `Option<T>`, `Vec<T>`, and
/// for every type declared with [`record!`](crate::record) or
/// [`constants!`](crate::constants).
pub trait Reflect: Sized {
    /// The declared type that slots holding this type carry
    fn value_type() -> ValueType;

    /// Snapshots `self` into a [`Value`]
    fn to_value(&self) -> Value;

    /// Rebuilds a value of this type from a [`Value`]
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                fn to_value(&self) -> Value {
                    Value::$variant(Clone::clone(self))
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ValueError::mismatch(Self::value_type(), &other)),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
}

impl<T: Reflect> Reflect for Option<T> {
    fn value_type() -> ValueType {
        ValueType::Optional(Box::new(T::value_type()))
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::List(Box::new(T::value_type()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ValueError::mismatch(Self::value_type(), &other)),
        }
    }
}
