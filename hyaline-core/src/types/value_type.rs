use alloc::boxed::Box;

use crate::Value;

/// The declared type of a field.
///
/// Reference-like types (strings, options, lists, records and enumerated
/// kinds) default to [`Value::Null`]; the rest default to their zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`
    Char,
    /// `String`
    String,
    /// A value that may be absent
    Optional(Box<ValueType>),
    /// An ordered sequence
    List(Box<ValueType>),
    /// A record type, by qualified name
    Record(&'static str),
    /// An enumerated kind, by qualified name
    Enum(&'static str),
}

impl ValueType {
    /// The value a slot of this type holds when nothing initializes it
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::I8 => Value::I8(0),
            ValueType::I16 => Value::I16(0),
            ValueType::I32 => Value::I32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::F32 => Value::F32(0.0),
            ValueType::F64 => Value::F64(0.0),
            ValueType::Char => Value::Char('\0'),
            ValueType::String
            | ValueType::Optional(_)
            | ValueType::List(_)
            | ValueType::Record(_)
            | ValueType::Enum(_) => Value::Null,
        }
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::I8 => write!(f, "i8"),
            ValueType::I16 => write!(f, "i16"),
            ValueType::I32 => write!(f, "i32"),
            ValueType::I64 => write!(f, "i64"),
            ValueType::F32 => write!(f, "f32"),
            ValueType::F64 => write!(f, "f64"),
            ValueType::Char => write!(f, "char"),
            ValueType::String => write!(f, "String"),
            ValueType::Optional(inner) => write!(f, "Option<{inner}>"),
            ValueType::List(inner) => write!(f, "Vec<{inner}>"),
            ValueType::Record(name) | ValueType::Enum(name) => write!(f, "{name}"),
        }
    }
}
