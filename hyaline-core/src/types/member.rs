use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A constant of an enumerated kind, identified by name rather than ordinal
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    /// Qualified name of the declaring kind
    pub kind: String,

    /// Name of the constant
    pub name: String,
}

impl EnumConstant {
    /// Creates a new constant reference
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl core::fmt::Display for EnumConstant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}::{}", self.kind, self.name)
    }
}

/// A reference to a type, by qualified name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Qualified name of the referenced type
    pub name: &'static str,
}

impl TypeRef {
    /// References the type `T`
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: core::any::type_name::<T>(),
        }
    }
}

/// The kind of a [`MemberValue`], without its payload.
///
/// Arrays record this for their elements so that an empty array still knows
/// what it would contain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MemberKind {
    /// `bool`
    Bool,
    /// 8-bit integral
    Byte,
    /// 16-bit integral
    Short,
    /// 32-bit integral
    Int,
    /// 64-bit integral
    Long,
    /// 32-bit floating
    Float,
    /// 64-bit floating
    Double,
    /// `char`
    Char,
    /// string
    String,
    /// type reference
    Type,
    /// constant of the named enumerated kind
    Enum(String),
    /// nested descriptor of the named metadata kind
    Metadata(String),
    /// array of the given element kind
    Array(Box<MemberKind>),
}

impl core::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberKind::Bool => write!(f, "bool"),
            MemberKind::Byte => write!(f, "byte"),
            MemberKind::Short => write!(f, "short"),
            MemberKind::Int => write!(f, "int"),
            MemberKind::Long => write!(f, "long"),
            MemberKind::Float => write!(f, "float"),
            MemberKind::Double => write!(f, "double"),
            MemberKind::Char => write!(f, "char"),
            MemberKind::String => write!(f, "string"),
            MemberKind::Type => write!(f, "type"),
            MemberKind::Enum(kind) | MemberKind::Metadata(kind) => write!(f, "{kind}"),
            MemberKind::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// The portable value of one metadata member
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum MemberValue {
    /// `bool`
    Bool(bool),
    /// 8-bit integral
    Byte(i8),
    /// 16-bit integral
    Short(i16),
    /// 32-bit integral
    Int(i32),
    /// 64-bit integral
    Long(i64),
    /// 32-bit floating
    Float(f32),
    /// 64-bit floating
    Double(f64),
    /// `char`
    Char(char),
    /// string
    String(String),
    /// type reference, by qualified name
    Type(String),
    /// enumerated constant
    Enum(EnumConstant),
    /// nested metadata
    Metadata(MetadataDescriptor),
    /// ordered, homogeneous array
    Array {
        /// Element kind, derived from the array's component type
        element: MemberKind,
        /// Elements, in order
        values: Vec<MemberValue>,
    },
}

impl MemberValue {
    /// The kind of this value
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberValue::Bool(_) => MemberKind::Bool,
            MemberValue::Byte(_) => MemberKind::Byte,
            MemberValue::Short(_) => MemberKind::Short,
            MemberValue::Int(_) => MemberKind::Int,
            MemberValue::Long(_) => MemberKind::Long,
            MemberValue::Float(_) => MemberKind::Float,
            MemberValue::Double(_) => MemberKind::Double,
            MemberValue::Char(_) => MemberKind::Char,
            MemberValue::String(_) => MemberKind::String,
            MemberValue::Type(_) => MemberKind::Type,
            MemberValue::Enum(constant) => MemberKind::Enum(constant.kind.clone()),
            MemberValue::Metadata(descriptor) => MemberKind::Metadata(descriptor.kind.clone()),
            MemberValue::Array { element, .. } => MemberKind::Array(Box::new(element.clone())),
        }
    }

    /// Returns the nested descriptor, if this is one
    pub fn as_metadata(&self) -> Option<&MetadataDescriptor> {
        match self {
            MemberValue::Metadata(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Returns the array elements, if this is an array
    pub fn as_array(&self) -> Option<&[MemberValue]> {
        match self {
            MemberValue::Array { values, .. } => Some(values),
            _ => None,
        }
    }
}

impl core::fmt::Display for MemberValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberValue::Bool(v) => write!(f, "{v}"),
            MemberValue::Byte(v) => write!(f, "{v}"),
            MemberValue::Short(v) => write!(f, "{v}"),
            MemberValue::Int(v) => write!(f, "{v}"),
            MemberValue::Long(v) => write!(f, "{v}L"),
            MemberValue::Float(v) => write!(f, "{v}F"),
            MemberValue::Double(v) => write!(f, "{v}"),
            MemberValue::Char(v) => write!(f, "{v:?}"),
            MemberValue::String(v) => write!(f, "{v:?}"),
            MemberValue::Type(name) => write!(f, "{name}.class"),
            MemberValue::Enum(constant) => write!(f, "{constant}"),
            MemberValue::Metadata(descriptor) => write!(f, "{descriptor}"),
            MemberValue::Array { values, .. } => {
                write!(f, "{{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// The portable representation of one metadata attachment: the kind's
/// qualified name, plus its members in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataDescriptor {
    /// Qualified name of the metadata kind
    pub kind: String,

    members: Vec<(String, MemberValue)>,
}

impl MetadataDescriptor {
    /// Creates a descriptor with no members
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            members: Vec::new(),
        }
    }

    /// Sets a member, replacing any earlier value under the same name
    pub fn add_member(&mut self, name: impl Into<String>, value: MemberValue) {
        let name = name.into();
        match self.members.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.members.push((name, value)),
        }
    }

    /// Builder-style [`Self::add_member`]
    pub fn with_member(mut self, name: impl Into<String>, value: MemberValue) -> Self {
        self.add_member(name, value);
        self
    }

    /// Returns the named member
    pub fn member(&self, name: &str) -> Option<&MemberValue> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates over members in declaration order
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberValue)> + '_ {
        self.members.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the descriptor has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl core::fmt::Display for MetadataDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "@{}", self.kind)?;
        if self.members.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, (name, value)) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}
