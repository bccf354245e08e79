use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::{EnumConstant, MemberKind, TypeRef};

/// A live metadata instance: something that has a declaring kind and a set
/// of members that can be read one at a time.
///
/// Implementations are not required to be backed by a fixed struct: anything
/// that answers these calls is metadata, including proxy-like values such as
/// [`DynamicMetadata`].
pub trait MetadataInstance: Send + Sync + 'static {
    /// Qualified name of the declaring kind
    fn kind_name(&self) -> &str;

    /// Names of the member accessors the kind declares, in declaration order
    fn member_names(&self) -> Vec<&str>;

    /// Invokes the named member accessor
    fn member(&self, name: &str) -> Result<&dyn MemberSource, MemberAccessError>;
}

/// A runtime value returned by a metadata member accessor.
///
/// Each capability is probed separately; a value that answers none of them is
/// classified by its concrete scalar type, through [`Any`].
pub trait MemberSource: Any + Send + Sync {
    /// Views this value as a nested metadata instance
    fn as_metadata(&self) -> Option<&dyn MetadataInstance> {
        None
    }

    /// Views this value as a constant of an enumerated kind
    fn as_enum(&self) -> Option<EnumConstant> {
        None
    }

    /// Views this value as an array
    fn as_array(&self) -> Option<ArrayView<'_>> {
        None
    }

    /// Name of the concrete type, for diagnostics
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// The member kind every value of this type converts to, if any
    fn static_kind() -> Option<MemberKind>
    where
        Self: Sized,
    {
        None
    }
}

/// The elements of an array-valued member
pub struct ArrayView<'a> {
    /// Member kind of the component type, if it has one
    pub component: Option<MemberKind>,

    /// The elements, in order
    pub elements: Vec<&'a dyn MemberSource>,
}

/// A metadata member could not be read
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemberAccessError {
    /// The kind declares no member by that name
    NoSuchMember {
        /// The metadata kind
        kind: String,
        /// The member that was requested
        member: String,
    },

    /// The member is declared, but the instance could not produce a value for it
    Unavailable {
        /// The metadata kind
        kind: String,
        /// The member that was requested
        member: String,
    },
}

impl core::fmt::Display for MemberAccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberAccessError::NoSuchMember { kind, member } => {
                write!(f, "{kind} declares no member '{member}'")
            }
            MemberAccessError::Unavailable { kind, member } => {
                write!(f, "member '{member}' of {kind} could not be read")
            }
        }
    }
}

impl core::error::Error for MemberAccessError {}

/// A metadata instance assembled at runtime: a kind name, a list of declared
/// members, and whatever values have been supplied for them.
///
/// A declared member without a value fails to read with
/// [`MemberAccessError::Unavailable`].
pub struct DynamicMetadata {
    kind: String,
    declared: Vec<String>,
    values: Vec<(String, Box<dyn MemberSource>)>,
}

impl DynamicMetadata {
    /// Creates an instance of the given kind, with no members
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            declared: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Declares a member without supplying a value for it
    pub fn declare(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.declared.contains(&name) {
            self.declared.push(name);
        }
        self
    }

    /// Declares a member and supplies its value
    pub fn with(mut self, name: impl Into<String>, value: impl MemberSource) -> Self {
        let name = name.into();
        self = self.declare(name.clone());
        self.values.retain(|(n, _)| *n != name);
        self.values.push((name, Box::new(value)));
        self
    }
}

impl MetadataInstance for DynamicMetadata {
    fn kind_name(&self) -> &str {
        &self.kind
    }

    fn member_names(&self) -> Vec<&str> {
        self.declared.iter().map(String::as_str).collect()
    }

    fn member(&self, name: &str) -> Result<&dyn MemberSource, MemberAccessError> {
        if !self.declared.iter().any(|n| n == name) {
            return Err(MemberAccessError::NoSuchMember {
                kind: self.kind.clone(),
                member: name.into(),
            });
        }
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| &**value)
            .ok_or_else(|| MemberAccessError::Unavailable {
                kind: self.kind.clone(),
                member: name.into(),
            })
    }
}

impl MemberSource for DynamicMetadata {
    fn as_metadata(&self) -> Option<&dyn MetadataInstance> {
        Some(self)
    }
}

macro_rules! impl_member_source {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl MemberSource for $ty {
                fn static_kind() -> Option<MemberKind> {
                    $kind
                }
            }
        )*
    };
}

impl_member_source! {
    bool => Some(MemberKind::Bool),
    i8 => Some(MemberKind::Byte),
    i16 => Some(MemberKind::Short),
    i32 => Some(MemberKind::Int),
    i64 => Some(MemberKind::Long),
    f32 => Some(MemberKind::Float),
    f64 => Some(MemberKind::Double),
    char => Some(MemberKind::Char),
    String => Some(MemberKind::String),
    &'static str => Some(MemberKind::String),
    TypeRef => Some(MemberKind::Type),

    // no member kind for these
    u8 => None,
    u16 => None,
    u32 => None,
    u64 => None,
    u128 => None,
    usize => None,
    i128 => None,
    isize => None,
    () => None,
}

impl<T: MemberSource> MemberSource for Vec<T> {
    fn as_array(&self) -> Option<ArrayView<'_>> {
        Some(ArrayView {
            component: T::static_kind(),
            elements: self.iter().map(|e| e as &dyn MemberSource).collect(),
        })
    }

    fn static_kind() -> Option<MemberKind> {
        T::static_kind().map(|k| MemberKind::Array(Box::new(k)))
    }
}

impl<T: MemberSource> MemberSource for &'static [T] {
    fn as_array(&self) -> Option<ArrayView<'_>> {
        Some(ArrayView {
            component: T::static_kind(),
            elements: self.iter().map(|e| e as &dyn MemberSource).collect(),
        })
    }

    fn static_kind() -> Option<MemberKind> {
        T::static_kind().map(|k| MemberKind::Array(Box::new(k)))
    }
}
