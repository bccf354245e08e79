use core::any::{Any, TypeId};

use hyaline_core::{MemberKind, TypeRef};

/// All scalar types that map to a member kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarType {
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
    /// `&'static str`
    Str,
    /// [`TypeRef`]
    TypeRef,
}

impl ScalarType {
    /// Classifies a value by its concrete type; `None` if it isn't a known scalar
    pub fn of(value: &dyn Any) -> Option<Self> {
        let type_id = value.type_id();
        if type_id == TypeId::of::<bool>() {
            Some(ScalarType::Bool)
        } else if type_id == TypeId::of::<i8>() {
            Some(ScalarType::I8)
        } else if type_id == TypeId::of::<i16>() {
            Some(ScalarType::I16)
        } else if type_id == TypeId::of::<i32>() {
            Some(ScalarType::I32)
        } else if type_id == TypeId::of::<i64>() {
            Some(ScalarType::I64)
        } else if type_id == TypeId::of::<f32>() {
            Some(ScalarType::F32)
        } else if type_id == TypeId::of::<f64>() {
            Some(ScalarType::F64)
        } else if type_id == TypeId::of::<char>() {
            Some(ScalarType::Char)
        } else if type_id == TypeId::of::<alloc::string::String>() {
            Some(ScalarType::String)
        } else if type_id == TypeId::of::<&'static str>() {
            Some(ScalarType::Str)
        } else if type_id == TypeId::of::<TypeRef>() {
            Some(ScalarType::TypeRef)
        } else {
            None
        }
    }

    /// The member kind values of this scalar type convert to
    pub fn member_kind(self) -> MemberKind {
        match self {
            ScalarType::Bool => MemberKind::Bool,
            ScalarType::I8 => MemberKind::Byte,
            ScalarType::I16 => MemberKind::Short,
            ScalarType::I32 => MemberKind::Int,
            ScalarType::I64 => MemberKind::Long,
            ScalarType::F32 => MemberKind::Float,
            ScalarType::F64 => MemberKind::Double,
            ScalarType::Char => MemberKind::Char,
            ScalarType::String | ScalarType::Str => MemberKind::String,
            ScalarType::TypeRef => MemberKind::Type,
        }
    }
}
