/// Declares a struct and implements [`Reflect`](crate::Reflect) and
/// [`Record`](crate::Record) for it.
///
/// Fields may carry metadata at their declaration site with `#[meta(expr)]`,
/// where `expr` evaluates to a [`MetadataInstance`](crate::MetadataInstance).
/// Every field type must itself implement `Reflect`.
///
/// ```rust
/// use hyaline_core::{Record, Value, record, metadata};
///
/// metadata! {
///     #[derive(Debug, Clone)]
///     pub struct Column {
///         pub name: &'static str = "",
///     }
/// }
///
/// record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Book {
///         #[meta(Column { name: "book_title" })]
///         pub title: String,
///         pub pages: i32,
///     }
/// }
///
/// let shape = Book::record_shape();
/// assert_eq!(shape.fields[0].metadata.len(), 1);
///
/// let book = Book { title: "Ulysses".into(), pages: 730 };
/// assert_eq!(book.field_values()[1], ("pages", Value::I32(730)));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[meta($meta:expr)])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $( $fvis $field: $fty, )*
        }

        impl $crate::Reflect for $name {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Record(<Self as $crate::Record>::record_shape().type_name)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record($crate::RecordValue::new(
                    <Self as $crate::Record>::record_shape().type_name,
                    <Self as $crate::Record>::field_values(self),
                ))
            }

            #[allow(unused_mut)]
            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ValueError> {
                let type_name = <Self as $crate::Record>::record_shape().type_name;
                let mut record = match value {
                    $crate::Value::Record(record) if record.type_name == type_name => record,
                    other => {
                        return ::core::result::Result::Err($crate::ValueError::mismatch(
                            <Self as $crate::Reflect>::value_type(),
                            &other,
                        ));
                    }
                };
                ::core::result::Result::Ok(Self {
                    $(
                        $field: {
                            let field = record.take(stringify!($field)).ok_or(
                                $crate::ValueError::MissingField {
                                    record: type_name,
                                    field: stringify!($field),
                                },
                            )?;
                            <$fty as $crate::Reflect>::from_value(field).map_err(|inner| {
                                $crate::ValueError::InField {
                                    field: stringify!($field),
                                    inner: ::std::boxed::Box::new(inner),
                                }
                            })?
                        },
                    )*
                })
            }
        }

        impl $crate::Record for $name {
            fn record_shape() -> &'static $crate::RecordShape {
                static SHAPE: $crate::__private::OnceLock<$crate::RecordShape> =
                    $crate::__private::OnceLock::new();
                SHAPE.get_or_init(|| $crate::RecordShape {
                    type_name: concat!(module_path!(), "::", stringify!($name)),
                    fields: ::std::vec![
                        $(
                            $crate::FieldDef::new(
                                stringify!($field),
                                <$fty as $crate::Reflect>::value_type(),
                            )
                            $( .with_metadata($meta) )*,
                        )*
                    ],
                })
            }

            fn field_values(&self) -> ::std::vec::Vec<(&'static str, $crate::Value)> {
                ::std::vec![
                    $( (stringify!($field), $crate::Reflect::to_value(&self.$field)), )*
                ]
            }
        }
    };
}

/// Declares a metadata kind: a struct whose members all have declared
/// defaults, implementing [`Default`],
/// [`MetadataInstance`](crate::MetadataInstance) and
/// [`MemberSource`](crate::MemberSource).
///
/// Member types must implement `MemberSource`; a member whose type is itself
/// a metadata kind nests.
///
/// ```rust
/// use hyaline_core::{MetadataInstance, metadata};
///
/// metadata! {
///     #[derive(Debug, Clone)]
///     pub struct Length {
///         pub min: i32 = 0,
///         pub max: i32 = i32::MAX,
///     }
/// }
///
/// let length = Length { max: 30, ..Default::default() };
/// assert_eq!(length.member_names(), ["min", "max"]);
/// assert!(length.kind_name().ends_with("::Length"));
/// ```
#[macro_export]
macro_rules! metadata {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$mattr:meta])*
                $mvis:vis $member:ident : $mty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $( $(#[$mattr])* $mvis $member: $mty, )*
        }

        impl $name {
            /// Qualified name of this metadata kind
            pub const KIND: &'static str = concat!(module_path!(), "::", stringify!($name));
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $member: $default, )*
                }
            }
        }

        impl $crate::MetadataInstance for $name {
            fn kind_name(&self) -> &str {
                Self::KIND
            }

            fn member_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![ $( stringify!($member) ),* ]
            }

            fn member(
                &self,
                name: &str,
            ) -> ::core::result::Result<&dyn $crate::MemberSource, $crate::MemberAccessError> {
                match name {
                    $( stringify!($member) => ::core::result::Result::Ok(&self.$member), )*
                    _ => ::core::result::Result::Err($crate::MemberAccessError::NoSuchMember {
                        kind: Self::KIND.into(),
                        member: name.into(),
                    }),
                }
            }
        }

        impl $crate::MemberSource for $name {
            fn as_metadata(&self) -> ::core::option::Option<&dyn $crate::MetadataInstance> {
                ::core::option::Option::Some(self)
            }

            fn static_kind() -> ::core::option::Option<$crate::MemberKind> {
                ::core::option::Option::Some($crate::MemberKind::Metadata(Self::KIND.into()))
            }
        }
    };
}

/// Declares an enumerated kind: a fieldless enum whose constants are
/// identified by name, implementing [`MemberSource`](crate::MemberSource) and
/// [`Reflect`](crate::Reflect).
///
/// ```rust
/// use hyaline_core::{Reflect, Value, constants};
///
/// constants! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Suit { Hearts, Spades }
/// }
///
/// assert_eq!(Suit::Spades.name(), "Spades");
/// let value = Suit::Hearts.to_value();
/// assert_eq!(Suit::from_value(value).unwrap(), Suit::Hearts);
/// ```
#[macro_export]
macro_rules! constants {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vattr:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis enum $name {
            $( $(#[$vattr])* $variant, )+
        }

        impl $name {
            /// Qualified name of this enumerated kind
            pub const KIND: &'static str = concat!(module_path!(), "::", stringify!($name));

            /// Name of this constant
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }

        impl $crate::MemberSource for $name {
            fn as_enum(&self) -> ::core::option::Option<$crate::EnumConstant> {
                ::core::option::Option::Some($crate::EnumConstant::new(Self::KIND, self.name()))
            }

            fn static_kind() -> ::core::option::Option<$crate::MemberKind> {
                ::core::option::Option::Some($crate::MemberKind::Enum(Self::KIND.into()))
            }
        }

        impl $crate::Reflect for $name {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Enum(Self::KIND)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Enum($crate::EnumConstant::new(Self::KIND, self.name()))
            }

            fn from_value(value: $crate::Value) -> ::core::result::Result<Self, $crate::ValueError> {
                match value {
                    $crate::Value::Enum(constant) if constant.kind == Self::KIND => {
                        match constant.name.as_str() {
                            $( stringify!($variant) => ::core::result::Result::Ok(Self::$variant), )+
                            _ => ::core::result::Result::Err($crate::ValueError::UnknownConstant {
                                kind: Self::KIND,
                                constant: constant.name,
                            }),
                        }
                    }
                    other => ::core::result::Result::Err($crate::ValueError::mismatch(
                        <Self as $crate::Reflect>::value_type(),
                        &other,
                    )),
                }
            }
        }
    };
}
