use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::marker::PhantomData;

use hyaline_core::{MetadataInstance, Reflect, Value, ValueType};

type DeriveFn<S> = Box<dyn Fn(&S) -> Value + Send + Sync>;

/// How a template field gets its initial value
pub(crate) enum Initializer<S> {
    /// A value fixed when the template was written
    Value(Value),
    /// Computed from the source instance when the template is merged
    Derived(DeriveFn<S>),
}

/// One field declared by a [`ShapeTemplate`], with its type erased
pub(crate) struct DeclaredField<S> {
    pub(crate) name: String,
    pub(crate) ty: ValueType,
    pub(crate) metadata: Vec<Arc<dyn MetadataInstance>>,
    pub(crate) initializer: Option<Initializer<S>>,
}

/// A field declaration for a [`ShapeTemplate`] over source type `S`, with
/// declared type `T`.
///
/// ```rust
/// use hyaline_core::record;
/// use hyaline_reflect::{ShapeTemplate, TemplateField};
///
/// record! {
///     pub struct Person {
///         pub first_name: String,
///     }
/// }
///
/// let template = ShapeTemplate::<Person>::new()
///     .field(TemplateField::new("name").derive(|p: &Person| p.first_name.clone()))
///     .field(TemplateField::<_, i32>::new("age").init(42));
/// assert_eq!(template.field_names().collect::<Vec<_>>(), ["name", "age"]);
/// ```
pub struct TemplateField<S, T> {
    name: String,
    metadata: Vec<Arc<dyn MetadataInstance>>,
    initializer: Option<Initializer<S>>,
    ty: PhantomData<fn() -> T>,
}

impl<S: 'static, T: Reflect + 'static> TemplateField<S, T> {
    /// Declares a field with no metadata and no initializer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Vec::new(),
            initializer: None,
            ty: PhantomData,
        }
    }

    /// Attaches a metadata instance to the field
    pub fn meta(mut self, metadata: impl MetadataInstance) -> Self {
        self.metadata.push(Arc::new(metadata));
        self
    }

    /// Initializes the field with a fixed value
    pub fn init(mut self, value: T) -> Self {
        self.initializer = Some(Initializer::Value(value.to_value()));
        self
    }

    /// Initializes the field from the source instance, at merge time
    pub fn derive(mut self, f: impl Fn(&S) -> T + Send + Sync + 'static) -> Self {
        self.initializer = Some(Initializer::Derived(Box::new(move |source: &S| {
            f(source).to_value()
        })));
        self
    }
}

/// A set of field and metadata declarations, authored independently of any
/// source type, to be merged over a value of type `S`.
pub struct ShapeTemplate<S> {
    metadata: Vec<Arc<dyn MetadataInstance>>,
    fields: Vec<DeclaredField<S>>,
}

impl<S> Default for ShapeTemplate<S> {
    fn default() -> Self {
        Self {
            metadata: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl<S: 'static> ShapeTemplate<S> {
    /// Creates an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a metadata instance to the synthesized type itself
    pub fn meta(mut self, metadata: impl MetadataInstance) -> Self {
        self.metadata.push(Arc::new(metadata));
        self
    }

    /// Declares a field.
    ///
    /// Declaring the same name twice replaces the earlier declaration, in
    /// place.
    pub fn field<T: Reflect + 'static>(mut self, field: TemplateField<S, T>) -> Self {
        let declared = DeclaredField {
            name: field.name,
            ty: T::value_type(),
            metadata: field.metadata,
            initializer: field.initializer,
        };
        match self.fields.iter_mut().find(|f| f.name == declared.name) {
            Some(slot) => *slot = declared,
            None => self.fields.push(declared),
        }
        self
    }
}

impl<S> ShapeTemplate<S> {
    /// Names of the declared fields, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns true if the template declares a field with exactly this name
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub(crate) fn declared_fields(&self) -> &[DeclaredField<S>] {
        &self.fields
    }

    pub(crate) fn type_metadata(&self) -> &[Arc<dyn MetadataInstance>] {
        &self.metadata
    }
}

impl<S> core::fmt::Debug for ShapeTemplate<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapeTemplate")
            .field(
                "metadata",
                &self.metadata.iter().map(|m| m.kind_name()).collect::<Vec<_>>(),
            )
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|f| (f.name.as_str(), &f.ty))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
