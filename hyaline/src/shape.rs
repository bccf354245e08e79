use alloc::string::String;

use hyaline_core::Record;
use hyaline_reflect::{
    FieldBagBuilder, MergePlanner, MetadataConverter, ScalarPolicy, ShapeTemplate, Synthesized,
    TypeBuilder, TypeRegistry,
};

use crate::{BuildStage, HyalineError};

/// Synthesizes a shape merging `source` with `template`, registered in the
/// process-wide registry.
///
/// Without `type_name`, a unique name is generated from the source's type
/// name. Unrecognized metadata member types fail the build; use
/// [`ShapeBuilder`] to change that or to pick another registry.
pub fn build_shape<S: Record>(
    source: &S,
    template: &ShapeTemplate<S>,
    type_name: Option<&str>,
) -> Result<Synthesized<S>, HyalineError> {
    let mut builder = ShapeBuilder::new();
    builder.type_name = type_name.map(String::from);
    builder.build(source, template)
}

/// Configures and runs shape builds.
///
/// ```rust
/// use hyaline::{ScalarPolicy, ShapeBuilder, ShapeTemplate, TypeRegistry, record};
///
/// record! {
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// let registry = TypeRegistry::new();
/// let point = ShapeBuilder::new()
///     .type_name("PointDto")
///     .scalar_policy(ScalarPolicy::Permissive)
///     .registry(&registry)
///     .build(&Point { x: 1, y: 2 }, &ShapeTemplate::new())
///     .unwrap();
///
/// assert_eq!(point.type_name(), "PointDto");
/// assert!(registry.contains("PointDto"));
/// ```
#[derive(Clone, Debug)]
pub struct ShapeBuilder<'r> {
    type_name: Option<String>,
    scalar_policy: ScalarPolicy,
    registry: &'r TypeRegistry,
}

impl Default for ShapeBuilder<'static> {
    fn default() -> Self {
        Self {
            type_name: None,
            scalar_policy: ScalarPolicy::default(),
            registry: TypeRegistry::global(),
        }
    }
}

impl ShapeBuilder<'static> {
    /// Creates a builder with a generated type name, the strict scalar policy,
    /// and the process-wide registry
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> ShapeBuilder<'r> {
    /// Names the synthesized type; the name must not be registered yet
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Sets what metadata conversion does with unrecognized member types
    pub fn scalar_policy(mut self, policy: ScalarPolicy) -> Self {
        self.scalar_policy = policy;
        self
    }

    /// Registers the synthesized type in `registry` instead
    pub fn registry<'a>(self, registry: &'a TypeRegistry) -> ShapeBuilder<'a> {
        ShapeBuilder {
            type_name: self.type_name,
            scalar_policy: self.scalar_policy,
            registry,
        }
    }

    /// Merges `source` with `template` and materializes the result
    pub fn build<S: Record>(
        &self,
        source: &S,
        template: &ShapeTemplate<S>,
    ) -> Result<Synthesized<S>, HyalineError> {
        let planner = MergePlanner::new(MetadataConverter::new(self.scalar_policy));
        let plan = planner
            .merge(source, template, self.type_name.as_deref())
            .map_err(|e| HyalineError::new(BuildStage::Merge, e))?;

        FieldBagBuilder::new(self.registry)
            .define_type(plan)
            .map_err(|e| HyalineError::new(BuildStage::Define, e))
    }
}
