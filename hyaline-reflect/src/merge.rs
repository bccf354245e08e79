use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use hyaline_core::{MetadataDescriptor, Record, Value, ValueType};
#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use crate::{Initializer, MetadataConverter, ReflectError, ShapeTemplate};

/// Where a merged field's declaration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldOrigin {
    /// Carried over from the source type, with its metadata stripped
    Source,
    /// Declared by the template, possibly shadowing a source field
    Template,
}

/// One field of the shape to synthesize
#[derive(Clone, Debug, PartialEq)]
pub struct MergedFieldSpec {
    /// Field name; unique within a plan
    pub name: String,

    /// Declared type
    pub ty: ValueType,

    /// Metadata to attach, in declaration order
    pub annotations: Vec<MetadataDescriptor>,

    /// Which side declared the field
    pub origin: FieldOrigin,

    /// The value the field starts out with
    pub initial_value: Value,
}

/// The output of [`MergePlanner::merge`]: everything a
/// [`TypeBuilder`](crate::TypeBuilder) needs to materialize an instance.
#[derive(Clone, Debug, PartialEq)]
pub struct MergePlan {
    /// Name of the type to define
    pub type_name: String,

    /// Qualified name of the source's static type
    pub source_type: &'static str,

    /// Metadata to attach to the type itself
    pub metadata: Vec<MetadataDescriptor>,

    /// Template fields first, then the remaining source fields, each group
    /// in declaration order
    pub fields: Vec<MergedFieldSpec>,
}

impl MergePlan {
    /// Looks a field up by name
    pub fn field(&self, name: &str) -> Option<&MergedFieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Initial values, in field order
    pub fn initial_values(&self) -> Vec<Value> {
        self.fields.iter().map(|f| f.initial_value.clone()).collect()
    }
}

static GENERATED_NAMES: AtomicU64 = AtomicU64::new(0);

/// Combines a source instance's fields with a template's declarations.
#[derive(Clone, Copy, Debug, Default)]
pub struct MergePlanner {
    converter: MetadataConverter,
}

impl MergePlanner {
    /// Creates a planner that converts metadata with the given converter
    pub fn new(converter: MetadataConverter) -> Self {
        Self { converter }
    }

    /// Plans the merged shape of `source` and `template`.
    ///
    /// A template field shadowing a source field (exact, case-sensitive name
    /// match) replaces its type and metadata. Its initial value is the
    /// template's initializer if there is one, else the source's current
    /// value when both declare the same type, else the template type's
    /// default. Template-only fields without initializer start at their
    /// type's default. Source-only fields keep their current value and lose
    /// their metadata.
    ///
    /// Values are snapshots: later changes to `source` don't reach the plan.
    pub fn merge<S: Record>(
        &self,
        source: &S,
        template: &ShapeTemplate<S>,
        explicit_type_name: Option<&str>,
    ) -> Result<MergePlan, ReflectError> {
        let shape = S::record_shape();
        let mut snapshot = source.field_values();

        let type_name = match explicit_type_name {
            Some(name) => name.to_string(),
            None => format!(
                "{}$Hyaline${}",
                shape.type_name,
                GENERATED_NAMES.fetch_add(1, Ordering::Relaxed)
            ),
        };
        trace!(
            "Merging template over {} into {}",
            shape.type_name.blue(),
            type_name.green()
        );

        let metadata = template
            .type_metadata()
            .iter()
            .map(|m| self.converter.convert(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut fields = Vec::with_capacity(template.declared_fields().len() + shape.fields.len());

        for declared in template.declared_fields() {
            let annotations = declared
                .metadata
                .iter()
                .map(|m| self.converter.convert(m.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;

            // a shadowed source value carries over only if its type still fits
            let inherited = snapshot
                .iter_mut()
                .find(|(name, _)| *name == declared.name)
                .map(|(_, value)| core::mem::take(value))
                .filter(|_| {
                    shape
                        .field(&declared.name)
                        .is_some_and(|source| source.ty == declared.ty)
                });

            let initial_value = match &declared.initializer {
                Some(Initializer::Value(value)) => value.clone(),
                Some(Initializer::Derived(f)) => f(source),
                None => inherited.unwrap_or_else(|| declared.ty.default_value()),
            };

            trace!(
                "  template field {} ({} metadata)",
                declared.name.yellow(),
                annotations.len()
            );
            fields.push(MergedFieldSpec {
                name: declared.name.clone(),
                ty: declared.ty.clone(),
                annotations,
                origin: FieldOrigin::Template,
                initial_value,
            });
        }

        for field in &shape.fields {
            if template.declares(field.name) {
                continue;
            }
            let initial_value = snapshot
                .iter_mut()
                .find(|(name, _)| *name == field.name)
                .map(|(_, value)| core::mem::take(value))
                .unwrap_or_else(|| field.ty.default_value());

            if !field.metadata.is_empty() {
                trace!(
                    "  stripping {} metadata from source field {}",
                    field.metadata.len(),
                    field.name.yellow()
                );
            }
            fields.push(MergedFieldSpec {
                name: field.name.to_string(),
                ty: field.ty.clone(),
                annotations: Vec::new(),
                origin: FieldOrigin::Source,
                initial_value,
            });
        }

        debug!(
            "Planned {}: {} template fields, {} source fields",
            type_name.green(),
            template.declared_fields().len(),
            fields.len() - template.declared_fields().len()
        );

        Ok(MergePlan {
            type_name,
            source_type: shape.type_name,
            metadata,
            fields,
        })
    }
}
