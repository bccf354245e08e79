//! Pretty printer for descriptors, values and synthesized instances

use alloc::string::String;
use core::fmt::{self, Display};

use hyaline_core::{MemberValue, MetadataDescriptor, RecordValue, Value};
use hyaline_reflect::Synthesized;
use yansi::{Paint, Style};

const TYPE: Style = Style::new().blue().bold();
const FIELD: Style = Style::new().yellow();
const STRING: Style = Style::new().green();
const NUMBER: Style = Style::new().cyan();
const CONSTANT: Style = Style::new().magenta();
const MUTED: Style = Style::new().dim();
const SHADOW: Style = Style::new().red().italic();

/// Lays out metadata descriptors, values and synthesized instances over
/// several indented lines, optionally colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrettyPrinter {
    indent_size: usize,
    max_depth: Option<usize>,
    use_colors: bool,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self {
            indent_size: 2,
            max_depth: None,
            use_colors: std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl PrettyPrinter {
    /// Creates a printer with an indent of 2, no depth limit, and colors
    /// unless `NO_COLOR` is set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Sets how many levels deep nested descriptors, records and lists are
    /// expanded; anything deeper is elided
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Turns colors on or off
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Formats a metadata descriptor, nested descriptors and arrays included
    pub fn format_descriptor(&self, descriptor: &MetadataDescriptor) -> String {
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.write_descriptor(&mut out, descriptor, 0);
        out
    }

    /// Formats a value
    pub fn format_value(&self, value: &Value) -> String {
        let mut out = String::new();
        let _ = self.write_value(&mut out, value, 0);
        out
    }

    /// Formats a synthesized instance: its type-level metadata, then each
    /// field with its metadata, declared type, slot value, and the dynamic
    /// attribute shadowing it if there is one
    pub fn format_instance<S>(&self, instance: &Synthesized<S>) -> String {
        let mut out = String::new();
        let _ = self.write_instance(&mut out, instance);
        out
    }

    pub(crate) fn write_descriptor(
        &self,
        f: &mut dyn fmt::Write,
        descriptor: &MetadataDescriptor,
        depth: usize,
    ) -> fmt::Result {
        write!(f, "@")?;
        self.paint(f, &descriptor.kind, TYPE)?;
        if descriptor.is_empty() {
            return Ok(());
        }
        if self.exceeded(depth) {
            return self.paint(f, " { … }", MUTED);
        }

        writeln!(f, " {{")?;
        for (name, value) in descriptor.members() {
            self.indent(f, depth + 1)?;
            self.paint(f, name, FIELD)?;
            write!(f, ": ")?;
            self.write_member(f, value, depth + 1)?;
            writeln!(f, ",")?;
        }
        self.indent(f, depth)?;
        write!(f, "}}")
    }

    fn write_member(
        &self,
        f: &mut dyn fmt::Write,
        value: &MemberValue,
        depth: usize,
    ) -> fmt::Result {
        match value {
            MemberValue::Metadata(descriptor) => self.write_descriptor(f, descriptor, depth),
            MemberValue::Array { element, values } => {
                self.paint(f, format_args!("{element}[] "), MUTED)?;
                if values.is_empty() {
                    return write!(f, "[]");
                }
                if self.exceeded(depth) {
                    return self.paint(f, "[…]", MUTED);
                }

                writeln!(f, "[")?;
                for item in values {
                    self.indent(f, depth + 1)?;
                    self.write_member(f, item, depth + 1)?;
                    writeln!(f, ",")?;
                }
                self.indent(f, depth)?;
                write!(f, "]")
            }
            MemberValue::Enum(_) => self.paint(f, value, CONSTANT),
            MemberValue::Type(_) => self.paint(f, value, TYPE),
            MemberValue::String(_) | MemberValue::Char(_) => self.paint(f, value, STRING),
            _ => self.paint(f, value, NUMBER),
        }
    }

    pub(crate) fn write_value(
        &self,
        f: &mut dyn fmt::Write,
        value: &Value,
        depth: usize,
    ) -> fmt::Result {
        match value {
            Value::Null => self.paint(f, "null", MUTED),
            Value::String(_) | Value::Char(_) => self.paint(f, value, STRING),
            Value::Enum(_) => self.paint(f, value, CONSTANT),
            Value::List(items) => {
                if items.is_empty() {
                    return write!(f, "[]");
                }
                if self.exceeded(depth) {
                    return self.paint(f, "[…]", MUTED);
                }

                writeln!(f, "[")?;
                for item in items {
                    self.indent(f, depth + 1)?;
                    self.write_value(f, item, depth + 1)?;
                    writeln!(f, ",")?;
                }
                self.indent(f, depth)?;
                write!(f, "]")
            }
            Value::Record(record) => self.write_record(f, record, depth),
            _ => self.paint(f, value, NUMBER),
        }
    }

    fn write_record(
        &self,
        f: &mut dyn fmt::Write,
        record: &RecordValue,
        depth: usize,
    ) -> fmt::Result {
        self.paint(f, record.type_name, TYPE)?;
        if self.exceeded(depth) {
            return self.paint(f, " { … }", MUTED);
        }

        writeln!(f, " {{")?;
        for (name, value) in &record.fields {
            self.indent(f, depth + 1)?;
            self.paint(f, name, FIELD)?;
            write!(f, ": ")?;
            self.write_value(f, value, depth + 1)?;
            writeln!(f, ",")?;
        }
        self.indent(f, depth)?;
        write!(f, "}}")
    }

    pub(crate) fn write_instance<S>(
        &self,
        f: &mut dyn fmt::Write,
        instance: &Synthesized<S>,
    ) -> fmt::Result {
        for descriptor in instance.metadata() {
            self.write_descriptor(f, descriptor, 0)?;
            writeln!(f)?;
        }

        self.paint(f, instance.type_name(), TYPE)?;
        self.paint(
            f,
            format_args!(" (from {})", instance.synthesized_type().source_type()),
            MUTED,
        )?;
        writeln!(f, " {{")?;

        let overrides: Vec<_> = instance.overridden_attributes().collect();
        for slot in instance.fields() {
            for descriptor in &slot.metadata {
                self.indent(f, 1)?;
                self.write_descriptor(f, descriptor, 1)?;
                writeln!(f)?;
            }

            self.indent(f, 1)?;
            self.paint(f, &slot.name, FIELD)?;
            write!(f, ": ")?;
            self.paint(f, &slot.ty, MUTED)?;
            write!(f, " = ")?;
            if let Some(value) = instance.field_value(&slot.name) {
                self.write_value(f, value, 1)?;
            }
            if !slot.has_accessor() {
                self.paint(f, " (dynamic only)", MUTED)?;
            }
            if let Some((_, shadow)) = overrides.iter().find(|(name, _)| *name == slot.name) {
                self.paint(f, " (attribute: ", SHADOW)?;
                self.write_value(f, shadow, 1)?;
                self.paint(f, ")", SHADOW)?;
            }
            writeln!(f, ",")?;
        }
        write!(f, "}}")
    }

    fn exceeded(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }

    fn indent(&self, f: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * self.indent_size)
    }

    fn paint(&self, f: &mut dyn fmt::Write, text: impl Display, style: Style) -> fmt::Result {
        if self.use_colors {
            write!(f, "{}", text.paint(style))
        } else {
            write!(f, "{text}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyaline_core::MemberKind;

    fn plain() -> PrettyPrinter {
        PrettyPrinter::new().with_colors(false)
    }

    #[test]
    fn descriptor_members_go_on_their_own_lines() {
        let descriptor = MetadataDescriptor::new("demo::Column")
            .with_member("name", MemberValue::String("first_name".into()))
            .with_member("length", MemberValue::Long(30));

        assert_eq!(
            plain().format_descriptor(&descriptor),
            "@demo::Column {\n  name: \"first_name\",\n  length: 30L,\n}"
        );
    }

    #[test]
    fn empty_arrays_keep_their_component_kind() {
        let descriptor = MetadataDescriptor::new("demo::Tags").with_member(
            "values",
            MemberValue::Array {
                element: MemberKind::Short,
                values: vec![],
            },
        );

        assert_eq!(
            plain().format_descriptor(&descriptor),
            "@demo::Tags {\n  values: short[] [],\n}"
        );
    }

    #[test]
    fn depth_limit_elides_nested_blocks() {
        let inner = MetadataDescriptor::new("demo::Inner").with_member("x", MemberValue::Int(1));
        let outer = MetadataDescriptor::new("demo::Outer")
            .with_member("inner", MemberValue::Metadata(inner));

        let out = plain().with_max_depth(1).format_descriptor(&outer);
        assert_eq!(out, "@demo::Outer {\n  inner: @demo::Inner { … },\n}");
    }

    #[test]
    fn indent_size_is_respected() {
        let list = Value::List(vec![Value::I32(1), Value::Null]);
        assert_eq!(
            plain().with_indent_size(4).format_value(&list),
            "[\n    1,\n    null,\n]"
        );
    }
}
