use core::fmt::{self, Display, Formatter};

use hyaline_core::{MetadataDescriptor, Value};
use hyaline_reflect::Synthesized;

use crate::PrettyPrinter;

/// Things a [`PrettyPrinter`] knows how to lay out
pub trait HyalinePretty {
    /// Writes the pretty form of `self` with the given printer
    fn write_pretty(&self, printer: &PrettyPrinter, f: &mut dyn fmt::Write) -> fmt::Result;

    /// Displays `self` with the default printer
    fn pretty(&self) -> PrettyDisplay<'_, Self> {
        PrettyDisplay {
            value: self,
            printer: PrettyPrinter::default(),
        }
    }

    /// Displays `self` with a custom printer
    fn pretty_with(&self, printer: PrettyPrinter) -> PrettyDisplay<'_, Self> {
        PrettyDisplay {
            value: self,
            printer,
        }
    }
}

/// A [`Display`] adapter returned by [`HyalinePretty::pretty`]
pub struct PrettyDisplay<'a, T: ?Sized> {
    value: &'a T,
    printer: PrettyPrinter,
}

impl<T: HyalinePretty + ?Sized> Display for PrettyDisplay<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.value.write_pretty(&self.printer, f)
    }
}

impl HyalinePretty for MetadataDescriptor {
    fn write_pretty(&self, printer: &PrettyPrinter, f: &mut dyn fmt::Write) -> fmt::Result {
        printer.write_descriptor(f, self, 0)
    }
}

impl HyalinePretty for Value {
    fn write_pretty(&self, printer: &PrettyPrinter, f: &mut dyn fmt::Write) -> fmt::Result {
        printer.write_value(f, self, 0)
    }
}

impl<S> HyalinePretty for Synthesized<S> {
    fn write_pretty(&self, printer: &PrettyPrinter, f: &mut dyn fmt::Write) -> fmt::Result {
        printer.write_instance(f, self)
    }
}
