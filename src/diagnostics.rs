//! Non-fatal generation diagnostics.
//!
//! Warnings never gate success. Every warning is recorded in a [`Diagnostics`] sink (so callers can print or assert on
//! it) and also logged through `tracing` at warn level as it is raised.

use std::fmt;

/// Kind of a non-fatal diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A default targets a name with no resolved property; the default is dropped.
    AmbiguousDefault,
    /// A test value targets a name with no resolved property; the value is dropped.
    AmbiguousTestValue,
    /// A retention marker targets a name with no resolved property; the marker is dropped.
    AmbiguousRetain,
    /// More than one reset hook in one declaration. All of them are generated.
    DuplicateReset,
    /// A required trait member that the generated implementation does not provide.
    UnimplementedMember,
    /// Trace output requested with `show_traces`.
    Trace,
}

impl WarningKind {
    pub fn code(self) -> &'static str {
        match self {
            WarningKind::AmbiguousDefault => "ambiguous-default",
            WarningKind::AmbiguousTestValue => "ambiguous-test-value",
            WarningKind::AmbiguousRetain => "ambiguous-retain",
            WarningKind::DuplicateReset => "duplicate-reset",
            WarningKind::UnimplementedMember => "unimplemented-member",
            WarningKind::Trace => "trace",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A warning attached to one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub class: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}] {}: {}", self.kind, self.class, self.message)
    }
}

/// Collects warnings raised while processing declarations.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, kind: WarningKind, class: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(class, kind = %kind, "{message}");
        self.warnings.push(Warning {
            kind,
            class: class.to_string(),
            message,
        });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Warnings of one kind, in the order they were raised.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
