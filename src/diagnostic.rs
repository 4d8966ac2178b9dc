//! Non-fatal findings collected during generation.
//!
//! Nothing in here aborts a run. Each finding is logged at `warn` level and
//! returned with the document so callers can fail their own build on it.

use std::fmt;

use serde::Serialize;

/// What kind of problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A directive value could not be parsed; the directive was dropped.
    MalformedDirective,
    /// A `format=` value outside the supported set; the directive was dropped.
    UnknownFormat,
    /// `exclusiveMinimum`/`exclusiveMaximum` without a matching bound.
    DanglingExclusiveBound,
    /// A switch order entry with no associated case.
    MissingSwitchCase,
    /// A switch case left out of an explicit order.
    UnorderedSwitchCase,
    /// Two hooks on the same record both produce `oneOf`.
    ConflictingOneOf,
    /// Two distinct types share one definitions key.
    DefinitionCollision,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedDirective => "malformed-directive",
            Self::UnknownFormat => "unknown-format",
            Self::DanglingExclusiveBound => "dangling-exclusive-bound",
            Self::MissingSwitchCase => "missing-switch-case",
            Self::UnorderedSwitchCase => "unordered-switch-case",
            Self::ConflictingOneOf => "conflicting-one-of",
            Self::DefinitionCollision => "definition-collision",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// Dotted location of the field or type (e.g. `models.User.age`).
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.code, self.message)
    }
}

/// Collector owned by a single generation run.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, code: DiagnosticCode, path: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(code = %code, path, "{}", message);
        self.items.push(Diagnostic {
            code,
            path: path.to_string(),
            message,
        });
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
