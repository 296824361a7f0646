//! Error and diagnostic types for the Trellis loader.
//!
//! Hard errors (`ParseError`, `ScopeError`, `ComponentError`) are returned
//! from registration and tokenization. Everything that happens while a tree is
//! being built degrades gracefully instead and is recorded as a [`Diagnostic`].

use thiserror::Error;

/// Errors raised by the XML tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("XML parsing error: {reason} on line {line}")]
    Syntax { line: usize, reason: String },

    #[error("element '{name}' opened on line {line} is never closed")]
    UnclosedElement { name: String, line: usize },
}

impl ParseError {
    /// Line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::UnclosedElement { line, .. } => *line,
        }
    }
}

/// Errors raised when registering into the scope registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("no component found to register {kind} `{name}` into: `{scope}`")]
    UnknownScope {
        scope: String,
        kind: &'static str,
        name: String,
    },
}

/// Errors raised while reading a component definition document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("component `{component}`: {source}")]
    Malformed {
        component: String,
        #[source]
        source: ParseError,
    },

    #[error("component `{component}`: unexpected root element <{found}>")]
    UnexpectedRoot { component: String, found: String },

    #[error("component `{component}`: <{element}> without a `name` attribute")]
    MissingName { component: String, element: String },

    #[error("component `{component}` has no <view>")]
    MissingView { component: String },
}

/// Outcome of a name registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The name was taken; the first registration is kept.
    AlreadyExists,
}

/// A non-fatal problem met while building a widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("'{param}' parameter is not defined on '{scope}'")]
    UndefinedParam { scope: String, param: String },

    #[error("no constant was found with name \"{name}\"")]
    UndefinedConst { name: String },

    #[error("'{name}' is not a known widget, element, or component")]
    UnknownElement { name: String },

    #[error("there is no parent object available for '{name}'")]
    MissingParent { name: String },

    #[error("end of element '{name}' with no open element")]
    UnbalancedEnd { name: String },

    #[error("component '{scope}' did not produce a view")]
    EmptyView { scope: String },

    #[error(transparent)]
    Malformed(#[from] ParseError),
}

impl Diagnostic {
    /// Log level this diagnostic is reported at.
    pub fn level(&self) -> log::Level {
        match self {
            Diagnostic::MissingParent { .. } | Diagnostic::UnbalancedEnd { .. } => {
                log::Level::Error
            }
            _ => log::Level::Warn,
        }
    }

    /// Write the diagnostic to the `log` facade.
    pub fn emit(&self) {
        log::log!(self.level(), "{}", self);
    }

    pub fn is_unknown_element(&self) -> bool {
        matches!(self, Diagnostic::UnknownElement { .. })
    }
}
