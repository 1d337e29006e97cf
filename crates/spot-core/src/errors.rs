//! Structured error types shared across the spot crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SpotError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter values, cell coordinates, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the thermal spot solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SpotError {
    /// Invalid physical parameters or configuration, rejected before any quadrature.
    #[error("parameter error: {0}")]
    Parameter(ErrorInfo),
    /// Quadrature non-convergence, non-finite integrands or a zero integral.
    #[error("numerical error: {0}")]
    Numerical(ErrorInfo),
    /// File system failures raised by persistence or export handling.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// The external simulator could not be started or driven.
    #[error("environment error: {0}")]
    Environment(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SpotError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SpotError::Parameter(info)
            | SpotError::Numerical(info)
            | SpotError::Io(info)
            | SpotError::Environment(info)
            | SpotError::Serde(info) => info,
        }
    }

    /// Returns a copy of the error with an additional context entry.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            SpotError::Parameter(info) => SpotError::Parameter(info.with_context(key, value)),
            SpotError::Numerical(info) => SpotError::Numerical(info.with_context(key, value)),
            SpotError::Io(info) => SpotError::Io(info.with_context(key, value)),
            SpotError::Environment(info) => SpotError::Environment(info.with_context(key, value)),
            SpotError::Serde(info) => SpotError::Serde(info.with_context(key, value)),
        }
    }

    /// True for errors raised by the quadrature or the reciprocal.
    pub fn is_numerical(&self) -> bool {
        matches!(self, SpotError::Numerical(_))
    }
}
