//! Common error infrastructure for reward-core.
//!
//! This module provides shared types and traits used across all error types in
//! the crate. Domain-specific errors (e.g., `RewardError`, `ConfigurationError`)
//! are defined alongside the modules that raise them.
//!
//! # Design Principles
//!
//! - **Contract violations propagate**: an out-of-range reward index or an
//!   unknown dialog answer is a caller bug and is returned as `Err`.
//! - **Content gaps degrade**: missing messages or unsupported combinations
//!   are logged and absorbed locally, they never surface as errors.
//! - **Deterministic**: errors carry only plain data so they can be compared
//!   in replay checks.

use crate::state::{HeroId, ObjectId};

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input from the caller, should not be retried without changes.
    ///
    /// Examples: unknown dialog answer, reward index out of range
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: visited hero missing from the world, resume without a cursor
    Internal,

    /// Unrecoverable error, the simulation cannot continue.
    ///
    /// Examples: malformed catalog reaching the orchestrator
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Object whose protocol raised the error.
    pub object: Option<ObjectId>,

    /// Hero interacting with the object (if applicable).
    pub hero: Option<HeroId>,

    /// Simulation day at the time of error.
    pub day: u32,
}

impl ErrorContext {
    /// Creates a new error context for the given day.
    #[must_use]
    pub const fn new(day: u32) -> Self {
        Self {
            object: None,
            hero: None,
            day,
        }
    }

    /// Attaches an object to this context (builder pattern).
    #[must_use]
    pub const fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    /// Attaches a hero to this context (builder pattern).
    #[must_use]
    pub const fn with_hero(mut self, hero: HeroId) -> Self {
        self.hero = Some(hero);
        self
    }
}

/// Common trait for all reward-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who is at fault, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
