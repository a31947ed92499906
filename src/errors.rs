//! Error Types
//!
//! This module defines the error types used by the crate.
//!
//! # Overview
//!
//! Shader generation and cache lookups are infallible: every value of the
//! typed option space maps to a program. [`ShaderError`] only covers the
//! untyped boundaries:
//! - Raw ordinals or names that do not map to a [`Filter`] / [`Address`]
//! - A precompile backend rejecting a built-in source
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ShaderError>`.
//!
//! ```rust,ignore
//! use builtin_shaders::Filter;
//!
//! let filter = Filter::try_from(1u32)?;
//! assert_eq!(filter, Filter::Linear);
//! ```
//!
//! [`Filter`]: crate::pipeline::Filter
//! [`Address`]: crate::pipeline::Address

use thiserror::Error;

/// The main error type of the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    // ========================================================================
    // Option Conversion Errors
    // ========================================================================
    /// Raw filter ordinal outside `0..Filter::COUNT`.
    #[error("Invalid filter ordinal: {0}")]
    InvalidFilter(u32),

    /// Raw address ordinal outside `0..Address::COUNT`.
    #[error("Invalid address ordinal: {0}")]
    InvalidAddress(u32),

    /// Filter name that does not match any variant.
    #[error("Unknown filter name: {0:?}")]
    UnknownFilterName(String),

    /// Address name that does not match any variant.
    #[error("Unknown address name: {0:?}")]
    UnknownAddressName(String),

    // ========================================================================
    // Precompilation Errors
    // ========================================================================
    /// A shader compiler rejected a source.
    #[error("Failed to compile shader '{label}': {reason}")]
    Compile {
        /// Label of the source that failed
        label: String,
        /// Message reported by the compiler
        reason: String,
    },
}

/// Alias for `Result<T, ShaderError>`.
pub type Result<T> = std::result::Result<T, ShaderError>;
