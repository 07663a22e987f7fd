//! # devrun Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `DevrunError` taxonomy and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{DevrunError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
