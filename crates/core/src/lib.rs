//! Marketdeck Core - Shared types library.
//!
//! This crate provides common types used across all Marketdeck components:
//! - `api` - The marketplace dashboard HTTP API
//! - `cli` - Command-line tools for seed data and credentials
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no store access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money, roles,
//!   and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
