//! Copperleaf Core - Shared types library.
//!
//! This crate provides common types used across all Copperleaf components:
//! - `api` - Data-access layer over the Copperleaf REST API
//! - `storefront` - Client-owned domain state (cart, wishlist, theme) and checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Entities with a
//! server-assigned identifier are server-owned: the client holds cache replicas
//! of them and never advances their state itself. The newtype IDs defined here
//! mark that ownership boundary in the type system.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
