//! Copperleaf API - Data-access layer over the Copperleaf commerce API.
//!
//! Everything the client knows about the store lives behind one REST API; this
//! crate is the synchronization layer between that API and whatever renders it.
//!
//! # Architecture
//!
//! - [`Transport`] - one HTTP executor shared by every endpoint group; attaches
//!   the bearer token from the [`SessionProvider`] to each outbound request
//! - [`TagCache`] - tag-coherent cache: queries declare the tags their result
//!   depends on, mutations declare the tags they invalidate
//! - [`storefront`] / [`admin`] - entity endpoint groups, one per REST resource
//!   family
//! - [`CommerceClient`] - the aggregate wiring config, transport, cache, and
//!   every endpoint group together
//!
//! The server is the source of truth for every entity with a server-assigned
//! id. The cache holds read replicas of those entities; a successful mutation
//! marks every dependent replica stale, and the next read re-fetches.
//!
//! # Example
//!
//! ```rust,ignore
//! use copperleaf_api::{ApiConfig, CommerceClient};
//!
//! let client = CommerceClient::new(ApiConfig::from_env()?)?;
//!
//! // Cached read
//! let products = client.catalog().products(&Default::default()).await?;
//!
//! // Mutation: invalidates the Orders family, the next list re-fetches
//! client.admin_orders().update_status(&order_id, OrderStatus::Confirmed).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
mod cache;
mod client;
mod config;
mod error;
mod session;
pub mod storefront;
mod telemetry;
mod transport;
pub mod types;

pub use cache::{Origin, QueryKey, QueryResult, Resource, Tag, TagCache};
pub use client::{ClientInitError, CommerceClient};
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use session::{Session, SessionProvider};
pub use telemetry::init_tracing;
pub use transport::Transport;
