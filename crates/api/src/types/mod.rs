//! Wire types for the Copperleaf REST API.
//!
//! These shapes are contracts with the remote API, not locally enforced
//! invariants: the server owns every entity here, and the client's copy is a
//! cache replica. Field names follow the API's camelCase convention; money
//! fields travel as decimal strings.

mod analytics;
mod catalog;
mod common;
mod coupon;
mod customer;
mod order;
mod payment;
mod review;
mod settings;
mod shipping;

pub use analytics::*;
pub use catalog::*;
pub use common::*;
pub use coupon::*;
pub use customer::*;
pub use order::*;
pub use payment::*;
pub use review::*;
pub use settings::*;
pub use shipping::*;
