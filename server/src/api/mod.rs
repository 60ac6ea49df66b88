//! API route modules
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness probe and landing route
//! - [`products`] - stock line management
//! - [`deliveries`] - outbound deliveries that consume stock
//! - [`recipes`] - recipes that manufacture new stock lines

pub mod deliveries;
pub mod health;
pub mod products;
pub mod recipes;
