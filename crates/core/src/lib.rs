//! `bizadmin-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the client-side
//! modules (no infrastructure concerns, no remote calls).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CompanyId, ProductId};
