//! Domain building blocks shared by every catalog crate.
//!
//! - [`types`]: id and timestamp aliases.
//! - [`error`]: the [`CoreError`](error::CoreError) taxonomy.
//! - [`entity`]: entity-type tags used by audit events and error messages.
//! - [`pagination`]: the filter / sort / slice query pipeline.
//! - [`validation`]: named rule sets applied to transfer objects.

pub mod entity;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
