//! # Folio Keys Keyring
//!
//! The authorization façade over the collection key cache: the surface
//! the rest of the publishing backend talks to.
//!
//! ## Overview
//!
//! The keyring owns no cryptography and no persistence. Every call
//! validates its inputs, asks the permission collaborator whether the
//! caller may edit, and only then delegates to the cache. Non-privileged
//! callers listing collections see only the identifiers the registry says
//! they may view.
//!
//! ## Denial vs. error
//!
//! The distinction is load-bearing: an explicit `false` from the
//! permission check becomes a silent `None`/no-op, but a *failing*
//! permission check is wrapped and re-thrown with the original as cause.
//! A genuine error is never converted into a denial.
//!
//! ## Key Types
//!
//! - [`Keyring`] - The façade itself
//! - [`PermissionService`] / [`CollectionRegistry`] - Consumed collaborator traits
//! - [`User`], [`Collection`] - Consumed collaborator shapes

pub mod collaborators;
pub mod error;
pub mod keyring;

pub use collaborators::{
    Collection, CollectionDescription, CollectionRegistry, PermissionError, PermissionService,
    RegistryError, User,
};
pub use error::{KeyringError, Result};
pub use keyring::Keyring;
