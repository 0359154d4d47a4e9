//! # Folio Keys Testkit
//!
//! Testing utilities for the folio key subsystem.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a ready-made store + cache over a temp directory
//! - **Stubs**: canned permission-service and registry collaborators
//! - **Generators**: proptest strategies for identifiers and keys
//!
//! ## Test Fixtures
//!
//! Quickly set up a realistic scenario:
//!
//! ```rust,no_run
//! use folio_keys_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::new().unwrap();
//!     let cache = fixture.open_cache().await.unwrap();
//! }
//! ```
//!
//! ## Collaborator Stubs
//!
//! ```rust
//! use folio_keys_testkit::stubs::{StubPermissions, StubRegistry};
//!
//! let perms = StubPermissions::allowing(["editor@folio.example"]);
//! let registry = StubRegistry::visible_for("viewer@folio.example", ["B"]);
//! ```

pub mod fixtures;
pub mod generators;
pub mod stubs;

pub use fixtures::TestFixture;
pub use generators::{collection_id_strategy, collection_key_strategy};
pub use stubs::{StubPermissions, StubRegistry};
