//! # Warden Testkit
//!
//! Testing utilities for Warden.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Helper structs for setting up grant scenarios against
//!   the in-memory store
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use warden::Permission;
//! use warden_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let domain = fixture.domain();
//! let class = fixture.class();
//! let perm = fixture.permission(&class);
//! let accessor = fixture.resource(&class, &domain);
//! let target = fixture.resource(&class, &domain);
//! fixture.grant_resource(accessor, target, &[Permission::new(&perm)]);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use warden_testkit::generators::permission_set;
//!
//! proptest! {
//!     #[test]
//!     fn merge_is_a_superset(a in permission_set(8), b in permission_set(8)) {
//!         let mut merged = a.clone();
//!         merged.merge(&b);
//!         for perm in a.iter() {
//!             prop_assert!(merged.contains_match(&perm));
//!         }
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{set_of, TestFixture};
