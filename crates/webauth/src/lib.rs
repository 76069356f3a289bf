//! WebAuth trusted-header identity extraction — umbrella crate.
//!
//! Re-exports the component crates for convenience. Use feature flags to
//! pick what you need; `tower` (the middleware) is on by default.
//!
//! Typical wiring:
//!
//! ```ignore
//! use webauth::tower::{TestWebauthLayer, WebauthLayer};
//! use webauth::core::TestFields;
//!
//! let app = ServiceBuilder::new()
//!     // dev only — synthesizes the metadata a real SSO tier would inject
//!     .layer(TestWebauthLayer::new(TestFields::new().set("user", "test-user")))
//!     .layer(WebauthLayer::new())
//!     .service(router);
//! ```

pub use webauth_core as core;

#[cfg(feature = "tower")]
pub use webauth_tower as tower;

#[cfg(feature = "strategy")]
pub use webauth_strategy as strategy;
