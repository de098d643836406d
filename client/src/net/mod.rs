//! Networking modules for the catalog API and the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` fetches the product catalog from our server, `auth` defines the
//! identity-provider boundary, `identity` implements it over REST, and `types`
//! holds the provider's wire schema.

pub mod api;
pub mod auth;
pub mod identity;
pub mod types;
