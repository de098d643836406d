//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `auth_form`, `products`) so pages can
//! depend on small focused models.

pub mod auth;
pub mod auth_form;
pub mod products;
