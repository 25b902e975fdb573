//! Request extractors.
//!
//! - [`auth::Actor`] -- Identifies who is making a change, enforcing HTTP
//!   Basic auth when admin credentials are configured.

pub mod auth;
