//! Authentication service module
//!
//! Registration, password login, token validation and logout on top of the
//! credential repository and the token service.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, Registration};
