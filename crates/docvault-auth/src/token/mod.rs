//! Token issuance and validation.

pub mod authority;
pub mod claims;

pub use authority::TokenAuthority;
pub use claims::Claims;
