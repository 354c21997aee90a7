//! Registration, login and session verification.

pub mod service;

pub use service::AuthSessionService;
