//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and token validation live here, independent of the web
//! framework. `token` signs and checks bearer tokens; `password` hashes secrets.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use service::{AuthConfig, AuthService};
pub use token::TokenService;
