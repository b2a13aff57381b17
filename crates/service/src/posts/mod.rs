//! Post listing: every post with its author, comments and upvote count.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::PostService;
