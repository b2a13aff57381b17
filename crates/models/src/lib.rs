pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod post;
pub mod comment;
pub mod upvote;

#[cfg(test)]
mod tests;
