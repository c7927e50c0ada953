// src/github/mod.rs
pub mod client;
pub mod error;
pub mod types;

pub use client::{ContributorApi, GithubClient};
pub use error::{RefreshFailure, RequestError};
