//! HTTP request handlers

pub mod delete;
pub mod documents;
pub mod download;
pub mod error;
pub mod health;
pub mod upload;

use serde::Deserialize;

/// Query selecting an owner's documents.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_key: String,
}
