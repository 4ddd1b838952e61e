//! URL-encoded form extraction
//!
//! axum's `Form` deserializes into a struct and loses repeated keys, so
//! bodies are decoded into ordered pairs instead.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use fyyur_common::validation::FormData;

use crate::PageError;

/// Extractor yielding every submitted key/value pair
#[derive(Debug, Clone)]
pub struct FormPairs(pub FormData);

/// Decode an `application/x-www-form-urlencoded` body
pub fn decode(body: &[u8]) -> Result<FormData, PageError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| PageError::BadRequest(format!("Invalid form body: {}", e)))?;
    Ok(FormData::from_pairs(pairs))
}

#[async_trait]
impl<S> FromRequest<S> for FormPairs
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| PageError::BadRequest(format!("Failed to read body: {}", e)))?;

        decode(&body).map(FormPairs)
    }
}
