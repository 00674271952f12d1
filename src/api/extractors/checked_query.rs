//! Query string extractor with validation-style rejections.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Like [`Query`], but a missing or unrecognized parameter rejects with
/// [`AppError::Validation`] (422) instead of 400.
pub struct CheckedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for CheckedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(CheckedQuery(value))
    }
}
