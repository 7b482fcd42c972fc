//! # HTTP Resource Client
//!
//! [`RemoteCollection`] over a JSON REST endpoint:
//!
//! | Call | Request |
//! |------|---------|
//! | `list` | `GET /{kind}` |
//! | `create` | `POST /{kind}` with the draft |
//! | `update` | `PUT /{kind}/{id}` with the draft |
//! | `delete` | `DELETE /{kind}/{id}` |
//!
//! Every failure, whatever its origin, comes back as one [`RequestFailed`]. There is no
//! retry.

use crate::model::{Operation, Resource, ResourceKind};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use store_framework::RemoteCollection;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a remote call failed.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A failed call against a resource collection.
#[derive(Debug, Error)]
#[error("{operation} {kind} failed: {cause}")]
pub struct RequestFailed {
    pub kind: ResourceKind,
    pub operation: Operation,
    #[source]
    pub cause: FailureCause,
}

/// Sends `request` and checks the status, returning the raw body.
pub(crate) async fn send_checked(request: reqwest::RequestBuilder) -> Result<Vec<u8>, FailureCause> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FailureCause::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}

pub(crate) fn decode<V: DeserializeOwned>(body: &[u8]) -> Result<V, FailureCause> {
    Ok(serde_json::from_slice(body)?)
}

/// Client for one collection endpoint, typed by the record kind it serves.
pub struct HttpResourceClient<T> {
    http: reqwest::Client,
    base_url: String,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: Resource> HttpResourceClient<T> {
    /// `base_url` is scheme + host + port; the kind's path is appended per call.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            _kind: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::KIND.path())
    }

    fn record_url(&self, id: &T::Id) -> String {
        format!("{}/{}/{}", self.base_url, T::KIND.path(), id)
    }

    async fn call<V: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<V, RequestFailed> {
        let body = send_checked(request)
            .await
            .map_err(|cause| self.failed(operation, cause))?;
        decode(&body).map_err(|cause| self.failed(operation, cause))
    }

    fn failed(&self, operation: Operation, cause: FailureCause) -> RequestFailed {
        warn!(kind = %T::KIND, %operation, error = %cause, "Request failed");
        RequestFailed {
            kind: T::KIND,
            operation,
            cause,
        }
    }
}

#[async_trait]
impl<T> RemoteCollection<T> for HttpResourceClient<T>
where
    T: Resource,
    T::Draft: Serialize,
{
    type Error = RequestFailed;

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn list(&self) -> Result<Vec<T>, RequestFailed> {
        debug!("Sending request");
        self.call(Operation::List, self.http.get(self.collection_url()))
            .await
    }

    #[instrument(skip(self, draft), fields(kind = %T::KIND))]
    async fn create(&self, draft: T::Draft) -> Result<T, RequestFailed> {
        debug!(?draft, "Sending request");
        self.call(
            Operation::Create,
            self.http.post(self.collection_url()).json(&draft),
        )
        .await
    }

    #[instrument(skip(self, draft), fields(kind = %T::KIND))]
    async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, RequestFailed> {
        debug!(?draft, "Sending request");
        self.call(
            Operation::Update,
            self.http.put(self.record_url(&id)).json(&draft),
        )
        .await
    }

    #[instrument(skip(self), fields(kind = %T::KIND))]
    async fn delete(&self, id: T::Id) -> Result<(), RequestFailed> {
        debug!("Sending request");
        // The body of a delete response is not interpreted.
        send_checked(self.http.delete(self.record_url(&id)))
            .await
            .map(|_| ())
            .map_err(|cause| self.failed(Operation::Delete, cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId, User};

    #[test]
    fn urls_follow_the_kind() {
        let users = HttpResourceClient::<User>::new(reqwest::Client::new(), "http://api.test/");
        assert_eq!(users.collection_url(), "http://api.test/users");

        let products = HttpResourceClient::<Product>::new(reqwest::Client::new(), "http://api.test");
        assert_eq!(products.record_url(&ProductId(12)), "http://api.test/products/12");
    }

    #[test]
    fn failure_message_names_kind_and_operation() {
        let err = RequestFailed {
            kind: ResourceKind::Users,
            operation: Operation::Update,
            cause: FailureCause::Status(409),
        };
        assert_eq!(
            err.to_string(),
            "update users failed: server responded with status 409"
        );
    }
}
