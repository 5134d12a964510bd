//! `reqwest` client for a JSON task collection resource.
//!
//! The resource follows the usual collection conventions:
//!
//! | operation | request |
//! |---|---|
//! | fetch all | `GET {base}/{collection}` |
//! | create | `POST {base}/{collection}` |
//! | delete | `DELETE {base}/{collection}/{id}` |
//! | patch | `PATCH {base}/{collection}/{id}` |

use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{TaskRemote, TaskRemoteError, TaskRemoteResult},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

/// Remote task store backed by HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskRemote {
    client: Client,
    collection_url: Url,
}

impl HttpTaskRemote {
    /// Creates a client for `collection` under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::InvalidEndpoint`] when `base_url` cannot
    /// carry path segments, or a transport error when the HTTP client cannot
    /// be built.
    pub fn new(base_url: &Url, collection: &str) -> TaskRemoteResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(TaskRemoteError::transport)?;
        Self::with_client(client, base_url, collection)
    }

    /// Creates a remote store reusing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::InvalidEndpoint`] when `base_url` cannot
    /// carry path segments.
    pub fn with_client(client: Client, base_url: &Url, collection: &str) -> TaskRemoteResult<Self> {
        let mut collection_url = base_url.clone();
        collection_url
            .path_segments_mut()
            .map_err(|()| TaskRemoteError::InvalidEndpoint(base_url.to_string()))?
            .pop_if_empty()
            .extend(collection.split('/').filter(|segment| !segment.is_empty()));

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// Returns the collection endpoint.
    #[must_use]
    pub const fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &TaskId) -> TaskRemoteResult<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| TaskRemoteError::InvalidEndpoint(self.collection_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

/// Passes successful responses through and turns any other status into
/// [`TaskRemoteError::Status`].
async fn ensure_success(response: Response) -> TaskRemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TaskRemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TaskRemote for HttpTaskRemote {
    #[instrument(skip(self), fields(url = %self.collection_url))]
    async fn fetch_all(&self) -> TaskRemoteResult<Vec<Task>> {
        let response = self
            .client
            .get(self.collection_url.clone())
            .send()
            .await
            .map_err(TaskRemoteError::transport)?;
        let tasks: Vec<Task> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(TaskRemoteError::decode)?;
        debug!(count = tasks.len(), "fetched task collection");
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(url = %self.collection_url))]
    async fn create(&self, task: &NewTask) -> TaskRemoteResult<Task> {
        let response = self
            .client
            .post(self.collection_url.clone())
            .json(task)
            .send()
            .await
            .map_err(TaskRemoteError::transport)?;
        let created: Task = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(TaskRemoteError::decode)?;
        debug!(task_id = %created.id(), "created task");
        Ok(created)
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: &TaskId) -> TaskRemoteResult<()> {
        let response = self
            .client
            .delete(self.item_url(id)?)
            .send()
            .await
            .map_err(TaskRemoteError::transport)?;
        ensure_success(response).await?;
        debug!("deleted task");
        Ok(())
    }

    #[instrument(skip(self, patch), fields(task_id = %id))]
    async fn patch(&self, id: &TaskId, patch: &TaskPatch) -> TaskRemoteResult<()> {
        let response = self
            .client
            .patch(self.item_url(id)?)
            .json(patch)
            .send()
            .await
            .map_err(TaskRemoteError::transport)?;
        ensure_success(response).await?;
        debug!("patched task");
        Ok(())
    }
}
