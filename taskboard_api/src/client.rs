//! HTTP client for the Taskboard REST API.

use reqwest::{Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    errors::ApiError,
    query::{Query, TaskQuery, UserQuery},
    types::{CreateTask, CreateUser, Page, Task, TaskID, User, UserID},
    Error,
};

/// Base URL used by [`Client::new`].
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const USER_AGENT: &str = concat!("taskboard-api/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Taskboard REST API.
///
/// Every call targets `base_url + path` verbatim: no slashes are added or
/// removed. Successful responses come back as JSON, and any non-2xx response
/// is turned into an [`ApiError`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at a local Taskboard backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// The base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let url = format!("{}{}", &self.base_api_url, path);
        Url::parse(&url).map_err(|source| {
            tracing::error!("Invalid URL constructed: {}", source);
            Error::InvalidUrl { url, source }
        })
    }

    /// Sends one request and turns a non-2xx response into an [`ApiError`].
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response, Error> {
        let url = self.get_url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let err = normalize(resp).await;
            tracing::warn!("{} {} failed with status {}: {}", method, path, status, err.message);
            return Err(err.into());
        }
        Ok(resp)
    }

    /// Issues a GET and returns the decoded JSON body.
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        let resp = self.send(Method::GET, path, None).await?;
        decode(resp).await
    }

    /// Issues a POST with `payload` as the JSON body and returns the decoded
    /// JSON response.
    pub async fn post<P>(&self, path: &str, payload: &P) -> Result<Value, Error>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload)?;
        let resp = self.send(Method::POST, path, Some(body)).await?;
        decode(resp).await
    }

    /// Issues a PUT with `payload` as the JSON body and returns the decoded
    /// JSON response.
    pub async fn put<P>(&self, path: &str, payload: &P) -> Result<Value, Error>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload)?;
        let resp = self.send(Method::PUT, path, Some(body)).await?;
        decode(resp).await
    }

    /// Issues a DELETE. A `204 No Content` yields `Value::Null` without
    /// touching the body; any other success is decoded as JSON.
    pub async fn delete(&self, path: &str) -> Result<Value, Error> {
        let resp = self.send(Method::DELETE, path, None).await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        decode(resp).await
    }

    /// Like [`Client::get`], deserializing the body into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        from_value(self.get(path).await?)
    }

    /// Like [`Client::post`], deserializing the body into `T`.
    pub async fn post_as<T, P>(&self, path: &str, payload: &P) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        from_value(self.post(path, payload).await?)
    }

    /// Like [`Client::put`], deserializing the body into `T`.
    pub async fn put_as<T, P>(&self, path: &str, payload: &P) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        from_value(self.put(path, payload).await?)
    }
}

/// Typed helpers for the `/users` and `/tasks` resources.
impl Client {
    /// Fetches a page of users matching the given query.
    pub async fn get_users(&self, query: &UserQuery) -> Result<Page<User>, Error> {
        self.get_as(&query.add_to_path("/users")).await
    }

    /// Fetches a single user by ID.
    pub async fn get_user(&self, user_id: UserID) -> Result<User, Error> {
        self.get_as(&format!("/users/{}", user_id)).await
    }

    /// Creates a user and returns the stored record.
    pub async fn create_user(&self, user: &CreateUser) -> Result<User, Error> {
        self.post_as("/users", user).await
    }

    /// Replaces a user's name and email.
    pub async fn update_user(&self, user_id: UserID, user: &CreateUser) -> Result<User, Error> {
        self.put_as(&format!("/users/{}", user_id), user).await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: UserID) -> Result<(), Error> {
        self.delete(&format!("/users/{}", user_id)).await?;
        Ok(())
    }

    /// Total number of users.
    pub async fn count_users(&self) -> Result<i64, Error> {
        self.get_as("/users/count").await
    }

    /// Fetches a page of tasks matching the given query.
    pub async fn get_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, Error> {
        self.get_as(&query.add_to_path("/tasks")).await
    }

    /// Fetches a single task by ID.
    pub async fn get_task(&self, task_id: TaskID) -> Result<Task, Error> {
        self.get_as(&format!("/tasks/{}", task_id)).await
    }

    /// Creates a task and returns the stored record.
    pub async fn create_task(&self, task: &CreateTask) -> Result<Task, Error> {
        self.post_as("/tasks", task).await
    }

    /// Replaces every field of an existing task.
    pub async fn update_task(&self, task_id: TaskID, task: &CreateTask) -> Result<Task, Error> {
        self.put_as(&format!("/tasks/{}", task_id), task).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, task_id: TaskID) -> Result<(), Error> {
        self.delete(&format!("/tasks/{}", task_id)).await?;
        Ok(())
    }

    /// Total number of tasks.
    pub async fn count_tasks(&self) -> Result<i64, Error> {
        self.get_as("/tasks/count").await
    }
}

fn encode<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(payload).map_err(Error::Encode)
}

async fn decode(resp: Response) -> Result<Value, Error> {
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(&body));
        Error::Decode(e)
    })
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(Error::Decode)
}

/// Reads a failed response's body and builds the normalized error. An
/// unreadable body is treated like an empty one.
async fn normalize(resp: Response) -> ApiError {
    let status = resp.status();
    let status_text = status_text(&resp);
    let body = resp.text().await.unwrap_or_default();
    ApiError::from_parts(status.as_u16(), &status_text, &body)
}

/// The reason phrase the server sent. hyper only keeps it when it differs
/// from the canonical one, so fall back to that.
fn status_text(resp: &Response) -> String {
    match resp.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => resp
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 2000;
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX {
        text.into_owned()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &text[..end])
    }
}
