//! Blocking HTTP client for the employee REST API.

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use staffdesk_core::constants::{EMPLOYEES_PATH, GENERIC_ERROR_MESSAGE};
use staffdesk_core::{Config, Employee, EmployeeDraft};
use std::time::Duration;
use thiserror::Error;

/// Failure of one API call, normalized for display.
///
/// `status` is `None` when the request never produced a response (connect
/// failure, timeout).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl ApiError {
    fn transport(err: &reqwest::Error, timeout: Duration) -> Self {
        let message = if err.is_timeout() {
            format!("timeout of {}ms exceeded", timeout.as_millis())
        } else {
            let text = err.to_string();
            if text.trim().is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                text
            }
        };
        Self {
            message,
            status: None,
            details: None,
        }
    }

    fn from_response(status: StatusCode, body: &str) -> Self {
        let details = if body.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.to_string())))
        };
        Self {
            message: error_message_for_response(status, details.as_ref()),
            status: Some(status.as_u16()),
            details,
        }
    }

    /// Whether the request failed before any response arrived.
    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

/// Message for a non-2xx response: body `message`, then body `error`, then
/// the generic status text.
pub fn error_message_for_response(status: StatusCode, body: Option<&Value>) -> String {
    let from_body = |key: &str| {
        body.and_then(|value| value.get(key))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    from_body("message")
        .or_else(|| from_body("error"))
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

/// Build `<base>/<segments...>`, percent-encoding each segment.
///
/// # Errors
/// Returns an error if `base` is not a URL that can carry a path.
pub fn api_url(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url =
        Url::parse(base).map_err(|err| format!("Invalid server URL '{}': {}", base, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

/// Employee API client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if `base_url` is unusable or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        api_url(base_url, &[]).map_err(|message| ApiError {
            message,
            status: None,
            details: None,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::transport(&err, timeout))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Client for `config.api_url` with `config.request_timeout()`.
    ///
    /// # Errors
    /// Same as [`ApiClient::new`].
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, id: Option<&str>) -> Result<Url, ApiError> {
        let segments: Vec<&str> = std::iter::once(EMPLOYEES_PATH).chain(id).collect();
        api_url(&self.base_url, &segments).map_err(|message| ApiError {
            message,
            status: None,
            details: None,
        })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .map_err(|err| ApiError::transport(&err, self.timeout))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .unwrap_or_else(|err| format!("failed to read error response body: {}", err));
        Err(ApiError::from_response(status, &body))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        response.json::<T>().map_err(|err| ApiError {
            message: format!("Invalid response body: {}", err),
            status: Some(status.as_u16()),
            details: None,
        })
    }

    /// `GET /employees`, retried once when no response arrives.
    ///
    /// # Errors
    /// Returns the second failure for transport errors, the first otherwise.
    pub fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let attempt = || -> Result<Vec<Employee>, ApiError> {
            let response = self.send(self.http.get(self.url(None)?))?;
            Self::decode(response)
        };
        match attempt() {
            Err(err) if err.is_transport() => {
                tracing::debug!(error = %err, "list request failed; retrying once");
                attempt()
            }
            result => result,
        }
    }

    /// `POST /employees`.
    ///
    /// # Errors
    /// Returns the API or transport failure; never retried.
    pub fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let response = self.send(self.http.post(self.url(None)?).json(draft))?;
        Self::decode(response)
    }

    /// `PUT /employees/{id}`.
    ///
    /// # Errors
    /// Returns the API or transport failure; never retried.
    pub fn update_employee(&self, id: &str, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let response = self.send(self.http.put(self.url(Some(id))?).json(draft))?;
        Self::decode(response)
    }

    /// `DELETE /employees/{id}`; any success body is ignored.
    ///
    /// # Errors
    /// Returns the API or transport failure; never retried.
    pub fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(Some(id))?))?;
        Ok(())
    }
}
