//! Typed client for the task API.
//!
//! One request per call: no retries, no caching. Every call, `list_tasks`
//! included, reports failures through `ClientError`; deciding to show an
//! empty list instead is up to the caller.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{Task, TaskRequest};
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Request, RequestInit, Response};

pub const API_BASE: &str = "/api/tasks";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message suitable for the UI. Prefers the server's own `error` text.
    pub fn user_message(&self) -> String {
        if let ClientError::Status { status, body } = self {
            let server_message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));
            if let Some(message) = server_message {
                return message;
            }
            if !body.trim().is_empty() {
                return format!("HTTP error! status: {}: {}", status, body.trim());
            }
        }
        self.to_string()
    }
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ClientError> {
    serde_json::from_str(text).map_err(|e| ClientError::Decode(e.to_string()))
}

fn encode(request: &TaskRequest) -> Result<String, ClientError> {
    serde_json::to_string(request).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Sends one request and returns the response text of a 2xx response.
async fn send(method: &str, path: &str, body: Option<String>) -> Result<String, ClientError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let url = format!("{}{}", API_BASE, path);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .into();

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        console::log_1(&format!("{} {} failed with {}", method, url, response.status()).into());
        return Err(ClientError::Status {
            status: response.status(),
            body: text,
        });
    }

    Ok(text)
}

pub async fn list_tasks() -> Result<Vec<Task>, ClientError> {
    let text = send("GET", "/getall", None).await?;
    decode(&text)
}

pub async fn get_task(id: i64) -> Result<Task, ClientError> {
    let text = send("GET", &format!("/getbyid/{}", id), None).await?;
    decode(&text)
}

pub async fn create_task(request: &TaskRequest) -> Result<Task, ClientError> {
    let text = send("POST", "/create", Some(encode(request)?)).await?;
    decode(&text)
}

pub async fn update_task(request: &TaskRequest) -> Result<Task, ClientError> {
    let text = send("PUT", "/update", Some(encode(request)?)).await?;
    decode(&text)
}

pub async fn delete_task(id: i64) -> Result<(), ClientError> {
    send("DELETE", &format!("/delete/{}", id), None).await?;
    Ok(())
}
