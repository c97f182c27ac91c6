use reqwest::{
    Body,
    header::{CONTENT_TYPE, HeaderMap as Headers, HeaderValue},
};
use serde::Serialize;
use tracing::debug;

use crate::http::types::Method;
use crate::validation::TestFailure;

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: url::Url,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Result<Self, TestFailure> {
        let url = url::Url::parse(url).map_err(|e| {
            debug!("Cannot parse request URL '{}': {}", url, e);
            TestFailure::MalformedTest(format!("Invalid request URL '{}'", url))
        })?;

        Ok(Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
        })
    }

    /// 以 JSON 编码设置请求体，并设置 Content-Type
    pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self, TestFailure> {
        let json = serde_json::to_string(data).map_err(|e| {
            TestFailure::MalformedTest(format!("Payload is not serializable: {}", e))
        })?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(Body::from(json));
        Ok(self)
    }
}
