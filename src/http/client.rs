use std::error::Error as StdError;
use std::time::Duration;

use tracing::debug;

use crate::Result;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::validation::TestFailure;

/// reqwest 的薄封装，整个运行期间复用同一个连接池
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// 使用传输层默认超时
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// 发送请求并读取完整 body
    ///
    /// 连接、超时、DNS 等传输错误统一归为 `NetworkError`。
    pub async fn execute(&self, request: Request) -> std::result::Result<Response, TestFailure> {
        debug!("{} {}", request.method, request.url);

        let mut req = self
            .inner
            .request(request.method.into(), request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        debug!("<- {} ({} bytes)", status, body.len());
        Ok(Response::new(status, body))
    }
}

/// 拼接错误链，reqwest 顶层消息通常不包含具体原因
fn network_error(err: reqwest::Error) -> TestFailure {
    let mut message = if err.is_timeout() {
        format!("request timed out ({})", err)
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    TestFailure::NetworkError(message)
}
