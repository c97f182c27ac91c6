use serde_json::Value;

use crate::http::types::Status;
use crate::validation::TestFailure;

pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: String) -> Self {
        Self {
            status: Status::new(status),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 把 body 解码为 JSON，空 body 同样视为解码失败
    pub fn json(&self) -> Result<Value, TestFailure> {
        serde_json::from_str(&self.body).map_err(|_| TestFailure::DecodeError)
    }
}
