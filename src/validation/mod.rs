//! 校验模块 - 比较 JSON 响应与用例期望
mod types;
mod validator;

pub use types::{TestFailure, ValidationOptions, display_value, json_type_name};
pub use validator::{validate, values_equal};
