use serde_json::{Map, Number, Value};

use crate::suite::ExpectedType;
use crate::validation::types::{TestFailure, ValidationOptions, json_type_name};

/// 校验响应是否满足期望
///
/// 先按声明顺序检查所有期望值，再检查期望类型，遇到第一个违规即返回。
/// 响应不是 JSON 对象时，任何字段都视为不存在。
pub fn validate(
    response: &Value,
    expected_values: &Map<String, Value>,
    expected_types: &Map<String, Value>,
    options: ValidationOptions,
) -> Result<(), TestFailure> {
    for (key, expected) in expected_values {
        let actual = lookup(response, key)?;
        if !values_equal(expected, actual) {
            return Err(TestFailure::ValueMismatch {
                key: key.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }

    for (key, tag) in expected_types {
        let actual = lookup(response, key)?;
        let expected = ExpectedType::parse(tag)?;
        if !matches_type(expected, actual, options) {
            return Err(TestFailure::TypeMismatch {
                key: key.clone(),
                expected: expected.to_string(),
                actual: json_type_name(actual).to_string(),
            });
        }
    }

    Ok(())
}

fn lookup<'a>(response: &'a Value, key: &str) -> Result<&'a Value, TestFailure> {
    response
        .as_object()
        .and_then(|object| object.get(key))
        .ok_or_else(|| TestFailure::MissingKey(key.to_string()))
}

/// 值相等：数字按数值比较（1 == 1.0），不同 JSON 类型之间永不相等
pub fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => expected == actual,
    }
}

/// 整数与浮点数比较时，浮点数必须是整数值且能精确还原为同一个整数
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_value(a), integer_value(b)) {
        (Some(a), Some(b)) => a == b,
        (Some(i), None) => b.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, Some(i)) => a.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float_equals_integer(f: f64, i: i128) -> bool {
    // [-2^63, 2^64) 覆盖 i64 与 u64
    const MIN: f64 = -9_223_372_036_854_775_808.0;
    const MAX: f64 = 18_446_744_073_709_551_616.0;

    f.fract() == 0.0 && (MIN..MAX).contains(&f) && f as i128 == i
}

fn matches_type(expected: ExpectedType, actual: &Value, options: ValidationOptions) -> bool {
    match (expected, actual) {
        (ExpectedType::String, Value::String(_)) => true,
        (ExpectedType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (ExpectedType::Float, Value::Number(n)) => !options.strict_float || n.is_f64(),
        _ => false,
    }
}
