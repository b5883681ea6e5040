use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::message::ShapeError;
use crate::value_object::Version;

/// 可作为消息属性取值的类型
///
/// 基元类型、时间与集合在此给出实现；嵌套的复杂属性不走本 trait，
/// 而是经 `encode_message`/`decode_message` 递归使用嵌套类型自身的形状。
pub trait PropertyValue: Sized {
    fn encode(&self) -> Result<Value, ShapeError>;
    fn decode(value: &Value) -> Result<Self, ShapeError>;
}

/// 文档取值的 JSON 种类名，用于诊断信息
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 从文档中取出必填属性并解码；键缺失即失败
pub fn required<T: PropertyValue>(
    document: &Map<String, Value>,
    name: &'static str,
) -> Result<T, ShapeError> {
    let value = document
        .get(name)
        .ok_or(ShapeError::MissingProperty { name })?;
    T::decode(value)
}

impl PropertyValue for bool {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::Bool(*self))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        value.as_bool().ok_or(ShapeError::TypeMismatch {
            expected: "a boolean",
            found: json_kind(value),
        })
    }
}

impl PropertyValue for i32 {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::from(*self))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let number = value.as_i64().ok_or(ShapeError::TypeMismatch {
            expected: "a number",
            found: json_kind(value),
        })?;
        i32::try_from(number).map_err(|_| ShapeError::TypeMismatch {
            expected: "a 32-bit integer",
            found: "an out-of-range number",
        })
    }
}

impl PropertyValue for i64 {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::from(*self))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        value.as_i64().ok_or(ShapeError::TypeMismatch {
            expected: "a number",
            found: json_kind(value),
        })
    }
}

impl PropertyValue for usize {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::from(*self))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let number = value.as_u64().ok_or(ShapeError::TypeMismatch {
            expected: "a non-negative number",
            found: json_kind(value),
        })?;
        usize::try_from(number).map_err(|_| ShapeError::TypeMismatch {
            expected: "a pointer-sized integer",
            found: "an out-of-range number",
        })
    }
}

impl PropertyValue for f64 {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::from(*self))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        value.as_f64().ok_or(ShapeError::TypeMismatch {
            expected: "a number",
            found: json_kind(value),
        })
    }
}

impl PropertyValue for String {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::String(self.clone()))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or(ShapeError::TypeMismatch {
                expected: "a string",
                found: json_kind(value),
            })
    }
}

impl PropertyValue for Uuid {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::String(self.to_string()))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let text = value.as_str().ok_or(ShapeError::TypeMismatch {
            expected: "a string",
            found: json_kind(value),
        })?;
        Ok(Uuid::parse_str(text)?)
    }
}

impl PropertyValue for Version {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::from(self.value()))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        Ok(Version::from_value(usize::decode(value)?))
    }
}

// 时间取值以 ISO-8601 扩展偏移格式的文本上线，绝不使用数值时间戳；
// AutoSi 保留来源时钟的亚秒精度，UTC 以 Z 结尾，其余偏移原样保留。
impl PropertyValue for DateTime<Utc> {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::String(
            self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let text = value.as_str().ok_or(ShapeError::TypeMismatch {
            expected: "an ISO-8601 date-time string",
            found: json_kind(value),
        })?;
        Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
    }
}

impl PropertyValue for DateTime<FixedOffset> {
    fn encode(&self) -> Result<Value, ShapeError> {
        Ok(Value::String(
            self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ))
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let text = value.as_str().ok_or(ShapeError::TypeMismatch {
            expected: "an ISO-8601 date-time string",
            found: json_kind(value),
        })?;
        Ok(DateTime::parse_from_rfc3339(text)?)
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    fn encode(&self) -> Result<Value, ShapeError> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Value::Null),
        }
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::Null => Ok(None),
            present => Ok(Some(T::decode(present)?)),
        }
    }
}

impl<T: PropertyValue> PropertyValue for Vec<T> {
    fn encode(&self) -> Result<Value, ShapeError> {
        self.iter()
            .map(T::encode)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode(value: &Value) -> Result<Self, ShapeError> {
        let items = value.as_array().ok_or(ShapeError::TypeMismatch {
            expected: "an array",
            found: json_kind(value),
        })?;
        items.iter().map(T::decode).collect()
    }
}
