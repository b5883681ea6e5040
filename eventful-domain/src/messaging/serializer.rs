use serde_json::Value;

use super::message::{Message, ShapeError};
use super::property::json_kind;
use crate::error::{DomainError, DomainResult};

/// 将消息按其声明形状编码为文档值
///
/// 属性按声明顺序逐一编码；未声明任何属性的类型无法编码。
pub fn encode_message<M: Message + 'static>(message: &M) -> Result<Value, ShapeError> {
    let shape = M::shape();
    if shape.fields.is_empty() {
        return Err(ShapeError::NoProperties {
            type_name: shape.type_name,
        });
    }

    let mut document = serde_json::Map::new();
    for field in shape.fields {
        document.insert(field.name.to_string(), (field.encode)(message)?);
    }
    Ok(Value::Object(document))
}

/// 按形状声明的重建策略从文档值重建消息
///
/// 策略选择顺序：
/// 1. 构造器策略：构造参数名必须全部出现在文档键中，缺失即失败；
/// 2. setter 策略：零参构造后写入文档中出现的属性，未知键被忽略；
/// 3. 两者皆未声明时重建失败。
pub fn decode_message<M: Message + 'static>(value: &Value) -> Result<M, ShapeError> {
    let shape = M::shape();
    let document = value.as_object().ok_or(ShapeError::NotAnObject {
        found: json_kind(value),
    })?;

    if let Some(creator) = &shape.creator {
        for name in creator.params {
            if !document.contains_key(*name) {
                return Err(ShapeError::MissingProperty { name: *name });
            }
        }
        return (creator.invoke)(document);
    }

    if let Some(mutable) = &shape.mutable {
        let mut message = (mutable.init)();
        for setter in mutable.setters {
            if let Some(value) = document.get(setter.name) {
                (setter.apply)(&mut message, value)?;
            }
        }
        return Ok(message);
    }

    Err(ShapeError::NoConstruction {
        type_name: shape.type_name,
    })
}

/// 消息序列化器接口：文本与消息对象的双向转换
pub trait MessageSerializer {
    /// 将消息序列化为文本
    fn serialize<M: Message + 'static>(&self, message: &M) -> DomainResult<String>;

    /// 从文本重建目标类型的消息
    fn deserialize<M: Message + 'static>(&self, text: &str) -> DomainResult<M>;
}

/// 基于 JSON 线格式的序列化器
///
/// 无内部状态，调用之间不保留任何消息引用，可跨线程并发复用。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMessageSerializer;

impl MessageSerializer for JsonMessageSerializer {
    fn serialize<M: Message + 'static>(&self, message: &M) -> DomainResult<String> {
        let document = encode_message(message).map_err(|source| DomainError::Serialization {
            source: Box::new(source),
        })?;
        serde_json::to_string(&document).map_err(|source| DomainError::Serialization {
            source: Box::new(source),
        })
    }

    fn deserialize<M: Message + 'static>(&self, text: &str) -> DomainResult<M> {
        if text.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                parameter: "text",
                reason: "cannot be empty",
            });
        }
        let document: Value =
            serde_json::from_str(text).map_err(|source| DomainError::Deserialization {
                source: Box::new(source),
            })?;
        decode_message(&document).map_err(|source| DomainError::Deserialization {
            source: Box::new(source),
        })
    }
}
