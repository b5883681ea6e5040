use serde_json::{Map, Value};
use std::error::Error as StdError;
use thiserror::Error;

/// 可序列化消息：通过静态形状声明自身的属性与重建策略
///
/// 形状随类型声明一次确定，序列化器据此选择重建策略。
pub trait Message: Sized + Send + Sync {
    /// 该类型的静态形状描述
    fn shape() -> &'static MessageShape<Self>;
}

/// 消息类型的形状描述：属性列表与可用的重建策略
///
/// `creator` 与 `mutable` 二选一声明（同时声明时构造器优先），
/// 两者皆缺省的类型无法重建。
pub struct MessageShape<M: 'static> {
    /// 类型名，用于诊断信息
    pub type_name: &'static str,
    /// 声明的属性，序列化时逐一编码
    pub fields: &'static [Field<M>],
    /// 指定构造器（参数名与属性名一致），不可变消息使用
    pub creator: Option<Creator<M>>,
    /// 零参构造加属性 setter，可变消息使用
    pub mutable: Option<Mutable<M>>,
}

/// 单个属性：名称与取值编码函数
pub struct Field<M> {
    pub name: &'static str,
    pub encode: fn(&M) -> Result<Value, ShapeError>,
}

/// 构造器重建策略
pub struct Creator<M> {
    /// 构造参数名，必须全部出现在文档键中（大小写敏感）
    pub params: &'static [&'static str],
    /// 以文档中的取值调用构造函数
    pub invoke: fn(&Map<String, Value>) -> Result<M, ShapeError>,
}

/// setter 重建策略
pub struct Mutable<M: 'static> {
    /// 零参构造
    pub init: fn() -> M,
    /// 属性 setter；文档中无对应键的属性保持初始值
    pub setters: &'static [Setter<M>],
}

/// 单个属性的写入器
pub struct Setter<M> {
    pub name: &'static str,
    pub apply: fn(&mut M, &Value) -> Result<(), ShapeError>,
}

/// 形状层面的结构性错误
///
/// 序列化器在边界处将其包装为 `DomainError` 并保留为错误原因。
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("type '{type_name}' declares no serializable properties")]
    NoProperties { type_name: &'static str },
    #[error("type '{type_name}' declares no reconstruction strategy")]
    NoConstruction { type_name: &'static str },
    #[error("the document root must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("the required property '{name}' is missing from the document")]
    MissingProperty { name: &'static str },
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid timestamp: {source}")]
    InvalidTimestamp {
        #[from]
        source: chrono::ParseError,
    },
    #[error("invalid identifier: {source}")]
    InvalidIdentifier {
        #[from]
        source: uuid::Error,
    },
    #[error("constructor rejected the supplied properties: {source}")]
    Rejected {
        source: Box<dyn StdError + Send + Sync>,
    },
}
