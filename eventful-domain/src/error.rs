//! 领域层统一错误定义
//!
//! 聚焦参数校验与消息序列化的最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use std::error::Error as StdError;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 参数/状态校验 ---
    #[error("the parameter '{parameter}' {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: &'static str,
    },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 消息序列化 ---
    #[error("serialization failed: {source}")]
    Serialization {
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("deserialization failed: {source}")]
    Deserialization {
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
