//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与版本能力；
//! 事件头在 `raise` 时从这里读取聚合的当前标识与版本。
//!
use crate::value_object::Version;
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与版本的实体抽象
///
/// `raise` 在单个逻辑瞬间读取 `id` 与 `version`，实体应由同一事务/处理器独占持有，
/// 本 crate 不提供内部加锁。
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 使用给定标识创建实体（聚合）
    fn new(aggregate_id: Self::Id) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于并发控制与事件头盖戳）
    fn version(&self) -> Version;
}
