use chrono::{DateTime, Utc};
use std::fmt;

use super::event_header::EventHeader;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::value_object::Version;

/// 领域事件载荷需要满足的通用能力边界
///
/// 事件头只有两个状态：构造后的「未盖戳」与 `raise`（或重建路径）之后的「已盖戳」，
/// 状态转移单向且只发生一次，此后事件头只读。
pub trait DomainEvent: fmt::Debug + Send + Sync {
    /// 事件头；尚未 raise 的事件返回 `None`
    fn header(&self) -> Option<&EventHeader>;

    /// 写入事件头，仅应由 `raise` 或重建路径调用
    fn set_header(&mut self, header: EventHeader);

    /// 读取实体当前标识与版本并盖上当前时间，一次性写入事件头
    ///
    /// 校验先于任何写入，失败时不改变事件；重复 raise 视为非法状态。
    fn raise<E: Entity>(&mut self, entity: &E) -> DomainResult<()>
    where
        Self: Sized,
    {
        if self.header().is_some() {
            return Err(DomainError::InvalidState {
                reason: "the event has already been raised".to_string(),
            });
        }
        let header = EventHeader::for_entity(entity)?;
        self.set_header(header);
        Ok(())
    }

    /// 产生该事件的聚合标识
    fn aggregate_id(&self) -> Option<&str> {
        self.header().map(|h| h.aggregate_id())
    }

    /// 事件对应的聚合版本
    fn version(&self) -> Option<Version> {
        self.header().map(|h| h.version())
    }

    /// 事件发生时间
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.header().map(|h| h.occurred_at())
    }
}
