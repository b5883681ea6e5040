//! 事件驱动基础库（eventful-domain）
//!
//! 提供事件溯源/消息驱动应用所需的两类核心构件：
//! - 领域事件（`domain_event`）：事件在被聚合产生时一次性盖上的事件头
//!   （聚合标识、版本与发生时间），以及事件载荷的最小接口
//! - 消息序列化（`messaging`）：在文本线格式与任意消息对象（事件、命令、DTO）
//!   之间进行双向转换，消息类型通过显式声明的形状描述自身的属性与重建策略
//!
//! 本 crate 不涉及消息的传输、投递与持久化，仅定义领域层接口与最小必要的错误类型，
//! 以便在不同基础设施（例如消息中间件、事件存储等）上进行适配实现。
//!
//! 典型用法：
//! 1. 定义实体（聚合）并实现 `entity::Entity`；
//! 2. 事件产生时调用 `DomainEvent::raise`，从聚合读取标识与版本并盖上事件头；
//! 3. 为需要跨越传输边界的消息类型声明 `messaging::Message` 形状；
//! 4. 在边界处使用 `messaging::JsonMessageSerializer` 完成文本与对象的互转。
//!
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod messaging;
pub mod value_object;
