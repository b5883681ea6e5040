//! 消息序列化（Messaging）
//!
//! 将任意消息对象（事件、命令、DTO）与文本线格式互转。消息类型通过静态声明的
//! `MessageShape` 描述自身的属性与重建策略，不做任何运行期类型探测：
//! - 构造器策略（`Creator`）：不可变消息，经指定构造函数一次性重建；
//! - setter 策略（`Mutable`）：可变消息，零参构造后逐属性写入。
//!
//! 两种形状可以互相嵌套，复杂属性递归走各自类型的形状。

mod message;
mod property;
mod serializer;

pub use message::{Creator, Field, Message, MessageShape, Mutable, Setter, ShapeError};
pub use property::{PropertyValue, required};
pub use serializer::{JsonMessageSerializer, MessageSerializer, decode_message, encode_message};
