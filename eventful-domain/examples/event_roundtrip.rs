//! 事件从产生到跨越序列化边界的完整闭环：
//! 聚合执行业务操作 -> 事件盖上事件头 -> 序列化为文本 -> 在接收侧重建。

use serde_json::Value;
use uuid::Uuid;

use eventful_domain::domain_event::{DomainEvent, EventHeader};
use eventful_domain::entity::Entity;
use eventful_domain::messaging::{
    Field, JsonMessageSerializer, Message, MessageSerializer, MessageShape, Mutable,
    PropertyValue, Setter, decode_message, encode_message,
};
use eventful_domain::value_object::Version;

#[derive(Debug)]
struct Meter {
    id: Uuid,
    version: Version,
    reading: i64,
}

impl Entity for Meter {
    type Id = Uuid;

    fn new(aggregate_id: Uuid) -> Self {
        Self {
            id: aggregate_id,
            version: Version::new(),
            reading: 0,
        }
    }

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

impl Meter {
    fn record(&mut self, delta: i64) -> anyhow::Result<ReadingRecorded> {
        self.reading += delta;
        self.version = self.version.next();

        let mut event = ReadingRecorded {
            header: None,
            delta,
        };
        event.raise(self)?;
        Ok(event)
    }
}

#[derive(Debug, Default)]
struct ReadingRecorded {
    header: Option<EventHeader>,
    delta: i64,
}

impl DomainEvent for ReadingRecorded {
    fn header(&self) -> Option<&EventHeader> {
        self.header.as_ref()
    }

    fn set_header(&mut self, header: EventHeader) {
        self.header = Some(header);
    }
}

impl Message for ReadingRecorded {
    fn shape() -> &'static MessageShape<Self> {
        static SHAPE: MessageShape<ReadingRecorded> = MessageShape {
            type_name: "ReadingRecorded",
            fields: &[
                Field {
                    name: "header",
                    encode: |m: &ReadingRecorded| match &m.header {
                        Some(header) => encode_message(header),
                        None => Ok(Value::Null),
                    },
                },
                Field {
                    name: "delta",
                    encode: |m: &ReadingRecorded| m.delta.encode(),
                },
            ],
            creator: None,
            mutable: Some(Mutable {
                init: ReadingRecorded::default,
                setters: &[
                    Setter {
                        name: "header",
                        apply: |m: &mut ReadingRecorded, v: &Value| {
                            if !v.is_null() {
                                m.header = Some(decode_message(v)?);
                            }
                            Ok(())
                        },
                    },
                    Setter {
                        name: "delta",
                        apply: |m: &mut ReadingRecorded, v: &Value| {
                            m.delta = i64::decode(v)?;
                            Ok(())
                        },
                    },
                ],
            }),
        };
        &SHAPE
    }
}

fn main() -> anyhow::Result<()> {
    let serializer = JsonMessageSerializer;
    let mut meter = Meter::new(Uuid::new_v4());

    let event = meter.record(42)?;
    println!(
        "raised: aggregate={} version={} at={}",
        event.aggregate_id().unwrap(),
        event.version().unwrap(),
        event.occurred_at().unwrap()
    );

    let text = serializer.serialize(&event)?;
    println!("wire text: {text}");

    let rebuilt: ReadingRecorded = serializer.deserialize(&text)?;
    println!(
        "rebuilt: delta={} version={}",
        rebuilt.delta,
        rebuilt.version().unwrap()
    );

    Ok(())
}
