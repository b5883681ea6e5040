use bon::bon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::messaging::{
    Creator, Field, Message, MessageShape, PropertyValue, ShapeError, required,
};
use crate::value_object::Version;

/// 事件头，事件被聚合产生时一次性盖上的标识信息
///
/// 三个字段在校验通过后一并写入，此后对事件的剩余生命周期只读；
/// 任一字段非法时整体失败，不写入任何字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventHeaderParts")]
pub struct EventHeader {
    aggregate_id: String,
    version: Version,
    occurred_at: DateTime<Utc>,
}

/// 反序列化中间形态，经 `TryFrom` 重新校验后才得到 `EventHeader`
#[derive(Deserialize)]
struct EventHeaderParts {
    aggregate_id: String,
    version: Version,
    occurred_at: DateTime<Utc>,
}

#[bon]
impl EventHeader {
    /// 重建路径：以存储中的三元组构造事件头，校验规则与产生路径一致
    #[builder]
    pub fn new(
        aggregate_id: String,
        version: Version,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if aggregate_id.is_empty() {
            return Err(DomainError::InvalidArgument {
                parameter: "aggregate_id",
                reason: "cannot be empty",
            });
        }
        if !version.is_created() {
            return Err(DomainError::InvalidArgument {
                parameter: "version",
                reason: "must be greater than 0",
            });
        }
        Ok(Self {
            aggregate_id,
            version,
            occurred_at,
        })
    }
}

impl EventHeader {
    /// 产生路径：读取实体当前标识与版本，盖上当前时间
    pub fn for_entity<E: Entity>(entity: &E) -> DomainResult<Self> {
        Self::builder()
            .aggregate_id(entity.id().to_string())
            .version(entity.version())
            .occurred_at(Utc::now())
            .build()
    }

    /// 产生该事件的聚合标识
    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    /// 事件对应的聚合版本
    pub fn version(&self) -> Version {
        self.version
    }

    /// 事件发生时间
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl TryFrom<EventHeaderParts> for EventHeader {
    type Error = DomainError;

    fn try_from(parts: EventHeaderParts) -> Result<Self, Self::Error> {
        Self::builder()
            .aggregate_id(parts.aggregate_id)
            .version(parts.version)
            .occurred_at(parts.occurred_at)
            .build()
    }
}

// 事件头本身是构造器形状的消息，事件可以将其作为复杂属性嵌套
impl Message for EventHeader {
    fn shape() -> &'static MessageShape<Self> {
        static SHAPE: MessageShape<EventHeader> = MessageShape {
            type_name: "EventHeader",
            fields: &[
                Field {
                    name: "aggregate_id",
                    encode: |h: &EventHeader| h.aggregate_id.encode(),
                },
                Field {
                    name: "version",
                    encode: |h: &EventHeader| h.version.encode(),
                },
                Field {
                    name: "occurred_at",
                    encode: |h: &EventHeader| h.occurred_at.encode(),
                },
            ],
            creator: Some(Creator {
                params: &["aggregate_id", "version", "occurred_at"],
                invoke: |document| {
                    let aggregate_id: String = required(document, "aggregate_id")?;
                    let version: Version = required(document, "version")?;
                    let occurred_at: DateTime<Utc> = required(document, "occurred_at")?;
                    EventHeader::builder()
                        .aggregate_id(aggregate_id)
                        .version(version)
                        .occurred_at(occurred_at)
                        .build()
                        .map_err(|source| ShapeError::Rejected {
                            source: Box::new(source),
                        })
                },
            }),
            mutable: None,
        };
        &SHAPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{decode_message, encode_message};
    use uuid::Uuid;

    struct Turnstile {
        id: Uuid,
        version: Version,
    }

    impl Entity for Turnstile {
        type Id = Uuid;

        fn new(aggregate_id: Uuid) -> Self {
            Self {
                id: aggregate_id,
                version: Version::new(),
            }
        }

        fn id(&self) -> &Uuid {
            &self.id
        }

        fn version(&self) -> Version {
            self.version
        }
    }

    fn header(aggregate_id: &str, version: usize) -> DomainResult<EventHeader> {
        EventHeader::builder()
            .aggregate_id(aggregate_id.to_string())
            .version(Version::from_value(version))
            .occurred_at(Utc::now())
            .build()
    }

    // 合法三元组：构造后访问器原样返回
    #[test]
    fn builder_keeps_the_validated_triple() {
        let occurred_at = Utc::now();
        let header = EventHeader::builder()
            .aggregate_id("turnstile-7".to_string())
            .version(Version::from_value(3))
            .occurred_at(occurred_at)
            .build()
            .unwrap();

        assert_eq!(header.aggregate_id(), "turnstile-7");
        assert_eq!(header.version(), Version::from_value(3));
        assert_eq!(header.occurred_at(), occurred_at);
    }

    // 空标识：报参数错误并指出字段名
    #[test]
    fn builder_rejects_an_empty_aggregate_id() {
        let err = header("", 1).unwrap_err();

        match &err {
            DomainError::InvalidArgument { parameter, .. } => {
                assert_eq!(*parameter, "aggregate_id")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("'aggregate_id'"));
    }

    // 零版本：报参数错误并指出字段名
    #[test]
    fn builder_rejects_version_zero() {
        let err = header("turnstile-7", 0).unwrap_err();

        assert!(err.to_string().contains("'version'"));
    }

    // 从实体盖戳：读取实体当前标识与版本
    #[test]
    fn for_entity_stamps_identity_and_version() {
        let mut turnstile = Turnstile::new(Uuid::new_v4());
        turnstile.version = turnstile.version.next();

        let header = EventHeader::for_entity(&turnstile).unwrap();

        assert_eq!(header.aggregate_id(), turnstile.id.to_string());
        assert_eq!(header.version(), Version::from_value(1));
    }

    // 实体尚未产生任何版本时不可盖戳
    #[test]
    fn for_entity_rejects_uncreated_entities() {
        let turnstile = Turnstile::new(Uuid::new_v4());

        let err = EventHeader::for_entity(&turnstile).unwrap_err();
        assert!(err.to_string().contains("'version'"));
    }

    // 存储重建：serde 路径同样经过校验
    #[test]
    fn deserialization_revalidates_the_header() {
        let original = header("turnstile-7", 4).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let rebuilt: EventHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(rebuilt, original);

        let tampered =
            r#"{"aggregate_id":"turnstile-7","version":0,"occurred_at":"2024-01-01T00:00:00Z"}"#;
        let err = serde_json::from_str::<EventHeader>(tampered).unwrap_err();
        assert!(err.to_string().contains("'version'"));
    }

    // 事件头作为消息：构造器形状往返
    #[test]
    fn header_round_trips_as_a_message() {
        let original = header("turnstile-7", 5).unwrap();

        let document = encode_message(&original).unwrap();
        let rebuilt: EventHeader = decode_message(&document).unwrap();

        assert_eq!(rebuilt.aggregate_id(), original.aggregate_id());
        assert_eq!(rebuilt.version(), original.version());
        assert_eq!(
            rebuilt.occurred_at().timestamp(),
            original.occurred_at().timestamp()
        );
    }

    // 文档中的非法取值被构造器拒绝
    #[test]
    fn decoding_an_invalid_header_document_fails() {
        let document = serde_json::json!({
            "aggregate_id": "",
            "version": 1,
            "occurred_at": "2024-01-01T00:00:00Z",
        });

        let err = decode_message::<EventHeader>(&document).unwrap_err();
        match err {
            ShapeError::Rejected { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
