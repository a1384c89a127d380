use serde_derive::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Discriminating tag carried by every [`Message`].
///
/// Serialized lowercase, matching the ingestion endpoint's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Identify,
    Track,
    Screen,
    Group,
    Alias,
}

/// One analytics event to be uploaded.
///
/// Immutable once built: accessors only, no setters. Interceptors that need
/// to transform a message go through [`Message::into_builder`] and build a
/// new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    kind: MessageKind,
    message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anonymous_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    properties: Map<String, Value>,
}

impl Message {
    pub fn identify() -> MessageBuilder {
        MessageBuilder::new(MessageKind::Identify)
    }

    pub fn track(event: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(MessageKind::Track).event(event)
    }

    pub fn screen(name: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(MessageKind::Screen).event(name)
    }

    pub fn group() -> MessageBuilder {
        MessageBuilder::new(MessageKind::Group)
    }

    pub fn alias() -> MessageBuilder {
        MessageBuilder::new(MessageKind::Alias)
    }

    #[inline]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    #[inline]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    #[inline]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    #[inline]
    pub fn anonymous_id(&self) -> Option<&str> {
        self.anonymous_id.as_deref()
    }

    #[inline]
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    #[inline]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Turn the message back into a builder, keeping its `message_id`.
    pub fn into_builder(self) -> MessageBuilder {
        MessageBuilder {
            kind: self.kind,
            message_id: Some(self.message_id),
            user_id: self.user_id,
            anonymous_id: self.anonymous_id,
            event: self.event,
            properties: self.properties,
        }
    }
}

/// Fluent constructor for [`Message`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    kind: MessageKind,
    message_id: Option<String>,
    user_id: Option<String>,
    anonymous_id: Option<String>,
    event: Option<String>,
    properties: Map<String, Value>,
}

impl MessageBuilder {
    fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            message_id: None,
            user_id: None,
            anonymous_id: None,
            event: None,
            properties: Map::new(),
        }
    }

    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn anonymous_id(mut self, id: impl Into<String>) -> Self {
        self.anonymous_id = Some(id.into());
        self
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// A missing `message_id` gets a fresh UUID v4.
    pub fn build(self) -> Message {
        Message {
            kind: self.kind,
            message_id: self
                .message_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            anonymous_id: self.anonymous_id,
            event: self.event,
            properties: self.properties,
        }
    }
}
