//! Event stream message frames and signing

use crate::property_bag::SharedPropertyBag;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    String(String),
    ByteArray(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: HeaderValue,
}

impl Header {
    pub fn new(name: impl Into<String>, value: HeaderValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

/// One message on an event stream: headers plus an opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    headers: Vec<Header>,
    payload: Vec<u8>,
}

impl Message {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: Vec::new(),
            payload: payload.into(),
        }
    }

    pub fn add_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| &h.value)
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[derive(Error, Debug)]
pub enum SignMessageError {
    #[error("Missing signing property: {0}")]
    MissingProperty(&'static str),

    #[error("Signing failed: {0}")]
    Failed(String),
}

/// Signs event stream messages before they are written to the wire.
pub trait SignMessage: fmt::Debug {
    fn sign(
        &mut self,
        message: Message,
        properties: &SharedPropertyBag,
    ) -> Result<Message, SignMessageError>;

    /// Sign the empty end-of-stream message, if the protocol has one.
    fn sign_empty(&mut self, _properties: &SharedPropertyBag) -> Option<Result<Message, SignMessageError>> {
        None
    }
}

/// A signer that returns every message unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpSigner;

impl SignMessage for NoOpSigner {
    fn sign(
        &mut self,
        message: Message,
        _properties: &SharedPropertyBag,
    ) -> Result<Message, SignMessageError> {
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_op_signer_returns_input() {
        let message = Message::new(b"hello".to_vec())
            .add_header(Header::new(":event-type", HeaderValue::String("text".into())))
            .add_header(Header::new(":sequence", HeaderValue::Int64(7)));
        let properties = SharedPropertyBag::new();

        let mut signer = NoOpSigner;
        let signed = signer.sign(message.clone(), &properties).unwrap();
        assert_eq!(signed, message);
        assert_eq!(signed.header(":sequence"), Some(&HeaderValue::Int64(7)));
        assert!(signer.sign_empty(&properties).is_none());
    }

    #[test]
    fn test_signer_usable_as_trait_object() {
        fn new_event_stream_signer(_properties: SharedPropertyBag) -> impl SignMessage {
            NoOpSigner
        }

        let properties = SharedPropertyBag::new();
        let mut signer: Box<dyn SignMessage> = Box::new(new_event_stream_signer(properties.clone()));
        let signed = signer.sign(Message::new("payload"), &properties).unwrap();
        assert_eq!(signed.payload(), b"payload");
        assert!(signed.headers().is_empty());
    }
}
