//! Typed event stream channels
//!
//! Generated operations expose the stream they produce as a [`Sender`] and
//! the stream they consume as a [`Receiver`]. The transport holds the other
//! end of each channel: it drains an [`Outgoing`] and feeds an [`Incoming`].

use crate::frame::SignMessageError;
use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum MessageStreamError {
    #[error("Event stream closed")]
    Closed,

    #[error("Failed to unmarshall event: {0}")]
    Unmarshalling(String),

    #[error("Failed to sign event: {0}")]
    Signing(#[from] SignMessageError),
}

/// The producing half of an event stream owned by user code.
#[derive(Debug)]
pub struct Sender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Sender<T> {
    /// A sender with room for `buffer` unsent events, and the stream the
    /// transport reads them from.
    pub fn channel(buffer: usize) -> (Self, Outgoing<T>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, Outgoing { rx })
    }

    /// Push one event, waiting for buffer space.
    pub async fn send(&self, event: T) -> Result<(), MessageStreamError> {
        self.tx.send(event).await.map_err(|_| {
            tracing::debug!("event stream sender used after the transport hung up");
            MessageStreamError::Closed
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Events pushed into a [`Sender`], in order. Ends once every sender is dropped.
#[derive(Debug)]
pub struct Outgoing<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> Outgoing<T> {
    pub async fn next_event(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> Stream for Outgoing<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// The consuming half of an event stream owned by user code.
///
/// Each item is either an event or the error that ended the stream.
#[derive(Debug)]
pub struct Receiver<T, E> {
    rx: mpsc::Receiver<Result<T, E>>,
}

impl<T, E> Receiver<T, E> {
    /// A receiver with room for `buffer` undelivered events, and the handle
    /// the transport feeds it through.
    pub fn channel(buffer: usize) -> (Incoming<T, E>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (Incoming { tx }, Self { rx })
    }

    /// The next event, `Ok(None)` once the stream has ended.
    pub async fn recv(&mut self) -> Result<Option<T>, E> {
        match self.rx.recv().await {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

impl<T, E> Stream for Receiver<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// The transport's handle for feeding a [`Receiver`].
#[derive(Debug)]
pub struct Incoming<T, E> {
    tx: mpsc::Sender<Result<T, E>>,
}

impl<T, E> Clone for Incoming<T, E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T, E> Incoming<T, E> {
    pub async fn deliver(&self, event: T) -> Result<(), MessageStreamError> {
        self.push(Ok(event)).await
    }

    pub async fn fail(&self, err: E) -> Result<(), MessageStreamError> {
        self.push(Err(err)).await
    }

    async fn push(&self, item: Result<T, E>) -> Result<(), MessageStreamError> {
        self.tx.send(item).await.map_err(|_| {
            tracing::debug!("event stream receiver dropped before delivery");
            MessageStreamError::Closed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_sender_events_reach_transport_in_order() {
        let (sender, mut outgoing) = Sender::channel(4);
        let second = sender.clone();

        sender.send("hello").await.unwrap();
        second.send("world").await.unwrap();
        drop(sender);
        drop(second);

        let events: Vec<&str> = outgoing.by_ref().collect().await;
        assert_eq!(events, vec!["hello", "world"]);
        assert_eq!(outgoing.next_event().await, None);
    }

    #[tokio::test]
    async fn test_send_after_transport_hangs_up() {
        let (sender, outgoing) = Sender::<u32>::channel(1);
        drop(outgoing);
        assert!(sender.is_closed());
        assert!(matches!(sender.send(1).await, Err(MessageStreamError::Closed)));
    }

    #[tokio::test]
    async fn test_receiver_yields_events_then_end() {
        let (incoming, mut receiver) = Receiver::<u32, MessageStreamError>::channel(4);
        incoming.deliver(1).await.unwrap();
        incoming.deliver(2).await.unwrap();
        drop(incoming);

        assert_eq!(receiver.recv().await.unwrap(), Some(1));
        assert_eq!(receiver.recv().await.unwrap(), Some(2));
        assert_eq!(receiver.recv().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_receiver_surfaces_errors() {
        let (incoming, mut receiver) = Receiver::<String, MessageStreamError>::channel(4);
        incoming.deliver("ok".to_string()).await.unwrap();
        incoming
            .fail(MessageStreamError::Unmarshalling("bad header".into()))
            .await
            .unwrap();
        drop(incoming);

        let items: Vec<_> = receiver.by_ref().collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().ok(), Some("ok"));
        assert_eq!(
            items[1].as_ref().unwrap_err().to_string(),
            "Failed to unmarshall event: bad header"
        );
        assert!(receiver.recv().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deliver_after_receiver_dropped() {
        let (incoming, receiver) = Receiver::<u8, MessageStreamError>::channel(1);
        drop(receiver);
        assert!(matches!(incoming.deliver(1).await, Err(MessageStreamError::Closed)));
    }
}
