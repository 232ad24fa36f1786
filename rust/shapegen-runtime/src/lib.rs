//! # shapegen-runtime
//!
//! Types that shapegen-generated crates refer to by path.
//!
//! - **Event streams** - `Sender` / `Receiver` channel handles for streaming
//!   operations (behind the `event-stream` feature)
//! - **Frames** - Event stream messages and the `SignMessage` capability
//! - **Property bags** - Type-keyed, shareable request properties
//!
//! ## Example
//!
//! ```rust,ignore
//! use shapegen_runtime::event_stream::{Receiver, MessageStreamError};
//!
//! let (incoming, mut events) = Receiver::<ChatEvent, MessageStreamError>::channel(16);
//! while let Some(event) = events.recv().await? {
//!     println!("{:?}", event);
//! }
//! ```

#[cfg(feature = "event-stream")]
pub mod event_stream;
pub mod frame;
pub mod property_bag;

pub use frame::{Message, NoOpSigner, SignMessage, SignMessageError};
pub use property_bag::{PropertyBag, SharedPropertyBag};
