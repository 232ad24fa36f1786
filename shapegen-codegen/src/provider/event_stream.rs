//! Rewrites event stream members into directional channel handles

use crate::config::RuntimeConfig;
use crate::context::CodegenContext;
use crate::dependency::CargoDependency;
use crate::error::CodegenError;
use crate::provider::{SymbolTransform, Wrapping};
use crate::rust_type::RustType;
use crate::symbol::{RuntimeType, Symbol, EVENT_STREAM_FEATURE};
use crate::target::CodegenTarget;
use shapegen_model::{Model, OperationLinkage, Shape};
use std::sync::Arc;

/// Which half of an operation a stream belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamDirection {
    Input,
    Output,
}

impl StreamDirection {
    pub fn from_linkage(linkage: &OperationLinkage) -> Option<Self> {
        match linkage {
            OperationLinkage::Input(_) => Some(StreamDirection::Input),
            OperationLinkage::Output(_) => Some(StreamDirection::Output),
            OperationLinkage::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelDirection {
    Sender,
    Receiver,
}

impl ChannelDirection {
    /// Clients send their input streams and servers send their output streams.
    pub fn new(stream: StreamDirection, target: CodegenTarget) -> Self {
        match (stream, target) {
            (StreamDirection::Input, CodegenTarget::Client)
            | (StreamDirection::Output, CodegenTarget::Server) => ChannelDirection::Sender,
            (StreamDirection::Input, CodegenTarget::Server)
            | (StreamDirection::Output, CodegenTarget::Client) => ChannelDirection::Receiver,
        }
    }
}

/// Wraps event stream members with the runtime's `Sender` / `Receiver` types.
pub struct EventStreamSymbols {
    model: Arc<Model>,
    target: CodegenTarget,
    sender: RuntimeType,
    receiver: RuntimeType,
    error: RuntimeType,
    runtime_dependency: CargoDependency,
}

pub type EventStreamSymbolProvider<P> = Wrapping<EventStreamSymbols, P>;

impl EventStreamSymbols {
    pub fn new(model: Arc<Model>, target: CodegenTarget, runtime_config: &RuntimeConfig) -> Self {
        Self {
            model,
            target,
            sender: RuntimeType::event_stream_sender(runtime_config),
            receiver: RuntimeType::event_stream_receiver(runtime_config),
            error: RuntimeType::message_stream_error(runtime_config),
            runtime_dependency: runtime_config
                .runtime_crate()
                .with_feature(EVENT_STREAM_FEATURE),
        }
    }

    pub fn from_context(ctx: &CodegenContext) -> Self {
        Self::new(ctx.model.clone(), ctx.target, &ctx.runtime_config)
    }

    /// Use `error` as the receiver's error type instead of `MessageStreamError`.
    pub fn with_error_type(mut self, error: RuntimeType) -> Self {
        self.error = error;
        self
    }

    fn channel(&self, direction: ChannelDirection, inner: &RustType) -> (&RuntimeType, RustType) {
        let (channel, args) = match direction {
            ChannelDirection::Sender => (&self.sender, vec![inner.clone()]),
            ChannelDirection::Receiver => (&self.receiver, vec![inner.clone(), self.error.rust_type()]),
        };
        let rust_type = RustType::Generic {
            name: channel.name.clone(),
            namespace: Some(channel.namespace.clone()),
            args,
        };
        (channel, rust_type)
    }
}

impl SymbolTransform for EventStreamSymbols {
    fn transform(&self, shape: &Shape, initial: Symbol) -> Result<Symbol, CodegenError> {
        if !self.model.is_event_stream(shape) {
            return Ok(initial);
        }
        let Some(container_id) = shape.container() else {
            return Ok(initial);
        };

        let container = self.model.expect_shape(&container_id)?;
        let linkage = self.model.operation_linkage(container);
        let Some(stream) = StreamDirection::from_linkage(&linkage) else {
            tracing::debug!(
                member = %shape.id,
                container = %container_id,
                "event stream member's container is not an operation input or output; leaving unwrapped"
            );
            return Ok(initial);
        };

        let direction = ChannelDirection::new(stream, self.target);
        let inner = initial.rust_type().strip_outer_option().clone();
        let (channel, rust_type) = self.channel(direction, &inner);

        tracing::trace!(
            member = %shape.id,
            ?direction,
            target = %self.target,
            rust_type = %rust_type.render(true),
            "wrapped event stream member"
        );

        Ok(initial
            .to_builder()
            .name(rust_type.render(false))
            .namespace(channel.namespace.clone())
            .rust_type(rust_type)
            .add_reference(initial)
            .add_dependency(self.runtime_dependency.clone())
            .add_reference(self.error.to_symbol())
            .build())
    }
}
