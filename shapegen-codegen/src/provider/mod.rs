//! Shape to symbol resolution
//!
//! A resolution chain is a base provider wrapped by any number of
//! [`SymbolTransform`]s. Each [`Wrapping`] stage owns exactly one inner
//! provider, always asks it first, and then derives a new symbol from the
//! result. Stages know nothing about each other, so each can be tested with a
//! stub inner provider.

pub mod base;
pub mod event_stream;

pub use base::BaseSymbolProvider;
pub use event_stream::{ChannelDirection, EventStreamSymbolProvider, EventStreamSymbols, StreamDirection};

use crate::error::CodegenError;
use crate::symbol::Symbol;
use shapegen_model::Shape;
use std::sync::Arc;

pub trait SymbolProvider: Send + Sync {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError>;
}

pub type BoxedSymbolProvider = Box<dyn SymbolProvider>;

impl<P: SymbolProvider + ?Sized> SymbolProvider for Box<P> {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError> {
        (**self).to_symbol(shape)
    }
}

impl<P: SymbolProvider + ?Sized> SymbolProvider for Arc<P> {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError> {
        (**self).to_symbol(shape)
    }
}

impl<P: SymbolProvider + ?Sized> SymbolProvider for &P {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError> {
        (**self).to_symbol(shape)
    }
}

/// Post-processing applied to the symbol an inner provider produced.
pub trait SymbolTransform: Send + Sync {
    fn transform(&self, shape: &Shape, initial: Symbol) -> Result<Symbol, CodegenError>;
}

/// A provider that delegates to `inner` and then applies `transform`.
pub struct Wrapping<T, P> {
    transform: T,
    inner: P,
}

impl<T, P> Wrapping<T, P> {
    pub fn new(transform: T, inner: P) -> Self {
        Self { transform, inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<T: SymbolTransform, P: SymbolProvider> SymbolProvider for Wrapping<T, P> {
    fn to_symbol(&self, shape: &Shape) -> Result<Symbol, CodegenError> {
        let initial = self.inner.to_symbol(shape)?;
        self.transform.transform(shape, initial)
    }
}

pub trait SymbolProviderExt: SymbolProvider + Sized {
    /// Wrap this provider in another resolution stage.
    fn wrap<T: SymbolTransform>(self, transform: T) -> Wrapping<T, Self> {
        Wrapping::new(transform, self)
    }

    fn boxed(self) -> BoxedSymbolProvider
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<P: SymbolProvider + Sized> SymbolProviderExt for P {}
