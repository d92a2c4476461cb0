//! Pluggable async hooks consulted on append and on flush.
//!
//! Both traits are implemented for plain async closures, so hosts can write
//! `Arc::new(|| async { json!({"app": "demo"}) })`.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::entry::MessageContext;

/// Produces the batch header, awaited once per flush.
#[async_trait]
pub trait BeforeAppStart: Send + Sync {
    async fn header(&self) -> Value;
}

/// Turns one appended record into the payload that gets buffered.
#[async_trait]
pub trait BeforeMessageSend: Send + Sync {
    async fn transform(
        &self,
        action: Option<String>,
        event_id: String,
        other: MessageContext,
    ) -> Value;
}

#[async_trait]
impl<F, Fut> BeforeAppStart for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    async fn header(&self) -> Value {
        (self)().await
    }
}

#[async_trait]
impl<F, Fut> BeforeMessageSend for F
where
    F: Fn(Option<String>, String, MessageContext) -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    async fn transform(
        &self,
        action: Option<String>,
        event_id: String,
        other: MessageContext,
    ) -> Value {
        (self)(action, event_id, other).await
    }
}

/// Default for both hooks: yields `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

#[async_trait]
impl BeforeAppStart for NoopHooks {
    async fn header(&self) -> Value {
        Value::Null
    }
}

#[async_trait]
impl BeforeMessageSend for NoopHooks {
    async fn transform(&self, _: Option<String>, _: String, _: MessageContext) -> Value {
        Value::Null
    }
}
