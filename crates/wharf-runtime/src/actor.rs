//! Minimal actor substrate: each actor owns a mailbox of one message type
//! and runs on a dedicated task. Generalized from the teacher's two-actor
//! (producer/consumer) pipeline to a fleet where every directory gets its
//! own actor, supervised by a spawner.

use crate::error::RuntimeError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ActorContext {
    name: Arc<str>,
}

impl ActorContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Arc::from(name.into()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An actor processes a single message type `M` on a dedicated mailbox. The
/// runtime calls `on_start` once, then `handle` for every message, then
/// `on_stop` when the mailbox closes.
#[async_trait]
pub trait Actor<M>: Send + 'static
where
    M: Send + Debug + 'static,
{
    async fn on_start(&mut self, _ctx: &ActorContext) -> Result<(), RuntimeError> {
        Ok(())
    }

    async fn handle(&mut self, msg: M, ctx: &ActorContext) -> Result<(), RuntimeError>;

    async fn on_stop(&mut self, _ctx: &ActorContext) -> Result<(), RuntimeError> {
        Ok(())
    }
}

/// Handle used by other components to send messages to an actor.
#[derive(Debug)]
pub struct ActorRef<M>
where
    M: Send + Debug + 'static,
{
    name: Arc<str>,
    tx: mpsc::Sender<M>,
}

impl<M> Clone for ActorRef<M>
where
    M: Send + Debug + 'static,
{
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), tx: self.tx.clone() }
    }
}

impl<M> ActorRef<M>
where
    M: Send + Debug + 'static,
{
    pub fn new(name: impl Into<String>, tx: mpsc::Sender<M>) -> Self {
        Self { name: Arc::from(name.into()), tx }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn send(&self, msg: M) -> Result<(), RuntimeError> {
        self.tx.send(msg).await.map_err(|_| RuntimeError::MailboxClosed)
    }

    pub fn try_send(&self, msg: M) -> Result<(), RuntimeError> {
        self.tx.try_send(msg).map_err(|_| RuntimeError::MailboxClosed)
    }
}

/// Spawns a task running the actor event loop; returns a handle to send it
/// messages and the task's `JoinHandle`.
pub fn spawn_actor<M, A>(name: impl Into<String>, mailbox_capacity: usize, mut actor: A) -> (ActorRef<M>, JoinHandle<()>)
where
    A: Actor<M>,
    M: Send + Debug + 'static,
{
    let name_str = name.into();
    let ctx = ActorContext::new(name_str.clone());
    let (tx, mut rx) = mpsc::channel::<M>(mailbox_capacity);
    let actor_ref = ActorRef::new(name_str, tx);

    let handle = tokio::spawn(async move {
        if let Err(err) = actor.on_start(&ctx).await {
            tracing::error!(actor = %ctx.name(), %err, "actor on_start failed");
            return;
        }

        while let Some(msg) = rx.recv().await {
            if let Err(err) = actor.handle(msg, &ctx).await {
                tracing::error!(actor = %ctx.name(), %err, "actor handle failed");
            }
        }

        if let Err(err) = actor.on_stop(&ctx).await {
            tracing::error!(actor = %ctx.name(), %err, "actor on_stop failed");
        }
    });

    (actor_ref, handle)
}
