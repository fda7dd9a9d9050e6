//! Offline synchronization.
//!
//! Provides the [`Outbox`]: a durable, ordered, key-deduplicated queue of
//! writes waiting to be replayed against a remote store. It is independent of
//! report computation.

mod outbox;

pub use outbox::{OperationKind, Outbox, PendingOperation, ReplayReport};
