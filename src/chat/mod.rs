//! Chat request validation and provider dispatch.
//!
//! The core flow: validate one untrusted payload, dispatch it to exactly one
//! provider, normalize the provider's outcome into a single reply shape, and
//! classify failures into client-facing categories.

mod dispatch;
mod types;
mod validate;

pub use dispatch::Dispatcher;
pub use types::{ChatError, ChatPayload, ChatReply, ChatRequest};
pub use validate::validate;
