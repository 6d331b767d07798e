//! Transport layer: HTTP and wire-format details (request encoding, response classification).

mod classify;
mod encode;

pub use classify::{Classified, Failure, classify_response};
pub use encode::{RequestBody, encode_request};
