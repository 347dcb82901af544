//! Payload generation for the fanout-bench harness.
//!
//! Every message sent by the load generator is a [`RequestData`] record whose
//! single `content` field is a fresh alphanumeric string of a fixed length.
//! The record travels as JSON text; receivers treat it as opaque bytes.
//!
//! ```rust
//! use fanout_payload::PayloadGenerator;
//!
//! let mut generator = PayloadGenerator::with_seed(16, 42);
//! let request = generator.next_request();
//! assert_eq!(request.content.len(), 16);
//! ```

pub mod content;
pub mod error;
pub mod generator;

// Re-exports for convenience
pub use content::generate_content;
pub use error::PayloadError;
pub use generator::{PayloadGenerator, RequestData, DEFAULT_MESSAGE_LENGTH};
