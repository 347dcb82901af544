//! Wire record and the stateful generator that produces it.

use crate::content::generate_content;
use crate::error::PayloadError;
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Default number of content characters per message.
pub const DEFAULT_MESSAGE_LENGTH: usize = 16;

/// The record carried by every message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub content: String,
}

impl RequestData {
    /// Serialize to the JSON wire form, e.g. `{"content":"aZ09..."}`.
    pub fn to_bytes(&self) -> Result<Bytes, PayloadError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Produces fixed-length [`RequestData`] records.
///
/// The length is fixed for the lifetime of the generator.
#[derive(Debug, Clone)]
pub struct PayloadGenerator {
    rng: StdRng,
    length: usize,
}

impl PayloadGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new(length: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            length,
        }
    }

    /// Create a deterministic generator (same seed = same payloads).
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn next_request(&mut self) -> RequestData {
        RequestData {
            content: generate_content(&mut self.rng, self.length),
        }
    }

    /// Generate one record and serialize it for the wire.
    pub fn next_payload(&mut self) -> Result<Bytes, PayloadError> {
        self.next_request().to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let request = RequestData {
            content: "abc123".to_string(),
        };
        let bytes = request.to_bytes().unwrap();
        assert_eq!(&bytes[..], br#"{"content":"abc123"}"#);
        assert_eq!(RequestData::from_slice(&bytes).unwrap(), request);
    }

    #[test]
    fn test_payload_length_is_constant() {
        let mut generator = PayloadGenerator::with_seed(DEFAULT_MESSAGE_LENGTH, 42);
        // {"content":""} is 14 bytes of framing around the content
        for _ in 0..100 {
            let payload = generator.next_payload().unwrap();
            assert_eq!(payload.len(), 14 + DEFAULT_MESSAGE_LENGTH);
        }
    }

    #[test]
    fn test_same_seed_same_payloads() {
        let mut a = PayloadGenerator::with_seed(16, 1);
        let mut b = PayloadGenerator::with_seed(16, 1);
        for _ in 0..10 {
            assert_eq!(a.next_request(), b.next_request());
        }
    }

    #[test]
    fn test_zero_length() {
        let mut generator = PayloadGenerator::new(0);
        assert_eq!(generator.next_request().content, "");
    }
}
