use std::fmt;

use crate::instant::Instant;

/// Flipping the sign bit maps `i64` order onto unsigned order, so the
/// big-endian bytes of the flipped value sort lexicographically in time
/// order, pre-1970 instants included.
const SIGN_FLIP: u64 = 1 << 63;

/// Error raised when raw bytes cannot be read back as a [`TimeKey`].
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The byte sequence is not exactly the fixed key width.
    #[error("storage key must be 8 bytes, got {0}")]
    Length(usize),
}

/// An 8-byte, order-preserving storage key derived from an [`Instant`].
///
/// `TimeKey::encode(a) < TimeKey::encode(b)` (byte-lexicographically)
/// exactly when `a < b`, and `decode` is the exact inverse of `encode`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeKey([u8; 8]);

impl TimeKey {
    /// Encodes an instant as its order-preserving storage key.
    pub fn encode(instant: Instant) -> Self {
        TimeKey(((instant.epoch_millis() as u64) ^ SIGN_FLIP).to_be_bytes())
    }

    /// Decodes the key back to the instant it was derived from.
    pub fn decode(self) -> Instant {
        Instant::from_millis((u64::from_be_bytes(self.0) ^ SIGN_FLIP) as i64)
    }

    /// Reads a key from raw store bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; 8] = bytes
            .try_into()
            .map_err(|_| KeyError::Length(bytes.len()))?;
        Ok(TimeKey(arr))
    }

    /// Returns the key as a byte slice, for handing to a store.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// The key one millisecond later. Used to disambiguate records that
    /// share a start instant.
    pub fn next_millisecond(self) -> Self {
        TimeKey::encode(self.decode().next_millisecond())
    }

    /// The key exactly one minute later. Used as the implicit upper bound
    /// when a scan is given only a start key.
    pub fn next_minute(self) -> Self {
        TimeKey::encode(self.decode().next_minute())
    }

    /// Canonical millisecond-precision display of the decoded instant.
    pub fn decoded_text(self) -> String {
        self.decode().to_string()
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeKey({} = {})", self, self.decoded_text())
    }
}
