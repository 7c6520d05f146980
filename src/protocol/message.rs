//! Message definitions
//!
//! A decoded frame: header fields plus owned key and value bytes.

use bytes::Bytes;

use super::CommandType;

/// Parsed fixed-size frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u16,
    pub version: u8,
    pub command: CommandType,
    pub key_len: u32,
    pub value_len: u32,
}

impl Header {
    /// Number of body bytes that follow the header
    pub fn body_len(&self) -> u64 {
        self.key_len as u64 + self.value_len as u64
    }
}

/// One protocol unit, request or response
///
/// Absent keys and values are empty, never null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub command: CommandType,
    pub key: Bytes,
    pub value: Bytes,
}

impl Message {
    pub fn new(command: CommandType, key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            command,
            key: key.into(),
            value: value.into(),
        }
    }

    /// SET request (and its acknowledgment)
    pub fn set(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self::new(CommandType::Set, key, value)
    }

    /// GET request
    pub fn get(key: impl Into<Bytes>) -> Self {
        Self::new(CommandType::Get, key, Bytes::new())
    }

    /// DEL request
    pub fn delete(key: impl Into<Bytes>) -> Self {
        Self::new(CommandType::Del, key, Bytes::new())
    }

    /// STATS request
    pub fn stats() -> Self {
        Self::new(CommandType::Stats, Bytes::new(), Bytes::new())
    }

    /// Total encoded size including the header
    pub fn encoded_len(&self) -> usize {
        super::HEADER_SIZE + self.key.len() + self.value.len()
    }
}
