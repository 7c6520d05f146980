//! Protocol Module
//!
//! Defines the binary wire protocol spoken between clients and the cache.
//!
//! ## Frame Format (version 1)
//!
//! All integers are big-endian (network order). Requests and responses
//! share the same frame shape.
//!
//! ```text
//! ┌────────────┬─────────┬─────────┬────────────┬──────────────┬─────┬───────┐
//! │ Magic (2)  │ Ver (1) │ Cmd (1) │ KeyLen (4) │ ValueLen (4) │ Key │ Value │
//! └────────────┴─────────┴─────────┴────────────┴──────────────┴─────┴───────┘
//! ```
//!
//! ### Commands
//! - 0x01: SET   - key + value, response echoes both
//! - 0x02: GET   - key, response carries the value (empty on miss)
//! - 0x03: DEL   - key, response has an empty value
//! - 0x04: STATS - empty key, response value is the stats text
//!
//! There is no status field: a GET miss and a stored empty value produce
//! byte-identical responses.

mod command;
mod message;
mod codec;

pub use command::CommandType;
pub use message::{Header, Message};
pub use codec::{
    decode, decode_header, encode, read_message, write_message, HEADER_SIZE, MAGIC,
    PROTOCOL_VERSION,
};
