//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Header Layout
//! ```text
//! offset  size  field
//! 0       2     magic         = 0xCAFE
//! 2       1     version       = 1
//! 3       1     command
//! 4       4     key_length
//! 8       4     value_length
//! ```
//!
//! The magic is checked before anything else: if it is wrong the length
//! fields are garbage and no body read may be attempted.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{CommandType, Header, Message};
use crate::error::{CacheError, Result};

/// Header size: magic (2) + version (1) + command (1) + key_len (4) + value_len (4)
pub const HEADER_SIZE: usize = 12;

/// Sentinel at the start of every frame
pub const MAGIC: u16 = 0xCAFE;

/// The only protocol version this crate speaks
pub const PROTOCOL_VERSION: u8 = 1;

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a message to bytes
///
/// Format: header (12) + key + value. Key and value must each fit in a u32 length.
pub fn encode(message: &Message) -> Bytes {
    debug_assert!(message.key.len() <= u32::MAX as usize);
    debug_assert!(message.value.len() <= u32::MAX as usize);

    let mut buf = BytesMut::with_capacity(message.encoded_len());
    buf.put_u16(MAGIC);
    buf.put_u8(PROTOCOL_VERSION);
    buf.put_u8(message.command.into());
    buf.put_u32(message.key.len() as u32);
    buf.put_u32(message.value.len() as u32);
    buf.put_slice(&message.key);
    buf.put_slice(&message.value);

    buf.freeze()
}

/// Parse and validate the fixed-size header at the start of `bytes`
///
/// Validation order: length, magic, version, command.
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(CacheError::IncompleteHeader {
            expected: HEADER_SIZE,
            got: bytes.len(),
        });
    }

    let mut buf = &bytes[..HEADER_SIZE];
    let magic = buf.get_u16();
    if magic != MAGIC {
        return Err(CacheError::InvalidMagic { found: magic });
    }

    let version = buf.get_u8();
    if version != PROTOCOL_VERSION {
        return Err(CacheError::UnsupportedVersion(version));
    }

    let command = CommandType::try_from(buf.get_u8())?;
    let key_len = buf.get_u32();
    let value_len = buf.get_u32();

    Ok(Header {
        magic,
        version,
        command,
        key_len,
        value_len,
    })
}

/// Decode a complete message from bytes
///
/// Trailing bytes past the declared body are ignored.
pub fn decode(bytes: &[u8]) -> Result<Message> {
    let header = decode_header(bytes)?;

    let body_len = header.body_len() as usize;
    let available = bytes.len() - HEADER_SIZE;
    if available < body_len {
        return Err(CacheError::IncompleteBody {
            expected: body_len,
            got: available,
        });
    }

    let key_end = HEADER_SIZE + header.key_len as usize;
    let value_end = key_end + header.value_len as usize;

    Ok(Message {
        command: header.command,
        key: Bytes::copy_from_slice(&bytes[HEADER_SIZE..key_end]),
        value: Bytes::copy_from_slice(&bytes[key_end..value_end]),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read as many bytes as possible into `buf`, stopping early only at EOF
///
/// Returns the number of bytes read. Unlike `read_exact`, a short read is
/// reported rather than turned into an error so callers can tell a clean
/// close from a truncated frame.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read one complete message from a stream
///
/// Blocks until the whole frame has arrived. Returns `Ok(None)` when the
/// peer closes the stream cleanly on a frame boundary.
pub fn read_message<R: Read>(reader: &mut R, max_frame_size: u64) -> Result<Option<Message>> {
    // Read header first
    let mut header_buf = [0u8; HEADER_SIZE];
    let got = read_full(reader, &mut header_buf)?;
    if got == 0 {
        return Ok(None);
    }
    if got < HEADER_SIZE {
        return Err(CacheError::IncompleteHeader {
            expected: HEADER_SIZE,
            got,
        });
    }

    let header = decode_header(&header_buf)?;

    // Validate body length before allocating for it
    let body_len = header.body_len();
    if body_len > max_frame_size {
        return Err(CacheError::FrameTooLarge {
            size: body_len,
            max: max_frame_size,
        });
    }

    // Read body; the buffer grows with bytes actually received
    let mut body = Vec::new();
    reader.by_ref().take(body_len).read_to_end(&mut body)?;
    if (body.len() as u64) < body_len {
        return Err(CacheError::IncompleteBody {
            expected: body_len as usize,
            got: body.len(),
        });
    }

    let mut body = Bytes::from(body);
    let key = body.split_to(header.key_len as usize);

    Ok(Some(Message {
        command: header.command,
        key,
        value: body,
    }))
}

/// Write a message to a stream and flush it
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<()> {
    let bytes = encode(message);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
