//! Blocking client
//!
//! Speaks the binary protocol over one TCP connection, one request at a time.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;

use crate::error::{CacheError, Result};
use crate::protocol::{read_message, write_message, Message, HEADER_SIZE};
use crate::store::StatsSnapshot;

/// Responses larger than this are refused by the client
const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// A connection to a kvcache server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Bound how long a single response may take
    pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)?;
        self.writer.get_ref().set_write_timeout(timeout)?;
        Ok(())
    }

    /// Send one message and wait for its response
    ///
    /// A server that closes instead of answering surfaces as
    /// `IncompleteHeader { got: 0, .. }`.
    pub fn request(&mut self, message: &Message) -> Result<Message> {
        write_message(&mut self.writer, message)?;

        let response = read_message(&mut self.reader, MAX_RESPONSE_SIZE)?.ok_or(
            CacheError::IncompleteHeader {
                expected: HEADER_SIZE,
                got: 0,
            },
        )?;

        if response.command != message.command {
            return Err(CacheError::Protocol(format!(
                "sent {} but server answered {}",
                message.command.name(),
                response.command.name()
            )));
        }

        Ok(response)
    }

    /// Store `value` under `key`
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.request(&Message::set(
            Bytes::copy_from_slice(key),
            Bytes::copy_from_slice(value),
        ))?;
        Ok(())
    }

    /// Fetch the value of `key`; an empty value means miss
    pub fn get(&mut self, key: &[u8]) -> Result<Bytes> {
        let response = self.request(&Message::get(Bytes::copy_from_slice(key)))?;
        Ok(response.value)
    }

    /// Remove `key`
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.request(&Message::delete(Bytes::copy_from_slice(key)))?;
        Ok(())
    }

    /// Raw stats text as sent by the server
    pub fn stats_text(&mut self) -> Result<String> {
        let response = self.request(&Message::stats())?;
        Ok(String::from_utf8_lossy(&response.value).into_owned())
    }

    /// Server statistics
    pub fn stats(&mut self) -> Result<StatsSnapshot> {
        let text = self.stats_text()?;
        StatsSnapshot::parse(&text)
            .ok_or_else(|| CacheError::Protocol(format!("unreadable stats: {:?}", text)))
    }
}
