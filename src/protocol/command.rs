//! Command definitions
//!
//! The command byte carried in every frame header.

use crate::error::CacheError;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    Set = 0x01,
    Get = 0x02,
    Del = 0x03,
    Stats = 0x04,
}

impl CommandType {
    /// Short upper-case name, as used in logs
    pub fn name(self) -> &'static str {
        match self {
            CommandType::Set => "SET",
            CommandType::Get => "GET",
            CommandType::Del => "DEL",
            CommandType::Stats => "STATS",
        }
    }
}

impl TryFrom<u8> for CommandType {
    type Error = CacheError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(CommandType::Set),
            0x02 => Ok(CommandType::Get),
            0x03 => Ok(CommandType::Del),
            0x04 => Ok(CommandType::Stats),
            other => Err(CacheError::UnknownCommand(other)),
        }
    }
}

impl From<CommandType> for u8 {
    fn from(command: CommandType) -> u8 {
        command as u8
    }
}
