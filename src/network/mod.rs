//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread, never blocked by request processing
//! - One thread per connection, strict request/response
//! - All connections share one `Store`

mod server;
mod connection;

pub use server::{Server, ShutdownHandle};
pub use connection::{dispatch, Connection};
