use crate::protocol::{Request, Response};
use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// Synchronous key-value operations a worker drives. Failures are reported as
/// `false`/`None` only; the caller never sees why an operation failed.
pub trait KvClient {
    fn put(&mut self, key: &str, value: &str) -> bool;
    fn get(&mut self, key: &str) -> Option<String>;
}

/// One persistent TCP connection to one server. There is no reconnect: once
/// the stream breaks, every later operation fails.
pub struct Connection {
    addr: String,
    reader: BufReader<TcpStream>,
    line: String,
}

impl Connection {
    pub fn open(addr: &str) -> Result<Self, ConnectionError> {
        let connect = || -> io::Result<TcpStream> {
            let stream = TcpStream::connect(addr)?;
            stream.set_nodelay(true)?;
            Ok(stream)
        };
        let stream = connect().map_err(|source| ConnectionError::Connect {
            addr: addr.to_owned(),
            source,
        })?;

        Ok(Connection {
            addr: addr.to_owned(),
            reader: BufReader::new(stream),
            line: String::new(),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Shuts the stream down. Consumes the connection so it can only happen once.
    pub fn close(self) {
        if let Err(e) = self.reader.get_ref().shutdown(Shutdown::Both) {
            debug!(addr = %self.addr, error = %e, "shutdown failed");
        }
    }

    fn round_trip(&mut self, request: Request<'_>) -> Option<Response> {
        if let Err(e) = self.reader.get_mut().write_all(request.encode().as_bytes()) {
            debug!(addr = %self.addr, ?request, error = %e, "write error");
            return None;
        }

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                debug!(addr = %self.addr, ?request, "connection closed by server");
                None
            }
            Ok(_) => Some(Response::decode(&self.line)),
            Err(e) => {
                debug!(addr = %self.addr, ?request, error = %e, "read error");
                None
            }
        }
    }
}

impl KvClient for Connection {
    fn put(&mut self, key: &str, value: &str) -> bool {
        match self.round_trip(Request::Set { key, value }) {
            Some(Response::Stored) => true,
            Some(other) => {
                debug!(addr = %self.addr, key, response = ?other, "unexpected SET response");
                false
            }
            None => false,
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        match self.round_trip(Request::Get { key })? {
            Response::Value(value) => Some(value),
            other => {
                debug!(addr = %self.addr, key, response = ?other, "unsuccessful GET response");
                None
            }
        }
    }
}
