//! Reference key-value server speaking the benchmark protocol. One thread
//! serves each accepted connection.

use crate::database::Database;
use crate::protocol::{Request, Response};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::str;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, warn};

pub struct Server {
    listener: TcpListener,
    db: Arc<dyn Database>,
}

impl Server {
    pub fn bind(addr: impl ToSocketAddrs, db: Arc<dyn Database>) -> Result<Self> {
        let listener = TcpListener::bind(addr).context("cannot bind listener")?;
        Ok(Server { listener, db })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until the listener fails for good.
    pub fn serve(self) -> Result<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "accept error");
                    continue;
                }
            };
            let db = Arc::clone(&self.db);
            thread::spawn(move || {
                if let Err(e) = handle_connection(stream, db.as_ref()) {
                    debug!(error = %format!("{e:#}"), "connection ended with error");
                }
            });
        }
        Ok(())
    }

    /// Serves on a background thread and returns the bound address.
    pub fn spawn(self) -> Result<SocketAddr> {
        let addr = self.local_addr()?;
        thread::Builder::new()
            .name("kv-server".to_owned())
            .spawn(move || {
                if let Err(e) = self.serve() {
                    error!(error = %format!("{e:#}"), "server stopped");
                }
            })
            .context("cannot spawn server thread")?;
        Ok(addr)
    }
}

fn handle_connection(stream: TcpStream, db: &dyn Database) -> Result<()> {
    let peer = stream.peer_addr()?;
    debug!(%peer, "client connected");
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            debug!(%peer, "client disconnected");
            return Ok(());
        }
        let response = respond(db, &line);
        writer.write_all(response.encode().as_bytes())?;
    }
}

/// Non-UTF-8 lines get `ERR` like any other unrecognised request.
fn respond(db: &dyn Database, line: &[u8]) -> Response {
    let Ok(line) = str::from_utf8(line) else {
        debug!("request is not valid UTF-8");
        return Response::Error;
    };
    match Request::parse(line) {
        Some(Request::Set { key, value }) => match db.set(key.as_bytes(), value.as_bytes()) {
            Ok(()) => Response::Stored,
            Err(e) => {
                warn!(key, error = %format!("{e:#}"), "SET failed");
                Response::Error
            }
        },
        Some(Request::Get { key }) => match db.get(key.as_bytes()) {
            Ok(Some(value)) => Response::Value(String::from_utf8_lossy(&value).into_owned()),
            Ok(None) => Response::Error,
            Err(e) => {
                warn!(key, error = %format!("{e:#}"), "GET failed");
                Response::Error
            }
        },
        None => Response::Error,
    }
}
