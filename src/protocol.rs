//! Line-based text protocol spoken between the benchmark client and a key-value server.
//!
//! ```text
//! client -> server   SET <key> <value>\n
//! server -> client   OK\n
//!
//! client -> server   GET <key>\n
//! server -> client   OK <value>\n      (key found)
//!                    ERR\n             (key not found or error)
//! ```
//!
//! Keys and values are opaque tokens: neither may contain a newline and keys may
//! not contain a space. Nothing here validates that; generated keys and values
//! satisfy it by construction.

const SET: &str = "SET";
const GET: &str = "GET";
const OK: &str = "OK";
const ERR: &str = "ERR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Set { key: &'a str, value: &'a str },
    Get { key: &'a str },
}

impl<'a> Request<'a> {
    pub fn encode(&self) -> String {
        match self {
            Request::Set { key, value } => format!("{SET} {key} {value}\n"),
            Request::Get { key } => format!("{GET} {key}\n"),
        }
    }

    /// Parses one request line as a server sees it. Surrounding whitespace is
    /// ignored and the line is split on its first two spaces, so a value keeps
    /// any spaces of its own. Returns `None` for unknown verbs or missing fields.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut parts = line.trim().splitn(3, ' ');
        match (parts.next()?, parts.next(), parts.next()) {
            (SET, Some(key), Some(value)) => Some(Request::Set { key, value }),
            (GET, Some(key), _) => Some(Request::Get { key }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Write acknowledged (`OK`).
    Stored,
    /// Read hit (`OK <value>`).
    Value(String),
    /// Miss, server error, or anything that could not be classified.
    Error,
}

impl Response {
    pub fn encode(&self) -> String {
        match self {
            Response::Stored => format!("{OK}\n"),
            Response::Value(value) => format!("{OK} {value}\n"),
            Response::Error => format!("{ERR}\n"),
        }
    }

    /// Classifies one response line as read off the wire, terminator included.
    /// A line that was cut short (no trailing newline) is never trusted.
    pub fn decode(line: &str) -> Response {
        let Some(line) = line.strip_suffix('\n') else {
            return Response::Error;
        };
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line == OK {
            Response::Stored
        } else if let Some(value) = line.strip_prefix("OK ") {
            Response::Value(value.to_owned())
        } else {
            Response::Error
        }
    }
}
