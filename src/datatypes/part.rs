//! One wire part of a message payload.

use crate::datatypes::UserDataHeader;
use std::fmt::Write;

/// A single user-data section: the length field, optional header and the
/// encoded payload, plus the text it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Hex of the packed payload, header excluded.
    pub data: String,
    /// The user-data-length value: septets for the 7-bit alphabet,
    /// octets otherwise, header included either way.
    pub size: usize,
    /// The decoded text of this part alone.
    pub text: String,
    pub header: Option<UserDataHeader>,
}

impl Part {
    pub fn new(data: String, size: usize, text: String, header: Option<UserDataHeader>) -> Self {
        Part {
            data,
            size,
            text,
            header,
        }
    }

    /// A complete single-part PDU: the caller supplies everything up to
    /// and excluding the user-data-length byte.
    pub fn encode(&self, start: &str) -> String {
        let mut out = String::with_capacity(start.len() + 2 + self.data.len());
        out.push_str(start);
        let _ = write!(out, "{:02X}", self.size);
        if let Some(header) = &self.header {
            out.push_str(&header.encode());
        }
        out.push_str(&self.data);
        out
    }
}
