//! Sequential consumer over a PDU hex string.

use crate::{PduError, PduResult};

/// Consumes an upper-cased hex string left to right, handing out
/// fixed-length substrings. There is no backtracking.
///
/// [`take`](HexCursor::take) yields whatever remains when the input runs
/// short; callers validate sufficiency for their own fields.
#[derive(Debug, Clone)]
pub struct HexCursor {
    data: String,
    pos: usize,
}

impl HexCursor {
    /// Wraps the input, upper-casing it once. Hex digit lookups and the
    /// 7-bit alphabet tables are case-sensitive further down, so all
    /// parsing goes through this normalization.
    pub fn new(input: &str) -> Self {
        HexCursor {
            data: input.to_uppercase(),
            pos: 0,
        }
    }

    /// Consumes up to `len` hex characters. Returns fewer (possibly zero)
    /// when the input is exhausted.
    pub fn take(&mut self, len: usize) -> String {
        let end = (self.pos + len).min(self.data.len());
        let out = self.data[self.pos..end].to_string();
        self.pos = end;
        out
    }

    /// Consumes one octet (two hex characters).
    pub fn take_byte(&mut self) -> PduResult<u8> {
        let pair = self.take(2);
        if pair.len() < 2 {
            return Err(PduError::MalformedPdu("unexpected end of input"));
        }
        u8::from_str_radix(&pair, 16).map_err(|_| PduError::MalformedPdu("invalid hex digit"))
    }

    /// Hex characters left to consume.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once the whole input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
