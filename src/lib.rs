//! Encoder/decoder for GSM SMS Protocol Data Units (3GPP TS 23.040).
//!
//! A PDU is the hexadecimal wire format exchanged with an SMS service
//! centre. This crate parses raw hex strings into structured records
//! ([`Deliver`], [`Submit`], [`Report`]) and serializes records back to hex,
//! covering the GSM 7-bit packed-septet alphabet (with extension-table
//! escapes), 8-bit and UCS-2 text, semi-octet BCD numbers, BCD timestamps
//! with quarter-hour timezone offsets, and concatenated-message
//! segmentation/reassembly.
//!
//! ```rust
//! use gsm_pdu::{parse, Pdu};
//!
//! let pdu = parse(
//!     "07919730071111F1000B919746121611F10000811170021222230DC8329BFD6681EE6F399B1C02",
//! )?;
//!
//! if let Pdu::Deliver(deliver) = pdu {
//!     assert_eq!(deliver.data.text(), "Hello, world!");
//!     assert_eq!(deliver.address.phone(), "79642161111");
//! }
//! # Ok::<(), gsm_pdu::PduError>(())
//! ```
//!
//! There is no transport here: feeding the hex string to a modem or SMSC is
//! the caller's business.

pub mod cursor;
pub mod datatypes;
pub mod encoding;
pub mod parse;
pub mod pdu;

#[cfg(test)]
mod tests;

pub use cursor::HexCursor;
pub use datatypes::{
    Address, AddressType, Alphabet, ConcatInfo, Data, DataCodingScheme, InformationElement,
    MessageType, NumberingPlan, Part, PduFlags, ProtocolIdentifier, Timestamp, TypeOfNumber,
    UserDataHeader, ValidityPeriod, ValidityPeriodFormat,
};
pub use parse::parse;
pub use pdu::{Deliver, Pdu, Report, Submit};

use thiserror::Error;

/// Errors raised while parsing or serializing PDUs.
///
/// Every variant is fatal to the call that raised it; there is no partial
/// recovery. Lossy text fallbacks (an unmapped character packed as a space,
/// an undefined extension-table slot decoded as a filler glyph) are
/// deliberate and do not produce errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PduError {
    /// Not enough input for a mandatory field, or a field that cannot be
    /// read as hex.
    #[error("malformed PDU: {0}")]
    MalformedPdu(&'static str),

    /// The message-type-indicator bits of the type byte name no known kind.
    #[error("unknown PDU type byte {0:#04X}")]
    UnknownPduType(u8),

    /// The data coding scheme selects an alphabet outside
    /// {default 7-bit, 8-bit, UCS-2}.
    #[error("unknown data coding alphabet (DCS {0:#04X})")]
    UnknownAlphabet(u8),

    /// The validity-period-format bits carry a value this codec cannot
    /// decode (the Siemens-specific format).
    #[error("invalid validity period format {0:#04X}")]
    InvalidValidityPeriodFormat(u8),

    /// A part appended during reassembly carries a different concatenation
    /// reference or segment count than the parts already collected.
    #[error("part belongs to a different concatenated message")]
    PartFromDifferentMessage,

    /// Reassembly required comparing concatenation headers but one side has
    /// no header at all.
    #[error("part is missing a user data header")]
    MissingHeader,
}

/// A specialized `Result` for PDU operations.
pub type PduResult<T> = Result<T, PduError>;
