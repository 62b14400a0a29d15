// ABOUTME: The SMS-STATUS-REPORT record: delivery feedback for a
// ABOUTME: previously submitted message

use crate::datatypes::{Address, PduFlags, Timestamp};
use std::fmt::Write;

/// Delivery feedback for a submitted message.
///
/// `status` is the raw TP-ST octet: 0x00 means received successfully, the
/// 0x2x range temporary errors, 0x4x permanent errors, 0x6x temporary
/// errors the service centre stopped retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub service_center: Address,
    pub flags: PduFlags,
    /// The message reference of the Submit this report answers.
    pub reference: u8,
    pub address: Address,
    /// When the service centre accepted the original message.
    pub timestamp: Timestamp,
    /// When the delivery attempt concluded.
    pub discharge: Timestamp,
    pub status: u8,
}

impl Report {
    /// Serializes the full report.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.service_center.encode());
        out.push_str(&self.flags.to_hex());
        let _ = write!(out, "{:02X}", self.reference);
        out.push_str(&self.address.encode());
        out.push_str(&self.timestamp.encode());
        out.push_str(&self.discharge.encode());
        let _ = write!(out, "{:02X}", self.status);
        out
    }
}
