//! The PDU type byte, shared by all three message kinds.

use crate::datatypes::ValidityPeriodFormat;
use crate::{PduError, PduResult};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Message-type-indicator, the low two bits of the type byte.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Deliver = 0x00,
    Submit = 0x01,
    Report = 0x02,
}

/// The decoded type byte.
///
/// Layout, high to low: reply-path, user-data-header, status-report,
/// validity-period-format (2 bits), reject-duplicates (more-messages for
/// Deliver/Report), message-type-indicator (2 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduFlags {
    pub message_type: MessageType,
    pub reply_path: bool,
    pub user_data_header: bool,
    pub status_report: bool,
    pub validity_period_format: ValidityPeriodFormat,
    pub reject_duplicates: bool,
}

impl PduFlags {
    fn new(message_type: MessageType) -> Self {
        PduFlags {
            message_type,
            reply_path: false,
            user_data_header: false,
            status_report: false,
            validity_period_format: ValidityPeriodFormat::None,
            reject_duplicates: false,
        }
    }

    pub fn deliver() -> Self {
        PduFlags::new(MessageType::Deliver)
    }

    pub fn submit() -> Self {
        PduFlags::new(MessageType::Submit)
    }

    pub fn report() -> Self {
        PduFlags::new(MessageType::Report)
    }

    /// Decodes a type byte; indicator bits `0b11` name no message kind.
    pub fn from_byte(byte: u8) -> PduResult<Self> {
        let message_type =
            MessageType::try_from(byte & 0x03).map_err(|_| PduError::UnknownPduType(byte))?;
        let validity_period_format = ValidityPeriodFormat::try_from((byte >> 3) & 0x03)
            .unwrap_or(ValidityPeriodFormat::None);

        Ok(PduFlags {
            message_type,
            reply_path: byte & 0x80 != 0,
            user_data_header: byte & 0x40 != 0,
            status_report: byte & 0x20 != 0,
            validity_period_format,
            reject_duplicates: byte & 0x04 != 0,
        })
    }

    pub fn value(&self) -> u8 {
        (u8::from(self.reply_path) << 7)
            | (u8::from(self.user_data_header) << 6)
            | (u8::from(self.status_report) << 5)
            | ((u8::from(self.validity_period_format) & 0x03) << 3)
            | (u8::from(self.reject_duplicates) << 2)
            | (u8::from(self.message_type) & 0x03)
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}", self.value())
    }
}
