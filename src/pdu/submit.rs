// ABOUTME: The SMS-SUBMIT record: an outbound message with its message
// ABOUTME: reference and validity period

use crate::datatypes::{
    Address, Data, DataCodingScheme, PduFlags, ProtocolIdentifier, ValidityPeriod,
};
use crate::PduResult;
use std::fmt::Write;

/// An outbound message headed for the service centre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub service_center: Address,
    pub address: Address,
    pub flags: PduFlags,
    pub message_reference: u8,
    pub protocol_identifier: ProtocolIdentifier,
    pub data_coding_scheme: DataCodingScheme,
    pub validity_period: ValidityPeriod,
    pub data: Data,
}

impl Submit {
    /// Builds a Submit around `text`, segmenting it as needed.
    pub fn new(address: &str, text: &str) -> PduResult<Self> {
        let mut flags = PduFlags::submit();
        let mut data_coding_scheme = DataCodingScheme::default();
        let data = Data::from_text(text, &mut flags, &mut data_coding_scheme)?;

        Ok(Submit {
            service_center: Address::empty(false),
            address: Address::address(address),
            flags,
            message_reference: 0x00,
            protocol_identifier: ProtocolIdentifier::default(),
            data_coding_scheme,
            validity_period: ValidityPeriod::None,
            data,
        })
    }

    /// Everything up to and excluding the user-data-length byte.
    ///
    /// Serializing fixes the validity-period-format bits of the type byte
    /// to match the stored validity period, hence `&mut self`.
    pub fn start_hex(&mut self) -> String {
        self.flags.validity_period_format = self.validity_period.format();

        let mut out = String::new();
        out.push_str(&self.service_center.encode());
        out.push_str(&self.flags.to_hex());
        let _ = write!(out, "{:02X}", self.message_reference);
        out.push_str(&self.address.encode());
        out.push_str(&self.protocol_identifier.to_hex());
        out.push_str(&self.data_coding_scheme.to_hex());
        out.push_str(&self.validity_period.encode());
        out
    }

    /// Serializes the whole message, one hex line per part.
    pub fn encode(&mut self) -> String {
        let start = self.start_hex();
        self.data
            .parts()
            .iter()
            .map(|part| part.encode(&start))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
