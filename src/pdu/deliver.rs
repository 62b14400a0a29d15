// ABOUTME: The SMS-DELIVER record: an inbound message with its originating
// ABOUTME: address and service-centre timestamp

use crate::datatypes::{
    Address, Data, DataCodingScheme, PduFlags, ProtocolIdentifier, Timestamp,
};
use crate::PduResult;
use chrono::{Duration, Utc};

/// An inbound message as handed over by the service centre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deliver {
    pub service_center: Address,
    pub address: Address,
    pub flags: PduFlags,
    pub protocol_identifier: ProtocolIdentifier,
    pub data_coding_scheme: DataCodingScheme,
    pub timestamp: Timestamp,
    pub data: Data,
}

impl Deliver {
    /// Builds a Deliver around `text`, segmenting it as needed. The
    /// timestamp defaults to ten days from now.
    pub fn new(address: &str, text: &str) -> PduResult<Self> {
        let mut flags = PduFlags::deliver();
        let mut data_coding_scheme = DataCodingScheme::default();
        let data = Data::from_text(text, &mut flags, &mut data_coding_scheme)?;

        Ok(Deliver {
            service_center: Address::empty(false),
            address: Address::address(address),
            flags,
            protocol_identifier: ProtocolIdentifier::default(),
            data_coding_scheme,
            timestamp: default_timestamp(),
            data,
        })
    }

    /// Everything up to and excluding the user-data-length byte.
    pub fn start_hex(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.service_center.encode());
        out.push_str(&self.flags.to_hex());
        out.push_str(&self.address.encode());
        out.push_str(&self.protocol_identifier.to_hex());
        out.push_str(&self.data_coding_scheme.to_hex());
        out.push_str(&self.timestamp.encode());
        out
    }

    /// Serializes the whole message, one hex line per part.
    pub fn encode(&self) -> String {
        let start = self.start_hex();
        self.data
            .parts()
            .iter()
            .map(|part| part.encode(&start))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn default_timestamp() -> Timestamp {
    let local = chrono::Local::now() + Duration::days(10);
    Timestamp::new(
        local.with_timezone(&Utc),
        local.offset().local_minus_utc() / 60,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::HexCursor;

    #[test]
    fn start_hex_field_order() {
        let mut deliver = Deliver::new("+79642161111", "Hello, world!").unwrap();
        deliver.service_center = Address::service_center("79037011111");
        deliver.timestamp = Timestamp::decode(&mut HexCursor::new("81117002122223")).unwrap();

        assert_eq!(
            deliver.start_hex(),
            "07919730071111F1000B919746121611F1000081117002122223"
        );
        assert_eq!(
            deliver.encode(),
            "07919730071111F1000B919746121611F10000811170021222230DC8329BFD6681EE6F399B1C02"
        );
    }
}
