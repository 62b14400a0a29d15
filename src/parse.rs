//! Entry point for turning a raw hex string into a PDU record.
//!
//! Field order is fixed by TS 23.040 and differs per message kind; each
//! helper below consumes its fields off the shared cursor in wire order.

use crate::cursor::HexCursor;
use crate::datatypes::{
    Address, Alphabet, Data, DataCodingScheme, InformationElement, MessageType, Part, PduFlags,
    ProtocolIdentifier, Timestamp, UserDataHeader, ValidityPeriod,
};
use crate::encoding::{decode_7bit, decode_8bit, decode_ucs2};
use crate::pdu::{Deliver, Pdu, Report, Submit};
use crate::{PduError, PduResult};
use tracing::debug;

/// Parses one PDU hex string into the matching record.
pub fn parse(input: &str) -> PduResult<Pdu> {
    let mut cursor = HexCursor::new(input);

    let service_center = Address::decode(&mut cursor, false)?;
    let flags = PduFlags::from_byte(cursor.take_byte()?)?;

    let pdu = match flags.message_type {
        MessageType::Deliver => {
            Pdu::Deliver(parse_deliver(service_center, flags, &mut cursor)?)
        }
        MessageType::Submit => Pdu::Submit(parse_submit(service_center, flags, &mut cursor)?),
        MessageType::Report => Pdu::Report(parse_report(service_center, flags, &mut cursor)?),
    };

    debug!(kind = ?flags.message_type, leftover = cursor.remaining(), "parsed PDU");
    Ok(pdu)
}

fn parse_deliver(
    service_center: Address,
    flags: PduFlags,
    cursor: &mut HexCursor,
) -> PduResult<Deliver> {
    let address = Address::decode(cursor, true)?;
    let protocol_identifier = ProtocolIdentifier::from_byte(cursor.take_byte()?);
    let data_coding_scheme = DataCodingScheme::from_byte(cursor.take_byte()?);
    let timestamp = Timestamp::decode(cursor)?;
    let user_data_length = cursor.take_byte()? as usize;
    let data = parse_user_data(&flags, data_coding_scheme, user_data_length, cursor)?;

    Ok(Deliver {
        service_center,
        address,
        flags,
        protocol_identifier,
        data_coding_scheme,
        timestamp,
        data,
    })
}

fn parse_submit(
    service_center: Address,
    flags: PduFlags,
    cursor: &mut HexCursor,
) -> PduResult<Submit> {
    let message_reference = cursor.take_byte()?;
    let address = Address::decode(cursor, true)?;
    let protocol_identifier = ProtocolIdentifier::from_byte(cursor.take_byte()?);
    let data_coding_scheme = DataCodingScheme::from_byte(cursor.take_byte()?);
    let validity_period = ValidityPeriod::decode(flags.validity_period_format, cursor)?;
    let user_data_length = cursor.take_byte()? as usize;
    let data = parse_user_data(&flags, data_coding_scheme, user_data_length, cursor)?;

    Ok(Submit {
        service_center,
        address,
        flags,
        message_reference,
        protocol_identifier,
        data_coding_scheme,
        validity_period,
        data,
    })
}

fn parse_report(
    service_center: Address,
    flags: PduFlags,
    cursor: &mut HexCursor,
) -> PduResult<Report> {
    let reference = cursor.take_byte()?;
    let address = Address::decode(cursor, true)?;
    let timestamp = Timestamp::decode(cursor)?;
    let discharge = Timestamp::decode(cursor)?;
    let status = cursor.take_byte()?;

    Ok(Report {
        service_center,
        flags,
        reference,
        address,
        timestamp,
        discharge,
        status,
    })
}

/// Reads the user data section: optional header, then the payload decoded
/// per the data coding scheme.
///
/// For the 7-bit alphabet the length field counts septets and the payload
/// after a header starts on a septet boundary, so the decoder is told how
/// many alignment bits pad the first octet.
fn parse_user_data(
    flags: &PduFlags,
    data_coding_scheme: DataCodingScheme,
    user_data_length: usize,
    cursor: &mut HexCursor,
) -> PduResult<Data> {
    let is_unicode = data_coding_scheme.alphabet == Alphabet::Ucs2;

    let mut octets = if data_coding_scheme.alphabet == Alphabet::Default {
        (user_data_length * 7).div_ceil(8)
    } else {
        user_data_length
    };

    let mut header = None;
    let mut header_octets = 0usize;

    if flags.user_data_header {
        let parsed = parse_header(cursor)?;
        header_octets = 1 + parsed.size();
        octets = octets.saturating_sub(header_octets);
        header = Some(parsed);
    }

    let hex = cursor.take(octets * 2);

    let text = match data_coding_scheme.alphabet {
        Alphabet::Default => {
            let header_septets = (header_octets * 8).div_ceil(7);
            let septets = user_data_length.saturating_sub(header_septets);
            let align_bits = (header_septets * 7 - header_octets * 8) as u8;
            decode_7bit(&hex, Some(septets), align_bits)
        }
        Alphabet::EightBit => decode_8bit(&hex),
        Alphabet::Ucs2 => decode_ucs2(&hex),
        Alphabet::Reserved => {
            return Err(PduError::UnknownAlphabet(data_coding_scheme.value()))
        }
    };

    let part = Part::new(hex, user_data_length, text, header);
    Ok(Data::from_parsed(part, is_unicode))
}

/// Splits the header into raw TLV elements; element payloads are not
/// interpreted here.
fn parse_header(cursor: &mut HexCursor) -> PduResult<UserDataHeader> {
    let header_length = cursor.take_byte()? as usize;
    let mut remaining = header_length as isize;
    let mut ies = Vec::new();

    while remaining > 0 {
        let kind = cursor.take_byte()?;
        let length = cursor.take_byte()? as usize;
        ies.push(InformationElement::new(kind, cursor.take(length * 2)));
        remaining -= 2 + length as isize;
    }

    Ok(UserDataHeader::from_ies(ies))
}
