// ABOUTME: Semi-octet BCD address codec for originating/destination and
// ABOUTME: service-centre addresses, with TON/NPI typing and auto-detection

use crate::cursor::HexCursor;
use crate::encoding::{decode_7bit, encode_7bit};
use crate::{PduError, PduResult};
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::fmt::Write;

/// Type-of-number, the 3-bit field of the address type octet.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOfNumber {
    Unknown = 0x00,
    International = 0x01,
    National = 0x02,
    NetworkSpecific = 0x03,
    Subscriber = 0x04,
    Alphanumeric = 0x05,
    Abbreviated = 0x06,
    Reserved = 0x07,
}

/// Numbering-plan identification, the 4-bit field of the address type
/// octet. Unassigned values survive round-trips through `Other`.
#[derive(FromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberingPlan {
    Unknown = 0x00,
    Isdn = 0x01,
    X121 = 0x02,
    Telex = 0x03,
    National = 0x08,
    Individual = 0x09,
    Ermes = 0x0A,
    Reserved = 0x0F,
    #[num_enum(catch_all)]
    Other(u8),
}

/// The address type octet: `1 | TON (3 bits) | NPI (4 bits)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressType {
    pub type_of_number: TypeOfNumber,
    pub numbering_plan: NumberingPlan,
}

impl Default for AddressType {
    /// International ISDN, wire value 0x91.
    fn default() -> Self {
        AddressType {
            type_of_number: TypeOfNumber::International,
            numbering_plan: NumberingPlan::Isdn,
        }
    }
}

impl AddressType {
    pub fn from_byte(byte: u8) -> Self {
        AddressType {
            type_of_number: TypeOfNumber::try_from(0x07 & (byte >> 4))
                .unwrap_or(TypeOfNumber::Reserved),
            numbering_plan: NumberingPlan::from(0x0F & byte),
        }
    }

    pub fn value(&self) -> u8 {
        (1 << 7) | (u8::from(self.type_of_number) << 4) | u8::from(self.numbering_plan)
    }
}

/// A phone number or alphanumeric sender id, in either of its two wire
/// roles: originating/destination address (sized by digits) or
/// service-centre address (sized by octets).
///
/// `size` and `encoded` are always derived from `phone` and the type;
/// setting the same phone twice is idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    address_type: AddressType,
    is_address: bool,
    phone: String,
    size: usize,
    encoded: String,
}

impl Address {
    /// An empty address of the given role; serializes as a lone zero
    /// length byte.
    pub fn empty(is_address: bool) -> Self {
        Address {
            address_type: AddressType::default(),
            is_address,
            phone: String::new(),
            size: 0,
            encoded: String::new(),
        }
    }

    /// An originating/destination address with type auto-detection:
    /// a leading `+` or `00` marks international (and is stripped), all
    /// digits marks unknown, anything else alphanumeric.
    pub fn address(phone: &str) -> Self {
        let mut address = Address::empty(true);
        address.set_phone(phone, true, false);
        address
    }

    /// A service-centre address. No auto-detection; the default
    /// international ISDN type applies.
    pub fn service_center(phone: &str) -> Self {
        let mut address = Address::empty(false);
        address.set_phone(phone, false, true);
        address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn is_address(&self) -> bool {
        self.is_address
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn set_type(&mut self, address_type: AddressType) {
        self.address_type = address_type;
    }

    /// Sets the phone and re-derives `size` and `encoded`.
    ///
    /// `detect` runs type auto-detection (only meaningful for the OA/DA
    /// role); `sc` switches the instance to service-centre sizing.
    pub fn set_phone(&mut self, phone: &str, detect: bool, sc: bool) {
        self.phone = phone.trim().to_string();
        self.is_address = !sc;

        if self.is_address && detect {
            self.detect_type();
        }

        if self.address_type.type_of_number == TypeOfNumber::Alphanumeric {
            let (septets, encoded) = encode_7bit(&self.phone, 0);
            // septets to semi-octets
            self.size = septets * 7 / 4 + usize::from(septets * 7 % 4 != 0);
            self.encoded = encoded;
            return;
        }

        let clear: String = self
            .phone
            .chars()
            .filter(|c| matches!(c, '0'..='9' | 'a'..='c' | 'A'..='C' | '*' | '#'))
            .collect();

        // service-centre addresses count octets, OA/DA count digits
        self.size = if sc {
            1 + clear.len().div_ceil(2)
        } else {
            clear.len()
        };

        self.encoded = clear.chars().map(map_filter_encode).collect();
    }

    fn detect_type(&mut self) {
        let phone = self.phone.trim().to_string();

        if let Some(rest) = phone.strip_prefix('+') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                self.phone = rest.to_string();
                self.address_type.type_of_number = TypeOfNumber::International;
                return;
            }
        }

        if let Some(rest) = phone.strip_prefix("00") {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                self.phone = rest.to_string();
                self.address_type.type_of_number = TypeOfNumber::International;
                return;
            }
        }

        if !phone.is_empty() && phone.bytes().all(|b| b.is_ascii_digit()) {
            self.phone = phone;
            self.address_type.type_of_number = TypeOfNumber::Unknown;
            return;
        }

        self.address_type.type_of_number = TypeOfNumber::Alphanumeric;
    }

    /// Serializes as `size + type + payload`, nibble-swapping digit pairs
    /// with an `F` pad, or emitting the packed septets for alphanumeric
    /// addresses. A zero-size address is just the length byte.
    pub fn encode(&self) -> String {
        let mut out = format!("{:02X}", self.size);

        if self.size == 0 {
            return out;
        }

        let _ = write!(out, "{:02X}", self.address_type.value());

        if self.address_type.type_of_number == TypeOfNumber::Alphanumeric {
            out.push_str(&self.encoded);
            return out;
        }

        let digits: Vec<char> = self.encoded.chars().collect();
        for pair in digits.chunks(2) {
            let low = pair[0];
            let high = pair.get(1).copied().unwrap_or('F');
            out.push(high);
            out.push(low);
        }

        out
    }

    /// Reads one address field off the cursor.
    ///
    /// OA/DA fields (`is_address`) size by semi-octets; service-centre
    /// fields size by octets with the length byte counting itself. A zero
    /// size consumes nothing beyond the length byte.
    pub fn decode(cursor: &mut HexCursor, is_address: bool) -> PduResult<Self> {
        let mut size = cursor.take_byte()? as usize;

        if size == 0 {
            return Ok(Address::empty(is_address));
        }

        let octets = if is_address {
            size.div_ceil(2)
        } else {
            size -= 1;
            let octets = size;
            size *= 2; // to semi-octets for the trim below
            octets
        };

        let address_type = AddressType::from_byte(cursor.take_byte()?);
        let hex = cursor.take(octets * 2);
        if hex.len() < octets * 2 {
            return Err(PduError::MalformedPdu("address payload truncated"));
        }

        let mut address = Address::empty(is_address);
        address.address_type = address_type;

        if address_type.type_of_number == TypeOfNumber::Alphanumeric {
            let septets = size * 4 / 7;
            let phone = decode_7bit(&hex, Some(septets), 0);
            address.set_phone(&phone, false, !is_address);
            return Ok(address);
        }

        // drop the trailing pad nibble of octet-sized fields
        if !is_address && hex.as_bytes().get(size.wrapping_sub(2)) == Some(&b'F') {
            size -= 1;
        }

        let mut phone = String::new();
        for pair in hex.as_bytes().chunks(2) {
            phone.push_str(&map_filter_decode(pair));
        }
        phone.truncate(size);

        address.set_phone(&phone, false, !is_address);
        Ok(address)
    }
}

/// Encodes the non-decimal digits `* # a b c` as nibbles A-E.
fn map_filter_encode(digit: char) -> char {
    match digit {
        '*' => 'A',
        '#' => 'B',
        'a' | 'A' => 'C',
        'b' | 'B' => 'D',
        'c' | 'C' => 'E',
        other => other,
    }
}

/// Decodes one wire octet (two hex chars) back to digits, reversing the
/// semi-octet swap; the low special byte values map back to `* # a b c`.
fn map_filter_decode(pair: &[u8]) -> String {
    let text: String = pair.iter().map(|&b| char::from(b)).collect();
    match u8::from_str_radix(&text, 16) {
        Ok(0x0A) => "*".to_string(),
        Ok(0x0B) => "#".to_string(),
        Ok(0x0C) => "a".to_string(),
        Ok(0x0D) => "b".to_string(),
        Ok(0x0E) => "c".to_string(),
        _ => text.chars().rev().collect(),
    }
}
