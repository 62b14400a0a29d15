// ABOUTME: Data coding scheme byte: text alphabet selection, compression
// ABOUTME: flag and optional message class

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The text alphabet selected by the DCS bits 3-2.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// GSM 7-bit default alphabet, packed septets.
    #[default]
    Default = 0x00,
    /// 8-bit data.
    EightBit = 0x01,
    /// UCS-2 big-endian.
    Ucs2 = 0x02,
    /// Reserved; selecting it for text coding is an error.
    Reserved = 0x03,
}

/// The TP-DCS octet of the general data coding group.
///
/// Layout: `..c k aa ll` — compressed (bit 5), class-present (bit 4),
/// alphabet (bits 3-2), message class (bits 1-0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataCodingScheme {
    pub compressed: bool,
    pub use_message_class: bool,
    pub alphabet: Alphabet,
    pub class: u8,
}

impl DataCodingScheme {
    pub fn from_byte(byte: u8) -> Self {
        DataCodingScheme {
            compressed: byte & 0x20 != 0,
            use_message_class: byte & 0x10 != 0,
            alphabet: Alphabet::try_from((byte >> 2) & 0x03).unwrap_or(Alphabet::Reserved),
            class: byte & 0x03,
        }
    }

    pub fn value(&self) -> u8 {
        (u8::from(self.compressed) << 5)
            | (u8::from(self.use_message_class) << 4)
            | (u8::from(self.alphabet) << 2)
            | (self.class & 0x03)
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}", self.value())
    }

    pub fn set_alphabet(&mut self, alphabet: Alphabet) {
        self.alphabet = alphabet;
    }

    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }
}
