//! Text codecs for the three SMS alphabets: GSM 7-bit packed septets,
//! plain 8-bit, and big-endian UCS-2.
//!
//! The 7-bit codec is the interesting one. Septets are packed into octets
//! LSB-first through a FIFO bit buffer; characters outside the default
//! alphabet but present in the extension table become a two-septet escape
//! sequence (`ESC` = 27, then the extension code). An optional run of
//! leading alignment bits (0-6) pads the low bits of the first octet with
//! zeros, used when a user data header occupies a non-septet-aligned number
//! of bits.

use bytes::{BufMut, BytesMut};
use std::fmt::Write;

/// The GSM 03.38 default alphabet, indexed by septet value.
///
/// Slot 27 is the escape septet. Slot 95 holds a backtick filler rather
/// than the section sign; the filler is also what undefined extension
/// slots decode to.
pub const GSM_7BIT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\x1b', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '`', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// The GSM 03.38 extension table, reached through the escape septet.
/// Undefined slots hold the filler glyph.
pub const GSM_7BIT_EXTENSION: [char; 128] = [
    '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
    '`', '`', '`', '`', '^', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
    '`', '`', '`', '`', '`', '`', '`', '`', '{', '}', '`', '`', '`', '`', '`', '\\', //
    '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '[', '~', ']', '`', //
    '|', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
    '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
    '`', '`', '`', '`', '`', '€', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
    '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', '`', //
];

/// Escape septet announcing an extension-table lookup.
const ESCAPE_SEPTET: u32 = 27;

/// Septet emitted for characters in neither table (the space slot).
/// Lossy by design, never an error.
const FALLBACK_SEPTET: u32 = 32;

/// Maximum user data octets per part for the default alphabet.
pub const LIMIT_NORMAL: usize = 140;
/// Maximum user data octets per part for compressed text.
pub const LIMIT_COMPRESS: usize = 160;
/// Maximum user data octets per part for UCS-2 text.
pub const LIMIT_UNICODE: usize = 70;

/// Parses a hex string into octets. Malformed pairs decode as zero; input
/// reaching this point has already been cursor-normalized.
pub(crate) fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        })
        .collect()
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // writing to a String cannot fail
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// Packs `text` into the 7-bit septet stream.
///
/// Returns the number of septets produced and the resulting hex string.
/// `align_bits` (0-6) reserves that many zero bits at the bottom of the
/// first octet.
pub fn encode_7bit(text: &str, align_bits: u8) -> (usize, String) {
    let mut packed = BytesMut::new();
    let mut buf: u32 = 0;
    let mut buf_len: u32 = u32::from(align_bits);
    let mut septets = 0usize;

    for symbol in text.chars() {
        if let Some(code) = GSM_7BIT_ALPHABET.iter().position(|&c| c == symbol) {
            buf |= (code as u32) << buf_len;
            buf_len += 7;
            septets += 1;
        } else if let Some(code) = GSM_7BIT_EXTENSION.iter().position(|&c| c == symbol) {
            buf |= (((code as u32) << 7) | ESCAPE_SEPTET) << buf_len;
            buf_len += 14;
            septets += 2;
        } else {
            buf |= FALLBACK_SEPTET << buf_len;
            buf_len += 7;
            septets += 1;
        }

        while buf_len >= 8 {
            packed.put_u8((buf & 0xFF) as u8);
            buf >>= 8;
            buf_len -= 8;
        }
    }

    if buf_len > 0 {
        // fewer than 8 bits left over
        packed.put_u8(buf as u8);
    }

    (septets, bytes_to_hex(&packed))
}

/// Unpacks a 7-bit septet stream back into text.
///
/// With `septet_count` the decoder stops after exactly that many septets.
/// Without it, decoding runs until the input is exhausted and a final
/// all-zero padding septet is dropped instead of decoding to `@`.
pub fn decode_7bit(hex: &str, septet_count: Option<usize>, align_bits: u8) -> String {
    let data = hex_to_bytes(hex);
    let mut out = String::new();
    let mut pos = 0usize;
    let mut buf: u32 = 0;
    let mut buf_len: u32 = 0;
    let mut done = 0usize;
    let mut in_extension = false;

    let align = u32::from(align_bits) % 7;
    if align != 0 && !data.is_empty() {
        buf = u32::from(data[0]) >> align;
        buf_len = 8 - align;
        pos = 1;
    }

    loop {
        if buf_len < 7 {
            if pos == data.len() {
                break;
            }
            buf |= u32::from(data[pos]) << buf_len;
            pos += 1;
            buf_len += 8;
        }

        let septet = buf & 0x7F;
        buf >>= 7;
        buf_len -= 7;
        done += 1;

        if septet == ESCAPE_SEPTET {
            in_extension = true;
        } else if in_extension {
            out.push(GSM_7BIT_EXTENSION[septet as usize]);
            in_extension = false;
        } else {
            out.push(GSM_7BIT_ALPHABET[septet as usize]);
        }

        match septet_count {
            Some(count) => {
                if done >= count {
                    break;
                }
            }
            None => {
                // only the final (possibly padding) septet remains and it
                // is empty
                if pos == data.len() && buf_len == 7 && buf == 0 {
                    break;
                }
            }
        }
    }

    out
}

/// One byte per character, the character's code point truncated to 8 bits.
/// Code points above 0xFF are not validated.
pub fn encode_8bit(text: &str) -> (usize, String) {
    let mut packed = BytesMut::new();
    for symbol in text.chars() {
        packed.put_u8(symbol as u8);
    }
    (packed.len(), bytes_to_hex(&packed))
}

/// Inverse of [`encode_8bit`]; bytes map through Latin-1.
pub fn decode_8bit(hex: &str) -> String {
    hex_to_bytes(hex).into_iter().map(char::from).collect()
}

/// One big-endian 16-bit unit per character. No surrogate pairs: code
/// points above 0xFFFF are unsupported and truncate.
pub fn encode_ucs2(text: &str) -> (usize, String) {
    let mut packed = BytesMut::new();
    let mut length = 0usize;
    for symbol in text.chars() {
        packed.put_u16(symbol as u16);
        length += 2;
    }
    (length, bytes_to_hex(&packed))
}

/// Inverse of [`encode_ucs2`]. Units that do not form a scalar value
/// decode to the replacement character.
pub fn decode_ucs2(hex: &str) -> String {
    hex_to_bytes(hex)
        .chunks(2)
        .map(|pair| {
            let unit = (u32::from(pair[0]) << 8) | u32::from(*pair.get(1).unwrap_or(&0));
            char::from_u32(unit).unwrap_or('\u{FFFD}')
        })
        .collect()
}
