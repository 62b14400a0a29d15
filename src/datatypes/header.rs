// ABOUTME: User data header: the TLV information-element list carried in
// ABOUTME: front of the payload, including concatenation references

use std::fmt::Write;

/// One raw TLV information element; `data` is its hex payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    pub kind: u8,
    pub data: String,
}

impl InformationElement {
    pub fn new(kind: u8, data: impl Into<String>) -> Self {
        InformationElement {
            kind,
            data: data.into(),
        }
    }

    /// Payload length in octets.
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Concatenated-message bookkeeping from IE 0x00 (8-bit reference) or
/// IE 0x08 (16-bit reference).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatInfo {
    pub reference: u16,
    pub segments: u8,
    pub current: u8,
}

/// The user data header of a single part.
///
/// Keeps every element verbatim so unknown kinds survive a round trip;
/// the first concatenation element found is interpreted, the rest stay
/// opaque.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDataHeader {
    ies: Vec<InformationElement>,
    concat: Option<(usize, ConcatInfo)>,
}

const IE_CONCAT_8BIT: u8 = 0x00;
const IE_CONCAT_16BIT: u8 = 0x08;

impl UserDataHeader {
    pub fn from_ies(ies: Vec<InformationElement>) -> Self {
        let concat = ies.iter().enumerate().find_map(|(index, ie)| {
            parse_concat(ie).map(|info| (index, info))
        });
        UserDataHeader { ies, concat }
    }

    /// A header holding a single 16-bit concatenation element.
    pub fn concat(reference: u16, segments: u8, current: u8) -> Self {
        let data = format!("{reference:04X}{segments:02X}{current:02X}");
        UserDataHeader::from_ies(vec![InformationElement::new(IE_CONCAT_16BIT, data)])
    }

    pub fn ies(&self) -> &[InformationElement] {
        &self.ies
    }

    pub fn concat_info(&self) -> Option<ConcatInfo> {
        self.concat.map(|(_, info)| info)
    }

    pub fn reference(&self) -> u16 {
        self.concat.map_or(0, |(_, info)| info.reference)
    }

    pub fn segments(&self) -> u8 {
        self.concat.map_or(1, |(_, info)| info.segments)
    }

    pub fn current(&self) -> u8 {
        self.concat.map_or(1, |(_, info)| info.current)
    }

    /// Replaces the interpreted concatenation element, appending one if
    /// the header has none.
    pub fn set_concat(&mut self, info: ConcatInfo) {
        let data = format!(
            "{:04X}{:02X}{:02X}",
            info.reference, info.segments, info.current
        );
        match self.concat {
            Some((index, _)) => {
                self.ies[index] = InformationElement::new(IE_CONCAT_16BIT, data);
                self.concat = Some((index, info));
            }
            None => {
                self.ies.push(InformationElement::new(IE_CONCAT_16BIT, data));
                self.concat = Some((self.ies.len() - 1, info));
            }
        }
    }

    /// Header size in octets, excluding the length byte itself.
    pub fn size(&self) -> usize {
        self.ies.iter().map(|ie| 2 + ie.len()).sum()
    }

    /// UDHL byte followed by every element as kind, length, payload.
    pub fn encode(&self) -> String {
        let mut out = format!("{:02X}", self.size());
        for ie in &self.ies {
            let _ = write!(out, "{:02X}{:02X}{}", ie.kind, ie.len(), ie.data);
        }
        out
    }
}

/// Interprets a concatenation element; payloads of the wrong length stay
/// opaque.
fn parse_concat(ie: &InformationElement) -> Option<ConcatInfo> {
    let bytes: Vec<u8> = ie
        .data
        .as_bytes()
        .chunks(2)
        .filter_map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect();

    match (ie.kind, bytes.as_slice()) {
        (IE_CONCAT_8BIT, [reference, segments, current]) => Some(ConcatInfo {
            reference: u16::from(*reference),
            segments: *segments,
            current: *current,
        }),
        (IE_CONCAT_16BIT, [hi, lo, segments, current]) => Some(ConcatInfo {
            reference: u16::from_be_bytes([*hi, *lo]),
            segments: *segments,
            current: *current,
        }),
        _ => None,
    }
}
