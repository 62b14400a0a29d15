// ABOUTME: Message payload: splits outgoing text into concatenated parts
// ABOUTME: and reassembles parts arriving out of order

use crate::datatypes::{Alphabet, DataCodingScheme, Part, PduFlags, UserDataHeader};
use crate::encoding;
use crate::{PduError, PduResult};
use rand::Rng;
use tracing::debug;

/// The complete text payload of a message and the wire parts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Data {
    text: String,
    size: usize,
    is_unicode: bool,
    parts: Vec<Part>,
}

impl Data {
    /// Octets taken by a UDHL byte plus a 16-bit concatenation element.
    pub const HEADER_SIZE: usize = 7;

    /// Segments `text` into parts, updating the type byte and data coding
    /// scheme to match. Multipart references come from the thread RNG.
    pub fn from_text(
        text: &str,
        flags: &mut PduFlags,
        dcs: &mut DataCodingScheme,
    ) -> PduResult<Self> {
        Data::from_text_with_rng(text, flags, dcs, &mut rand::thread_rng())
    }

    /// [`from_text`](Data::from_text) with a caller-supplied RNG for the
    /// concatenation reference.
    pub fn from_text_with_rng<R: Rng>(
        text: &str,
        flags: &mut PduFlags,
        dcs: &mut DataCodingScheme,
        rng: &mut R,
    ) -> PduResult<Self> {
        let is_unicode = text.chars().any(|symbol| symbol as u32 > 0xC0);
        let size = text.chars().count();

        let mut header_size = Data::HEADER_SIZE;
        let mut max = encoding::LIMIT_NORMAL;

        if is_unicode {
            max = encoding::LIMIT_UNICODE;
            // UCS-2 text is never compressed
            dcs.set_compressed(false);
            dcs.set_alphabet(Alphabet::Ucs2);
        }

        if dcs.compressed {
            max = encoding::LIMIT_COMPRESS;
            header_size += 1;
        }

        let chunks = split_chunks(text, size, max, header_size);
        let multipart = chunks.len() > 1;
        let segments = chunks.len() as u8;
        let reference = rng.gen_range(0..0xFFFFu16);

        if multipart {
            flags.user_data_header = true;
        }

        let mut parts = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.into_iter().enumerate() {
            let header = multipart
                .then(|| UserDataHeader::concat(reference, segments, index as u8 + 1));

            let (mut part_size, data) = match dcs.alphabet {
                Alphabet::Default => encoding::encode_7bit(&chunk, 0),
                Alphabet::EightBit => encoding::encode_8bit(&chunk),
                Alphabet::Ucs2 => encoding::encode_ucs2(&chunk),
                Alphabet::Reserved => return Err(PduError::UnknownAlphabet(dcs.value())),
            };

            if multipart {
                // the length field counts septets for the 7-bit alphabet,
                // so the header octets convert before they are added
                part_size += if dcs.alphabet == Alphabet::Default {
                    (header_size * 8).div_ceil(7)
                } else {
                    header_size
                };
            }

            parts.push(Part::new(data, part_size, chunk, header));
        }

        Ok(Data {
            text: text.to_string(),
            size,
            is_unicode,
            parts,
        })
    }

    pub(crate) fn from_parsed(part: Part, is_unicode: bool) -> Self {
        Data {
            text: part.text.clone(),
            size: part.size,
            is_unicode,
            parts: vec![part],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_unicode(&self) -> bool {
        self.is_unicode
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Merges the parts of another message into this one.
    ///
    /// Every part must carry a header naming the same concatenation
    /// reference and segment count; parts whose sequence number is already
    /// present, in the receiver or earlier in the same merge, are skipped.
    /// Nothing is inserted if any part fails the check. Parts are kept
    /// sorted by sequence number and the text is rebuilt after the merge.
    pub fn append(&mut self, other: &Data) -> PduResult<()> {
        let mut incoming: Vec<Part> = Vec::new();
        for part in other.parts() {
            if !is_collected(self.parts.iter().chain(incoming.iter()), part)? {
                incoming.push(part.clone());
            }
        }

        debug!(
            appended = incoming.len(),
            total = self.parts.len() + incoming.len(),
            "merged message parts"
        );

        self.parts.extend(incoming);
        self.parts
            .sort_by_key(|part| part.header.as_ref().map_or(1, UserDataHeader::current));
        self.text = self.parts.iter().map(|part| part.text.as_str()).collect();

        Ok(())
    }

}

fn is_collected<'a>(
    held: impl Iterator<Item = &'a Part>,
    part: &Part,
) -> PduResult<bool> {
    for existing in held {
        let (incoming, collected) = match (&part.header, &existing.header) {
            (Some(incoming), Some(collected)) => (incoming, collected),
            _ => return Err(PduError::MissingHeader),
        };

        if incoming.reference() != collected.reference()
            || incoming.segments() != collected.segments()
        {
            return Err(PduError::PartFromDifferentMessage);
        }

        if incoming.current() == collected.current() {
            return Ok(true);
        }
    }

    Ok(false)
}

fn split_chunks(text: &str, size: usize, max: usize, header_size: usize) -> Vec<String> {
    if size <= max {
        return vec![text.to_string()];
    }

    let step = max - header_size;
    let symbols: Vec<char> = text.chars().collect();
    symbols
        .chunks(step)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_7bit;

    fn concat_part(reference: u16, segments: u8, current: u8, text: &str) -> Part {
        let (size, data) = encode_7bit(text, 0);
        Part::new(
            data,
            size + 8, // header septet footprint
            text.into(),
            Some(UserDataHeader::concat(reference, segments, current)),
        )
    }

    #[test]
    fn short_text_is_a_single_part() {
        let mut flags = PduFlags::submit();
        let mut dcs = DataCodingScheme::default();
        let data = Data::from_text("Hello, world!", &mut flags, &mut dcs).unwrap();

        assert_eq!(data.parts().len(), 1);
        assert!(data.parts()[0].header.is_none());
        assert!(!flags.user_data_header);
        assert_eq!(dcs.alphabet, Alphabet::Default);
    }

    #[test]
    fn long_text_splits_with_a_shared_reference() {
        let text = "a".repeat(300);
        let mut flags = PduFlags::submit();
        let mut dcs = DataCodingScheme::default();
        let data = Data::from_text(&text, &mut flags, &mut dcs).unwrap();

        assert_eq!(data.parts().len(), 3);
        assert!(flags.user_data_header);

        let reference = data.parts()[0].header.as_ref().unwrap().reference();
        for (index, part) in data.parts().iter().enumerate() {
            let header = part.header.as_ref().unwrap();
            assert_eq!(header.reference(), reference);
            assert_eq!(header.segments(), 3);
            assert_eq!(header.current(), index as u8 + 1);
        }
    }

    #[test]
    fn unicode_text_forces_ucs2() {
        let mut flags = PduFlags::submit();
        let mut dcs = DataCodingScheme::default();
        let data = Data::from_text("Привет", &mut flags, &mut dcs).unwrap();

        assert!(data.is_unicode());
        assert_eq!(dcs.alphabet, Alphabet::Ucs2);
        assert_eq!(data.parts().len(), 1);
        assert_eq!(data.parts()[0].size, 12);
    }

    #[test]
    fn unicode_splits_at_seventy_symbols() {
        let text = "Ж".repeat(71);
        let mut flags = PduFlags::submit();
        let mut dcs = DataCodingScheme::default();
        let data = Data::from_text(&text, &mut flags, &mut dcs).unwrap();

        assert_eq!(data.parts().len(), 2);
        assert_eq!(data.parts()[0].text.chars().count(), 63);
    }

    #[test]
    fn append_sorts_out_of_order_parts() {
        let mut data = Data::from_parsed(concat_part(9, 2, 2, "world"), false);
        let tail = Data::from_parsed(concat_part(9, 2, 1, "Hello "), false);

        data.append(&tail).unwrap();
        assert_eq!(data.text(), "Hello world");
        assert_eq!(data.parts().len(), 2);
    }

    #[test]
    fn append_is_idempotent() {
        let mut data = Data::from_parsed(concat_part(9, 2, 1, "Hello "), false);
        let tail = Data::from_parsed(concat_part(9, 2, 2, "world"), false);

        data.append(&tail).unwrap();
        data.append(&tail).unwrap();
        assert_eq!(data.parts().len(), 2);
        assert_eq!(data.text(), "Hello world");
    }

    #[test]
    fn duplicates_inside_the_donor_collapse() {
        let mut data = Data::from_parsed(concat_part(9, 3, 1, "one "), false);
        let duplicate = concat_part(9, 3, 2, "two ");
        let donor = Data {
            text: String::new(),
            size: 0,
            is_unicode: false,
            parts: vec![duplicate.clone(), duplicate],
        };

        data.append(&donor).unwrap();
        assert_eq!(data.parts().len(), 2);
        assert_eq!(data.text(), "one two ");
    }

    #[test]
    fn append_rejects_foreign_parts() {
        let mut data = Data::from_parsed(concat_part(9, 2, 1, "Hello "), false);
        let foreign = Data::from_parsed(concat_part(10, 2, 2, "world"), false);

        assert_eq!(
            data.append(&foreign),
            Err(PduError::PartFromDifferentMessage)
        );
        assert_eq!(data.parts().len(), 1);
    }

    #[test]
    fn append_requires_headers() {
        let (size, hex) = encode_7bit("solo", 0);
        let mut data = Data::from_parsed(Part::new(hex, size, "solo".into(), None), false);
        let tail = Data::from_parsed(concat_part(9, 2, 2, "world"), false);

        assert_eq!(data.append(&tail), Err(PduError::MissingHeader));
    }
}
