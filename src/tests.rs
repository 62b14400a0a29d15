//! Integration tests over reference PDU vectors: parsing, multipart
//! reassembly and serialization round trips

use crate::datatypes::*;
use crate::pdu::{Deliver, Report, Submit};
use crate::{parse, Pdu, PduError};
use crate::cursor::HexCursor;

fn parse_deliver(hex: &str) -> Deliver {
    match parse(hex) {
        Ok(Pdu::Deliver(deliver)) => deliver,
        other => panic!("expected a deliver, got {other:?}"),
    }
}

fn parse_submit(hex: &str) -> Submit {
    match parse(hex) {
        Ok(Pdu::Submit(submit)) => submit,
        other => panic!("expected a submit, got {other:?}"),
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn ucs2_russian_deliver() {
        let deliver = parse_deliver(
            "07919730071111F1000B919746121611F100088111800212222318041F04400438043204350442002C0020043C043804400021",
        );
        assert_eq!(deliver.data.text(), "Привет, мир!");
        assert_eq!(deliver.data.size(), 24);
        assert!(deliver.data.is_unicode());
        assert_eq!(deliver.data_coding_scheme.alphabet, Alphabet::Ucs2);
    }

    #[test]
    fn extended_seven_bit_symbols() {
        let deliver = parse_deliver(
            "07919730071111F1000B919746121611F10000811170021222230A1B5E583C2697CD1B1F",
        );
        assert_eq!(deliver.data.text(), "[abcdef]");
        assert_eq!(deliver.data.size(), 10);

        let deliver = parse_deliver(
            "07919730071111F1000B919746121611F1000081117002122223081B14BD3CA76F52",
        );
        assert_eq!(deliver.data.text(), "{test}");
        assert_eq!(deliver.data.size(), 8);
    }

    #[test]
    fn alphanumeric_originating_address() {
        let deliver = parse_deliver(
            "07911326060032F0000DD0D432DBFC96D30100001121313121114012D7327BFC6E9741F437885A669BDF723A",
        );
        assert_eq!(deliver.service_center.phone(), "31626000230");
        assert_eq!(deliver.address.phone(), "Telfort");
        assert_eq!(deliver.timestamp.iso_string(), "2011-12-13T13:12:11+01:00");
        assert_eq!(deliver.data.text(), "Welcome to Telfort");
    }

    #[test]
    fn negative_timezone_offset() {
        let deliver = parse_deliver(
            "07919730071111F1000B919746121611F100008111700212222B0DC8329BFD6681EE6F399B1C02",
        );
        assert_eq!(deliver.timestamp.iso_string(), "2018-11-07T20:21:22-08:00");
    }

    #[test]
    fn concat_part_carries_its_header() {
        let deliver = parse_deliver(
            "07919730071111F1400B919746121611F10000811170021222230E06080412340201C8329BFD6601",
        );
        assert!(deliver.flags.user_data_header);

        let header = deliver.data.parts()[0].header.as_ref().unwrap();
        assert_eq!(header.reference(), 0x1234);
        assert_eq!(header.segments(), 2);
        assert_eq!(header.current(), 1);
        assert_eq!(deliver.data.text(), "Hello,");
    }

    #[test]
    fn submit_with_relative_validity_period() {
        let mut submit = Submit::new("+999", "Hello").unwrap();
        submit.validity_period = ValidityPeriod::Relative(86400);

        let parsed = parse_submit(&submit.encode());
        assert_eq!(
            parsed.flags.validity_period_format,
            ValidityPeriodFormat::Relative
        );
        assert!(matches!(parsed.validity_period, ValidityPeriod::Relative(_)));
        assert_eq!(parsed.data.text(), "Hello");
    }
}

#[cfg(test)]
mod reassembly_tests {
    use super::*;

    const PART_ONE: &str =
        "07919730071111F1400B919746121611F10000811170021222230E06080412340201C8329BFD6601";
    const PART_TWO: &str =
        "07919730071111F1400B919746121611F10000811170021232230F06080412340202A0FB5BCE268700";

    #[test]
    fn appends_the_tail_part() {
        let mut deliver = parse_deliver(PART_ONE);
        let tail = parse_deliver(PART_TWO);

        deliver.data.append(&tail.data).unwrap();
        assert_eq!(deliver.data.text(), "Hello, world!");
    }

    #[test]
    fn accepts_parts_in_any_order() {
        let mut deliver = parse_deliver(PART_TWO);
        let head = parse_deliver(PART_ONE);

        deliver.data.append(&head.data).unwrap();
        assert_eq!(deliver.data.text(), "Hello, world!");
    }

    #[test]
    fn duplicate_parts_are_skipped() {
        let mut deliver = parse_deliver(PART_ONE);
        let duplicate = parse_deliver(PART_ONE);

        deliver.data.append(&duplicate.data).unwrap();
        assert_eq!(deliver.data.text(), "Hello,");
        assert_eq!(deliver.data.parts().len(), 1);
    }

    #[test]
    fn rejects_parts_of_another_message() {
        let mut deliver = parse_deliver(PART_ONE);
        let foreign = parse_deliver(
            "07919730071111F1400B919746121611F10000811170021232230F06080412350202A0FB5BCE268700",
        );

        assert_eq!(
            deliver.data.append(&foreign.data),
            Err(PduError::PartFromDifferentMessage)
        );
    }

    #[test]
    fn rejects_collided_references() {
        // same reference, different segment count
        let mut deliver = parse_deliver(PART_ONE);
        let collided = parse_deliver(
            "07919730071111F1400B919746121611F10000811170021232230C06080412340302A03A9C05",
        );

        assert_eq!(
            deliver.data.append(&collided.data),
            Err(PduError::PartFromDifferentMessage)
        );
    }

    #[test]
    fn eight_bit_reference_concat() {
        let mut deliver = parse_deliver(
            "07919730071111F1400B919746121611F10000100161916223230D0500032E020190E175DD1D06",
        );
        let tail = parse_deliver(
            "07919730071111F1400B919746121611F10000100161916233230E0500032E020240ED303D4C0F03",
        );

        assert_eq!(deliver.data.parts()[0].header.as_ref().unwrap().reference(), 0x2E);
        deliver.data.append(&tail.data).unwrap();
        assert_eq!(deliver.data.text(), "Hakuna matata");
    }
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn single_part_deliver_vectors() {
        for hex in [
            "07919730071111F1000B919746121611F10000811170021222230DC8329BFD6681EE6F399B1C02",
            "07919730071111F1000B919746121611F1000081117002122223081B14BD3CA76F52",
            "07919730071111F1000B919746121611F100088111800212222318041F04400438043204350442002C0020043C043804400021",
        ] {
            let deliver = parse_deliver(hex);
            let start = deliver.start_hex();
            assert_eq!(deliver.data.parts()[0].encode(&start), hex);
        }
    }

    #[test]
    fn concat_part_re_encodes_verbatim() {
        let hex =
            "07919730071111F1400B919746121611F10000811170021222230E06080412340201C8329BFD6601";
        let deliver = parse_deliver(hex);
        assert_eq!(deliver.encode(), hex);
    }

    #[test]
    fn multipart_submit_survives_shuffled_reassembly() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(8);
        let mut submit = Submit::new("+79642161111", &text).unwrap();

        let encoded = submit.encode();
        let mut lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 3);
        lines.rotate_left(1);

        let mut collector: Option<Submit> = None;
        for line in lines {
            let part = parse_submit(line);
            match &mut collector {
                None => collector = Some(part),
                Some(base) => base.data.append(&part.data).unwrap(),
            }
        }

        assert_eq!(collector.unwrap().data.text(), text);
    }

    #[test]
    fn report_round_trip() {
        let report = Report {
            service_center: Address::service_center("79037011111"),
            flags: PduFlags::report(),
            reference: 0x42,
            address: Address::address("+79642161111"),
            timestamp: Timestamp::decode(&mut HexCursor::new("81117002122223")).unwrap(),
            discharge: Timestamp::decode(&mut HexCursor::new("81117002123223")).unwrap(),
            status: 0x00,
        };

        match parse(&report.encode()) {
            Ok(Pdu::Report(parsed)) => assert_eq!(parsed, report),
            other => panic!("expected a report, got {other:?}"),
        }
    }
}
