// ABOUTME: Service-centre timestamp (SCTS) codec: BCD digit-reversed pairs
// ABOUTME: plus a signed quarter-hour timezone nibble pair

use crate::cursor::HexCursor;
use crate::{PduError, PduResult};
use chrono::{
    DateTime, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use std::fmt::Write;

/// A service-centre or discharge timestamp.
///
/// Stores the true UTC instant (whole seconds) together with the signed
/// timezone offset in minutes, quarter-hour granularity. The offset
/// round-trips losslessly through the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    time: DateTime<Utc>,
    tz_minutes: i32,
}

impl Timestamp {
    pub fn new(time: DateTime<Utc>, tz_minutes: i32) -> Self {
        Timestamp {
            time: time.with_nanosecond(0).unwrap_or(time),
            tz_minutes,
        }
    }

    /// The current instant with the machine's local offset.
    pub fn now() -> Self {
        let local = chrono::Local::now();
        Timestamp::new(local.with_timezone(&Utc), local.offset().local_minus_utc() / 60)
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn tz_minutes(&self) -> i32 {
        self.tz_minutes
    }

    /// Reads the seven digit-reversed byte pairs off the cursor.
    ///
    /// The first six pairs (year through second) parse as decimal, with
    /// non-digit pairs decoding to zero; the timezone pair parses as hex.
    /// A year below 71 pivots to 2000+Y, otherwise 1900+Y. Out-of-range
    /// month/day/time fields roll over arithmetically (a zero month lands
    /// in December of the previous year); only structurally short input
    /// is an error.
    pub fn decode(cursor: &mut HexCursor) -> PduResult<Self> {
        let hex = cursor.take(14);
        if hex.is_empty() {
            return Err(PduError::MalformedPdu("timestamp: not enough bytes"));
        }
        if hex.len() < 14 {
            return Err(PduError::MalformedPdu("timestamp: truncated"));
        }

        let mut fields = [0u32; 7];
        for (index, pair) in hex.as_bytes().chunks(2).enumerate() {
            let reversed: String = pair.iter().rev().map(|&b| char::from(b)).collect();
            fields[index] = if index < 6 {
                reversed.parse().unwrap_or(0)
            } else {
                u32::from_str_radix(&reversed, 16).unwrap_or(0)
            };
        }

        // TS 23.040 9.2.3.11: low 7 bits are BCD quarters of an hour,
        // bit 7 is the sign
        let tz_bcd = fields[6] & 0x7F;
        let quarters = (tz_bcd >> 4) * 10 + (tz_bcd & 0x0F);
        let mut tz_minutes = (quarters * 15) as i32;
        if fields[6] & 0x80 != 0 {
            tz_minutes = -tz_minutes;
        }

        let year = if fields[0] > 70 {
            1900 + fields[0]
        } else {
            2000 + fields[0]
        } as i32;

        // month 1 and day 1 anchor the rollover arithmetic
        let base = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let date = if fields[1] >= 1 {
            base.checked_add_months(Months::new(fields[1] - 1))
        } else {
            base.checked_sub_months(Months::new(1))
        }
        .unwrap_or(base);

        let local = NaiveDateTime::new(date, NaiveTime::MIN)
            + Duration::days(i64::from(fields[2]) - 1)
            + Duration::hours(i64::from(fields[3]))
            + Duration::minutes(i64::from(fields[4]))
            + Duration::seconds(i64::from(fields[5]));

        // the wire fields are wall-clock at the carried offset
        let time = Utc.from_utc_datetime(&local) - Duration::minutes(i64::from(tz_minutes));

        Ok(Timestamp { time, tz_minutes })
    }

    /// Serializes back to the fourteen-character wire form, digit-reversing
    /// every pair.
    pub fn encode(&self) -> String {
        let shifted = self.time + Duration::minutes(i64::from(self.tz_minutes));
        let mut plain = shifted.format("%y%m%d%H%M%S").to_string();

        let quarters = (self.tz_minutes.unsigned_abs() / 15) as u8;
        let mut tz_byte = (quarters / 10) * 16 + quarters % 10;
        if self.tz_minutes < 0 {
            tz_byte |= 0x80;
        }
        let _ = write!(plain, "{tz_byte:02X}");

        let mut out = String::with_capacity(14);
        for pair in plain.as_bytes().chunks(2) {
            out.push(char::from(pair[1]));
            out.push(char::from(pair[0]));
        }
        out
    }

    /// `YYYY-MM-DDTHH:MM:SS±HH:MM` rendered on the offset-shifted wall
    /// clock.
    pub fn iso_string(&self) -> String {
        let shifted = self.time + Duration::minutes(i64::from(self.tz_minutes));
        let sign = if self.tz_minutes < 0 { '-' } else { '+' };
        format!(
            "{}{}{:02}:{:02}",
            shifted.format("%Y-%m-%dT%H:%M:%S"),
            sign,
            self.tz_minutes.unsigned_abs() / 60,
            self.tz_minutes.unsigned_abs() % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_positive_offset() {
        let mut cursor = HexCursor::new("81117002122223");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2018-11-07T20:21:22+08:00");
        assert_eq!(scts.tz_minutes(), 480);
        assert_eq!(
            scts.time(),
            Utc.with_ymd_and_hms(2018, 11, 7, 12, 21, 22).unwrap()
        );
    }

    #[test]
    fn decode_negative_offset() {
        let mut cursor = HexCursor::new("8111700212222B");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2018-11-07T20:21:22-08:00");
        assert_eq!(scts.tz_minutes(), -480);
    }

    #[test]
    fn encode_round_trips() {
        for hex in ["81117002122223", "8111700212222B", "11213131211140"] {
            let mut cursor = HexCursor::new(hex);
            let scts = Timestamp::decode(&mut cursor).unwrap();
            assert_eq!(scts.encode(), hex);
        }
    }

    #[test]
    fn hour_offset_from_quarter_bcd() {
        let mut cursor = HexCursor::new("11213131211140");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2011-12-13T13:12:11+01:00");
    }

    #[test]
    fn non_digit_month_rolls_into_previous_year() {
        // month pair "F1" is not decimal and decodes as zero
        let mut cursor = HexCursor::new("81F17002122223");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2017-12-07T20:21:22+08:00");
    }

    #[test]
    fn zero_day_rolls_into_previous_month() {
        let mut cursor = HexCursor::new("81110002122223");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2018-10-31T20:21:22+08:00");
    }

    #[test]
    fn overflowing_hour_rolls_into_next_day() {
        // hour pair "52" decodes as 25
        let mut cursor = HexCursor::new("81117052122223");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert_eq!(scts.iso_string(), "2018-11-08T01:21:22+08:00");
    }

    #[test]
    fn truncated_input_is_fatal() {
        let mut cursor = HexCursor::new("811170");
        assert!(matches!(
            Timestamp::decode(&mut cursor),
            Err(PduError::MalformedPdu(_))
        ));
        let mut empty = HexCursor::new("");
        assert!(matches!(
            Timestamp::decode(&mut empty),
            Err(PduError::MalformedPdu(_))
        ));
    }

    #[test]
    fn century_pivot() {
        let mut cursor = HexCursor::new("99117002122223");
        let scts = Timestamp::decode(&mut cursor).unwrap();
        assert!(scts.iso_string().starts_with("1999-11-07"));
    }
}
