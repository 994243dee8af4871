//! The temporal scanner.  It reads digit runs and delimiters left to right and
//! narrows the shape by how far the recognizable pattern extends.

use std::convert::TryFrom;

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    SourceStream, SourcePos, Temporal,
    error::{ErrorKind, ParseResult, SyntaxError},
    syntax::TEMPORAL_BEGIN,
};
use super::{CharClassifier, LabelBindings, ParseContext};


/// A zone designator after a time.
enum Zone {
    Utc,
    Offset(FixedOffset),
    Local,
}


impl<CC, S, LB> ParseContext<'_, CC, S, LB>
    where CC: CharClassifier,
          S: SourceStream,
          LB: LabelBindings,
{
    pub(super) fn parse_temporal(&mut self) -> ParseResult<Temporal> {
        let start = self.position();
        self.expect(TEMPORAL_BEGIN)?;

        if self.eat('-') {
            // --MM-DD
            self.expect_temporal('-', start)?;
            let month = self.fixed_digits(2, start)?;
            self.expect_temporal('-', start)?;
            let day = self.fixed_digits(2, start)?;
            // Any year works for validation, as long as it is a leap year.
            return NaiveDate::from_ymd_opt(2000, month, day)
                .map(|_| Temporal::MonthDay { month, day })
                .ok_or_else(|| invalid(start));
        }

        let mut run = String::new();
        self.take_while(&mut run, |ch| ch.is_ascii_digit());

        if run.len() == 2 && self.peek_is(':') {
            let time = self.parse_time_after_hour(&run, start)?;
            return Ok(match self.parse_zone(start)? {
                Zone::Utc => Temporal::OffsetTime(time, utc_offset()),
                Zone::Offset(offset) => Temporal::OffsetTime(time, offset),
                Zone::Local => Temporal::LocalTime(time),
            });
        }
        if run.len() < 4 {
            return Err(invalid(start));
        }
        let year: i32 = run.parse().map_err(|_| invalid(start))?;

        if !self.eat('-') {
            return Ok(Temporal::Year(year));
        }
        let month = self.fixed_digits(2, start)?;
        if !self.eat('-') {
            return if (1 ..= 12).contains(&month) {
                Ok(Temporal::YearMonth { year, month })
            } else {
                Err(invalid(start))
            };
        }
        let day = self.fixed_digits(2, start)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(start))?;

        if !self.eat('T') {
            return Ok(Temporal::LocalDate(date));
        }
        let hour = self.fixed_digits_text(2, start)?;
        let date_time = date.and_time(self.parse_time_after_hour(&hour, start)?);

        Ok(match self.parse_zone(start)? {
            Zone::Utc if !self.peek_is('[') => Temporal::Instant(Utc.from_utc_datetime(&date_time)),
            Zone::Utc => {
                let date_time = utc_offset().from_utc_datetime(&date_time);
                Temporal::ZonedDateTime { date_time, zone: self.parse_zone_name(start)? }
            }
            Zone::Offset(offset) => {
                let date_time = offset.from_local_datetime(&date_time)
                                      .single()
                                      .ok_or_else(|| invalid(start))?;
                if self.peek_is('[') {
                    Temporal::ZonedDateTime { date_time, zone: self.parse_zone_name(start)? }
                } else {
                    Temporal::OffsetDateTime(date_time)
                }
            }
            Zone::Local => Temporal::LocalDateTime(date_time),
        })
    }

    /// `:mm`, optionally `:ss`, optionally `.` and 1 to 9 fraction digits.
    fn parse_time_after_hour(&mut self, hour: &str, start: SourcePos) -> ParseResult<NaiveTime> {
        let hour: u32 = hour.parse().map_err(|_| invalid(start))?;
        self.expect_temporal(':', start)?;
        let minute = self.fixed_digits(2, start)?;
        let mut second = 0;
        let mut nano = 0;
        if self.eat(':') {
            second = self.fixed_digits(2, start)?;
            if self.eat('.') {
                let mut fraction = String::new();
                self.take_while(&mut fraction, |ch| ch.is_ascii_digit());
                if fraction.is_empty() || fraction.len() > 9 {
                    return Err(invalid(start));
                }
                nano = format!("{:0<9}", fraction).parse().map_err(|_| invalid(start))?;
            }
        }
        NaiveTime::from_hms_nano_opt(hour, minute, second, nano).ok_or_else(|| invalid(start))
    }

    /// `Z`, `+hh:mm` or `-hh:mm`, or nothing.
    fn parse_zone(&mut self, start: SourcePos) -> ParseResult<Zone> {
        if self.eat('Z') {
            return Ok(Zone::Utc);
        }
        let sign = if self.eat('+') {
            1
        } else if self.eat('-') {
            -1
        } else {
            return Ok(Zone::Local);
        };
        let hours = self.fixed_digits(2, start)?;
        self.expect_temporal(':', start)?;
        let minutes = self.fixed_digits(2, start)?;
        if minutes >= 60 {
            return Err(invalid(start));
        }
        let seconds = i32::try_from(hours * 3600 + minutes * 60).map_err(|_| invalid(start))?;
        FixedOffset::east_opt(sign * seconds).map(Zone::Offset).ok_or_else(|| invalid(start))
    }

    /// `[Region/City]`
    fn parse_zone_name(&mut self, start: SourcePos) -> ParseResult<String> {
        self.expect_temporal('[', start)?;
        let mut zone = String::new();
        self.take_while(&mut zone, |ch| ch != ']' && !ch.is_whitespace());
        if zone.is_empty() {
            return Err(invalid(start));
        }
        self.expect(']')?;
        Ok(zone)
    }

    fn fixed_digits_text(&mut self, count: usize, start: SourcePos) -> ParseResult<String> {
        let mut digits = String::new();
        for _ in 0 .. count {
            match self.peek_char() {
                Some(ch) if ch.is_ascii_digit() => {
                    digits.push(ch);
                    let _ = self.next_char();
                }
                _ => return Err(invalid(start)),
            }
        }
        Ok(digits)
    }

    fn fixed_digits(&mut self, count: usize, start: SourcePos) -> ParseResult<u32> {
        self.fixed_digits_text(count, start)?.parse().map_err(|_| invalid(start))
    }

    fn expect_temporal(&mut self, ch: char, start: SourcePos) -> ParseResult<()> {
        if self.eat(ch) { Ok(()) } else { Err(invalid(start)) }
    }
}


fn invalid(start: SourcePos) -> SyntaxError {
    SyntaxError::new(ErrorKind::InvalidTemporal, start)
}

fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap_or_else(|| unreachable!())
}


#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDateTime};

    use crate::{
        Document, StrSourceStream, Value,
        error::ErrorKind,
        parser::{Parser, premade::*},
    };
    use super::*;

    fn temporal(input: &str) -> Temporal {
        let doc: Document<PairLabelBindings> = Parser::new(DefaultCharClassifier)
            .parse(StrSourceStream::new(input), PairLabelBindings::default())
            .unwrap();
        match doc.root() {
            Some(Value::Temporal(t)) => t.clone(),
            other => panic!("not a temporal: {:?}", other),
        }
    }

    fn kind(input: &str) -> ErrorKind {
        Parser::new(DefaultCharClassifier)
            .parse(StrSourceStream::new(input), PairLabelBindings::default())
            .unwrap_err()
            .kind
    }

    fn ndt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
    }

    #[test]
    fn narrowing() {
        assert_eq!(temporal("@2017"), Temporal::Year(2017));
        assert_eq!(temporal("@2017-02"), Temporal::YearMonth { year: 2017, month: 2 });
        assert_eq!(temporal("@2017-02-12"),
                   Temporal::LocalDate(NaiveDate::from_ymd_opt(2017, 2, 12).unwrap()));
        assert_eq!(temporal("@--02-29"), Temporal::MonthDay { month: 2, day: 29 });
        assert_eq!(temporal("@2017-02-12T23:29:18.829Z"),
                   Temporal::Instant(Utc.from_utc_datetime(&ndt("2017-02-12T23:29:18.829"))));
        assert_eq!(temporal("@2017-02-12T15:29"),
                   Temporal::LocalDateTime(ndt("2017-02-12T15:29:00")));
        assert_eq!(temporal("@15:29:18.829-08:00"),
                   Temporal::OffsetTime(NaiveTime::from_hms_milli_opt(15, 29, 18, 829).unwrap(),
                                        FixedOffset::west_opt(8 * 3600).unwrap()));
        assert_eq!(temporal("@15:29:18"),
                   Temporal::LocalTime(NaiveTime::from_hms_opt(15, 29, 18).unwrap()));
        assert_eq!(temporal("@15:29Z"),
                   Temporal::OffsetTime(NaiveTime::from_hms_opt(15, 29, 0).unwrap(),
                                        utc_offset()));
    }

    #[test]
    fn offsets_and_zones() {
        let expected = DateTime::parse_from_rfc3339("2017-02-12T15:29:18-08:00").unwrap();
        assert_eq!(temporal("@2017-02-12T15:29:18-08:00"),
                   Temporal::OffsetDateTime(expected));
        match temporal("@2017-02-12T15:29:18-08:00[America/Los_Angeles]") {
            Temporal::ZonedDateTime { date_time, zone } => {
                assert_eq!(date_time, expected);
                assert_eq!(date_time.offset().local_minus_utc(), -8 * 3600);
                assert_eq!(zone, "America/Los_Angeles");
            }
            other => panic!("{:?}", other),
        }
        match temporal("@2017-02-12T23:29:18Z[UTC]") {
            Temporal::ZonedDateTime { zone, .. } => assert_eq!(zone, "UTC"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn fractions() {
        assert_eq!(temporal("@01:02:03.5"),
                   Temporal::LocalTime(NaiveTime::from_hms_milli_opt(1, 2, 3, 500).unwrap()));
        assert_eq!(temporal("@01:02:03.123456789"),
                   Temporal::LocalTime(NaiveTime::from_hms_nano_opt(1, 2, 3, 123_456_789)
                                           .unwrap()));
        assert_eq!(kind("@01:02:03.1234567890"), ErrorKind::InvalidTemporal);
        assert_eq!(kind("@01:02:03."), ErrorKind::InvalidTemporal);
    }

    #[test]
    fn invalid_components() {
        for input in &["@", "@17", "@201", "@2017-13", "@2017-1", "@2017-02-30",
                       "@2017-02-12T24:00", "@25:00", "@12:60", "@12:5",
                       "@--02-30", "@-02-01", "@2017-02-12T10:00+25:00",
                       "@2017-02-12T10:00+01:60", "@2017-02-12T10:00+01",
                       "@2017-02-12T10:00-08:00[]"]
        {
            assert_eq!(kind(input), ErrorKind::InvalidTemporal, "{}", input);
        }
        assert!(matches!(kind("@2017-02-12T10:00Z[UTC"), ErrorKind::UnexpectedEnd{..}));
    }
}
