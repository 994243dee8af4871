use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    mem,
};

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};


/// The temporal shapes.  Which one a literal produces depends only on how far
/// its text extends, e.g. `2017` is a `Year` and `2017-02` a `YearMonth`.
///
/// Date-times with offsets are equal only when their local date-time and
/// offset are both equal, so `15:29-08:00` and `16:29-07:00` on the same day
/// are different values even though they name the same instant.
#[derive(Clone, Debug)]
pub enum Temporal {
    /// A UTC instant: `2017-02-12T23:29:18.829Z`
    Instant(DateTime<Utc>),
    /// A date-time with an offset and a named zone:
    /// `2017-02-12T15:29:18-08:00[America/Los_Angeles]`
    ZonedDateTime {
        /// The date-time with its offset
        date_time: DateTime<FixedOffset>,
        /// The zone name as written between the brackets
        zone: String,
    },
    /// A date-time with an offset: `2017-02-12T15:29:18-08:00`
    OffsetDateTime(DateTime<FixedOffset>),
    /// A date-time with no zone: `2017-02-12T15:29:18`
    LocalDateTime(NaiveDateTime),
    /// A date: `2017-02-12`
    LocalDate(NaiveDate),
    /// A time with an offset: `15:29:18.829-08:00`
    OffsetTime(NaiveTime, FixedOffset),
    /// A time with no zone: `15:29:18`
    LocalTime(NaiveTime),
    /// A year and month: `2017-02`
    YearMonth {
        /// The year
        year: i32,
        /// The month, 1 to 12
        month: u32,
    },
    /// A month and day of no particular year: `--02-12`
    MonthDay {
        /// The month, 1 to 12
        month: u32,
        /// The day of the month
        day: u32,
    },
    /// A bare year: `2017`
    Year(i32),
}


/// What an offset date-time is compared and hashed by.
fn as_written(dt: &DateTime<FixedOffset>) -> (NaiveDateTime, FixedOffset) {
    (dt.naive_local(), *dt.offset())
}

impl PartialEq for Temporal {
    fn eq(&self, other: &Self) -> bool {
        use Temporal::*;

        match (self, other) {
            (Instant(a), Instant(b)) => a == b,
            (ZonedDateTime{date_time: a, zone: za}, ZonedDateTime{date_time: b, zone: zb}) =>
                as_written(a) == as_written(b) && za == zb,
            (OffsetDateTime(a), OffsetDateTime(b)) => as_written(a) == as_written(b),
            (LocalDateTime(a), LocalDateTime(b)) => a == b,
            (LocalDate(a), LocalDate(b)) => a == b,
            (OffsetTime(a, oa), OffsetTime(b, ob)) => a == b && oa == ob,
            (LocalTime(a), LocalTime(b)) => a == b,
            (YearMonth{year: ya, month: ma}, YearMonth{year: yb, month: mb}) =>
                ya == yb && ma == mb,
            (MonthDay{month: ma, day: da}, MonthDay{month: mb, day: db}) =>
                ma == mb && da == db,
            (Year(a), Year(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Temporal {}

impl Hash for Temporal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Temporal::*;

        mem::discriminant(self).hash(state);
        match self {
            Instant(t) => t.hash(state),
            ZonedDateTime{date_time, zone} => {
                as_written(date_time).hash(state);
                zone.hash(state);
            }
            OffsetDateTime(dt) => as_written(dt).hash(state),
            LocalDateTime(dt) => dt.hash(state),
            LocalDate(d) => d.hash(state),
            OffsetTime(t, offset) => (t, offset).hash(state),
            LocalTime(t) => t.hash(state),
            YearMonth{year, month} => (year, month).hash(state),
            MonthDay{month, day} => (month, day).hash(state),
            Year(y) => y.hash(state),
        }
    }
}


fn write_date<D: Datelike>(f: &mut fmt::Formatter<'_>, d: &D) -> fmt::Result {
    write!(f, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day())
}

fn write_time<T: Timelike>(f: &mut fmt::Formatter<'_>, t: &T) -> fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())?;
    let nanos = t.nanosecond();
    if nanos != 0 {
        let fraction = format!("{:09}", nanos);
        write!(f, ".{}", fraction.trim_end_matches('0'))?;
    }
    Ok(())
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: &FixedOffset) -> fmt::Result {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    write!(f, "{}{:02}:{:02}", sign, secs / 3600, secs % 3600 / 60)
}

/// Writes the form that the temporal scanner reads, without the leading
/// marker.
impl Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Instant(dt) => {
                write_date(f, dt)?;
                f.write_str("T")?;
                write_time(f, dt)?;
                f.write_str("Z")
            }
            Temporal::ZonedDateTime{date_time, zone} => {
                write_date(f, date_time)?;
                f.write_str("T")?;
                write_time(f, date_time)?;
                write_offset(f, date_time.offset())?;
                write!(f, "[{}]", zone)
            }
            Temporal::OffsetDateTime(dt) => {
                write_date(f, dt)?;
                f.write_str("T")?;
                write_time(f, dt)?;
                write_offset(f, dt.offset())
            }
            Temporal::LocalDateTime(dt) => {
                write_date(f, dt)?;
                f.write_str("T")?;
                write_time(f, dt)
            }
            Temporal::LocalDate(d) => write_date(f, d),
            Temporal::OffsetTime(t, offset) => {
                write_time(f, t)?;
                write_offset(f, offset)
            }
            Temporal::LocalTime(t) => write_time(f, t),
            Temporal::YearMonth{year, month} => write!(f, "{:04}-{:02}", year, month),
            Temporal::MonthDay{month, day} => write!(f, "--{:02}-{:02}", month, day),
            Temporal::Year(year) => write!(f, "{:04}", year),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display() {
        let date = NaiveDate::from_ymd_opt(2017, 2, 12).unwrap();
        let time = NaiveTime::from_hms_milli_opt(23, 29, 18, 829).unwrap();
        let pst = FixedOffset::west_opt(8 * 3600).unwrap();

        assert_eq!(Temporal::Year(2017).to_string(), "2017");
        assert_eq!(Temporal::YearMonth{year: 2017, month: 2}.to_string(), "2017-02");
        assert_eq!(Temporal::MonthDay{month: 2, day: 9}.to_string(), "--02-09");
        assert_eq!(Temporal::LocalDate(date).to_string(), "2017-02-12");
        assert_eq!(Temporal::Instant(Utc.from_utc_datetime(&date.and_time(time)))
                       .to_string(),
                   "2017-02-12T23:29:18.829Z");
        assert_eq!(Temporal::OffsetTime(time, pst).to_string(), "23:29:18.829-08:00");
        assert_eq!(Temporal::LocalTime(NaiveTime::from_hms_opt(1, 2, 0).unwrap())
                       .to_string(),
                   "01:02:00");

        let dt = pst.from_local_datetime(&date.and_time(time)).unwrap();
        assert_eq!(Temporal::ZonedDateTime{date_time: dt,
                                           zone: "America/Los_Angeles".into()}
                       .to_string(),
                   "2017-02-12T23:29:18.829-08:00[America/Los_Angeles]");
    }

    #[test]
    fn offsets_distinguish() {
        use std::collections::HashSet;

        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        let mst = FixedOffset::west_opt(7 * 3600).unwrap();
        let a = pst.with_ymd_and_hms(2017, 2, 12, 15, 29, 18).unwrap();
        let b = mst.with_ymd_and_hms(2017, 2, 12, 16, 29, 18).unwrap();
        assert_eq!(a, b);

        assert_ne!(Temporal::OffsetDateTime(a), Temporal::OffsetDateTime(b));
        assert_eq!(Temporal::OffsetDateTime(a), Temporal::OffsetDateTime(a));
        let zoned = |dt, zone: &str| Temporal::ZonedDateTime{date_time: dt, zone: zone.into()};
        assert_ne!(zoned(a, "America/Los_Angeles"), zoned(b, "America/Los_Angeles"));
        assert_ne!(zoned(a, "America/Los_Angeles"), zoned(a, "Etc/GMT+8"));
        assert_ne!(Temporal::OffsetDateTime(a), zoned(a, "America/Los_Angeles"));

        let set: HashSet<_> = vec![Temporal::OffsetDateTime(a), Temporal::OffsetDateTime(b),
                                   Temporal::OffsetDateTime(a)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
