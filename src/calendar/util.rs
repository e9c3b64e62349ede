use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Month, Weekday, Weekday::*};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

/// No Gregorian month spans more than six week rows
pub const MAX_ROWS: u8 = 6;

pub(super) trait WeekdayExt {
    /// Column of this weekday in a grid whose first column is `start`
    fn column(&self, start: WeekStart) -> u8;
}

impl WeekdayExt for Weekday {
    fn column(&self, start: WeekStart) -> u8 {
        let sunday0 = self.number_days_from_sunday();
        let offset = start.first_weekday().number_days_from_sunday();
        (sunday0 + DAYS_IN_WEEK - offset) % DAYS_IN_WEEK
    }
}

/// Which weekday occupies column 0 of the grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub const TOKENS: &'static [&'static str] = &["sunday", "monday"];

    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Sunday,
            WeekStart::Monday => Monday,
        }
    }

    /// The weekdays in column order
    pub fn weekdays(self) -> [Weekday; 7] {
        let mut days = [self.first_weekday(); 7];
        for i in 1..days.len() {
            days[i] = days[i - 1].next();
        }
        days
    }

    pub fn column_of(self, wd: Weekday) -> u8 {
        wd.column(self)
    }

    /// The columns holding Saturday and Sunday, in ascending order
    pub fn weekend_columns(self) -> [u8; 2] {
        let mut cols = [Saturday.column(self), Sunday.column(self)];
        cols.sort_unstable();
        cols
    }

    pub fn is_weekend_column(self, col: u8) -> bool {
        self.weekend_columns().contains(&col)
    }

    pub fn token(self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for WeekStart {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<WeekStart, ParseTokenError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(ParseTokenError(s.to_owned())),
        }
    }
}

/// Language of the weekday header row
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekdayLang {
    #[default]
    English,
    Chinese,
}

impl WeekdayLang {
    pub const TOKENS: &'static [&'static str] = &["en", "zh"];

    pub fn label(self, wd: Weekday) -> &'static str {
        let i = usize::from(wd.number_days_from_sunday());
        match self {
            WeekdayLang::English => ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"][i],
            WeekdayLang::Chinese => ["日", "一", "二", "三", "四", "五", "六"][i],
        }
    }

    /// Header labels in column order for the given week start
    pub fn headers(self, start: WeekStart) -> [&'static str; 7] {
        start.weekdays().map(|wd| self.label(wd))
    }

    pub fn token(self) -> &'static str {
        match self {
            WeekdayLang::English => "en",
            WeekdayLang::Chinese => "zh",
        }
    }
}

impl FromStr for WeekdayLang {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<WeekdayLang, ParseTokenError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(WeekdayLang::English),
            "zh" => Ok(WeekdayLang::Chinese),
            _ => Err(ParseTokenError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized token {0:?}")]
pub struct ParseTokenError(String);

pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if time::util::is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_february() {
        assert_eq!(days_in_month(2000, Month::February), 29);
        assert_eq!(days_in_month(1900, Month::February), 28);
        assert_eq!(days_in_month(2024, Month::February), 29);
        assert_eq!(days_in_month(2023, Month::February), 28);
    }

    #[test]
    fn test_days_in_month_agrees_with_time() {
        for year in [1600, 1899, 1900, 1999, 2000, 2023, 2024, 2100] {
            let mut month = Month::January;
            for _ in 0..12 {
                let expected = time::util::is_leap_year(year);
                assert_eq!(
                    days_in_month(year, Month::February) == 29,
                    expected,
                    "leap mismatch for {year}"
                );
                assert!((28..=31).contains(&days_in_month(year, month)));
                month = month.next();
            }
        }
    }

    #[test]
    fn test_columns_sunday_first() {
        assert_eq!(WeekStart::Sunday.column_of(Sunday), 0);
        assert_eq!(WeekStart::Sunday.column_of(Wednesday), 3);
        assert_eq!(WeekStart::Sunday.column_of(Saturday), 6);
    }

    #[test]
    fn test_columns_monday_first() {
        assert_eq!(WeekStart::Monday.column_of(Monday), 0);
        assert_eq!(WeekStart::Monday.column_of(Wednesday), 2);
        assert_eq!(WeekStart::Monday.column_of(Sunday), 6);
    }

    #[test]
    fn test_weekend_columns() {
        assert_eq!(WeekStart::Sunday.weekend_columns(), [0, 6]);
        assert_eq!(WeekStart::Monday.weekend_columns(), [5, 6]);
        assert!(WeekStart::Monday.is_weekend_column(5));
        assert!(!WeekStart::Monday.is_weekend_column(0));
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            WeekdayLang::English.headers(WeekStart::Sunday),
            ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"]
        );
        assert_eq!(
            WeekdayLang::Chinese.headers(WeekStart::Monday),
            ["一", "二", "三", "四", "五", "六", "日"]
        );
    }

    #[test]
    fn test_parse_week_start() {
        assert_eq!("Monday".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert_eq!(" sun ".parse::<WeekStart>(), Ok(WeekStart::Sunday));
        assert!("tuesday".parse::<WeekStart>().is_err());
    }
}
