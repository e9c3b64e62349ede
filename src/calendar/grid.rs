use super::util::{days_in_month, WeekStart, DAYS_IN_WEEK, MAX_ROWS};
use thiserror::Error;
use time::{Date, Month};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellKind {
    Blank,
    Day(u8),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub kind: CellKind,
    pub row: u8,
    pub col: u8,
    pub is_weekend: bool,
}

impl GridCell {
    pub fn day(&self) -> Option<u8> {
        match self.kind {
            CellKind::Day(d) => Some(d),
            CellKind::Blank => None,
        }
    }
}

/// The cells of one month laid out in week rows.  Leading blanks pad the
/// first row up to the weekday of the 1st; nothing pads the last row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarGrid {
    year: i32,
    month: Month,
    week_start: WeekStart,
    leading_blanks: u8,
    days_in_month: u8,
    cells: Vec<GridCell>,
}

impl CalendarGrid {
    /// Lay out `month` (1-12) of `year`.  Fails if the month is out of range
    /// or the year is beyond what [`time::Date`] can represent.
    pub fn build(year: i32, month: u8, week_start: WeekStart) -> Result<CalendarGrid, InvalidDate> {
        let invalid = |_| InvalidDate { year, month };
        let month = Month::try_from(month).map_err(invalid)?;
        let first = Date::from_calendar_date(year, month, 1).map_err(invalid)?;
        let leading_blanks = week_start.column_of(first.weekday());
        let days_in_month = days_in_month(year, month);
        let cells = (0..leading_blanks + days_in_month)
            .map(|i| {
                let col = i % DAYS_IN_WEEK;
                GridCell {
                    kind: match i.checked_sub(leading_blanks) {
                        Some(d) => CellKind::Day(d + 1),
                        None => CellKind::Blank,
                    },
                    row: i / DAYS_IN_WEEK,
                    col,
                    is_weekend: week_start.is_weekend_column(col),
                }
            })
            .collect::<Vec<_>>();
        debug_assert!(
            cells.len() <= usize::from(MAX_ROWS * DAYS_IN_WEEK),
            "a month should never need more than six rows"
        );
        tracing::trace!(
            year,
            month = u8::from(month),
            %week_start,
            leading_blanks,
            days_in_month,
            "built calendar grid"
        );
        Ok(CalendarGrid {
            year,
            month,
            week_start,
            leading_blanks,
            days_in_month,
            cells,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_number(&self) -> u8 {
        u8::from(self.month)
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn leading_blanks(&self) -> u8 {
        self.leading_blanks
    }

    pub fn days_in_month(&self) -> u8 {
        self.days_in_month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Number of week rows actually occupied (4 to 6)
    pub fn row_count(&self) -> u8 {
        self.cells.last().map_or(0, |c| c.row + 1)
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.iter().filter(|c| c.day().is_some())
    }

    pub fn cell_for_day(&self, day: u8) -> Option<&GridCell> {
        if !(1..=self.days_in_month).contains(&day) {
            return None;
        }
        self.cells
            .get(usize::from(self.leading_blanks) + usize::from(day) - 1)
    }

    /// `YYYY-MM`, as shown in the card title and used in export file names
    pub fn title(&self) -> String {
        format!("{}-{:02}", self.year, self.month_number())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid calendar month: year {year}, month {month}")]
pub struct InvalidDate {
    pub year: i32,
    pub month: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_grids() -> impl Iterator<Item = CalendarGrid> {
        (1890..=2110).flat_map(|year| {
            (1..=12).flat_map(move |month| {
                [WeekStart::Sunday, WeekStart::Monday]
                    .map(|ws| CalendarGrid::build(year, month, ws).unwrap())
            })
        })
    }

    #[test]
    fn test_cell_count() {
        for grid in all_grids() {
            assert_eq!(
                grid.cells().len(),
                usize::from(grid.leading_blanks()) + usize::from(grid.days_in_month()),
                "{}",
                grid.title()
            );
            assert!((28..=31).contains(&grid.days_in_month()));
            assert!(grid.leading_blanks() < 7);
        }
    }

    #[test]
    fn test_coordinates() {
        for grid in all_grids() {
            for (i, cell) in grid.cells().iter().enumerate() {
                assert_eq!(usize::from(cell.row), i / 7);
                assert_eq!(usize::from(cell.col), i % 7);
                assert!(cell.row < MAX_ROWS);
            }
        }
    }

    #[test]
    fn test_days_contiguous() {
        for grid in all_grids() {
            let days = grid.day_cells().filter_map(GridCell::day).collect::<Vec<_>>();
            let expected = (1..=grid.days_in_month()).collect::<Vec<_>>();
            assert_eq!(days, expected, "{}", grid.title());
            assert!(grid.cells()[..usize::from(grid.leading_blanks())]
                .iter()
                .all(|c| c.kind == CellKind::Blank));
        }
    }

    #[test]
    fn test_weekend_flags() {
        for grid in all_grids() {
            let weekend = match grid.week_start() {
                WeekStart::Sunday => [0, 6],
                WeekStart::Monday => [5, 6],
            };
            for cell in grid.cells() {
                assert_eq!(cell.is_weekend, weekend.contains(&cell.col));
            }
        }
    }

    #[test]
    fn test_march_2026() {
        // 2026-03-01 is a Sunday
        let sun = CalendarGrid::build(2026, 3, WeekStart::Sunday).unwrap();
        assert_eq!(sun.leading_blanks(), 0);
        assert_eq!(sun.cells().len(), 31);
        assert_eq!(sun.row_count(), 5);
        let mon = CalendarGrid::build(2026, 3, WeekStart::Monday).unwrap();
        assert_eq!(mon.leading_blanks(), 6);
        assert_eq!(mon.cells().len(), 37);
        assert_eq!(mon.row_count(), 6);
        let first = mon.cell_for_day(1).unwrap();
        assert_eq!((first.row, first.col, first.is_weekend), (0, 6, true));
        let last = mon.cell_for_day(31).unwrap();
        assert_eq!((last.row, last.col, last.is_weekend), (5, 1, false));
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(
            CalendarGrid::build(2000, 2, WeekStart::Sunday).unwrap().days_in_month(),
            29
        );
        assert_eq!(
            CalendarGrid::build(1900, 2, WeekStart::Sunday).unwrap().days_in_month(),
            28
        );
        assert_eq!(
            CalendarGrid::build(2024, 2, WeekStart::Monday).unwrap().days_in_month(),
            29
        );
        assert_eq!(
            CalendarGrid::build(2023, 2, WeekStart::Monday).unwrap().days_in_month(),
            28
        );
    }

    #[test]
    fn test_february_2015_fits_four_rows() {
        // 2015-02-01 is a Sunday and the month has 28 days
        let grid = CalendarGrid::build(2015, 2, WeekStart::Sunday).unwrap();
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn test_idempotent() {
        let a = CalendarGrid::build(2025, 10, WeekStart::Monday).unwrap();
        let b = CalendarGrid::build(2025, 10, WeekStart::Monday).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            CalendarGrid::build(2025, 0, WeekStart::Sunday),
            Err(InvalidDate {
                year: 2025,
                month: 0
            })
        );
        assert!(CalendarGrid::build(2025, 13, WeekStart::Monday).is_err());
    }

    #[test]
    fn test_year_out_of_range() {
        assert!(CalendarGrid::build(100_000, 1, WeekStart::Sunday).is_err());
    }

    #[test]
    fn test_cell_for_day_bounds() {
        let grid = CalendarGrid::build(2025, 4, WeekStart::Sunday).unwrap();
        assert!(grid.cell_for_day(0).is_none());
        assert!(grid.cell_for_day(31).is_none());
        assert_eq!(grid.cell_for_day(30).and_then(GridCell::day), Some(30));
    }

    #[test]
    fn test_title() {
        let grid = CalendarGrid::build(2026, 3, WeekStart::Sunday).unwrap();
        assert_eq!(grid.title(), "2026-03");
    }
}
