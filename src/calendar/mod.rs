mod grid;
mod util;
pub use self::grid::{CalendarGrid, CellKind, GridCell, InvalidDate};
pub use self::util::{
    days_in_month, ParseTokenError, WeekStart, WeekdayLang, MAX_ROWS,
};
