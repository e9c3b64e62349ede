use crate::calendar::{CalendarGrid, InvalidDate, WeekStart, WeekdayLang};
use crate::color::Color;
use crate::highlight::{Highlights, RangeLimit, RangeList};
use crate::params::catalog::*;
use crate::params::{ParamError, ParamStore, SetOutcome};
use tracing::{debug, error};

/// Everything that describes one calendar card, plus the grid and
/// highlights derived from it.
///
/// Every mutator finishes by rebuilding the derived state in dependency
/// order (grid, then highlights), so the derived state never lags behind
/// the inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    params: ParamStore,
    ranges: RangeList,
    grid: CalendarGrid,
    highlights: Highlights,
}

impl Card {
    pub fn new(
        params: ParamStore,
        year: i32,
        month: u8,
        ranges: RangeList,
    ) -> Result<Card, InvalidDate> {
        let grid = CalendarGrid::build(year, month, week_start(&params))?;
        let highlights = Highlights::compile(&grid, ranges.as_slice());
        Ok(Card {
            params,
            ranges,
            grid,
            highlights,
        })
    }

    /// The fixed card produced by the batch generator: 500×400, no margin
    /// or shadow, Monday first, Chinese weekday headers, no title, and no
    /// highlighted days
    pub fn batch_preset(year: i32, month: u8) -> Result<Card, InvalidDate> {
        let mut params = ParamStore::default();
        // Lengths are scaled by min(500, 400) / 320 = 1.25, so a base of 16
        // renders at 20px
        for (name, value) in [
            (CARD_W, "500"),
            (CARD_H, "400"),
            (CARD_PAD, "16"),
            (CARD_RADIUS, "16"),
            (CARD_MARGIN, "0"),
            (SHADOW_A, "0"),
            (WD_SIZE, "16"),
            (DT_SIZE, "16"),
            (TITLE_DISPLAY, TITLE_HIDDEN),
            (WD_LANG, "zh"),
            (WEEK_START, "monday"),
        ] {
            if let Err(e) = params.set(name, value) {
                error!(error = %e, "batch preset names an unregistered parameter");
            }
        }
        let mut ranges = RangeList::new();
        if let Some(spec) = ranges.get_mut(0) {
            spec.enabled = false;
        }
        Card::new(params, year, month, ranges)
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn ranges(&self) -> &RangeList {
        &self.ranges
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn year(&self) -> i32 {
        self.grid.year()
    }

    pub fn month(&self) -> u8 {
        self.grid.month_number()
    }

    pub fn week_start(&self) -> WeekStart {
        week_start(&self.params)
    }

    pub fn weekday_lang(&self) -> WeekdayLang {
        self.params
            .token(WD_LANG)
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    pub fn title_shown(&self) -> bool {
        self.params.token(TITLE_DISPLAY).unwrap_or(TITLE_SHOWN) == TITLE_SHOWN
    }

    pub fn set_param(&mut self, name: &str, raw: &str) -> Result<SetOutcome, ParamError> {
        let outcome = self.params.set(name, raw)?;
        self.refresh();
        Ok(outcome)
    }

    pub fn nudge_param(&mut self, name: &str, forward: bool) -> Result<SetOutcome, ParamError> {
        let outcome = self.params.nudge(name, forward)?;
        self.refresh();
        Ok(outcome)
    }

    /// Switches to another month.  On failure the card is left unchanged.
    pub fn set_month(&mut self, year: i32, month: u8) -> Result<(), InvalidDate> {
        self.grid = CalendarGrid::build(year, month, self.week_start())?;
        debug!(year, month, "switched month");
        self.recompile();
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), InvalidDate> {
        let (year, month) = match self.month() {
            12 => (self.year().checked_add(1), 1),
            m => (Some(self.year()), m + 1),
        };
        self.set_month(year.ok_or(InvalidDate { year: i32::MAX, month })?, month)
    }

    pub fn prev_month(&mut self) -> Result<(), InvalidDate> {
        let (year, month) = match self.month() {
            1 => (self.year().checked_sub(1), 12),
            m => (Some(self.year()), m - 1),
        };
        self.set_month(year.ok_or(InvalidDate { year: i32::MIN, month })?, month)
    }

    pub fn add_range(&mut self) -> Result<usize, RangeLimit> {
        let pos = self.ranges.add()?;
        self.recompile();
        Ok(pos)
    }

    /// Removes a range; a no-op returning `false` when it is the last one
    pub fn remove_range(&mut self, pos: usize) -> bool {
        let removed = self.ranges.remove(pos);
        if removed {
            self.recompile();
        }
        removed
    }

    pub fn toggle_range(&mut self, pos: usize) -> bool {
        let Some(spec) = self.ranges.get_mut(pos) else {
            return false;
        };
        spec.enabled = !spec.enabled;
        self.recompile();
        true
    }

    pub fn set_range_days(&mut self, pos: usize, start: i32, end: i32) -> bool {
        let Some(spec) = self.ranges.get_mut(pos) else {
            return false;
        };
        spec.start = start;
        spec.end = end;
        self.recompile();
        true
    }

    pub fn set_range_color(&mut self, pos: usize, color: Color) -> bool {
        let Some(spec) = self.ranges.get_mut(pos) else {
            return false;
        };
        spec.color = color;
        self.recompile();
        true
    }

    /// Rebuilds the grid (the week start may have changed) and then the
    /// highlights
    pub fn refresh(&mut self) {
        match CalendarGrid::build(self.year(), self.month(), self.week_start()) {
            Ok(grid) => self.grid = grid,
            Err(e) => error!(error = %e, "failed to rebuild grid for current month"),
        }
        self.recompile();
    }

    fn recompile(&mut self) {
        self.highlights = Highlights::compile(&self.grid, self.ranges.as_slice());
    }
}

fn week_start(params: &ParamStore) -> WeekStart {
    params
        .token(WEEK_START)
        .and_then(|t| t.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let card = card();
        assert_eq!(card.week_start(), WeekStart::Sunday);
        assert_eq!(card.grid().leading_blanks(), 3);
        assert_eq!(card.highlights().len(), 1);
        assert!(card.title_shown());
        assert_eq!(card.weekday_lang(), WeekdayLang::English);
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(Card::new(ParamStore::default(), 2025, 13, RangeList::new()).is_err());
        let mut card = card();
        assert!(card.set_month(2025, 0).is_err());
        assert_eq!((card.year(), card.month()), (2025, 10));
    }

    #[test]
    fn test_week_start_rebuilds_grid_and_highlights() {
        let mut card = card();
        card.set_range_days(0, 1, 10);
        assert_eq!(card.highlights().get(5).map(|d| d.col), Some(0));
        card.set_param(WEEK_START, "monday").unwrap();
        assert_eq!(card.grid().week_start(), WeekStart::Monday);
        assert_eq!(card.grid().leading_blanks(), 2);
        assert_eq!(card.highlights().get(5).map(|d| d.col), Some(6));
    }

    #[test]
    fn test_month_navigation_wraps() {
        let mut card = Card::new(ParamStore::default(), 2025, 12, RangeList::new()).unwrap();
        card.next_month().unwrap();
        assert_eq!((card.year(), card.month()), (2026, 1));
        card.prev_month().unwrap();
        card.prev_month().unwrap();
        assert_eq!((card.year(), card.month()), (2025, 11));
    }

    #[test]
    fn test_range_edits_recompile() {
        let mut card = card();
        card.set_range_days(0, 3, 4);
        assert_eq!(card.highlights().len(), 2);
        let pos = card.add_range().unwrap();
        card.set_range_days(pos, 4, 6);
        card.set_range_color(pos, Color::BLACK);
        assert_eq!(card.highlights().get(4).map(|d| d.color), Some(Color::BLACK));
        assert!(card.toggle_range(pos));
        assert_eq!(card.highlights().len(), 2);
        assert!(card.remove_range(pos));
        assert!(!card.remove_range(0));
        assert!(!card.toggle_range(7));
    }

    #[test]
    fn test_range_limit() {
        let mut card = card();
        for _ in 1..crate::highlight::MAX_RANGES {
            card.add_range().unwrap();
        }
        assert_eq!(card.add_range(), Err(RangeLimit));
        assert_eq!(card.ranges().len(), crate::highlight::MAX_RANGES);
    }

    #[test]
    fn test_param_changes_keep_grid() {
        let mut card = card();
        let grid = card.grid().clone();
        card.set_param(CARD_W, "400").unwrap();
        assert_eq!(card.grid(), &grid);
    }

    #[test]
    fn test_batch_preset() {
        let card = Card::batch_preset(2026, 3).unwrap();
        assert_eq!(card.week_start(), WeekStart::Monday);
        assert_eq!(card.weekday_lang(), WeekdayLang::Chinese);
        assert!(!card.title_shown());
        assert!(card.highlights().is_empty());
        assert_eq!(card.grid().leading_blanks(), 6);
        assert_eq!(card.params().length_px(CARD_PAD), Ok(20));
        assert_eq!(card.params().length_px(DT_SIZE), Ok(20));
        assert_eq!(card.params().length_px(CARD_W), Ok(500));
        assert_eq!(card.params().length_px(CARD_MARGIN), Ok(0));
    }
}
