use super::ranges::RangeSpec;
use crate::calendar::{CalendarGrid, GridCell};
use crate::color::Color;
use std::collections::BTreeMap;

/// Where a cell sits within its segment, which decides which of its ends are
/// rounded
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cap {
    /// The only cell of its segment; rounded on both ends
    Single,
    Start,
    Middle,
    End,
}

impl Cap {
    pub fn cap_start(self) -> bool {
        matches!(self, Cap::Start)
    }

    pub fn cap_end(self) -> bool {
        matches!(self, Cap::End)
    }

    pub fn is_single(self) -> bool {
        matches!(self, Cap::Single)
    }

    /// Whether the left edge is rounded
    pub fn rounds_left(self) -> bool {
        matches!(self, Cap::Single | Cap::Start)
    }

    /// Whether the right edge is rounded
    pub fn rounds_right(self) -> bool {
        matches!(self, Cap::Single | Cap::End)
    }
}

/// A maximal run of column-consecutive day cells in one row, all covered by
/// the same range
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub row: u8,
    pub cells: Vec<GridCell>,
}

impl Segment {
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().filter_map(GridCell::day)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn caps(&self) -> impl Iterator<Item = (GridCell, Cap)> + '_ {
        let last = self.cells.len().saturating_sub(1);
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            let cap = if last == 0 {
                Cap::Single
            } else if i == 0 {
                Cap::Start
            } else if i == last {
                Cap::End
            } else {
                Cap::Middle
            };
            (cell, cap)
        })
    }
}

/// How to paint one highlighted day
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PaintDirective {
    pub day: u8,
    pub row: u8,
    pub col: u8,
    pub color: Color,
    pub cap: Cap,
    /// `index` of the range that produced this directive
    pub range: u32,
}

impl PaintDirective {
    pub fn cap_start(&self) -> bool {
        self.cap.cap_start()
    }

    pub fn cap_end(&self) -> bool {
        self.cap.cap_end()
    }

    pub fn single(&self) -> bool {
        self.cap.is_single()
    }
}

/// The segments one range covers on `grid`, in row order.  A range that
/// crosses a week boundary yields one segment per row it touches.
pub fn segments(grid: &CalendarGrid, spec: &RangeSpec) -> Vec<Segment> {
    let (start, end) = spec.normalized(grid.days_in_month());
    let mut rows: BTreeMap<u8, Vec<GridCell>> = BTreeMap::new();
    for cell in grid.day_cells() {
        if cell.day().is_some_and(|d| (start..=end).contains(&d)) {
            rows.entry(cell.row).or_default().push(*cell);
        }
    }
    let mut segments = Vec::new();
    for (row, mut cells) in rows {
        cells.sort_by_key(|c| c.col);
        let mut current: Vec<GridCell> = Vec::new();
        for cell in cells {
            if current.last().is_some_and(|prev| prev.col + 1 != cell.col) {
                segments.push(Segment {
                    row,
                    cells: std::mem::take(&mut current),
                });
            }
            current.push(cell);
        }
        if !current.is_empty() {
            segments.push(Segment {
                row,
                cells: current,
            });
        }
    }
    segments
}

/// The paint directives for a month: at most one per day, ordered by day
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Highlights(BTreeMap<u8, PaintDirective>);

impl Highlights {
    /// Compiles `specs` against `grid`.  Disabled specs are skipped; enabled
    /// ones are painted in ascending `index` so later ranges cover earlier
    /// ones where they overlap.
    pub fn compile(grid: &CalendarGrid, specs: &[RangeSpec]) -> Highlights {
        let mut enabled = specs
            .iter()
            .filter(|s| s.enabled)
            .collect::<Vec<_>>();
        enabled.sort_by_key(|s| s.index);
        let mut directives = BTreeMap::new();
        for spec in enabled {
            for segment in segments(grid, spec) {
                for (cell, cap) in segment.caps() {
                    let Some(day) = cell.day() else {
                        continue;
                    };
                    directives.insert(
                        day,
                        PaintDirective {
                            day,
                            row: cell.row,
                            col: cell.col,
                            color: spec.color,
                            cap,
                            range: spec.index,
                        },
                    );
                }
            }
        }
        tracing::trace!(painted = directives.len(), "compiled highlights");
        Highlights(directives)
    }

    pub fn get(&self, day: u8) -> Option<&PaintDirective> {
        self.0.get(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaintDirective> + '_ {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
