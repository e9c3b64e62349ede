use super::style::CardStyle;
use crate::calendar::MAX_ROWS;
use crate::highlight::PaintDirective;

const COLUMNS: f32 = 7.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Grows the rectangle by `d` on every side (shrinks for negative `d`)
    pub fn outset(&self, d: f32) -> Rect {
        Rect::new(
            self.x - d,
            self.y - d,
            (self.w + 2.0 * d).max(0.0),
            (self.h + 2.0 * d).max(0.0),
        )
    }
}

/// Where each part of the card goes, in output pixels.  The canvas is the
/// card plus its margin on every side; the margin holds the shadow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    pub canvas_w: u32,
    pub canvas_h: u32,
    pub card: Rect,
    pub title: Option<Rect>,
    pub weekdays: Rect,
    pub days: Rect,
    col_pitch: f32,
    row_pitch: f32,
    gap: f32,
}

impl CardLayout {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(style: &CardStyle) -> CardLayout {
        let card = Rect::new(style.margin, style.margin, style.width, style.height);
        let inner = card.outset(-style.padding);
        let mut top = inner.y;
        let title = style.title.map(|t| {
            let r = Rect::new(inner.x, top, inner.w, t.size * t.line);
            top = r.bottom();
            r
        });
        let weekdays = Rect::new(inner.x, top, inner.w, style.weekday.size * style.weekday.line);
        let days = Rect::new(
            inner.x,
            weekdays.bottom(),
            inner.w,
            (inner.bottom() - weekdays.bottom()).max(0.0),
        );
        // Each pitch covers one cell plus one gap, so the last column and row
        // end flush with the content box
        let gap = style.grid_gap;
        let col_pitch = (days.w + gap) / COLUMNS;
        let row_pitch = (days.h + gap) / f32::from(MAX_ROWS);
        CardLayout {
            canvas_w: (style.width + 2.0 * style.margin).ceil().max(1.0) as u32,
            canvas_h: (style.height + 2.0 * style.margin).ceil().max(1.0) as u32,
            card,
            title,
            weekdays,
            days,
            col_pitch,
            row_pitch,
            gap,
        }
    }

    /// Header cell for grid column `col`
    pub fn weekday_cell(&self, col: u8) -> Rect {
        Rect::new(
            self.weekdays.x + f32::from(col) * self.col_pitch,
            self.weekdays.y,
            (self.col_pitch - self.gap).max(0.0),
            self.weekdays.h,
        )
    }

    pub fn day_cell(&self, row: u8, col: u8) -> Rect {
        Rect::new(
            self.days.x + f32::from(col) * self.col_pitch,
            self.days.y + f32::from(row) * self.row_pitch,
            (self.col_pitch - self.gap).max(0.0),
            (self.row_pitch - self.gap).max(0.0),
        )
    }

    /// The highlight shape behind a day: as tall as the date text plus its
    /// vertical padding (never taller than the cell), and widened across the
    /// gap on any side that continues into a neighbouring cell so that a
    /// segment reads as one pill
    pub fn highlight(&self, d: &PaintDirective, style: &CardStyle) -> Rect {
        let cell = self.day_cell(d.row, d.col);
        let h = (style.date.size * style.date.line + 2.0 * style.cell_pad_y).min(cell.h);
        let (_, cy) = cell.center();
        let mut r = Rect::new(cell.x, cy - h / 2.0, cell.w, h);
        if !d.cap.rounds_left() {
            r.x -= self.gap / 2.0;
            r.w += self.gap / 2.0;
        }
        if !d.cap.rounds_right() {
            r.w += self.gap / 2.0;
        }
        r
    }
}
