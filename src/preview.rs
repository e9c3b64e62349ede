use crate::theme::{
    preview::{HEADER_STYLE, MARKED_FG, TITLE_STYLE},
    BASE_STYLE,
};
use calcard::card::Card;
use calcard::params::catalog::{
    CARD_BG, DT_COLOR, DT_WEEKEND_COLOR, TITLE_COLOR, WD_COLOR, WD_WEEKEND_COLOR,
};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Color, Style},
    text::{Span, Text},
    widgets::{Block, Paragraph, Widget},
};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Columns taken by the preview, borders included
pub(crate) const PREVIEW_WIDTH: u16 = GRID_WIDTH + 4;

const CAP_LEFT: char = '(';
const CAP_RIGHT: char = ')';

/// A character-cell rendition of a card: the title, the weekday header, and
/// one line per week with highlighted days drawn on their range's color.
/// The rounded ends of a highlight are drawn as parentheses.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Preview<'a> {
    card: &'a Card,
}

impl<'a> Preview<'a> {
    pub(crate) fn new(card: &'a Card) -> Self {
        Preview { card }
    }

    fn color(&self, name: &str) -> Color {
        self.card
            .params()
            .color(name)
            .map_or(Color::Reset, term_color)
    }
}

impl Widget for Preview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Preview ").style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        buf.set_style(inner, Style::new().bg(self.color(CARD_BG)));
        let mut canvas = BufferCanvas::new(inner.inner(Margin::new(1, 0)), buf);

        let grid = self.card.grid();
        let mut top = 0;
        if self.card.title_shown() {
            canvas.mvprint(0, 0, grid.title(), TITLE_STYLE.fg(self.color(TITLE_COLOR)));
            top += 1;
        }

        let week_start = grid.week_start();
        let headers = self.card.weekday_lang().headers(week_start);
        for (col, label) in std::iter::zip(0u8.., headers) {
            let fg = if week_start.is_weekend_column(col) {
                self.color(WD_WEEKEND_COLOR)
            } else {
                self.color(WD_COLOR)
            };
            canvas.draw_header(top, col, label, HEADER_STYLE.fg(fg));
        }
        top += 1;

        let highlights = self.card.highlights();
        for cell in grid.day_cells() {
            let Some(day) = cell.day() else {
                continue;
            };
            let (text, style) = match highlights.get(day) {
                Some(d) => {
                    let left = if d.cap.rounds_left() { CAP_LEFT } else { ' ' };
                    let right = if d.cap.rounds_right() { CAP_RIGHT } else { ' ' };
                    (
                        format!("{left}{day:>2}{right}"),
                        Style::new().fg(MARKED_FG).bg(term_color(d.color)),
                    )
                }
                None => {
                    let fg = if cell.is_weekend {
                        self.color(DT_WEEKEND_COLOR)
                    } else {
                        self.color(DT_COLOR)
                    };
                    (format!(" {day:>2} "), Style::new().fg(fg))
                }
            };
            canvas.draw_day(top + u16::from(cell.row), cell.col, text, style);
        }
    }
}

fn term_color(c: calcard::color::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Labels are right-aligned with the day numbers below them
    fn draw_header(&mut self, y: u16, col: u8, label: &str, style: Style) {
        let width = u16::try_from(Span::raw(label).width()).unwrap_or(DAY_WIDTH);
        let x = (DAY_WIDTH * u16::from(col) + DAY_WIDTH - 1).saturating_sub(width);
        self.mvprint(y, x, label, style);
    }

    fn draw_day(&mut self, y: u16, col: u8, s: String, style: Style) {
        self.mvprint(y, DAY_WIDTH * u16::from(col), s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect given to the Paragraph must lie entirely within the
            // frame
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcard::highlight::RangeList;
    use calcard::params::catalog::{TITLE_DISPLAY, WD_LANG, WEEK_START};
    use calcard::params::ParamStore;

    fn render(card: &Card, height: u16) -> Buffer {
        let area = Rect::new(0, 0, PREVIEW_WIDTH, height);
        let mut buffer = Buffer::empty(area);
        Preview::new(card).render(area, &mut buffer);
        buffer
    }

    fn symbols(buffer: &Buffer) -> Vec<String> {
        buffer
            .content()
            .iter()
            .map(|c| c.symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_october_2025() {
        let mut card = Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap();
        let pos = card.add_range().unwrap();
        card.set_range_days(pos, 8, 14);
        let buffer = render(&card, 9);
        let expected = Buffer::with_lines([
            "┌ Preview ─────────────────────┐",
            "│ 2025-10                      │",
            "│ SUN MON TUE WED THU FRI SAT  │",
            "│             ( 1)  2   3   4  │",
            "│   5   6   7 ( 8   9  10  11) │",
            "│ (12  13  14) 15  16  17  18  │",
            "│  19  20  21  22  23  24  25  │",
            "│  26  27  28  29  30  31      │",
            "└──────────────────────────────┘",
        ]);
        assert_eq!(symbols(&buffer), symbols(&expected));
        let single = buffer[(14, 3)].style();
        assert_eq!(single.bg, Some(Color::Rgb(0xff, 0xd6, 0xa5)));
        assert_eq!(single.fg, Some(MARKED_FG));
        let middle = buffer[(20, 4)].style();
        assert_eq!(middle.bg, Some(Color::Rgb(0xca, 0xff, 0xbf)));
        let saturday = buffer[(27, 6)].style();
        assert_eq!(saturday.fg, Some(Color::Rgb(0x6b, 0x2e, 0x2b)));
        assert_eq!(saturday.bg, Some(Color::Rgb(0xff, 0xff, 0xff)));
    }

    #[test]
    fn test_monday_first_without_title() {
        let mut card = Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap();
        card.set_param(TITLE_DISPLAY, "hidden").unwrap();
        card.set_param(WEEK_START, "monday").unwrap();
        let buffer = render(&card, 8);
        let expected = Buffer::with_lines([
            "┌ Preview ─────────────────────┐",
            "│ MON TUE WED THU FRI SAT SUN  │",
            "│         ( 1)  2   3   4   5  │",
            "│   6   7   8   9  10  11  12  │",
            "│  13  14  15  16  17  18  19  │",
            "│  20  21  22  23  24  25  26  │",
            "│  27  28  29  30  31          │",
            "└──────────────────────────────┘",
        ]);
        assert_eq!(symbols(&buffer), symbols(&expected));
    }

    #[test]
    fn test_chinese_headers() {
        let mut card = Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap();
        card.set_param(WD_LANG, "zh").unwrap();
        let buffer = render(&card, 9);
        assert_eq!(buffer[(3, 2)].symbol(), "日");
        assert_eq!(buffer[(7, 2)].symbol(), "一");
        assert_eq!(buffer[(27, 2)].symbol(), "六");
    }

    #[test]
    fn test_clipped_to_area() {
        let card = Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap();
        let buffer = render(&card, 5);
        assert_eq!(buffer[(2, 3)].symbol(), " ");
        assert_eq!(buffer[(14, 3)].symbol(), "(");
    }
}
