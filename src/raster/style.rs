use crate::calendar::{WeekStart, WeekdayLang};
use crate::card::Card;
use crate::color::Color;
use crate::params::catalog::*;
use crate::params::{ParamError, ParamStore};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub weekend_color: Color,
    /// Line height as a multiple of `size`
    pub line: f32,
}

/// The effective parameter values a render needs, in output pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub padding: f32,
    pub margin: f32,
    pub radius: f32,
    pub shadow_alpha: f64,
    pub shadow_blur: f32,
    pub shadow_y: f32,
    pub grid_gap: f32,
    pub cell_radius: f32,
    pub cell_pad_y: f32,
    /// `None` when the title is hidden
    pub title: Option<TextStyle>,
    pub weekday: TextStyle,
    pub date: TextStyle,
    pub lang: WeekdayLang,
    pub week_start: WeekStart,
}

impl CardStyle {
    pub fn from_card(card: &Card) -> Result<CardStyle, ParamError> {
        let p = card.params();
        let title = if card.title_shown() {
            let color = color(p, TITLE_COLOR)?;
            Some(TextStyle {
                size: px(p, TITLE_SIZE)?,
                color,
                weekend_color: color,
                line: 1.3,
            })
        } else {
            None
        };
        Ok(CardStyle {
            width: px(p, CARD_W)?,
            height: px(p, CARD_H)?,
            background: color(p, CARD_BG)?,
            padding: px(p, CARD_PAD)?,
            margin: px(p, CARD_MARGIN)?,
            radius: px(p, CARD_RADIUS)?,
            shadow_alpha: number(p, SHADOW_A)?,
            shadow_blur: px(p, SHADOW_BLUR)?,
            shadow_y: px(p, SHADOW_Y)?,
            grid_gap: px(p, GRID_GAP)?,
            cell_radius: px(p, CELL_RADIUS)?,
            cell_pad_y: px(p, CELL_PAD_Y)?,
            title,
            weekday: TextStyle {
                size: px(p, WD_SIZE)?,
                color: color(p, WD_COLOR)?,
                weekend_color: color(p, WD_WEEKEND_COLOR)?,
                line: line(p, WD_LINE)?,
            },
            date: TextStyle {
                size: px(p, DT_SIZE)?,
                color: color(p, DT_COLOR)?,
                weekend_color: color(p, DT_WEEKEND_COLOR)?,
                line: line(p, DT_LINE)?,
            },
            lang: card.weekday_lang(),
            week_start: card.week_start(),
        })
    }

    /// Multiplies every length by `ratio`, for rendering at a higher pixel
    /// density
    pub fn scaled_by(self, ratio: f32) -> CardStyle {
        let text = |t: TextStyle| TextStyle {
            size: t.size * ratio,
            ..t
        };
        CardStyle {
            width: self.width * ratio,
            height: self.height * ratio,
            padding: self.padding * ratio,
            margin: self.margin * ratio,
            radius: self.radius * ratio,
            shadow_blur: self.shadow_blur * ratio,
            shadow_y: self.shadow_y * ratio,
            grid_gap: self.grid_gap * ratio,
            cell_radius: self.cell_radius * ratio,
            cell_pad_y: self.cell_pad_y * ratio,
            title: self.title.map(text),
            weekday: text(self.weekday),
            date: text(self.date),
            ..self
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn px(p: &ParamStore, name: &str) -> Result<f32, ParamError> {
    p.length_px(name).map(|v| v as f32)
}

fn number(p: &ParamStore, name: &str) -> Result<f64, ParamError> {
    p.number(name)
        .ok_or_else(|| ParamError::Unknown(name.to_owned()))
}

#[allow(clippy::cast_possible_truncation)]
fn line(p: &ParamStore, name: &str) -> Result<f32, ParamError> {
    number(p, name).map(|v| v as f32)
}

fn color(p: &ParamStore, name: &str) -> Result<Color, ParamError> {
    p.color(name)
        .ok_or_else(|| ParamError::Unknown(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::RangeList;

    #[test]
    fn test_from_default_card() {
        let card = Card::new(ParamStore::default(), 2026, 3, RangeList::new()).unwrap();
        let style = CardStyle::from_card(&card).unwrap();
        assert_eq!(style.width, 320.0);
        assert_eq!(style.padding, 18.0);
        assert_eq!(style.title.map(|t| t.size), Some(22.0));
        assert_eq!(style.date.weekend_color, Color::rgb(0x6b, 0x2e, 0x2b));
    }

    #[test]
    fn test_hidden_title() {
        let mut card = Card::new(ParamStore::default(), 2026, 3, RangeList::new()).unwrap();
        card.set_param(TITLE_DISPLAY, "hidden").unwrap();
        let style = CardStyle::from_card(&card).unwrap();
        assert!(style.title.is_none());
    }

    #[test]
    fn test_scaled_by() {
        let card = Card::new(ParamStore::default(), 2026, 3, RangeList::new()).unwrap();
        let style = CardStyle::from_card(&card).unwrap().scaled_by(2.0);
        assert_eq!(style.width, 640.0);
        assert_eq!(style.date.size, 32.0);
        assert_eq!(style.date.line, 1.4);
        assert_eq!(style.shadow_alpha, 0.18);
    }

    #[test]
    fn test_missing_parameter() {
        let mut params = ParamStore::new();
        params.register(ParamDef::length(CARD_W, 1.0, 9.0, 5.0));
        let card = Card::new(params, 2026, 3, RangeList::new()).unwrap();
        assert!(CardStyle::from_card(&card).is_err());
    }
}
