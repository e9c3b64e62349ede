//! Turning a [`Card`] into pixels
mod export;
mod fonts;
mod layout;
mod paint;
mod style;
pub use self::export::{export_png, file_name, ExportError, ExportGate, ExportGuard, PIXEL_RATIO};
pub use self::fonts::{FontError, FontPaths, FontRole, FontSet};
pub use self::layout::{CardLayout, Rect};
pub use self::style::{CardStyle, TextStyle};
use self::paint::{draw_text, draw_text_centered, drop_shadow, fill_rounded_rect};
use crate::card::Card;
use crate::params::ParamError;
use image::RgbaImage;

/// Renders `card` at `ratio` output pixels per card pixel.  The background
/// outside the card is transparent.
pub fn render(card: &Card, fonts: &FontSet, ratio: f32) -> Result<RgbaImage, ParamError> {
    let style = CardStyle::from_card(card)?.scaled_by(ratio);
    let layout = CardLayout::compute(&style);
    let mut img = RgbaImage::new(layout.canvas_w, layout.canvas_h);

    let mut shadow = layout.card;
    shadow.y += style.shadow_y;
    drop_shadow(
        &mut img,
        shadow,
        style.radius,
        style.shadow_blur,
        style.shadow_alpha,
    );
    fill_rounded_rect(
        &mut img,
        layout.card,
        style.radius,
        style.radius,
        style.background,
    );

    for d in card.highlights().iter() {
        let r = layout.highlight(d, &style);
        let left = if d.cap.rounds_left() { style.cell_radius } else { 0.0 };
        let right = if d.cap.rounds_right() { style.cell_radius } else { 0.0 };
        fill_rounded_rect(&mut img, r, left, right, d.color);
    }

    if let (Some(band), Some(title)) = (layout.title, style.title) {
        if let Some(font) = fonts.get(FontRole::Title) {
            let (_, cy) = band.center();
            draw_text(
                &mut img,
                font,
                title.size,
                &card.grid().title(),
                (band.x, cy),
                title.color,
            );
        }
    }

    if let Some(font) = fonts.get(FontRole::Weekday) {
        let wd = style.weekday;
        for (col, label) in (0u8..).zip(style.lang.headers(style.week_start)) {
            let color = if style.week_start.is_weekend_column(col) {
                wd.weekend_color
            } else {
                wd.color
            };
            let cell = layout.weekday_cell(col);
            draw_text_centered(&mut img, font, wd.size, label, cell.center(), color);
        }
    }

    if let Some(font) = fonts.get(FontRole::Date) {
        let dt = style.date;
        for cell in card.grid().day_cells() {
            let Some(day) = cell.day() else {
                continue;
            };
            let color = if cell.is_weekend {
                dt.weekend_color
            } else {
                dt.color
            };
            let rect = layout.day_cell(cell.row, cell.col);
            draw_text_centered(
                &mut img,
                font,
                dt.size,
                &day.to_string(),
                rect.center(),
                color,
            );
        }
    }

    tracing::debug!(
        width = layout.canvas_w,
        height = layout.canvas_h,
        highlighted = card.highlights().len(),
        "rendered card"
    );
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::highlight::RangeList;
    use crate::params::catalog::{CARD_BG, SHADOW_A};
    use crate::params::ParamStore;

    fn card() -> Card {
        Card::new(ParamStore::default(), 2025, 10, RangeList::new()).unwrap()
    }

    #[test]
    fn test_canvas_size() {
        let img = render(&card(), &FontSet::none(), 1.0).unwrap();
        assert_eq!(img.dimensions(), (368, 368));
        let img = render(&card(), &FontSet::none(), 2.0).unwrap();
        assert_eq!(img.dimensions(), (736, 736));
    }

    #[test]
    fn test_corners_transparent_center_filled() {
        let mut card = card();
        card.set_param(CARD_BG, "#336699").unwrap();
        card.set_param(SHADOW_A, "0").unwrap();
        let img = render(&card, &FontSet::none(), 1.0).unwrap();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(25, 25)[3], 0, "rounded card corner");
        let p = img.get_pixel(184, 40);
        assert_eq!((p[0], p[1], p[2], p[3]), (0x33, 0x66, 0x99, 0xff));
    }

    #[test]
    fn test_highlight_painted() {
        let mut card = card();
        card.set_range_days(0, 15, 15);
        card.set_range_color(0, Color::rgb(0xff, 0, 0));
        let img = render(&card, &FontSet::none(), 1.0).unwrap();
        let style = CardStyle::from_card(&card).unwrap();
        let layout = CardLayout::compute(&style);
        let d = card.highlights().get(15).unwrap();
        let (cx, cy) = layout.highlight(d, &style).center();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let p = img.get_pixel(cx as u32, cy as u32);
        assert_eq!((p[0], p[1], p[2]), (0xff, 0, 0));
    }
}
