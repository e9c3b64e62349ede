use super::layout::Rect;
use crate::color::Color;
use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Composites `color`, with its alpha further multiplied by `coverage`, over
/// the pixel at `(x, y)`.  Out-of-bounds coordinates are ignored.
pub(crate) fn blend(img: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= img.width() || y >= img.height() {
        return;
    }
    let src_a = f32::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let Rgba([dr, dg, db, da]) = *img.get_pixel(x, y);
    let dst_a = f32::from(da) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let mix = |s: u8, d: u8| {
        let v = (f32::from(s) * src_a + f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
        to_channel(v)
    };
    img.put_pixel(
        x,
        y,
        Rgba([
            mix(color.r, dr),
            mix(color.g, dg),
            mix(color.b, db),
            to_channel(out_a * 255.0),
        ]),
    );
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Fills a rectangle whose left corners have radius `left` and right corners
/// radius `right`, with one-pixel antialiasing on the curved edges
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn fill_rounded_rect(img: &mut RgbaImage, r: Rect, left: f32, right: f32, color: Color) {
    if r.w <= 0.0 || r.h <= 0.0 {
        return;
    }
    let limit = r.w.min(r.h) / 2.0;
    let left = left.clamp(0.0, limit);
    let right = right.clamp(0.0, limit);
    let x0 = r.x.floor() as i64;
    let x1 = r.right().ceil() as i64;
    let y0 = r.y.floor() as i64;
    let y1 = r.bottom().ceil() as i64;
    for py in y0..y1 {
        for px in x0..x1 {
            let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
            let coverage = coverage(r, left, right, cx, cy);
            if coverage > 0.0 {
                blend(img, px, py, color, coverage);
            }
        }
    }
}

fn coverage(r: Rect, left: f32, right: f32, cx: f32, cy: f32) -> f32 {
    // Edge coverage for straight sides
    let edge = |d: f32| (d + 0.5).clamp(0.0, 1.0);
    let straight = edge(cx - r.x)
        .min(edge(r.right() - cx))
        .min(edge(cy - r.y))
        .min(edge(r.bottom() - cy));
    let radius = if cx < r.x + r.w / 2.0 { left } else { right };
    if radius <= 0.0 {
        return straight;
    }
    let corner_x = if cx < r.x + radius {
        Some(r.x + radius)
    } else if cx > r.right() - radius {
        Some(r.right() - radius)
    } else {
        None
    };
    let corner_y = if cy < r.y + radius {
        Some(r.y + radius)
    } else if cy > r.bottom() - radius {
        Some(r.bottom() - radius)
    } else {
        None
    };
    match (corner_x, corner_y) {
        (Some(ox), Some(oy)) => {
            let d = (cx - ox).hypot(cy - oy);
            straight.min((radius - d + 0.5).clamp(0.0, 1.0))
        }
        _ => straight,
    }
}

/// A soft drop shadow: translucent rounded rectangles spreading out to
/// `blur` pixels, whose alphas sum to `alpha` at the centre
pub(crate) fn drop_shadow(img: &mut RgbaImage, r: Rect, radius: f32, blur: f32, alpha: f64) {
    const LAYERS: u8 = 8;
    if alpha <= 0.0 {
        return;
    }
    if blur <= 0.0 {
        fill_rounded_rect(img, r, radius, radius, Color::BLACK.with_alpha(alpha));
        return;
    }
    let layer_color = Color::BLACK.with_alpha(alpha / f64::from(LAYERS));
    for i in 0..LAYERS {
        let spread = blur * (f32::from(i) / f32::from(LAYERS) - 0.5);
        let layer = r.outset(spread);
        let rad = (radius + spread).max(0.0);
        fill_rounded_rect(img, layer, rad, rad, layer_color);
    }
}

/// Width of `text` set in `font` at `size` pixels
pub(crate) fn text_width(font: &FontVec, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    text.chars()
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .sum()
}

/// Draws `text` centred (both ways) on `(cx, cy)`
pub(crate) fn draw_text_centered(
    img: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    text: &str,
    (cx, cy): (f32, f32),
    color: Color,
) {
    let x = cx - text_width(font, size, text) / 2.0;
    draw_text(img, font, size, text, (x, cy), color);
}

/// Draws `text` starting at `x` with its line box vertically centred on `cy`
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn draw_text(
    img: &mut RgbaImage,
    font: &FontVec,
    size: f32,
    text: &str,
    (mut x, cy): (f32, f32),
    color: Color,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    // ascent is positive and descent negative, so this centres the line box
    let baseline = cy + (scaled.ascent() + scaled.descent()) / 2.0;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, point(x, baseline));
        x += scaled.h_advance(id);
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let (ox, oy) = (bounds.min.x as i64, bounds.min.y as i64);
        outlined.draw(|gx, gy, v| {
            blend(img, ox + i64::from(gx), oy + i64::from(gy), color, v);
        });
    }
}
