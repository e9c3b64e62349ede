//! The parameters every card has, with their bounds and defaults
use super::value::{Bounds, ParamKind, ParamValue};
use crate::calendar::{WeekStart, WeekdayLang};
use crate::color::Color;

pub const CARD_W: &str = "card-w";
pub const CARD_H: &str = "card-h";
pub const CARD_BG: &str = "card-bg";
pub const CARD_PAD: &str = "card-pad";
pub const CARD_MARGIN: &str = "card-margin";
pub const CARD_RADIUS: &str = "card-radius";
pub const SHADOW_A: &str = "shadow-a";
pub const SHADOW_BLUR: &str = "shadow-blur";
pub const SHADOW_Y: &str = "shadow-y";
pub const GRID_GAP: &str = "grid-gap";
pub const CELL_RADIUS: &str = "cell-radius";
pub const CELL_PAD_Y: &str = "cell-pad-y";
pub const TITLE_DISPLAY: &str = "title-display";
pub const TITLE_SIZE: &str = "title-size";
pub const TITLE_COLOR: &str = "title-color";
pub const WD_LANG: &str = "wd-lang";
pub const WD_SIZE: &str = "wd-size";
pub const WD_COLOR: &str = "wd-color";
pub const WD_WEEKEND_COLOR: &str = "wd-weekend-color";
pub const WD_LINE: &str = "wd-line";
pub const DT_SIZE: &str = "dt-size";
pub const DT_COLOR: &str = "dt-color";
pub const DT_WEEKEND_COLOR: &str = "dt-weekend-color";
pub const DT_LINE: &str = "dt-line";
pub const WEEK_START: &str = "week-start";

pub const TITLE_SHOWN: &str = "shown";
pub const TITLE_HIDDEN: &str = "hidden";
const TITLE_TOKENS: &[&str] = &[TITLE_SHOWN, TITLE_HIDDEN];

/// Everything needed to register one parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDef {
    pub name: &'static str,
    pub kind: ParamKind,
    pub bounds: Option<Bounds>,
    pub default: ParamValue,
    /// Changing this parameter changes the card scale
    pub affects_scale: bool,
    /// The effective value is multiplied by the card scale
    pub scaled: bool,
    /// While this parameter holds the given token, the listed parameters are
    /// inactive
    pub disables: Option<(&'static str, &'static [&'static str])>,
}

impl ParamDef {
    pub const fn length(name: &'static str, min: f64, max: f64, default: f64) -> ParamDef {
        ParamDef {
            name,
            kind: ParamKind::Length,
            bounds: Some(Bounds::new(min, max)),
            default: ParamValue::Number(default),
            affects_scale: false,
            scaled: true,
            disables: None,
        }
    }

    pub const fn scalar(name: &'static str, min: f64, max: f64, default: f64) -> ParamDef {
        ParamDef {
            name,
            kind: ParamKind::Scalar,
            bounds: Some(Bounds::new(min, max)),
            default: ParamValue::Number(default),
            affects_scale: false,
            scaled: false,
            disables: None,
        }
    }

    pub const fn color(name: &'static str, default: Color) -> ParamDef {
        ParamDef {
            name,
            kind: ParamKind::Color,
            bounds: None,
            default: ParamValue::Color(default),
            affects_scale: false,
            scaled: false,
            disables: None,
        }
    }

    pub const fn choice(
        name: &'static str,
        tokens: &'static [&'static str],
        default: &'static str,
    ) -> ParamDef {
        ParamDef {
            name,
            kind: ParamKind::Choice(tokens),
            bounds: None,
            default: ParamValue::Token(default),
            affects_scale: false,
            scaled: false,
            disables: None,
        }
    }

    /// Marks a length as defining the card size: it drives the scale and is
    /// not itself scaled
    pub const fn card_dimension(mut self) -> ParamDef {
        self.affects_scale = true;
        self.scaled = false;
        self
    }

    pub const fn disables(
        mut self,
        when: &'static str,
        targets: &'static [&'static str],
    ) -> ParamDef {
        self.disables = Some((when, targets));
        self
    }
}

pub const CATALOG: &[ParamDef] = &[
    ParamDef::length(CARD_W, 160.0, 1200.0, 320.0).card_dimension(),
    ParamDef::length(CARD_H, 160.0, 1200.0, 320.0).card_dimension(),
    ParamDef::color(CARD_BG, Color::WHITE),
    ParamDef::length(CARD_PAD, 0.0, 80.0, 18.0),
    ParamDef::length(CARD_MARGIN, 0.0, 80.0, 24.0),
    ParamDef::length(CARD_RADIUS, 0.0, 80.0, 20.0),
    ParamDef::scalar(SHADOW_A, 0.0, 1.0, 0.18),
    ParamDef::length(SHADOW_BLUR, 0.0, 64.0, 24.0),
    ParamDef::length(SHADOW_Y, -40.0, 40.0, 8.0),
    ParamDef::length(GRID_GAP, 0.0, 24.0, 4.0),
    ParamDef::length(CELL_RADIUS, 0.0, 40.0, 10.0),
    ParamDef::length(CELL_PAD_Y, 0.0, 24.0, 6.0),
    ParamDef::choice(TITLE_DISPLAY, TITLE_TOKENS, TITLE_SHOWN)
        .disables(TITLE_HIDDEN, &[TITLE_SIZE, TITLE_COLOR]),
    ParamDef::length(TITLE_SIZE, 8.0, 72.0, 22.0),
    ParamDef::color(TITLE_COLOR, Color::rgb(0x11, 0x11, 0x11)),
    ParamDef::choice(WD_LANG, WeekdayLang::TOKENS, "en"),
    ParamDef::length(WD_SIZE, 6.0, 48.0, 12.0),
    ParamDef::color(WD_COLOR, Color::rgb(0x11, 0x11, 0x10)),
    ParamDef::color(WD_WEEKEND_COLOR, Color::rgb(0x11, 0x11, 0x10)),
    ParamDef::scalar(WD_LINE, 0.8, 3.0, 1.6),
    ParamDef::length(DT_SIZE, 6.0, 64.0, 16.0),
    ParamDef::color(DT_COLOR, Color::rgb(0x79, 0x5a, 0x48)),
    ParamDef::color(DT_WEEKEND_COLOR, Color::rgb(0x6b, 0x2e, 0x2b)),
    ParamDef::scalar(DT_LINE, 0.8, 3.0, 1.4),
    ParamDef::choice(WEEK_START, WeekStart::TOKENS, "sunday"),
];
