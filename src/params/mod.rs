pub mod catalog;
mod value;
pub use self::catalog::ParamDef;
pub use self::value::{
    Bounds, Effective, OutOfRange, ParamError, ParamKind, ParamValue, SetOutcome,
};
use crate::color::Color;
use std::fmt;
use tracing::debug;

/// Card size at which the scale is exactly 1
pub const REFERENCE_SIZE: f64 = 320.0;
pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 2.5;

/// Scale factor for a card of the given dimensions
pub fn scale_for(width: f64, height: f64) -> f64 {
    (width.min(height) / REFERENCE_SIZE).clamp(MIN_SCALE, MAX_SCALE)
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    def: ParamDef,
    value: ParamValue,
}

/// Named visual parameters with bounds, a derived card scale, and
/// scale-adjusted "effective" values.
///
/// Every mutation goes through [`ParamStore::set`] (or its numeric sibling),
/// which clamps rather than rejects and recomputes the scale when a card
/// dimension changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamStore {
    // Registration order is preserved for listing and snapshots
    entries: Vec<Entry>,
    scale: f64,
}

impl ParamStore {
    /// An empty store with no parameters registered
    pub fn new() -> ParamStore {
        ParamStore {
            entries: Vec::new(),
            scale: 1.0,
        }
    }

    /// Registers a parameter at its default value.  Returns `false` (and
    /// changes nothing) if the name is already registered.
    pub fn register(&mut self, def: ParamDef) -> bool {
        if self.entry(def.name).is_some() {
            return false;
        }
        let value = match (def.default, def.bounds) {
            (ParamValue::Number(n), Some(bounds)) => {
                ParamValue::Number(bounds.check(n).unwrap_or_else(|e| e.clamped()))
            }
            (v, _) => v,
        };
        self.entries.push(Entry { def, value });
        if def.affects_scale {
            self.recompute_scale();
        }
        true
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.def.name)
    }

    pub fn def(&self, name: &str) -> Option<&ParamDef> {
        self.entry(name).map(|e| &e.def)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entry(name).map(|e| e.value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_number())
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(|v| v.as_color())
    }

    pub fn token(&self, name: &str) -> Option<&'static str> {
        self.get(name).and_then(|v| v.as_token())
    }

    /// Interprets `raw` according to the parameter's kind and stores it.
    /// Lengths may carry a `px` suffix; choices match case-insensitively.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<SetOutcome, ParamError> {
        let kind = self.require(name)?.def.kind;
        let raw = raw.trim();
        let parsed = match kind {
            ParamKind::Length => parse_number(raw.strip_suffix("px").unwrap_or(raw)),
            ParamKind::Scalar => parse_number(raw),
            ParamKind::Color => raw.parse::<Color>().ok().map(ParamValue::Color),
            ParamKind::Choice(tokens) => tokens
                .iter()
                .find(|t| t.eq_ignore_ascii_case(raw))
                .map(|&t| ParamValue::Token(t)),
        };
        match parsed {
            Some(value) => self.store(name, value),
            None => {
                debug!(name, raw, "ignoring uninterpretable parameter input");
                Ok(SetOutcome::Ignored)
            }
        }
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> Result<SetOutcome, ParamError> {
        if !self.require(name)?.def.kind.is_numeric() || !value.is_finite() {
            return Ok(SetOutcome::Ignored);
        }
        self.store(name, ParamValue::Number(value))
    }

    /// Steps a numeric parameter by one increment (1 for lengths, 0.05 for
    /// scalars) or cycles a choice to its next/previous token.  Colors are
    /// left alone.
    pub fn nudge(&mut self, name: &str, forward: bool) -> Result<SetOutcome, ParamError> {
        let entry = self.require(name)?;
        let sign = if forward { 1.0 } else { -1.0 };
        match (entry.def.kind, entry.value) {
            (ParamKind::Length, ParamValue::Number(n)) => self.set_number(name, n.round() + sign),
            (ParamKind::Scalar, ParamValue::Number(n)) => {
                self.set_number(name, ((n + sign * 0.05) * 100.0).round() / 100.0)
            }
            (ParamKind::Choice(tokens), ParamValue::Token(t)) => {
                let i = tokens.iter().position(|&u| u == t).unwrap_or(0);
                let j = if forward {
                    (i + 1) % tokens.len()
                } else {
                    (i + tokens.len() - 1) % tokens.len()
                };
                self.store(name, ParamValue::Token(tokens[j]))
            }
            _ => Ok(SetOutcome::Ignored),
        }
    }

    fn store(&mut self, name: &str, value: ParamValue) -> Result<SetOutcome, ParamError> {
        let entry = self.require_mut(name)?;
        let (value, outcome) = match (value, entry.def.bounds) {
            (ParamValue::Number(n), Some(bounds)) => match bounds.check(n) {
                Ok(n) => (ParamValue::Number(n), SetOutcome::Stored),
                Err(e) => {
                    debug!(name, error = %e, "clamping parameter");
                    (ParamValue::Number(e.clamped()), SetOutcome::Clamped)
                }
            },
            (v, _) => (v, SetOutcome::Stored),
        };
        entry.value = value;
        if entry.def.affects_scale {
            self.recompute_scale();
        }
        Ok(outcome)
    }

    /// Derives the card scale from the current card dimensions.  Calling
    /// this repeatedly with unchanged dimensions yields the same scale.
    pub fn recompute_scale(&mut self) {
        let width = self.number(catalog::CARD_W).unwrap_or(REFERENCE_SIZE);
        let height = self.number(catalog::CARD_H).unwrap_or(REFERENCE_SIZE);
        let scale = scale_for(width, height);
        if (scale - self.scale).abs() > f64::EPSILON {
            debug!(width, height, scale, "card scale changed");
        }
        self.scale = scale;
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn effective_length(&self, base: f64) -> i64 {
        (base * self.scale).round() as i64
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn effective(&self, name: &str) -> Option<Effective> {
        let entry = self.entry(name)?;
        Some(match (entry.def.kind, entry.value) {
            (ParamKind::Length, ParamValue::Number(n)) => {
                if entry.def.scaled {
                    Effective::Length(self.effective_length(n))
                } else {
                    Effective::Length(n.round() as i64)
                }
            }
            (_, ParamValue::Number(n)) => Effective::Scalar(n),
            (_, ParamValue::Color(c)) => Effective::Color(c),
            (_, ParamValue::Token(t)) => Effective::Token(t),
        })
    }

    /// The effective pixel length of a length parameter
    pub fn length_px(&self, name: &str) -> Result<i64, ParamError> {
        match self.effective(name) {
            Some(Effective::Length(px)) => Ok(px),
            _ => Err(ParamError::Unknown(name.to_owned())),
        }
    }

    /// Whether no toggle currently disables this parameter.  Unknown names
    /// are never active.
    pub fn is_active(&self, name: &str) -> bool {
        self.entry(name).is_some()
            && !self.entries.iter().any(|e| match e.def.disables {
                Some((when, targets)) => e.value == ParamValue::Token(when) && targets.contains(&name),
                None => false,
            })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.entries
                .iter()
                .filter_map(|e| {
                    Some(SnapshotEntry {
                        name: e.def.name,
                        value: self.effective(e.def.name)?,
                        active: self.is_active(e.def.name),
                    })
                })
                .collect(),
        )
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.def.name == name)
    }

    fn require(&self, name: &str) -> Result<&Entry, ParamError> {
        self.entry(name)
            .ok_or_else(|| ParamError::Unknown(name.to_owned()))
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut Entry, ParamError> {
        self.entries
            .iter_mut()
            .find(|e| e.def.name == name)
            .ok_or_else(|| ParamError::Unknown(name.to_owned()))
    }
}

impl Default for ParamStore {
    /// A store with the full card catalog registered
    fn default() -> ParamStore {
        let mut store = ParamStore::new();
        for &def in catalog::CATALOG {
            store.register(def);
        }
        store
    }
}

fn parse_number(s: &str) -> Option<ParamValue> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(ParamValue::Number)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotEntry {
    pub name: &'static str,
    pub value: Effective,
    pub active: bool,
}

/// Every parameter's effective value, in registration order
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot(Vec<SnapshotEntry>);

impl Snapshot {
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.0
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.0 {
            writeln!(f, "{}: {};", e.name, e.value)?;
        }
        Ok(())
    }
}
