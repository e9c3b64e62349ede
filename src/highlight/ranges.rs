use crate::color::Color;
use thiserror::Error;

pub const MAX_RANGES: usize = 5;

/// Colors handed to new ranges, in order
pub const PALETTE: [Color; MAX_RANGES] = [
    Color::rgb(0xff, 0xd6, 0xa5),
    Color::rgb(0xca, 0xff, 0xbf),
    Color::rgb(0x9b, 0xf6, 0xff),
    Color::rgb(0xbd, 0xb2, 0xff),
    Color::rgb(0xff, 0xc6, 0xff),
];

/// An inclusive span of days to highlight.  `start` and `end` are kept
/// exactly as entered; the compiler clamps and orders them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RangeSpec {
    /// Creation order; higher indices paint over lower ones
    pub index: u32,
    pub enabled: bool,
    pub start: i32,
    pub end: i32,
    pub color: Color,
}

impl RangeSpec {
    pub fn new(index: u32, start: i32, end: i32, color: Color) -> RangeSpec {
        RangeSpec {
            index,
            enabled: true,
            start,
            end,
            color,
        }
    }

    /// `start..=end` clamped into `1..=days_in_month` and put in order
    pub fn normalized(&self, days_in_month: u8) -> (u8, u8) {
        let clamp = |d: i32| {
            u8::try_from(d.clamp(1, i32::from(days_in_month.max(1)))).unwrap_or(1)
        };
        let (a, b) = (clamp(self.start), clamp(self.end));
        (a.min(b), a.max(b))
    }
}

/// The user's highlight ranges: never fewer than one, never more than
/// [`MAX_RANGES`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeList {
    specs: Vec<RangeSpec>,
    next_index: u32,
    next_color: usize,
}

impl RangeList {
    pub fn new() -> RangeList {
        RangeList {
            specs: vec![RangeSpec::new(0, 1, 1, PALETTE[0])],
            next_index: 1,
            next_color: 1,
        }
    }

    /// Appends a new `[1, 1]` range with the next palette color and returns
    /// its position in the list
    pub fn add(&mut self) -> Result<usize, RangeLimit> {
        let color = PALETTE[self.next_color % PALETTE.len()];
        self.push(1, 1, color)
    }

    pub fn push(&mut self, start: i32, end: i32, color: Color) -> Result<usize, RangeLimit> {
        if self.specs.len() >= MAX_RANGES {
            tracing::debug!("refusing to add range beyond limit");
            return Err(RangeLimit);
        }
        self.specs
            .push(RangeSpec::new(self.next_index, start, end, color));
        self.next_index += 1;
        self.next_color += 1;
        tracing::debug!(count = self.specs.len(), "added range");
        Ok(self.specs.len() - 1)
    }

    /// Removes the range at position `pos`.  Does nothing (and returns
    /// `false`) when it is the only range left or `pos` is out of bounds.
    pub fn remove(&mut self, pos: usize) -> bool {
        if self.specs.len() <= 1 || pos >= self.specs.len() {
            return false;
        }
        let spec = self.specs.remove(pos);
        tracing::debug!(index = spec.index, count = self.specs.len(), "removed range");
        true
    }

    pub fn get(&self, pos: usize) -> Option<&RangeSpec> {
        self.specs.get(pos)
    }

    pub fn get_mut(&mut self, pos: usize) -> Option<&mut RangeSpec> {
        self.specs.get_mut(pos)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always `false`; present for API symmetry with `len()`
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.specs.len() >= MAX_RANGES
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeSpec> {
        self.specs.iter()
    }

    pub fn as_slice(&self) -> &[RangeSpec] {
        &self.specs
    }
}

impl Default for RangeList {
    fn default() -> RangeList {
        RangeList::new()
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a RangeSpec;
    type IntoIter = std::slice::Iter<'a, RangeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("at most {MAX_RANGES} ranges may exist at once")]
pub struct RangeLimit;
