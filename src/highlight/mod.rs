mod compile;
mod ranges;
pub use self::compile::{segments, Cap, Highlights, PaintDirective, Segment};
pub use self::ranges::{RangeLimit, RangeList, RangeSpec, MAX_RANGES, PALETTE};
