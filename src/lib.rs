//! Parameterized one-month calendar cards.
//!
//! A [`card::Card`] combines a [`params::ParamStore`] of visual parameters,
//! a displayed month laid out by [`calendar::CalendarGrid`], and a list of
//! highlighted day ranges compiled by [`highlight::Highlights`].  The
//! [`raster`] module turns a card into an RGBA image and PNG file.
pub mod calendar;
pub mod card;
pub mod color;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod params;
pub mod raster;
