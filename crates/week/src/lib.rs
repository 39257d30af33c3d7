//! Reporting-week arithmetic for the shiftboard pages.
//!
//! A reporting week runs Monday to Sunday and is identified by its Monday,
//! the [`WeekAnchor`]. Pages show the calendar week Sunday to Saturday that
//! surrounds the anchor.

mod anchor;
mod clock;
mod format;
mod header;
mod navigator;
mod view;

pub use anchor::*;
pub use clock::*;
pub use format::*;
pub use header::*;
pub use navigator::*;
pub use view::*;
