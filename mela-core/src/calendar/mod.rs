//! Calendar month view: navigation and grid layout.

mod cursor;
mod grid;

pub use cursor::CalendarCursor;
pub use grid::{DAYS_PER_WEEK, DayCell, EventBar, GridCell, MonthGrid, SpanRole, build_month};
