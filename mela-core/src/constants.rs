/// How long an event stays visible after it has ended.
pub const RETENTION_DAYS: i64 = 14;

/// Reminder window used when the user has not picked one.
pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 14;

/// Bounds for the user-configurable reminder window (inclusive).
pub const MIN_REMINDER_WINDOW_DAYS: i64 = 1;
pub const MAX_REMINDER_WINDOW_DAYS: i64 = 90;

/// Craft tag that matches every craft filter.
pub const ALL_CRAFTS_TAG: &str = "All";
