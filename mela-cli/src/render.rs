//! Terminal and HTML rendering for mela-core types.
//!
//! Types that need no translation implement [`Render`]. Anything that shows
//! user-facing text goes through a [`Translator`].

use mela_core::calendar::{DayCell, EventBar, GridCell, MonthGrid, SpanRole};
use mela_core::event::{Event, EventPhase};
use mela_core::notifier::DueNotice;
use mela_core::reminders::ReminderAction;
use mela_core::view::EventEntry;
use mela_core::visibility::RecentlyEnded;
use owo_colors::OwoColorize;

use crate::i18n::Translator;

/// Width of one day column in the terminal grid, in characters.
const CELL_WIDTH: usize = 12;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let dates = if self.is_single_day() {
            self.start_date.to_string()
        } else {
            format!("{} → {}", self.start_date, self.end_date)
        };
        format!("{} {}", self.title.bold(), dates.dimmed())
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let header: Vec<String> = WEEKDAYS.iter().map(|d| pad(d, CELL_WIDTH)).collect();
        lines.push(header.join(" ").bold().to_string());

        for week in &self.weeks {
            let numbers: Vec<String> = week.iter().map(day_number).collect();
            lines.push(numbers.join(" "));

            let rows = week
                .iter()
                .filter_map(GridCell::day)
                .map(|d| d.bars.len())
                .max()
                .unwrap_or(0);

            for row in 0..rows {
                let segments: Vec<String> = week
                    .iter()
                    .map(|cell| match cell.day().and_then(|d| d.bars.get(row)) {
                        Some(bar) => bar_segment(bar, CELL_WIDTH).cyan().to_string(),
                        None => " ".repeat(CELL_WIDTH),
                    })
                    .collect();
                lines.push(segments.join(" "));
            }
        }

        lines.join("\n")
    }
}

fn day_number(cell: &GridCell) -> String {
    match cell {
        GridCell::Blank => " ".repeat(CELL_WIDTH),
        GridCell::Day(day) => {
            let text = pad(&day.date.format("%-d").to_string(), CELL_WIDTH);
            if day.is_today {
                text.reversed().bold().to_string()
            } else if day.is_past {
                text.dimmed().to_string()
            } else {
                text
            }
        }
    }
}

/// A bar as exactly `width` characters. The first day carries the title,
/// continuation days draw the span line.
fn bar_segment(bar: &EventBar, width: usize) -> String {
    let title = bar.title.as_deref().unwrap_or("");
    match bar.role {
        None => {
            let inner = truncate(title, width.saturating_sub(2));
            pad(&format!("[{inner}]"), width)
        }
        Some(SpanRole::Start) => {
            let inner = truncate(title, width.saturating_sub(1));
            fill(&format!("[{inner}"), width, '=')
        }
        Some(SpanRole::Middle) => "=".repeat(width),
        Some(SpanRole::End) => format!("{}]", "=".repeat(width.saturating_sub(1))),
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn pad(text: &str, width: usize) -> String {
    fill(text, width, ' ')
}

fn fill(text: &str, width: usize, with: char) -> String {
    let len = text.chars().count();
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(with, width.saturating_sub(len)));
    out
}

/// Status line text for an event's phase.
pub fn phase_caption(phase: &EventPhase, tr: &Translator) -> String {
    let text = tr.render(&phase.caption());
    match phase {
        EventPhase::Upcoming { .. } => text.green().to_string(),
        EventPhase::StartsToday | EventPhase::Ongoing { .. } => text.yellow().bold().to_string(),
        EventPhase::Ended { .. } => text.dimmed().to_string(),
    }
}

pub fn action_label(action: &ReminderAction, tr: &Translator) -> String {
    let label = format!("[{}]", tr.render(&action.label()));
    match action {
        ReminderAction::Set => label.green().to_string(),
        ReminderAction::Cancel => label.red().to_string(),
        ReminderAction::Ongoing | ReminderAction::Done => label.dimmed().to_string(),
    }
}

/// Multi-line listing entry: title and dates, venue, tags, status and action.
pub fn render_entry(entry: &EventEntry, tr: &Translator) -> String {
    let event = entry.event;
    let mut lines = vec![format!("{} {}", "●".cyan(), event.render())];

    lines.push(format!(
        "   {} {} — {}",
        tr.t("event_venue_label").dimmed(),
        event.venue,
        event.city
    ));
    if let Some(address) = &event.address {
        lines.push(format!("   {}", address.dimmed()));
    }

    if !event.craft_tags.is_empty() {
        lines.push(format!(
            "   {} {}",
            tr.t("event_tags_label").dimmed(),
            event
                .craft_tags
                .iter()
                .map(|tag| tr.craft_tag(tag))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if let Some(description) = &event.description {
        lines.push(format!("   {}", description));
    }

    lines.push(format!(
        "   {}  {}  {}",
        phase_caption(&entry.phase, tr),
        action_label(&entry.action, tr),
        format!("({})", event.id).dimmed()
    ));

    lines.join("\n")
}

pub fn render_recently_ended(ended: &RecentlyEnded, tr: &Translator) -> String {
    let caption = tr.render(&EventPhase::Ended { days_ago: ended.days_ago }.caption());
    format!("   {} {}", ended.event.title, caption.dimmed())
}

pub fn render_notice(notice: &DueNotice, tr: &Translator) -> String {
    let text = tr.render(&notice.message());
    if notice.days_until_start == 0 {
        format!("{} {}", "!".red().bold(), text.bold())
    } else {
        format!("{} {}", "!".yellow().bold(), text)
    }
}

/// Month grid as an HTML table. Day cells carry `is-today`/`is-past`, bars
/// carry the span role class, and only the title segment links to the event.
pub fn grid_html(grid: &MonthGrid) -> String {
    let mut html = String::from("<table class=\"calendar\">\n<thead><tr>");
    for day in WEEKDAYS {
        html.push_str(&format!("<th>{day}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for week in &grid.weeks {
        html.push_str("<tr>");
        for cell in week {
            match cell {
                GridCell::Blank => html.push_str("<td class=\"calendar-cell empty\"></td>"),
                GridCell::Day(day) => html.push_str(&day_cell_html(day)),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn day_cell_html(day: &DayCell) -> String {
    let mut classes = vec!["calendar-cell"];
    if day.is_today {
        classes.push("is-today");
    }
    if day.is_past {
        classes.push("is-past");
    }

    let bars: String = day.bars.iter().map(bar_html).collect();
    format!(
        concat!(
            "<td class=\"{}\"><div class=\"day-number\">{}</div>",
            "<div class=\"events-container\">{}</div></td>",
        ),
        classes.join(" "),
        day.date.format("%-d"),
        bars
    )
}

fn bar_html(bar: &EventBar) -> String {
    let class = match bar.role {
        Some(role) => format!("event-bar {}", role.css_class()),
        None => "event-bar".to_string(),
    };
    let content = match &bar.title {
        Some(title) => format!(
            "<a href=\"#event-{}\">{}</a>",
            escape_html(&bar.id),
            escape_html(title)
        ),
        None => "&nbsp;".to_string(),
    };
    format!("<div class=\"{class}\">{content}</div>")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mela_core::calendar::{CalendarCursor, build_month};
    use mela_core::catalog::EventCatalog;
    use mela_core::preferences::PreferenceRecord;
    use mela_core::session::SessionContext;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(title: Option<&str>, role: Option<SpanRole>) -> EventBar {
        EventBar {
            id: "ev-1".to_string(),
            title: title.map(str::to_string),
            role,
        }
    }

    #[test]
    fn bar_segments_have_fixed_width() {
        let cases = [
            bar(Some("Terracotta Bazaar"), Some(SpanRole::Start)),
            bar(None, Some(SpanRole::Middle)),
            bar(None, Some(SpanRole::End)),
            bar(Some("Meet"), None),
        ];
        for b in &cases {
            assert_eq!(bar_segment(b, CELL_WIDTH).chars().count(), CELL_WIDTH);
        }
    }

    #[test]
    fn bar_segment_shapes() {
        assert_eq!(bar_segment(&bar(Some("Meet"), None), 8), "[Meet]  ");
        assert_eq!(bar_segment(&bar(Some("Bazaar"), Some(SpanRole::Start)), 10), "[Bazaar===");
        assert_eq!(bar_segment(&bar(None, Some(SpanRole::Middle)), 4), "====");
        assert_eq!(bar_segment(&bar(None, Some(SpanRole::End)), 4), "===]");
        assert_eq!(bar_segment(&bar(Some("Terracotta"), Some(SpanRole::Start)), 6), "[Terra");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>Tom & Jerry's \"Show\"</b>"),
            "&lt;b&gt;Tom &amp; Jerry&#39;s &quot;Show&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn html_grid_marks_spans_and_today() {
        let catalog = EventCatalog::seed();
        let events: Vec<&Event> = catalog.events().iter().collect();
        let grid = build_month(2025, 9, &events, date(2025, 9, 13)).unwrap();
        let html = grid_html(&grid);

        assert!(html.contains("calendar-cell is-today"));
        assert!(html.contains("calendar-cell is-past"));
        assert!(html.contains("event-bar event-bar-start\"><a href=\"#event-ev-001\">"));
        assert!(html.contains("event-bar event-bar-middle\">&nbsp;</div>"));
        assert!(html.contains("event-bar event-bar-end\">&nbsp;</div>"));
        // Sep 1 2025 is a Monday, so the first row has no leading blanks; Sep 30
        // is a Tuesday, so the last row ends with five.
        assert!(html.contains(
            "<tr><td class=\"calendar-cell is-past\"><div class=\"day-number\">1</div>"
        ));

        let blank = "<td class=\"calendar-cell empty\"></td>";
        assert_eq!(html.matches(blank).count(), 5);
        assert!(html.contains(&format!("{}</tr>", blank.repeat(5))));
    }

    #[test]
    fn entry_tags_follow_language() {
        let catalog = EventCatalog::seed();
        let today = date(2025, 9, 13);
        let session = SessionContext::new("guest", PreferenceRecord::default(), today);
        let entry = EventEntry::new(catalog.get("ev-001").unwrap(), &session, today);

        let hindi = render_entry(&entry, &Translator::new("Hindi"));
        assert!(hindi.contains("टेराकोटा मिट्टी, सिरेमिक, मिट्टी कला"));
        assert!(!hindi.contains("Pottery"));

        let english = render_entry(&entry, &Translator::new("English"));
        assert!(english.contains("Terracotta clay, Ceramics, Pottery"));
        assert!(english.contains("Starts in 3 days"));
    }

    #[test]
    fn terminal_grid_shows_titles_once() {
        let catalog = EventCatalog::seed();
        let bazaar = catalog.get("ev-001").unwrap();
        let grid = MonthGrid::build(
            CalendarCursor::new(2025, 9).unwrap(),
            &[bazaar],
            date(2025, 9, 13),
        );
        let out = grid.render();

        let shown = truncate(&bazaar.title, CELL_WIDTH - 1);
        assert_eq!(out.matches(shown.as_str()).count(), 1);
        assert!(out.contains("Mon"));
        assert!(out.contains("==]"));
    }
}
