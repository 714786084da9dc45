use anyhow::Result;
use mela_core::reminders::ReminderWindow;
use mela_core::view::EventsView;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{render_entry, render_recently_ended};

/// Summary of what is coming up within the reminder window, plus what just ended.
/// `days` overrides the window for this run only.
pub fn run(ctx: &mut Context, days: Option<i64>) -> Result<()> {
    if let Some(days) = days {
        ctx.session.set_reminder_window(ReminderWindow::new(days)?);
    }
    println!("{}", output(ctx));
    Ok(())
}

fn output(ctx: &Context) -> String {
    let view = EventsView::build(&ctx.catalog, &ctx.session, ctx.today);
    let mut lines = vec![
        ctx.tr.t("events_header").bold().to_string(),
        ctx.tr.render(&view.upcoming_header()),
    ];

    for entry in &view.upcoming {
        lines.push(render_entry(entry, &ctx.tr));
    }

    if !view.recently_ended.is_empty() {
        lines.push(String::new());
        lines.push(ctx.tr.render(&view.recently_ended_header()).dimmed().to_string());
        for ended in &view.recently_ended {
            lines.push(render_recently_ended(ended, &ctx.tr));
        }
    }

    lines.join("\n")
}
