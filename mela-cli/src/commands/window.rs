use anyhow::Result;
use mela_core::Message;
use mela_core::reminders::ReminderWindow;
use owo_colors::OwoColorize;

use super::Context;

/// Persist a new reminder window to the config file.
pub fn run(ctx: &mut Context, days: i64) -> Result<()> {
    let window = apply(ctx, days)?;
    ctx.config.save()?;

    let msg = Message::new("reminder_window_saved").with("days", window.days());
    println!("{}", ctx.tr.render(&msg).green());
    Ok(())
}

fn apply(ctx: &mut Context, days: i64) -> Result<ReminderWindow> {
    let window = ReminderWindow::new(days)?;
    ctx.config.reminder_window_days = window;
    ctx.session.set_reminder_window(window);
    Ok(window)
}
