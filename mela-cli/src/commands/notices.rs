use anyhow::Result;
use mela_core::notifier::no_notices_message;
use mela_core::reminders::ReminderWindow;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::render_notice;

/// Scan the user's reminders for events starting within the window.
pub fn run(ctx: &mut Context, days: Option<i64>) -> Result<()> {
    if let Some(days) = days {
        ctx.session.set_reminder_window(ReminderWindow::new(days)?);
    }
    println!("{}", output(ctx));
    Ok(())
}

fn output(ctx: &Context) -> String {
    let notices = ctx.session.due_notices(&ctx.catalog, ctx.today);
    if notices.is_empty() {
        return ctx.tr.render(&no_notices_message()).dimmed().to_string();
    }

    notices
        .iter()
        .map(|n| render_notice(n, &ctx.tr))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;

    #[test]
    fn reports_due_reminders() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        assert!(output(&ctx).contains("No active reminders"));

        ctx.session
            .set_reminder(&mut ctx.store, &ctx.catalog, "ev-001", ctx.today)
            .unwrap();
        let out = output(&ctx);
        assert!(out.contains("Reminder: 'Handmade Bazaar' starts in 3 days on 2025-09-16."));
    }

    #[test]
    fn narrow_window_hides_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        ctx.session
            .set_reminder(&mut ctx.store, &ctx.catalog, "ev-001", ctx.today)
            .unwrap();

        run(&mut ctx, Some(2)).unwrap();
        assert!(output(&ctx).contains("No active reminders"));
    }
}
