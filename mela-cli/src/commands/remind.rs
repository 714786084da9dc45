use anyhow::Result;
use mela_core::reminders::ReminderOutcome;
use owo_colors::OwoColorize;

use super::Context;

pub fn set(ctx: &mut Context, event_id: &str) -> Result<()> {
    let outcome = ctx
        .session
        .set_reminder(&mut ctx.store, &ctx.catalog, event_id, ctx.today)?;
    println!("{}", describe(ctx, outcome));
    Ok(())
}

pub fn cancel(ctx: &mut Context, event_id: &str) -> Result<()> {
    let outcome = ctx.session.cancel_reminder(&mut ctx.store, event_id)?;
    println!("{}", describe(ctx, outcome));
    Ok(())
}

fn describe(ctx: &Context, outcome: ReminderOutcome) -> String {
    let text = ctx.tr.render(&outcome.message());
    match outcome {
        ReminderOutcome::Set | ReminderOutcome::AlreadySet => text.green().to_string(),
        ReminderOutcome::Cancelled | ReminderOutcome::NotSet => text.to_string(),
        ReminderOutcome::Ineligible => text.yellow().to_string(),
    }
}
