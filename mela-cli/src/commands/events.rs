use anyhow::Result;
use mela_core::view::EventsView;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::render_entry;

pub fn run(ctx: &Context) -> Result<()> {
    println!("{}", output(ctx));
    Ok(())
}

/// Ongoing events first, then upcoming, then recently ended.
fn output(ctx: &Context) -> String {
    let view = EventsView::build(&ctx.catalog, &ctx.session, ctx.today);
    let mut lines = vec![ctx.tr.t("events_list_header").bold().to_string()];

    if view.listing.is_empty() {
        lines.push(ctx.tr.render(&EventsView::empty_listing_message()).dimmed().to_string());
        return lines.join("\n");
    }

    for entry in &view.listing {
        lines.push(String::new());
        lines.push(render_entry(entry, &ctx.tr));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;

    #[test]
    fn lists_visible_events_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let out = output(&ctx);

        let bazaar = out.find("Handmade Bazaar").unwrap();
        let ended = out.find("(ev-005)").unwrap();
        assert!(bazaar < ended);
        // Ended more than two weeks before 2025-09-13.
        assert!(!out.contains("(ev-past-jun)"));
    }

    #[test]
    fn empty_listing_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        ctx.today = chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(output(&ctx).contains("No events match filters"));
    }
}
