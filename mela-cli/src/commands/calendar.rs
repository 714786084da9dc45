use anyhow::Result;
use mela_core::calendar::{CalendarCursor, MonthGrid};
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{Render, grid_html};

pub struct CalendarArgs {
    pub month: Option<String>,
    pub prev: bool,
    pub next: bool,
    pub html: bool,
}

pub fn run(ctx: &mut Context, args: CalendarArgs) -> Result<()> {
    if let Some(month) = &args.month {
        ctx.session.show_month(CalendarCursor::parse(month)?);
    }
    if args.prev {
        ctx.session.show_previous_month();
    }
    if args.next {
        ctx.session.show_next_month();
    }

    let grid = build_grid(ctx);
    if args.html {
        print!("{}", grid_html(&grid));
    } else {
        println!(
            "{} {}",
            ctx.tr.t("calendar_header").bold(),
            grid.cursor.first_day().format("%B %Y").bold()
        );
        println!("{}", grid.render());
    }

    Ok(())
}

fn build_grid(ctx: &Context) -> MonthGrid {
    let visible = ctx.session.visible_events(&ctx.catalog, ctx.today);
    MonthGrid::build(ctx.session.calendar_cursor(), &visible, ctx.today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_context;

    #[test]
    fn navigates_from_reference_month() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());

        run(&mut ctx, CalendarArgs { month: None, prev: false, next: true, html: false }).unwrap();
        assert_eq!(ctx.session.calendar_cursor().to_string(), "2025-10");

        let grid = build_grid(&ctx);
        let diwali = grid.cell(chrono::NaiveDate::from_ymd_opt(2025, 10, 25).unwrap()).unwrap();
        assert!(diwali.bars.iter().any(|b| b.id == "ev-diwali"));
    }

    #[test]
    fn explicit_month_then_prev() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());

        let args = CalendarArgs {
            month: Some("2026-01".into()),
            prev: true,
            next: false,
            html: true,
        };
        run(&mut ctx, args).unwrap();
        assert_eq!(ctx.session.calendar_cursor().to_string(), "2025-12");
    }

    #[test]
    fn bad_month_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        let args = CalendarArgs {
            month: Some("2025-13".into()),
            prev: false,
            next: false,
            html: false,
        };
        assert!(run(&mut ctx, args).is_err());
    }
}
