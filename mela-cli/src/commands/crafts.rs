use anyhow::Result;
use mela_core::Message;
use mela_core::craft_filter::all_tags;
use owo_colors::OwoColorize;

use super::Context;

/// Show the craft selection, or replace it with `set` (`clear` empties it).
/// Crafts may be given by their catalog tag or by their translated name.
pub fn run(ctx: &mut Context, set: Vec<String>, clear: bool) -> Result<()> {
    if clear {
        ctx.session.set_preferred_crafts(&mut ctx.store, Vec::new())?;
        println!("{}", ctx.tr.t("crafts_saved").green());
    } else if !set.is_empty() {
        let vocabulary = all_tags(ctx.catalog.events());
        let crafts = set
            .iter()
            .map(|input| ctx.tr.canonical_tag(input, &vocabulary))
            .collect();
        ctx.session.set_preferred_crafts(&mut ctx.store, crafts)?;
        println!("{}", ctx.tr.t("crafts_saved").green());
    }

    println!("{}", output(ctx));
    Ok(())
}

fn output(ctx: &Context) -> String {
    let display = |tags: &[String]| {
        tags.iter()
            .map(|tag| ctx.tr.craft_tag(tag))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let crafts = ctx.session.preferred_crafts();
    let selected = if crafts.is_empty() {
        ctx.tr.t("no_crafts_selected")
    } else {
        ctx.tr.render(&Message::new("selected_crafts").with("crafts", display(crafts)))
    };

    let available = display(&all_tags(ctx.catalog.events()));
    format!(
        "{}\n{}",
        selected.bold(),
        ctx.tr.render(&Message::new("available_crafts").with("crafts", available)).dimmed()
    )
}
