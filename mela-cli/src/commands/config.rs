use anyhow::Result;
use mela_core::mela_config::MelaConfig;
use owo_colors::OwoColorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config_path = MelaConfig::config_path()?;
    let catalog = match ctx.config.catalog_path() {
        Some(path) => path.display().to_string(),
        None => "(built-in)".to_string(),
    };

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", ctx.config.data_path().display());
    println!("  Catalog:    {}", catalog);
    println!();
    println!("{}", "Session".bold());
    println!("  User:       {}", ctx.session.user_id());
    println!("  Today:      {}", ctx.today);
    println!("  Window:     {} days", ctx.session.reminder_window().days());

    Ok(())
}
