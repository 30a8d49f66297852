//! Handlers for `saved add | list | rm | export`.

use anyhow::{Context, Result, bail};
use tabled::{Table, Tabled};
use tracing::{debug, instrument};

use crate::cli::{AppContext, SavedArgs, SavedCommand};
use crate::cli_ext::shared::{Paint, load_session, save_session};
use crate::core::saved::SavedOutfit;
use crate::infra::config::Config;
use crate::infra::store;

#[derive(Tabled)]
struct SavedRow
{
    date: String,
    #[tabled(rename = "#")]
    index: usize,
    saved: String,
    occasion: String,
    outfit: String,
}

impl SavedRow
{
    fn new(
        index: usize,
        entry: &SavedOutfit,
    ) -> Self
    {
        Self {
            date: entry
                .date
                .to_string(),
            index,
            saved: entry
                .saved_at
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            occasion: entry
                .tpo_tags
                .to_string(),
            outfit: entry
                .outfit
                .summary(),
        }
    }
}

#[instrument(skip_all)]
pub fn run(
    args: SavedArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let mut session = load_session(cfg)?;
    let paint = Paint::new(ctx);

    match args.command
    {
        SavedCommand::Add { date } =>
        {
            let Some(entry) = session.save_shown(date)
            else
            {
                bail!("Nothing to save yet. Run `ootd recommend` first.");
            };
            let line = format!("{} under {}: {}", paint.good("Saved"), entry.date, entry.outfit.summary());
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!("{line}");
            }
        }

        SavedCommand::List { date } =>
        {
            let dates: Vec<_> = match date
            {
                Some(d) => vec![d],
                None => session
                    .saved
                    .dates()
                    .collect(),
            };
            let rows: Vec<SavedRow> = dates
                .into_iter()
                .flat_map(|d| {
                    session
                        .saved
                        .on(d)
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| SavedRow::new(i, entry))
                })
                .collect();

            if rows.is_empty()
            {
                if !ctx.quiet
                {
                    println!("{}", paint.dim("No saved outfits yet."));
                }
                return Ok(());
            }
            println!("{}", Table::new(rows));
        }

        SavedCommand::Rm { date, index } =>
        {
            let Some(removed) = session
                .saved
                .remove(date, index)
            else
            {
                bail!("No saved outfit #{index} on {date}");
            };
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!("{} {}", paint.warn("Removed"), removed.outfit.summary());
            }
        }

        SavedCommand::Export { out } =>
        {
            let mut data = serde_json::to_vec_pretty(&session.saved)?;
            data.push(b'\n');

            match out
            {
                None => print!("{}", String::from_utf8_lossy(&data)),
                Some(path) if ctx.dry_run =>
                {
                    debug!(path = %path.display(), "dry run, export not written");
                }
                Some(path) =>
                {
                    store::write_atomic(&path, &data)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !ctx.quiet
                    {
                        println!(
                            "{} {} outfits to {}",
                            paint.good("Exported"),
                            session
                                .saved
                                .len(),
                            path.display()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
