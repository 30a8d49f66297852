//! Handlers for `mood` and `ban`: the user-editable text sources of the
//! style profile.

use anyhow::{Result, bail};
use itertools::Itertools;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::cli::{AppContext, BanArgs, BanCommand, MoodArgs, MoodCommand};
use crate::cli_ext::shared::{Paint, load_session, save_session};
use crate::infra::config::Config;

#[derive(Tabled)]
struct MoodRow
{
    #[tabled(rename = "#")]
    index: usize,
    saved: String,
    text: String,
}

#[instrument(skip_all)]
pub fn mood(
    args: MoodArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let mut session = load_session(cfg)?;
    let paint = Paint::new(ctx);

    match args.command
    {
        MoodCommand::Add { text } =>
        {
            let text = text.join(" ");
            if !session.add_mood(&text)
            {
                bail!("Mood note is empty");
            }
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!("{} mood note #{}", paint.good("Saved"), session.mood_records.len() - 1);
            }
        }

        MoodCommand::List =>
        {
            if session
                .mood_records
                .is_empty()
            {
                if !ctx.quiet
                {
                    println!("{}", paint.dim("No mood notes yet."));
                }
                return Ok(());
            }
            let rows: Vec<MoodRow> = session
                .mood_records
                .iter()
                .enumerate()
                .map(|(index, r)| MoodRow {
                    index,
                    saved: r
                        .ts
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                    text: r
                        .text
                        .clone(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }

        MoodCommand::Rm { index } =>
        {
            let Some(removed) = session.remove_mood(index)
            else
            {
                bail!(
                    "No mood note #{index} (have {})",
                    session
                        .mood_records
                        .len()
                );
            };
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!("{} \"{}\"", paint.warn("Removed"), removed.text);
            }
        }
    }

    Ok(())
}

#[instrument(skip_all)]
pub fn ban(
    args: BanArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let mut session = load_session(cfg)?;
    let paint = Paint::new(ctx);

    match args.command
    {
        BanCommand::Set { keywords } =>
        {
            session.set_manual_bans(keywords);
            if session
                .banned_manual
                .is_empty()
            {
                bail!("No usable keywords given");
            }
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!(
                    "{} {}",
                    paint.good("Banned:"),
                    session
                        .banned_manual
                        .iter()
                        .join(", ")
                );
            }
        }

        BanCommand::List =>
        {
            session.refresh_profile(&cfg.engine);
            let from_text = session
                .prefs
                .banned_keywords
                .iter()
                .filter(|k| {
                    !session
                        .banned_manual
                        .contains(*k)
                })
                .join(", ");

            println!(
                "{} {}",
                paint.heading("manual:"),
                if session
                    .banned_manual
                    .is_empty()
                {
                    paint.dim("(none)")
                }
                else
                {
                    session
                        .banned_manual
                        .iter()
                        .join(", ")
                }
            );
            println!(
                "{} {}",
                paint.heading("from notes/chat:"),
                if from_text.is_empty() { paint.dim("(none)") } else { from_text }
            );
        }

        BanCommand::Clear =>
        {
            session
                .banned_manual
                .clear();
            save_session(cfg, &session, ctx)?;
            if !ctx.quiet
            {
                println!("{}", paint.warn("Manual bans cleared"));
            }
        }
    }

    Ok(())
}
