//! Glue shared by the command handlers: turning flags into engine inputs,
//! loading and saving state, and optional coloring.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::cli::{AppContext, ContextArgs, WeatherArgs};
use crate::core::model::{TpoTags, Wardrobe, Weather};
use crate::core::session::Session;
use crate::core::tpo::infer_tpo_tags;
use crate::infra::config::Config;
use crate::infra::store;

/// Build and validate a weather snapshot from flags
pub fn weather_from_args(
    args: &WeatherArgs,
    cfg: &Config,
) -> Result<Weather>
{
    let weather = Weather {
        city: args
            .city
            .clone()
            .unwrap_or_else(|| {
                cfg.default_city
                    .clone()
            }),
        temp_c: args.temp,
        feels_c: args
            .feels
            .unwrap_or(args.temp),
        humidity: args.humidity,
        wind_ms: args.wind,
        rain: args.rain,
        desc: args
            .desc
            .clone(),
    };
    weather
        .validate()
        .context("Invalid weather flags")?;
    Ok(weather)
}

/// Occasion tags: inferred from `--event` text, then explicit `--tag`s
pub fn tags_from_args(args: &ContextArgs) -> TpoTags
{
    let mut tags: Vec<String> = Vec::new();
    if !args
        .event
        .is_empty()
    {
        let inferred = infer_tpo_tags(
            &args
                .event
                .join(" "),
        );
        tags.extend(
            inferred
                .as_slice()
                .iter()
                .cloned(),
        );
    }
    tags.extend(
        args.tag
            .iter()
            .cloned(),
    );
    TpoTags::new(tags)
}

/// Load the wardrobe and session named by the config
pub fn load_state(cfg: &Config) -> Result<(Wardrobe, Session)>
{
    let wardrobe_path = cfg.wardrobe_path();
    let wardrobe = store::load_wardrobe(&wardrobe_path)
        .with_context(|| format!("Failed to load wardrobe from {}", wardrobe_path.display()))?;
    let session = load_session(cfg)?;
    Ok((wardrobe, session))
}

pub fn load_session(cfg: &Config) -> Result<Session>
{
    let path = cfg.session_path();
    store::load_session(&path, &cfg.prefs)
        .with_context(|| format!("Failed to load session from {}", path.display()))
}

/// Persist the session unless this is a dry run
pub fn save_session(
    cfg: &Config,
    session: &Session,
    ctx: &AppContext,
) -> Result<()>
{
    let path = cfg.session_path();
    if ctx.dry_run
    {
        debug!(path = %path.display(), "dry run, session not saved");
        return Ok(());
    }
    store::save_session(&path, session)
        .with_context(|| format!("Failed to save session to {}", path.display()))
}

/// Persist the wardrobe unless this is a dry run
pub fn save_wardrobe(
    cfg: &Config,
    wardrobe: &Wardrobe,
    ctx: &AppContext,
) -> Result<()>
{
    let path = cfg.wardrobe_path();
    if ctx.dry_run
    {
        debug!(path = %path.display(), "dry run, wardrobe not saved");
        return Ok(());
    }
    store::save_wardrobe(&path, wardrobe)
        .with_context(|| format!("Failed to save wardrobe to {}", path.display()))
}

/// Terminal styling that honors `--no-color`
#[derive(Debug, Clone, Copy)]
pub struct Paint
{
    color: bool,
}

impl Paint
{
    pub fn new(ctx: &AppContext) -> Self
    {
        Self { color: !ctx.no_color }
    }

    pub fn heading(
        &self,
        s: &str,
    ) -> String
    {
        if self.color { s.bold().cyan().to_string() } else { s.to_string() }
    }

    pub fn good(
        &self,
        s: &str,
    ) -> String
    {
        if self.color { s.green().to_string() } else { s.to_string() }
    }

    pub fn warn(
        &self,
        s: &str,
    ) -> String
    {
        if self.color { s.yellow().to_string() } else { s.to_string() }
    }

    pub fn dim(
        &self,
        s: &str,
    ) -> String
    {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::cli::ContextArgs;

    fn weather_args() -> WeatherArgs
    {
        WeatherArgs {
            city: None,
            temp: 10.0,
            feels: None,
            humidity: 50,
            wind: 1.0,
            rain: false,
            desc: "manual".into(),
        }
    }

    #[test]
    fn feels_defaults_to_temp_and_city_to_config()
    {
        let w = weather_from_args(&weather_args(), &Config::default()).unwrap();
        assert_eq!(w.feels_c, 10.0);
        assert_eq!(w.city, "Seoul,KR");
    }

    #[test]
    fn invalid_weather_is_rejected()
    {
        let mut args = weather_args();
        args.humidity = 101;
        assert!(weather_from_args(&args, &Config::default()).is_err());
    }

    #[test]
    fn explicit_tags_follow_inferred_ones()
    {
        let args = ContextArgs {
            weather: weather_args(),
            event: vec!["job interview".into()],
            tag: vec!["Date".into(), "smart".into()],
        };
        assert_eq!(tags_from_args(&args).to_string(), "formal, smart, date");

        let none = ContextArgs { weather: weather_args(), event: vec![], tag: vec![] };
        assert_eq!(tags_from_args(&none).to_string(), "casual");
    }
}
