use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};
use crate::core::outfit::EngineSettings;
use crate::core::profile::{DEFAULT_DIVERSITY_STRENGTH, Preferences};

/// Config files searched in the working directory, first hit wins
pub const CONFIG_FILES: [&str; 4] = ["ootd.toml", "ootd.yaml", "ootd.json", ".ootd.toml"];

/// Environment prefix (`OOTD_SESSION_PATH`, `OOTD_ENGINE__TOP_K`, ...)
pub const ENV_PREFIX: &str = "OOTD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Wardrobe JSON file; the built-in set is used while it does not exist
    pub wardrobe_path: PathBuf,

    /// Session JSON file: mood notes, chat, bans, recent picks
    pub session_path: PathBuf,

    /// City shown when `--city` is not given
    pub default_city: String,

    /// Engine tuning
    pub engine: EngineSettings,

    /// Seeds for a brand-new session
    pub prefs: PrefDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefDefaults
{
    pub warmth_bias: f64,
    pub diversity_strength: f64,
}

impl Default for PrefDefaults
{
    fn default() -> Self
    {
        Self { warmth_bias: 0.0, diversity_strength: DEFAULT_DIVERSITY_STRENGTH }
    }
}

impl PrefDefaults
{
    /// Fresh preferences carrying these seeds
    pub fn preferences(&self) -> Preferences
    {
        Preferences {
            warmth_bias: self.warmth_bias,
            diversity_strength: self
                .diversity_strength
                .max(0.0),
            ..Preferences::default()
        }
    }
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            wardrobe_path: PathBuf::from(".ootd/wardrobe.json"),
            session_path: PathBuf::from(".ootd/session.json"),
            default_city: "Seoul,KR".to_string(),
            engine: EngineSettings::default(),
            prefs: PrefDefaults::default(),
        }
    }
}

impl Config
{
    pub fn wardrobe_path(&self) -> PathBuf
    {
        expand_path(&self.wardrobe_path)
    }

    pub fn session_path(&self) -> PathBuf
    {
        expand_path(&self.session_path)
    }
}

/// Expand `~` and `$VAR` in a configured path; unexpandable paths are kept
fn expand_path(p: &Path) -> PathBuf
{
    let raw = p.to_string_lossy();
    match shellexpand::full(&raw)
    {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => p.to_path_buf(),
    }
}

/// Load configuration from `explicit` (must exist) or the first config file
/// found in the working directory, then overlay `OOTD_*` environment vars.
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let mut builder = config::Config::builder();

    match explicit
    {
        Some(path) =>
        {
            if !path.exists()
            {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            // Load from config files in priority order
            for path in &CONFIG_FILES
            {
                if Path::new(path).exists()
                {
                    debug!(path, "using config file");
                    builder = builder.add_source(config::File::with_name(path));
                    break;
                }
            }
        }
    }

    // Single underscore after the prefix, double between nested keys
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        println!("Would write {}:\n{}", config_path.display(), toml_string);
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml()
    {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[engine]"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults()
    {
        let cfg: Config = toml::from_str("default_city = \"Busan,KR\"\n[engine]\ntop_k = 3\n").unwrap();
        assert_eq!(cfg.default_city, "Busan,KR");
        assert_eq!(cfg.engine.top_k, 3);
        assert_eq!(cfg.engine.history_cap, EngineSettings::default().history_cap);
        assert_eq!(cfg.session_path, Config::default().session_path);
    }

    #[test]
    fn pref_defaults_clamp_negative_strength()
    {
        let seeds = PrefDefaults { warmth_bias: 1.0, diversity_strength: -2.0 };
        let prefs = seeds.preferences();
        assert_eq!(prefs.warmth_bias, 1.0);
        assert_eq!(prefs.diversity_strength, 0.0);
    }
}
