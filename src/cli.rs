use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::model::Category;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "ootd")]
#[command(
    about = "Daily outfit recommendations from your wardrobe, the weather, the occasion and your style notes"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would change without writing session or wardrobe files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file (default: first of ootd.toml, ootd.yaml, ootd.json, .ootd.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend today's outfit
    Recommend(RecommendArgs),

    /// Show the per-item score breakdown behind a recommendation
    Explain(ExplainArgs),

    /// Manage one-line mood notes that shape your style profile
    Mood(MoodArgs),

    /// Manage manually banned keywords
    Ban(BanArgs),

    /// Inspect and edit the wardrobe
    Wardrobe(WardrobeArgs),

    /// Keep outfits you liked, grouped by date
    Saved(SavedArgs),

    /// Suggest purchases that fill gaps for the given context
    Shop(ContextArgs),

    /// Infer occasion tags from event text
    Tpo(TpoArgs),

    /// Initialize an ootd.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Weather snapshot supplied by hand
#[derive(Args, Debug, Clone)]
pub struct WeatherArgs {
    /// City label shown in output (defaults to the configured city)
    #[arg(long)]
    pub city: Option<String>,

    /// Air temperature in °C
    #[arg(long, default_value = "15", allow_hyphen_values = true)]
    pub temp: f64,

    /// Feels-like temperature in °C (defaults to --temp)
    #[arg(long, allow_hyphen_values = true)]
    pub feels: Option<f64>,

    /// Relative humidity in percent
    #[arg(long, default_value = "50")]
    pub humidity: u8,

    /// Wind speed in m/s
    #[arg(long, default_value = "1.0")]
    pub wind: f64,

    /// Rain or snow is possible
    #[arg(long)]
    pub rain: bool,

    /// Free-form weather description
    #[arg(long, default_value = "manual")]
    pub desc: String,
}

/// Everything the engine needs besides the wardrobe and session
#[derive(Args, Debug, Clone)]
pub struct ContextArgs {
    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Event text (title or note); occasion tags are inferred from it
    #[arg(long, value_name = "TEXT")]
    pub event: Vec<String>,

    /// Explicit occasion tag, added after inferred ones (e.g. formal, date)
    #[arg(long, value_name = "TAG", value_delimiter = ',')]
    pub tag: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Chat message for this run; "another", "reroll", "다른 거" etc. swap the last outfit
    #[arg(long, value_name = "TEXT")]
    pub say: Option<String>,

    /// Persist a new warmth bias (positive dresses warmer)
    #[arg(long, allow_hyphen_values = true)]
    pub warmth_bias: Option<f64>,

    /// Persist a new diversity strength (0 disables rotation)
    #[arg(long)]
    pub diversity: Option<f64>,

    /// Save the recommended outfit under today's date
    #[arg(long)]
    pub save: bool,

    /// Print the recommendation as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Only explain this category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Print breakdowns as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MoodArgs {
    #[command(subcommand)]
    pub command: MoodCommand,
}

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    /// Save a mood note
    Add {
        /// Note text, e.g. "모노톤 시크" or "no black today, exclude black"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List saved notes with their index
    List,

    /// Remove the note at INDEX (as shown by `mood list`)
    Rm { index: usize },
}

#[derive(Args, Debug)]
pub struct BanArgs {
    #[command(subcommand)]
    pub command: BanCommand,
}

#[derive(Subcommand, Debug)]
pub enum BanCommand {
    /// Replace the ban list (comma-separated)
    Set {
        #[arg(required = true, value_delimiter = ',')]
        keywords: Vec<String>,
    },

    /// Show manual and text-derived bans
    List,

    /// Remove every manual ban
    Clear,
}

#[derive(Args, Debug)]
pub struct WardrobeArgs {
    #[command(subcommand)]
    pub command: WardrobeCommand,
}

#[derive(Subcommand, Debug)]
pub enum WardrobeCommand {
    /// List items, optionally for one category
    List {
        #[arg(value_enum)]
        category: Option<CategoryArg>,

        /// Print the wardrobe as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an item
    Add(WardrobeAddArgs),

    /// Change an existing item; only the given flags are applied
    Edit(WardrobeEditArgs),

    /// Remove an item by exact name
    Rm {
        #[arg(value_enum)]
        category: CategoryArg,
        name: String,
    },

    /// Replace the wardrobe with the built-in set
    Reset {
        /// Required to overwrite an existing wardrobe file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct WardrobeAddArgs {
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Item name (also its identity for bans and history)
    pub name: String,

    /// Tags, comma-separated (e.g. formal,smart,black)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Warmth 0-7 (tops, bottoms, outer)
    #[arg(long)]
    pub warmth: Option<f64>,

    /// Item tolerates rain (outer, shoes)
    #[arg(long)]
    pub rain_ok: bool,

    /// Image reference kept alongside the item
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args, Debug)]
pub struct WardrobeEditArgs {
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Current item name
    pub name: String,

    /// New name
    #[arg(long, value_name = "NAME")]
    pub rename: Option<String>,

    /// Replace the tags, comma-separated (an empty value clears them)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub tags: Option<Vec<String>>,

    /// Warmth 0-7 (tops, bottoms, outer)
    #[arg(long)]
    pub warmth: Option<f64>,

    /// Rain tolerance (outer, shoes)
    #[arg(long, value_name = "BOOL")]
    pub rain_ok: Option<bool>,

    /// Image reference kept alongside the item
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Tops,
    Bottoms,
    Outer,
    Shoes,
    Extras,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Tops => Category::Tops,
            CategoryArg::Bottoms => Category::Bottoms,
            CategoryArg::Outer => Category::Outer,
            CategoryArg::Shoes => Category::Shoes,
            CategoryArg::Extras => Category::Extras,
        }
    }
}

#[derive(Args, Debug)]
pub struct SavedArgs {
    #[command(subcommand)]
    pub command: SavedCommand,
}

#[derive(Subcommand, Debug)]
pub enum SavedCommand {
    /// Save the most recently recommended outfit
    Add {
        /// File it under this date (YYYY-MM-DD) instead of the day it was shown
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List saved outfits, newest date first
    List {
        /// Only this date (YYYY-MM-DD)
        date: Option<NaiveDate>,
    },

    /// Remove entry INDEX of DATE (as shown by `saved list`)
    Rm { date: NaiveDate, index: usize },

    /// Export every saved outfit as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct TpoArgs {
    /// Event text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
