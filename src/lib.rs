//! **ootd** - Deterministic daily outfit recommendations
//!
//! Ranks garments from a small personal wardrobe against the weather, the
//! day's occasion and free-text style notes, rotates picks across runs and
//! guarantees a different outfit on request.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Recommendation engine - pure, synchronous, no I/O
pub mod core {
    /// Wardrobe, weather, occasion and outfit types
    pub mod model;

    /// Closed style/color vocabularies and trigger words
    pub mod vocab;

    /// Free text → preference, avoidance and ban signals
    pub mod signals;

    /// Preference profile rebuilt from mood notes, chat and bans
    pub mod profile;
    pub use profile::{Preferences, rebuild_profile};

    /// Additive per-item scoring with breakdowns
    pub mod scorer;
    pub use scorer::{ScoreBreakdown, explain_item, score_item};

    /// Top-K selection with a recency penalty
    pub mod diversity;

    /// Base/accent/hint color plan
    pub mod palette;

    /// Slot assembly, extras and reasons
    pub mod outfit;
    pub use outfit::{EngineSettings, Recommendation, build_outfit};

    /// Per-user session and the reroll guarantee
    pub mod session;
    pub use session::Session;

    /// Occasion tags from event text
    pub mod tpo;

    /// Built-in wardrobe, repair and item templates
    pub mod wardrobe;

    /// Purchase suggestions for wardrobe gaps
    pub mod shopping;

    /// Saved outfits by date
    pub mod saved;
}

/// Command handlers behind the CLI subcommands
pub mod cli_ext {
    /// Flag → engine input glue, state loading, styling
    pub mod shared;

    /// recommend, explain, shop, tpo
    pub mod recommend_cmd;

    /// mood, ban
    pub mod session_cmd;

    /// wardrobe list/add/edit/rm/reset
    pub mod wardrobe_cmd;

    /// saved add/list/rm/export
    pub mod saved_cmd;
}

/// Infrastructure - configuration, persistence and helpers
pub mod infra {
    /// Layered configuration (file + OOTD_* env)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Atomic JSON persistence for session and wardrobe
    pub mod store;

    /// Text and list helpers
    pub mod utils;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::model::{Category, Outfit, TpoTags, Wardrobe, WardrobeItem, Weather};
pub use core::{EngineSettings, Preferences, Recommendation, Session};
