use anyhow::Result;
use clap::Parser;
use ootd::cli::{AppContext, Cli, Commands};
use ootd::cli_ext::{recommend_cmd, saved_cmd, session_cmd, wardrobe_cmd};
use tracing_subscriber::EnvFilter;

/// Log filter variable (e.g. `OOTD_LOG=ootd=debug`)
const LOG_ENV: &str = "OOTD_LOG";

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    // Config is only read by commands that touch the wardrobe or session
    let config_path = cli.config;
    let cfg = || ootd::load_config(config_path.as_deref());

    match cli.command {
        Commands::Recommend(args) => recommend_cmd::recommend(args, &cfg()?, &ctx),
        Commands::Explain(args) => recommend_cmd::explain(args, &cfg()?, &ctx),
        Commands::Shop(args) => recommend_cmd::shop(args, &cfg()?, &ctx),
        Commands::Mood(args) => session_cmd::mood(args, &cfg()?, &ctx),
        Commands::Ban(args) => session_cmd::ban(args, &cfg()?, &ctx),
        Commands::Wardrobe(args) => wardrobe_cmd::run(args, &cfg()?, &ctx),
        Commands::Saved(args) => saved_cmd::run(args, &cfg()?, &ctx),
        Commands::Tpo(args) => recommend_cmd::tpo(args),
        Commands::Init(args) => ootd::infra::config::init(args, &ctx),
        Commands::Completions(args) => ootd::completion::run(args, &ctx),
    }
}
