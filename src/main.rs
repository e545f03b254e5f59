use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spdl::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true,
)]
struct Cli {
    /// Spotify track, album or playlist URL to download
    url: Option<String>,

    #[clap(flatten)]
    options: DownloadOptions,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Directory downloads are written to
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// How many search results to rank by duration (1 downloads the first hit)
    #[clap(short = 'l', long, default_value_t = 3)]
    pub search_limit: u32,

    /// Seconds to wait between tracks of a batch
    #[clap(short = 's', long, default_value_t = 30)]
    pub sleep_time: u64,

    /// Write a .lrc file next to each track when lyrics are found
    #[clap(long)]
    pub write_lrc: bool,

    /// Show detailed matching and progress information
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store Spotify API credentials and verify external tools
    Setup,

    /// Remove cached data
    ClearCache(ClearCacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ClearCacheOptions {
    /// Clear every cache category
    #[clap(long)]
    pub all: bool,

    /// Clear cached track records
    #[clap(long)]
    pub tracks: bool,

    /// Clear cached album records
    #[clap(long)]
    pub albums: bool,

    /// Clear cached playlist records
    #[clap(long)]
    pub playlists: bool,

    /// Clear cached cover images
    #[clap(long)]
    pub images: bool,

    /// Clear cached lyrics
    #[clap(long)]
    pub lyrics: bool,

    /// Clear cached API tokens
    #[clap(long)]
    pub tokens: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Setup) => cli::setup().await,
        Some(Command::ClearCache(opt)) => {
            cli::clear_cache(
                opt.all,
                opt.tracks,
                opt.albums,
                opt.playlists,
                opt.images,
                opt.lyrics,
                opt.tokens,
            )
            .await
        }
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        None => match cli.url {
            Some(url) => {
                cli::download(
                    &url,
                    cli.options.output,
                    cli.options.search_limit,
                    cli.options.sleep_time,
                    cli.options.write_lrc,
                    cli.options.verbose,
                )
                .await
            }
            None => {
                let _ = Cli::command().print_help();
            }
        },
    }
}
