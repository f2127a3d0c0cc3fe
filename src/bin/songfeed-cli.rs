use clap::{Parser, Subcommand};
use songfeed::view::MAX_RECOMMENDATIONS;
use songfeed::{ClientConfig, FetchOutcome, HomeFeed, PlayerState, RecommendApi, Song};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "songfeed-cli")]
#[command(about = "CLI for songfeed - home feed for a song recommendation backend", long_about = None)]
struct Cli {
    /// Backend root URL (can also be set via SONGFEED_BASE_URL env var)
    #[arg(long, env = "SONGFEED_BASE_URL", default_value = songfeed::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "SONGFEED_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recommendations for a song
    Recommend {
        /// Song ID
        id: String,

        /// Number of songs to print
        #[arg(short, long, default_value_t = MAX_RECOMMENDATIONS)]
        limit: usize,
    },
    /// Search the catalogue
    Search {
        /// Search query
        query: String,
    },
    /// Render the home screen from a play history
    Home {
        /// JSON file holding an array of played songs, oldest first
        #[arg(long)]
        history: PathBuf,

        /// ID of the current song (defaults to the last played one)
        #[arg(short, long)]
        current: Option<String>,
    },
    /// Print the stream URL for a song
    StreamUrl {
        /// Song title
        title: String,

        /// Artist name
        artist: String,
    },
}

fn load_history(path: &Path) -> songfeed::error::Result<Vec<Song>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::new(&cli.base_url)?.with_timeout(Duration::from_secs(cli.timeout));
    let api = RecommendApi::new(config)?;

    match cli.command {
        Commands::Recommend { id, limit } => {
            let songs = api.get_recommendations(&id).await?;
            println!("Recommendations for {} ({} total):", id, songs.len());
            for (i, song) in songs.iter().take(limit).enumerate() {
                println!("{}. {} (ID: {})", i + 1, song.display_name(), song.id);
            }
        }
        Commands::Search { query } => {
            println!("Searching for '{}'...", query);
            let songs = api.search(&query).await?;
            for (i, song) in songs.iter().enumerate() {
                println!("{}. {} (ID: {})", i + 1, song.display_name(), song.id);
            }
        }
        Commands::Home { history, current } => {
            let history = load_history(&history)?;
            let current = match current {
                Some(id) => Some(
                    history
                        .iter()
                        .find(|s| s.id == id)
                        .cloned()
                        .unwrap_or_else(|| Song::new(id, "", "")),
                ),
                None => history.last().cloned(),
            };

            let mut player = PlayerState::with_history(history);
            player.select(current);

            let feed = HomeFeed::new(api);
            if let FetchOutcome::Failed(e) = feed.sync(&player).await {
                eprintln!("Recommendations unavailable: {}", e);
            }
            print!("{}", feed.home(&player).await);
        }
        Commands::StreamUrl { title, artist } => {
            println!("{}", api.stream_url(&title, &artist)?);
        }
    }

    Ok(())
}
