//! Lumen Photos - CLI
//!
//! Command-line interface for connecting to a photo server and
//! browsing its gallery.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use lumen_photos::{
    Auth, CenterSquareMask, CircleMask, ClientError, ConnectionParams, JsonFilePersistence,
    ObjectPersistence, PagingOrder, PhotoClient, Session, ShapeMaskTransformation,
};

#[derive(Parser)]
#[command(name = "lumen-photos")]
#[command(version = lumen_photos::VERSION)]
#[command(about = "Lumen Photos - client for self-hosted photo servers")]
struct Cli {
    /// State directory (stored session and auth)
    #[arg(long, default_value = "./.lumen-photos")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to a server and store the session
    Connect {
        /// Server root URL
        url: String,

        /// Username (omit for public access)
        #[arg(short, long)]
        username: Option<String>,

        /// Password
        #[arg(short, long)]
        password: Option<String>,

        /// Connect without credentials (public environment)
        #[arg(long)]
        public: bool,
    },

    /// List gallery media using the stored session
    List {
        /// Page size
        #[arg(long, default_value_t = 40)]
        count: usize,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Oldest first instead of newest first
        #[arg(long)]
        oldest: bool,
    },

    /// Download a thumbnail and render it through a shape mask
    Thumb {
        /// Content hash of the media item
        hash: String,

        /// Output PNG path
        #[arg(short, long, default_value = "thumb.png")]
        output: PathBuf,

        /// Shape to render
        #[arg(long, value_enum, default_value = "square")]
        mask: MaskKind,
    },

    /// Show the stored session
    Status,

    /// Forget the stored session and auth
    Disconnect,
}

#[derive(Clone, Copy, ValueEnum)]
enum MaskKind {
    Square,
    Circle,
}

struct StateDir {
    session: Arc<JsonFilePersistence<Session>>,
    auth: Arc<JsonFilePersistence<Auth>>,
}

impl StateDir {
    fn new(root: &PathBuf) -> Self {
        Self {
            session: Arc::new(JsonFilePersistence::new(root.join("session.json"))),
            auth: Arc::new(JsonFilePersistence::new(root.join("auth.json"))),
        }
    }

    fn stored_session(&self) -> Result<Session> {
        Ok(self.session.load()?.ok_or(ClientError::NoSession)?)
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let state = StateDir::new(&cli.state);

    match cli.command {
        Commands::Connect {
            url,
            username,
            password,
            public,
        } => {
            let auth = match (public, username, password) {
                (true, _, _) => Auth::Public,
                (false, Some(username), Some(password)) => Auth::Credentials { username, password },
                _ => bail!("provide --username and --password, or --public"),
            };

            println!("🔌 Connecting to {}...", url);
            let client = PhotoClient::connect_with_stores(
                ConnectionParams::new(url),
                auth,
                Some(state.session.clone() as Arc<dyn ObjectPersistence<Session>>),
                Some(state.auth.clone() as Arc<dyn ObjectPersistence<Auth>>),
            )
            .await?;

            println!("✅ Connected! Session stored in {}", cli.state.display());
            println!("   Session id: {}", client.session().id);
        }

        Commands::List {
            count,
            pages,
            oldest,
        } => {
            let client = PhotoClient::resume(state.stored_session()?)?;
            let order = if oldest {
                PagingOrder::Asc
            } else {
                PagingOrder::Desc
            };

            let mut feed = client.feed(order, count);
            for _ in 0..pages {
                feed.load_next().await?;
                if feed.is_exhausted() {
                    break;
                }
            }

            if feed.items().is_empty() {
                println!("📭 No media found");
            } else {
                println!("📷 Gallery ({} items):", feed.items().len());
                println!("{:-<72}", "");
                for media in feed.items() {
                    println!(
                        "{}  {:<8}  {}  {} ({}x{})",
                        media.taken_at.format("%Y-%m-%d %H:%M"),
                        format!("{:?}", media.media),
                        &media.hash[..12.min(media.hash.len())],
                        media.name,
                        media.width,
                        media.height,
                    );
                }
            }
        }

        Commands::Thumb { hash, output, mask } => {
            let client = PhotoClient::resume(state.stored_session()?)?;

            let url = client.urls().small_thumbnail_url(&hash);
            println!("📥 Fetching {}", url);
            let bytes = client.fetch_image(&url).await?;
            let source = image::load_from_memory(&bytes).map_err(ClientError::from)?;

            let rendered = match mask {
                MaskKind::Square => ShapeMaskTransformation::new(CenterSquareMask).transform(source),
                MaskKind::Circle => ShapeMaskTransformation::new(CircleMask).transform(source),
            };
            rendered.save(&output).map_err(ClientError::from)?;

            println!("✅ Saved {}x{} thumbnail to {}", rendered.width(), rendered.height(), output.display());
        }

        Commands::Status => match state.session.load()? {
            Some(session) => {
                println!("🔑 Session for {}", session.connection_params.root_url());
                println!("   id:             {}", session.id);
                println!("   preview token:  {}", mask_token(&session.preview_token));
                println!("   download token: {}", mask_token(&session.download_token));
            }
            None => println!("📭 No stored session - run connect first"),
        },

        Commands::Disconnect => {
            state.session.clear()?;
            state.auth.clear()?;
            println!("👋 Session and auth cleared");
        }
    }

    Ok(())
}

fn mask_token(token: &str) -> String {
    if token.len() <= 4 {
        "*".repeat(token.len())
    } else {
        format!("{}…", &token[..4])
    }
}
