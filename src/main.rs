//! CLI entry point for agency-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agency_blog::commands::show::Format;

#[derive(Parser)]
#[command(name = "agency-blog")]
#[command(version)]
#[command(about = "Blog content layer for a recruitment agency marketing site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts, newest first
    #[command(alias = "ls")]
    List,

    /// Show a single post
    Show {
        /// Post id (slug)
        id: String,

        /// Print the normalized post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the blog pages as static HTML
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "agency_blog=debug,info"
    } else {
        "agency_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List => {
            let blog = agency_blog::Blog::new(&base_dir)?;
            agency_blog::commands::list::run(&blog).await?;
        }

        Commands::Show { id, json } => {
            let blog = agency_blog::Blog::new(&base_dir)?;
            let format = if json { Format::Json } else { Format::Text };
            agency_blog::commands::show::run(&blog, &id, format).await?;
        }

        Commands::Generate => {
            let blog = agency_blog::Blog::new(&base_dir)?;
            tracing::info!("Generating blog pages...");
            let count = blog.generate().await?;
            println!("Generated {} posts into {:?}", count, blog.public_dir);
        }

        Commands::Server { port, ip } => {
            let blog = agency_blog::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            agency_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::Clean => {
            let blog = agency_blog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("agency-blog {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
