use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre;

use crate::api::HttpContentProvider;
use crate::cache::TtlCache;
use crate::config::load_config;
use crate::content::ContentService;
use crate::store::{FileStore, KeyValueStore, default_store_path};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "foliotui", about = "Terminal front end for a minimal portfolio site")]
pub struct Cli {
    /// Starting location query string, e.g. "page=blogDetail&post=abc"
    #[arg(long)]
    pub location: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// List blog posts (JSONL)
    Posts,
    /// Print the content blocks of one post (JSONL)
    Show {
        /// Post ID
        post_id: String,
    },
}

// ---------------------------------------------------------------------------
// Service construction (shared with main.rs TUI path)
// ---------------------------------------------------------------------------

/// Build the content service and the store it persists through, from the
/// user config.
pub fn build_content_service() -> (ContentService, Arc<dyn KeyValueStore>) {
    let config = load_config();
    let store_path = config.store_path.unwrap_or_else(default_store_path);
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(store_path));

    let cache = TtlCache::new(Arc::clone(&store));
    let provider = Arc::new(HttpContentProvider::new(&config.provider_url));
    (ContentService::new(provider, cache), store)
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand) -> eyre::Result<()> {
    let (service, _store) = build_content_service();

    match cmd {
        CliCommand::Tui => unreachable!("tui is handled in main"),

        CliCommand::Posts => {
            let (posts, used_fallback) = service.load_posts().await;
            if used_fallback {
                eprintln!("Warning: provider unreachable, listing built-in posts.");
            }
            for post in &posts {
                let line = serde_json::to_string(post)?;
                println!("{line}");
            }
        }

        CliCommand::Show { post_id } => {
            let blocks = service.load_content(&post_id).await;
            if blocks.is_empty() {
                eprintln!("No content available for post {post_id}.");
                return Ok(());
            }
            for block in &blocks {
                let line = serde_json::to_string(block)?;
                println!("{line}");
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
