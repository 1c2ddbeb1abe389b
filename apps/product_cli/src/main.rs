use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings,
    present::{ProductCard, SearchRow, CREATE_SUCCESS_MESSAGE, NO_PRODUCTS_FOUND},
    ProductClient, ViewController, ViewState,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Query and create products from the command line")]
struct Args {
    /// Base URL of the product API; overrides product_search.toml and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one product by id.
    Get { id: String },
    /// List products whose name matches a keyword.
    Search { keyword: String },
    /// Create a product from a name and description.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Print how many products the catalogue holds.
    Count,
    /// Check that the API and its database are reachable.
    Ping,
}

fn render_card(card: &ProductCard) -> String {
    format!(
        "id: {}\nname: {}\ndescription: {}\nprice: {}\ncreated at: {}",
        card.id, card.name, card.description, card.price, card.created_at
    )
}

fn render_rows(rows: &[SearchRow]) -> String {
    rows.iter()
        .map(|row| format!("{}\n  {}\n  {}", row.name, row.description, row.price))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = load_settings().with_api_url_override(args.api_url);

    let client = Arc::new(
        ProductClient::new(&settings.api_url)
            .with_context(|| format!("invalid API url '{}'", settings.api_url))?,
    );
    let controller = ViewController::new(Arc::clone(&client));
    let mut view = ViewState::new();

    match args.command {
        Command::Get { id } => {
            view.lookup.product_id = id;
            let Some(effect) = view.submit_lookup() else {
                bail!("product id must not be empty");
            };
            controller.settle(&mut view, effect).await;
            if let Some(error) = view.lookup.error() {
                bail!("{error}");
            }
            if let Some(card) = view.lookup.card() {
                println!("{}", render_card(&card));
            }
        }
        Command::Search { keyword } => {
            view.search.keyword = keyword;
            let Some(effect) = view.submit_search() else {
                bail!("keyword must not be empty");
            };
            controller.settle(&mut view, effect).await;
            if let Some(error) = view.search.error() {
                bail!("{error}");
            }
            if view.search.shows_no_results() {
                println!("{NO_PRODUCTS_FOUND}");
            } else {
                println!("{}", render_rows(&view.search.rows()));
            }
        }
        Command::Create { name, description } => {
            view.create.name = name;
            view.create.description = description;
            let Some(effect) = view.submit_create() else {
                bail!("name and description must not be empty");
            };
            // The success-reset timer only matters to an interactive view.
            let _reset = controller.settle(&mut view, effect).await;
            if let Some(error) = view.create.error() {
                bail!("{error}");
            }
            if view.create.is_success() {
                println!("{CREATE_SUCCESS_MESSAGE}");
            }
        }
        Command::Count => {
            let count = client
                .count_products()
                .await
                .context("failed to count products")?;
            println!("{count}");
        }
        Command::Ping => {
            let message = client.health().await.context("API health check failed")?;
            println!("{message}");
        }
    }

    Ok(())
}
