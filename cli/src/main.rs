mod render;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use forkify_core::{
    Command, Config, Controller, JsonFileStore, Likes, Outcome, RecipeApi, ServingsDirection,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Upper bound for `recipe --servings`; scaling steps one serving at a time.
const MAX_SERVINGS: i64 = 1000;

#[derive(Parser)]
#[command(name = "forkify")]
#[command(about = "Search recipes, scale servings, plan shopping and keep favourites", long_about = None)]
struct Cli {
    /// Storage file for liked recipes (default: ~/.forkify/storage.json)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Search results per page (default: 10)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes
    Search {
        /// Free-text query, e.g. "pizza"
        #[arg(required = true)]
        query: Vec<String>,
        /// Page of results to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a recipe's ingredients
    Recipe {
        /// Recipe id from search results
        id: String,
        /// Scale ingredients to this many servings
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SERVINGS))]
        servings: Option<u32>,
    },
    /// List liked recipes
    Likes,
    /// Remove a recipe from the liked list
    Unlike {
        /// Recipe id
        id: String,
    },
    /// Start an interactive session
    Shell,
}

/// Console logging controlled by RUST_LOG (default: warn), written to stderr.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_controller(config: &Config) -> Result<Controller> {
    let client = config
        .http_client()
        .context("Failed to build HTTP client")?;
    let api = RecipeApi::new(Arc::new(client), &config.api_base_url);
    let likes = Likes::load(Arc::new(JsonFileStore::new(&config.storage_path)));
    tracing::debug!(
        storage = %config.storage_path.display(),
        likes = likes.num_likes(),
        "controller ready"
    );
    Ok(Controller::new(api, likes, config.page_size))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size.max(1);
    }

    let mut controller = build_controller(&config)?;

    match cli.command {
        Commands::Search { query, page } => {
            let outcome = search_page(&mut controller, query.join(" "), page).await;
            print_outcome(&controller, outcome)?;
        }
        Commands::Recipe { id, servings } => {
            let outcome = controller.dispatch(Command::SelectRecipe { id }).await;
            if let Some(target) = servings {
                scale_to(&mut controller, target).await;
            }
            print_outcome(&controller, outcome)?;
        }
        Commands::Likes => {
            println!("{}", render::likes(controller.state().likes.likes())?);
        }
        Commands::Unlike { id } => {
            let outcome = controller
                .dispatch(Command::RemoveLike { id: id.clone() })
                .await;
            if outcome == Outcome::Ignored {
                bail!("Recipe {} is not liked", id);
            }
            print_outcome(&controller, outcome)?;
        }
        Commands::Shell => shell::run(controller).await?,
    }

    Ok(())
}

/// Search, then jump to `page`. Only the final outcome is returned.
async fn search_page(controller: &mut Controller, query: String, page: usize) -> Outcome {
    let outcome = controller.dispatch(Command::Search { query }).await;
    if page > 1 && matches!(outcome, Outcome::Results(_)) {
        return controller.dispatch(Command::GoToPage(page)).await;
    }
    outcome
}

/// Print an outcome; alerts become errors so the exit status reflects them.
fn print_outcome(controller: &Controller, outcome: Outcome) -> Result<()> {
    if let Outcome::Alert(message) = &outcome {
        bail!("{}", message);
    }
    if let Some(text) = shell::describe(&outcome, controller)? {
        println!("{}", text);
    }
    Ok(())
}

/// Step servings one at a time until `target` is reached.
async fn scale_to(controller: &mut Controller, target: u32) {
    let target = target.max(1);
    while let Some(current) = controller.state().recipe.as_ref().map(|r| r.servings) {
        let direction = match current.cmp(&target) {
            std::cmp::Ordering::Less => ServingsDirection::Increase,
            std::cmp::Ordering::Greater => ServingsDirection::Decrease,
            std::cmp::Ordering::Equal => break,
        };
        controller
            .dispatch(Command::UpdateServings(direction))
            .await;
    }
}
