use std::path::PathBuf;

use clap::{Parser, Subcommand};

use design_agents::catalog::Catalog;
use design_agents::error::AppError;
use design_agents::{add, list, AddOptions};

const VARIABLES_HELP: &str = "\
Template variables substituted at install time:
  [project_folder]   npm scope (e.g. \"acme\" from \"@acme/ui\")
  [project_name]     title-cased scope (e.g. \"Acme\")
  [style_package]    style package name (e.g. \"acme-style\")";

#[derive(Parser)]
#[command(name = "design-agents")]
#[command(version)]
#[command(
    about = "Install Cursor AI design agents (rules + subagents) into your project",
    long_about = None
)]
struct Cli {
    /// Load agent bundles from a directory instead of the embedded catalog
    #[arg(long, global = true, value_name = "DIR")]
    agents_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install one or more agents into a project
    #[clap(visible_alias = "a")]
    #[command(after_help = VARIABLES_HELP)]
    Add {
        /// Agent slugs to install; with none given, lists available agents
        slugs: Vec<String>,

        /// Project directory to install into
        #[arg(long, visible_alias = "project", default_value = ".", value_name = "DIR")]
        target: PathBuf,

        /// npm scope or name for the [project_folder] and [project_name] variables
        #[arg(long, value_name = "NAME")]
        project_name: Option<String>,

        /// Package name for the [style_package] variable
        #[arg(long, value_name = "NAME")]
        style_package: Option<String>,

        /// Overwrite existing .mdc/.md files instead of skipping them
        #[arg(long)]
        overwrite: bool,
    },
    /// List the agents available for installation
    #[clap(visible_alias = "ls")]
    List,
}

fn main() {
    let cli = Cli::parse();
    let catalog = match &cli.agents_dir {
        Some(dir) => Catalog::from_dir(dir),
        None => Catalog::embedded(),
    };

    let result: Result<i32, AppError> = match cli.command {
        Commands::Add { slugs, target, project_name, style_package, overwrite } => {
            let options = AddOptions { target, slugs, project_name, style_package, overwrite };
            add(&catalog, &options).map(|summary| if summary.all_succeeded() { 0 } else { 1 })
        }
        Commands::List => list(&catalog).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
