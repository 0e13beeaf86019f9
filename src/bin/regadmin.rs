use std::path::PathBuf;

use clap::{Parser, Subcommand};
use regadmin::{evaluate_rule_file, load_product_manifests, ProductKind, ProductManifest};

#[derive(Parser)]
#[command(name = "regadmin", version, about = "RegAdmin CLI", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },
    Rules {
        #[command(subcommand)]
        command: RuleCommand,
    },
}

#[derive(Subcommand)]
enum ProductCommand {
    List {
        #[arg(long, default_value = "products")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum RuleCommand {
    Eval {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        products_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Products { command } => match command {
            ProductCommand::List { dir } => handle_products_list(dir)?,
        },
        Command::Rules { command } => match command {
            RuleCommand::Eval { file, products_dir } => handle_rules_eval(file, products_dir)?,
        },
    }
    Ok(())
}

fn handle_products_list(dir: PathBuf) -> anyhow::Result<()> {
    let manifests = load_product_manifests(&dir)?;
    if manifests.is_empty() {
        println!("No products found in directory `{}`", dir.display());
    } else {
        render_product_table(&manifests);
    }
    Ok(())
}

fn render_product_table(manifests: &[ProductManifest]) {
    println!(
        "{:<32} {:<10} {:<8} {}",
        "Name", "Version", "Kind", "Description"
    );
    for manifest in manifests {
        let description = manifest.description.clone().unwrap_or_default();
        println!(
            "{:<32} {:<10} {:<8} {}",
            manifest.name,
            manifest.version,
            render_kind(manifest.kind.clone()),
            description
        );
    }
}

fn render_kind(kind: ProductKind) -> String {
    match kind {
        ProductKind::Plugin => "plugin".to_string(),
        ProductKind::Theme => "theme".to_string(),
    }
}

fn handle_rules_eval(file: PathBuf, products_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let verdict = evaluate_rule_file(&file, products_dir.as_deref())?;
    println!("{verdict}");
    Ok(())
}
