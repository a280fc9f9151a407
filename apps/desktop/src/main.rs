use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{server_url_from_env, CatalogApi, ProductGateway};
use shared::{domain::ProductId, protocol::ProductDraft};

#[derive(Parser, Debug)]
#[command(about = "Command-line companion for the product catalog service")]
struct Args {
    /// Catalog service base URL; falls back to CATALOG_SERVER_URL, then
    /// the local default.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every product in the catalog.
    List,
    /// Create a product.
    Add { name: String, price: f64 },
    /// Replace an existing product's name and price.
    Update { id: i64, name: String, price: f64 },
    /// Delete a product by id.
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let api = CatalogApi::new(args.server_url.unwrap_or_else(server_url_from_env));
    match args.command {
        Command::List => {
            let products = api.list_products().await?;
            if products.is_empty() {
                println!("No products found.");
            }
            for product in products {
                println!(
                    "{:>6}  {:<32} {:>12}",
                    product.id,
                    product.name,
                    product.display_price()
                );
            }
        }
        Command::Add { name, price } => {
            let product = api.create_product(&ProductDraft { name, price }).await?;
            println!(
                "created product {}: {} {}",
                product.id,
                product.name,
                product.display_price()
            );
        }
        Command::Update { id, name, price } => {
            let product = api
                .update_product(ProductId(id), &ProductDraft { name, price })
                .await?;
            println!(
                "updated product {}: {} {}",
                product.id,
                product.name,
                product.display_price()
            );
        }
        Command::Remove { id } => {
            api.delete_product(ProductId(id)).await?;
            println!("deleted product {id}");
        }
    }

    Ok(())
}
