//! Command-line client for the product catalog API.
//!
//! Usage: `catalog-cli --url http://localhost:3000 --key secret123 list --category electronics`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Client for the product catalog API", long_about = None)]
struct Cli {
    /// Base URL of the running service
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Shared secret sent with every product request
    #[arg(short, long, env = "CATALOG_API_KEY", default_value = "secret123")]
    key: String,

    /// Header carrying the shared secret
    #[arg(long, default_value = "x-api-key")]
    header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered by category
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Fetch one product
    Get { id: String },
    /// Search names and descriptions
    Search { query: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        in_stock: Option<bool>,
    },
    /// Delete a product
    Delete { id: String },
}

impl Cli {
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(self.header.as_str(), self.key.as_str())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url.trim_end_matches('/'))
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let client = Client::new();

    let request = match &cli.command {
        Commands::List {
            category,
            page,
            limit,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(category) = category {
                query.push(("category", category.clone()));
            }
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            client.get(cli.endpoint("/api/products")).query(&query)
        }
        Commands::Get { id } => client.get(cli.endpoint(&format!("/api/products/{id}"))),
        Commands::Search { query } => client
            .get(cli.endpoint("/api/products/search"))
            .query(&[("q", query)]),
        Commands::Create {
            name,
            price,
            description,
            category,
            in_stock,
        } => {
            let mut body = json!({ "name": name, "price": price });
            if let Some(description) = description {
                body["description"] = json!(description);
            }
            if let Some(category) = category {
                body["category"] = json!(category);
            }
            if let Some(in_stock) = in_stock {
                body["inStock"] = json!(in_stock);
            }
            client.post(cli.endpoint("/api/products")).json(&body)
        }
        Commands::Delete { id } => client.delete(cli.endpoint(&format!("/api/products/{id}"))),
    };

    let response = cli.authed(request).send().await?;
    print_response(response).await
}

async fn print_response(response: Response) -> Result<(), anyhow::Error> {
    let status = response.status();
    println!("Status: {status}");

    let text = response.text().await?;
    if text.is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}
