use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect a running omeroweb-router through its admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4081")]
    url: String,

    #[arg(short, long, env = "ROUTER_ADMIN_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check router status
    Status,
    /// List the route table in match order
    Routes,
    /// Show which route a path resolves to
    Resolve {
        /// Request path, e.g. /webclient/render_thumbnail/7/
        path: String,
    },
    /// Build the path for a named route
    Reverse {
        /// Route name, e.g. webclient:render_thumbnail
        name: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::Routes => client.get(format!("{}/admin/routes", cli.url)),
        Commands::Resolve { path } => client
            .get(format!("{}/admin/resolve", cli.url))
            .query(&[("path", path)]),
        Commands::Reverse { name, params } => client
            .get(format!("{}/admin/reverse/{}", cli.url, urlencoding::encode(&name)))
            .query(&params),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await?;
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
