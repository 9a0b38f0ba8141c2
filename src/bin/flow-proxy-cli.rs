use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "flow-proxy-cli")]
#[command(about = "Management CLI for the Flow API proxy", long_about = None)]
struct Cli {
    /// Proxy address
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Point the proxy at a new upstream base URL
    SetBaseUrl {
        /// Absolute URL, e.g. https://abc.ngrok-free.app
        base_url: String,
    },
    /// Show the configured upstream base URL
    GetBaseUrl,
    /// Check proxy health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let proxy = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::SetBaseUrl { base_url } => {
            client
                .post(format!("{}/config/base-url", proxy))
                .json(&json!({ "baseUrl": base_url }))
                .send()
                .await?
        }
        Commands::GetBaseUrl => client.get(format!("{}/config/base-url", proxy)).send().await?,
        Commands::Health => client.get(format!("{}/health", proxy)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
