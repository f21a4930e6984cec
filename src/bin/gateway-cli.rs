use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the frontend gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gateway liveness report
    Status,
    /// Gateway readiness
    Ready,
    /// Health of the product and order services
    Upstreams,
    /// Product operations
    Products {
        #[command(subcommand)]
        action: Action,
    },
    /// Order operations
    Orders {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand)]
enum Action {
    /// List all items
    List,
    /// Show one item
    Get { id: String },
    /// Create an item from a JSON document
    Create {
        /// JSON body, e.g. '{"name":"Widget"}'
        json: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Ready => {
            let res = client.get(format!("{}/ready", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Upstreams => {
            for resource in ["products", "orders"] {
                let res = client.get(format!("{}/api/health/{}", base, resource)).send().await?;
                print_response(res).await?;
            }
        }
        Commands::Products { action } => run_action(&client, base, "products", action).await?,
        Commands::Orders { action } => run_action(&client, base, "orders", action).await?,
    }

    Ok(())
}

async fn run_action(
    client: &reqwest::Client,
    base: &str,
    resource: &str,
    action: Action,
) -> Result<(), Box<dyn std::error::Error>> {
    let collection = format!("{}/api/{}", base, resource);
    let res = match action {
        Action::List => client.get(&collection).send().await?,
        Action::Get { id } => client.get(format!("{}/{}", collection, id)).send().await?,
        Action::Create { json } => {
            let body: Value = serde_json::from_str(&json)?;
            client.post(&collection).json(&body).send().await?
        }
    };
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
