use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use blog_webhook::webhook::event::{X_GITHUB_DELIVERY, X_GITHUB_EVENT, X_HUB_SIGNATURE_256};
use blog_webhook::webhook::sign;

#[derive(Parser)]
#[command(name = "webhook-cli")]
#[command(about = "Operator CLI for the blog webhook gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001/webhook")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the gateway is up
    Health,
    /// Print the signature header value for a payload file
    Sign {
        #[arg(short, long, env = "WEBHOOK_SECRET")]
        secret: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Sign a payload file and deliver it like the repository host would
    Send {
        #[arg(short, long, env = "WEBHOOK_SECRET")]
        secret: String,
        #[arg(short, long, default_value = "push")]
        event: String,
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(&cli.url).send().await?;
            print_response(res).await?;
        }
        Commands::Sign { secret, file } => {
            let body = std::fs::read(file)?;
            println!("{}", sign(secret.as_bytes(), &body));
        }
        Commands::Send { secret, event, file } => {
            let body = std::fs::read(file)?;

            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(X_GITHUB_EVENT, HeaderValue::from_str(&event)?);
            headers.insert(X_GITHUB_DELIVERY, HeaderValue::from_static("webhook-cli"));
            headers.insert(
                X_HUB_SIGNATURE_256,
                HeaderValue::from_str(&sign(secret.as_bytes(), &body))?,
            );

            let res = client.post(&cli.url).headers(headers).body(body).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    println!("{} {}", status.as_u16(), text);
    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
