//! Operator CLI: validate configs and poke a running gateway with the
//! recognized identity headers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use runtime_gateway::config::load_config;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Developer CLI for the runtime gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Send a request to a running gateway
    Send {
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        gateway: String,

        #[arg(long, default_value = "/")]
        path: String,

        #[arg(long, default_value = "GET")]
        method: String,

        /// Mark the caller as an admin user
        #[arg(long)]
        admin: bool,

        /// Send a task-queue name (triggers the admin-check bypass)
        #[arg(long)]
        queue: Option<String>,

        /// Mark the request as arriving through a trusted channel
        #[arg(long)]
        trusted: bool,

        /// Millisecond deadline forwarded to the runtime
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Override the user IP seen by the runtime
        #[arg(long)]
        user_ip: Option<String>,

        /// Extra header in K=V form; repeatable
        #[arg(long = "header")]
        headers: Vec<String>,

        #[arg(long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let loaded = load_config(&config)?;
            println!("Configuration OK");
            println!("  listener:     {}", loaded.listener.bind_address);
            println!(
                "  app:          {} / {} / {}",
                loaded.app.app_id, loaded.app.service_id, loaded.app.version_id
            );
            println!("  runtime:      {}", loaded.runtime.evaluate_url);
            println!("  body limit:   {} bytes", loaded.limits.max_body_bytes);
        }
        Commands::Send {
            gateway,
            path,
            method,
            admin,
            queue,
            trusted,
            timeout_ms,
            user_ip,
            headers,
            body,
        } => {
            let mut map = HeaderMap::new();
            if admin {
                map.insert("X-AppEngine-User-Is-Admin", HeaderValue::from_static("1"));
            }
            if let Some(queue) = &queue {
                map.insert("X-AppEngine-Queuename", HeaderValue::from_str(queue)?);
            }
            if trusted {
                map.insert(
                    "X-AppEngine-Trusted-IP-Request",
                    HeaderValue::from_static("1"),
                );
            }
            if let Some(ms) = timeout_ms {
                map.insert(
                    "X-AppEngine-Timeout-Ms",
                    HeaderValue::from_str(&ms.to_string())?,
                );
            }
            if let Some(ip) = &user_ip {
                map.insert("X-AppEngine-User-IP", HeaderValue::from_str(ip)?);
            }
            for header in &headers {
                let (name, value) = header
                    .split_once('=')
                    .ok_or_else(|| format!("header {header:?} is not K=V"))?;
                map.insert(
                    name.parse::<HeaderName>()?,
                    HeaderValue::from_str(value)?,
                );
            }

            let client = reqwest::Client::new();
            let url = format!("{}{}", gateway.trim_end_matches('/'), path);
            let mut request = client
                .request(method.parse()?, &url)
                .headers(map);
            if let Some(body) = body {
                request = request.body(body);
            }

            let response = request.send().await?;
            println!("{}", response.status());
            for (name, value) in response.headers() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!();
            println!("{}", response.text().await?);
        }
    }

    Ok(())
}
