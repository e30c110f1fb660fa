use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use vigil_api::VigilClient;
use vigil_types::HealthLevel;

/// Terminal dashboard for a GraphQL health endpoint.
///
/// With no subcommand the interactive dashboard starts, polling the endpoint
/// on the configured interval. `vigil check` performs a single health check
/// and exits.
#[derive(Debug, Parser)]
#[command(name = "vigil", version, about)]
struct Cli {
    /// Backend base URL; overrides the VIGIL_API_BASE environment variable.
    #[arg(long)]
    endpoint: Option<String>,

    /// Poll interval in seconds (must be at least 1).
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single health check, print the result, and exit.
    ///
    /// Exits 0 when the overall status is ok, 1 otherwise.
    Check {
        /// Print the raw health payload as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let client = match cli.endpoint.as_deref() {
        Some(base_url) => VigilClient::new(base_url)?,
        None => VigilClient::new_from_env()?,
    };

    match cli.command {
        Some(Command::Check { json }) => {
            let exit_code = run_check(&client, json).await?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
        None => vigil_tui::run(client, Duration::from_secs(cli.interval)).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Performs one health check and reports the process exit code: 0 when the
/// overall status is ok, 1 otherwise (including transport errors).
async fn run_check(client: &VigilClient, json: bool) -> Result<i32> {
    match client.check_health().await {
        Ok(payload) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("endpoint:    {}", client.endpoint_url());
                println!("status:      {}", payload.status);
                println!("api:         {}", payload.api.status);
                let connection = if payload.database.connection { "connected" } else { "disconnected" };
                match &payload.database.details {
                    Some(details) => println!("database:    {} ({})", connection, details),
                    None => println!("database:    {}", connection),
                }
                println!("server time: {}", payload.timestamp);
            }
            Ok(if payload.status == HealthLevel::Ok { 0 } else { 1 })
        }
        Err(error) => {
            eprintln!("Error: {error}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_subcommand_with_endpoint() {
        let cli = Cli::parse_from(["vigil", "--endpoint", "http://localhost:9000", "check", "--json"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Some(Command::Check { json: true })));
    }

    #[test]
    fn default_interval_is_thirty_seconds() {
        let cli = Cli::parse_from(["vigil"]);
        assert_eq!(cli.interval, 30);
        assert!(cli.command.is_none());
    }

    #[test]
    fn zero_interval_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["vigil", "--interval", "0"]);
        assert!(result.is_err(), "a zero poll interval must not reach the runtime");
        assert!(Cli::try_parse_from(["vigil", "--interval", "1"]).is_ok());
    }

    async fn health_server(status: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "health": {
                        "status": status,
                        "timestamp": "2025-01-01T00:00:00Z",
                        "api": { "status": "ok" },
                        "database": { "status": "ok", "connection": true, "details": null }
                    }
                }
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn check_reports_zero_for_ok_status() {
        let server = health_server("ok").await;
        let client = VigilClient::new(&server.uri()).expect("mock server URL should validate");

        let exit_code = run_check(&client, false).await.expect("check should not error");
        assert_eq!(exit_code, 0);
    }

    #[tokio::test]
    async fn check_reports_one_for_degraded_status() {
        let server = health_server("degraded").await;
        let client = VigilClient::new(&server.uri()).expect("mock server URL should validate");

        let exit_code = run_check(&client, true).await.expect("check should not error");
        assert_eq!(exit_code, 1);
    }

    #[tokio::test]
    async fn check_reports_one_for_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/graphql"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = VigilClient::new(&server.uri()).expect("mock server URL should validate");

        let exit_code = run_check(&client, false).await.expect("failures map to a code, not an error");
        assert_eq!(exit_code, 1);
    }

    #[tokio::test]
    async fn check_reports_one_for_unreachable_endpoint() {
        // Port 1 is never bound in test environments.
        let client = VigilClient::new("http://127.0.0.1:1").expect("localhost should validate");

        let exit_code = run_check(&client, false).await.expect("transport errors map to a code");
        assert_eq!(exit_code, 1);
    }
}
