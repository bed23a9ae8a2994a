//! Binding skeleton generator.
//!
//! Describes a table, samples a few of its items and prints the `Table` implementation
//! of its binding on stdout.
//!
//! ```text
//! dynamodb-orm-skeleton --table-name user_events --region ap-northeast-1 > src/user_events.rs
//! ```

use clap::Parser;
use dynamodb_orm::{connection::ConnectionConfig, skeleton::TableLayout};
use tracing::info;

const SAMPLE_ITEMS: i32 = 10;

#[derive(Parser, Debug)]
#[command(name = "dynamodb-orm-skeleton", about = "Generate the binding of an existing table")]
struct Args {
    /// Name of the table to describe.
    #[arg(long)]
    table_name: String,
    /// Region of the table.
    #[arg(long, default_value = "us-west-2")]
    region: String,
    /// Endpoint override, e.g. `http://localhost:8000`.
    #[arg(long)]
    endpoint: Option<String>,
    /// Named profile of the shared credentials file.
    #[arg(long)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ConnectionConfig {
        profile: args.profile,
        region: Some(args.region),
        endpoint: args.endpoint,
        ..Default::default()
    };
    config.validate()?;
    let client = aws_sdk_dynamodb::Client::new(&config.load().await);

    info!(table = %args.table_name, "describing table");
    let described = client
        .describe_table()
        .table_name(&args.table_name)
        .send()
        .await?;
    let description = described
        .table()
        .ok_or_else(|| format!("table `{}` has no description", args.table_name))?;

    let sampled = client
        .scan()
        .table_name(&args.table_name)
        .limit(SAMPLE_ITEMS)
        .send()
        .await?;
    info!(items = sampled.items().len(), "sampled items");

    let layout = TableLayout::from_description(description, sampled.items())?;
    print!("{}", layout.render());
    Ok(())
}
