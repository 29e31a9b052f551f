use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use hengste_types::Locale;
use storyblok::management::{DEFAULT_MANAGEMENT_BASE_URL, ManagementClient};

mod seed;

#[derive(Parser)]
#[command(name = "hengste")]
#[command(about = "Hengste site content tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify management API credentials
    Check,
    /// Upsert the EN and DE home stories
    SeedHome,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check) => {
            let client = management_client()?;
            match client.auth_check().await {
                Ok(()) => println!("Management API credentials look good."),
                Err(e) => eprintln!("Auth check failed: {}", e),
            }
        }
        Some(Commands::SeedHome) => {
            let client = management_client()?;
            client
                .auth_check()
                .await
                .context("management API auth check failed")?;
            for locale in Locale::all() {
                let action = seed::upsert_home(&client, locale)
                    .await
                    .with_context(|| format!("seeding {}/home", locale))?;
                println!("[{}] {}/home", action, locale);
            }
            println!("Seed complete: en/home and de/home upserted.");
        }
        None => {
            println!("Use 'hengste --help' for commands");
        }
    }

    Ok(())
}

/// Build the management client from the environment.
///
/// Unlike the site server, seeding cannot do anything useful without
/// credentials, so missing variables are a hard error here.
fn management_client() -> anyhow::Result<ManagementClient> {
    let space_id =
        std::env::var("STORYBLOK_SPACE_ID").context("STORYBLOK_SPACE_ID is not set")?;
    let token = std::env::var("STORYBLOK_MANAGEMENT_TOKEN")
        .context("STORYBLOK_MANAGEMENT_TOKEN is not set")?;
    let client = ManagementClient::new(
        DEFAULT_MANAGEMENT_BASE_URL,
        space_id,
        token,
        Duration::from_secs(30),
    )?;
    Ok(client)
}
