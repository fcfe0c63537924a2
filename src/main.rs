use anyhow::{Context, Result};
use parl_to_sqlite::{
    cli::{Cli, Commands},
    fetch::{MembersClient, TwfyClient},
    pipeline::{run_setup, SetupOptions},
    store::Store,
    ui::ConsoleUi,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Sync {
            output_db,
            api_key,
            skip_addresses,
        } => {
            let start = Instant::now();

            let api_key = match api_key {
                Some(key) => key,
                None => std::env::var("TWFY_API_KEY")
                    .context("No API key: pass --api-key or set TWFY_API_KEY")?,
            };

            let twfy = TwfyClient::new(api_key)?;
            let members = MembersClient::new()?;
            let mut ui = ConsoleUi::new();
            let opts = SetupOptions { skip_addresses };

            let summary = run_setup(&output_db, &twfy, &members, &mut ui, &opts)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} constituencies, {} MPs, {} offices, {} addresses) in {:.1}s",
                output_db,
                summary.constituencies,
                summary.mps_enriched,
                summary.offices,
                summary.addresses,
                elapsed.as_secs_f64()
            );
        }

        Commands::ListConstituencies { db } => {
            let store = Store::open(&db)?;
            for name in store.constituencies()? {
                println!("{}", name);
            }
        }

        Commands::Social { db } => {
            let store = Store::open(&db)?;
            for mp in store.mps_with_social_address()? {
                let name = mp.name.as_deref().unwrap_or("(unknown)");
                println!("{} ({})", name, mp.constituency);
                for address in &mp.addresses {
                    println!("  {}: {}", address.address_type, address.address);
                }
            }
        }
    }

    Ok(())
}
