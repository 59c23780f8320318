//! Debug script to run the live stream handshake and print now/next
//!
//! Run with:
//! BT_USER=... BT_PASSWORD=... RUST_LOG=btsport_core=debug cargo run --example debug_live -p btsport-core

use btsport_core::{AuthState, AuthStep, BtSportScraper, channels};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user = std::env::var("BT_USER")?;
    let password = std::env::var("BT_PASSWORD")?;

    let scraper = BtSportScraper::new()?;

    let state = scraper
        .advance(
            AuthState::Unauthenticated,
            AuthStep::Login {
                user: &user,
                password: &password,
            },
        )
        .await?;
    if state.session().is_none() {
        println!("✗ Login refused, check credentials");
        return Ok(());
    }
    println!("✓ Signed in");

    let mut state = scraper.advance(state, AuthStep::SportLogin).await?;
    println!("✓ AVS cookie obtained\n");

    for channel in channels() {
        println!("{} (id {}, logo {})", channel.name, channel.id, channel.thumbnail());

        match scraper
            .advance(state.clone(), AuthStep::ResolveStream { channel_id: channel.id })
            .await
        {
            Ok(next) => {
                println!("   Stream: {}", next.stream_url().unwrap_or("-"));
                state = next;
            }
            Err(e) => println!("   ✗ {}", e),
        }

        match scraper.channel_epg(channel).await {
            Ok(epg) => {
                println!("   Now:  {} {}", epg.now.start, epg.now.title);
                println!("   Next: {} {}", epg.next.start, epg.next.title);
            }
            Err(e) => println!("   ✗ EPG: {}", e),
        }
        println!();
    }

    Ok(())
}
