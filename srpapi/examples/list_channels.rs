//! Example: List all Sveriges Radio channels
//!
//! Run with: cargo run -p srpapi --example list_channels

use srpapi::ApiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("Fetching Sveriges Radio channels...\n");

    let client = ApiClient::new()?;
    let channels = client.channels().await?;

    let playable = channels.iter().filter(|c| c.to_track().is_some()).count();

    println!("Found {} channels ({} playable):\n", channels.len(), playable);

    for channel in &channels {
        let name = channel.name.as_deref().unwrap_or("<unnamed>");
        println!("  {} (id {})", name, channel.id);

        if let Some(tagline) = &channel.tagline {
            println!("    {}", tagline);
        }
        if let Some(url) = channel.stream_url() {
            println!("    stream: {}", url);
        }
    }

    Ok(())
}
