//! # SEC API Usage Examples
//!
//! Runs a few calls against the live service. Set `SEC_API_KEY` first;
//! every example is skipped without it.
//!
//! ```sh
//! SEC_API_KEY=... RUST_LOG=debug cargo run --example api_usage
//! ```

use sec_api::api::extractor::ExtractOptions;
use sec_api::api::full_text::FullTextQuery;
use sec_api::api::mapping::MappingDimension;
use sec_api::api::types::{QueryOptions, RequestOptions};
use sec_api::{ClientConfig, Credential, Result, SecApiClient, SecApiError, StreamClient};

/// Latest 10-K filings through the query API
async fn latest_annual_reports(client: &SecApiClient, credential: &Credential) -> Result<()> {
    println!("=== Latest 10-K filings ===");

    let options = QueryOptions {
        size: Some(5),
        ..Default::default()
    };
    let response = client
        .search_filings(credential, "formType:\"10-K\"", &options)
        .await?;

    for (i, filing) in response.filings.iter().enumerate() {
        println!(
            "{}. {} {} filed {}",
            i + 1,
            filing.ticker.as_deref().unwrap_or("N/A"),
            filing.form_type.as_deref().unwrap_or("?"),
            filing.filed_at.as_deref().unwrap_or("?")
        );
    }

    Ok(())
}

/// Phrase search restricted to 8-K filings
async fn full_text(client: &SecApiClient, credential: &Credential) -> Result<()> {
    println!("=== Full-text search ===");

    let filters = FullTextQuery {
        form_types: vec!["8-K".to_string()],
        ..Default::default()
    };
    let response = client
        .search_exact_phrase(credential, "material weakness", &filters, &RequestOptions::default())
        .await?;
    println!("total: {}", response["total"]);

    Ok(())
}

async fn mapping_and_extraction(client: &SecApiClient, credential: &Credential) -> Result<()> {
    println!("=== Mapping and extraction ===");

    let companies = client
        .map(credential, MappingDimension::Ticker, "TSLA", &RequestOptions::default())
        .await?;
    println!("{}", companies);

    let risk_factors = client
        .extract(
            credential,
            "https://www.sec.gov/Archives/edgar/data/1318605/000156459021004599/tsla-10k_20201231.htm",
            "1A",
            &ExtractOptions::default(),
        )
        .await?;
    println!("Risk factors: {} characters", risk_factors.len());

    Ok(())
}

/// Print live filings for ten seconds
async fn live_stream(credential: &Credential) -> Result<()> {
    println!("=== Live stream (10s) ===");

    let mut session = StreamClient::new(ClientConfig::default())
        .connect_with_default_handler(credential)
        .await?;
    let handled = session
        .run_until(tokio::time::sleep(std::time::Duration::from_secs(10)))
        .await?;
    println!("{} frames received", handled);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let credential = match std::env::var("SEC_API_KEY").map(Credential::new) {
        Ok(Ok(credential)) => credential,
        _ => {
            println!("⚠ SEC_API_KEY not set, skipping examples");
            return Ok(());
        }
    };
    let client = SecApiClient::new(ClientConfig::from_env()?)?;

    let results = vec![
        ("Query", latest_annual_reports(&client, &credential).await),
        ("Full-text", full_text(&client, &credential).await),
        ("Mapping", mapping_and_extraction(&client, &credential).await),
        ("Stream", live_stream(&credential).await),
    ];

    for (name, result) in results {
        match result {
            Ok(()) => println!("✓ {} example completed successfully", name),
            Err(e @ SecApiError::Remote { .. }) => {
                eprintln!("✗ {} example failed: {}", name, e);
                if let Some(hint) = e.hint() {
                    eprintln!("  {}", hint);
                }
            }
            Err(e) => eprintln!("✗ {} example failed: {}", name, e),
        }
    }

    Ok(())
}
