//! Command-line tour of the admin client
//!
//! This example demonstrates:
//! - Loading configuration from the environment
//! - Logging in and persisting the session
//! - Listing every catalogued resource through the generic surface
//! - Paging through coupons with a form controller
//!
//! ```text
//! ADMIN_API_BASE_URL=http://localhost:5000/api \
//! ADMIN_EMAIL=admin@academy.io ADMIN_PASSWORD=... \
//! cargo run --example list_resources
//! ```

use admin_client::prelude::*;
use admin_client::resources::ALL;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    println!("Admin API at {}", config.api_base());

    let client = AdminClient::builder()
        .config(config)
        .navigator(FnNavigator(|route: &str| {
            eprintln!("session expired, please log in again ({})", route)
        }))
        .build()?;

    if !client.auth().is_authenticated() {
        let email = std::env::var("ADMIN_EMAIL")?;
        let password = std::env::var("ADMIN_PASSWORD")?;
        client.auth().login(&email, &password).await?;
    }

    for descriptor in ALL {
        match client.resource(descriptor).list(&ListParams::new()).await {
            Ok(page) => println!("{:<22} {:>4} records", descriptor.path, page.records.len()),
            Err(ClientError::Unauthorized) => return Ok(()),
            Err(e) => println!("{:<22} error: {}", descriptor.path, e),
        }
    }

    let coupons = client.form(preset::coupons())?;
    coupons.load().await?;
    if let Some(pagination) = coupons.pagination() {
        println!(
            "\ncoupons page {}/{} ({} total)",
            pagination.page, pagination.total_pages, pagination.total
        );
    }

    let courses = client.courses().list(&ListParams::new()).await?.records;
    for coupon in coupons.records() {
        println!(
            "  {:<14} {}",
            coupon["code"].as_str().unwrap_or("?"),
            coupon_course_labels(&coupon, &courses).join(", ")
        );
    }

    Ok(())
}
