//! zipscout entry point.
//!
//! Resolves a zipcode to its location and nearby businesses, caching upstream
//! responses and mirroring normalized rows into SQLite along the way. Logging
//! goes to stderr so stdout stays clean for the rendered rows.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use zipscout_core::config::AppConfig;

mod app;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(zipcode) = args.next() else {
        eprintln!("usage: zipscout <zipcode> [term]");
        std::process::exit(2);
    };
    let term = args.next();

    let config = AppConfig::load()?;
    let app = app::App::new(config)?;

    let (location, businesses) = app.resolve(&zipcode, term.as_deref())?;

    match location {
        Some(loc) => {
            println!("{} {}, {} ({})", loc.zipcode, loc.city, loc.state, loc.timezone);
            println!("  lat {}  lng {}", loc.latitude, loc.longitude);
        }
        None => println!("No location data found for {zipcode}"),
    }

    if businesses.is_empty() {
        println!("No businesses found for {zipcode}");
    } else {
        for biz in &businesses {
            println!(
                "{} [{}] {} {} rating {} ({} reviews) {}",
                biz.name, biz.category, biz.phone, biz.address, biz.rating, biz.review_count, biz.price
            );
            println!("  {}", biz.link);
        }
    }

    Ok(())
}
