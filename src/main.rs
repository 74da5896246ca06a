use std::error::Error;
use std::process;

use gradebook_analytics::{analysis, data, taxonomy::Taxonomy};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: gradebook_analytics <gradebook.csv>")?;

    let table = data::load_table(&path)?;
    println!("Loaded {} student rows", table.row_count());

    let taxonomy = Taxonomy::default();
    let report = analysis::analyze(&taxonomy, &table)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
