// Out-of-band step: regenerate the flat electricity/water rate files.
//
// Usage:
//   cargo run --bin refresh_rate_tables -- [data_dir] [year]
//
// Defaults: data_dir from DATACENTER_COST_DATA_DIR or the user data directory,
// year = current calendar year. Never runs on the request path.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;

use datacenter_cost::config::default_data_dir;
use datacenter_cost::importer::refresh_rate_tables;
use datacenter_cost::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);

    let year = match args.next() {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .with_context(|| format!("invalid year: {}", raw))?,
        None => chrono::Local::now().year(),
    };

    let report = refresh_rate_tables(&data_dir, year)
        .with_context(|| format!("failed to refresh rate tables in {}", data_dir.display()))?;

    println!(
        "year={} rows={} electricity={} water={}",
        report.year,
        report.rows_written,
        report.electricity_file.display(),
        report.water_file.display()
    );
    Ok(())
}
