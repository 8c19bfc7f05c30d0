use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use streamer_anniversaries::{
    classify_roster, today, AnniversaryKind, ClassifiedStreamer, Config, Region, Roster, DATE_FORMAT,
};

#[derive(Parser, Debug)]
#[command(name = "streamer-anniversaries")]
#[command(about = "List upcoming streamer birthdays and debut anniversaries")]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Roster file (overrides config)
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// birthday or debut (defaults to the config's kind)
    #[arg(short, long)]
    kind: Option<AnniversaryKind>,

    /// Case-insensitive name search
    #[arg(short, long)]
    query: Option<String>,

    /// Restrict to a region (repeatable)
    #[arg(long = "region")]
    regions: Vec<Region>,

    /// Hide graduated streamers
    #[arg(long)]
    hide_ended: bool,

    /// Reference date as YYYY/MM/DD (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Print the classification as JSON
    #[arg(long)]
    json: bool,

    /// Locale used for display names
    #[arg(long, default_value = "en")]
    locale: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(roster) = args.roster {
        config.roster_path = roster;
    }
    if !args.regions.is_empty() {
        config.regions = args.regions.into_iter().collect();
    }
    config.hide_ended |= args.hide_ended;

    let kind = args.kind.unwrap_or(config.default_kind);

    // One snapshot of "today" for the whole run
    let reference = match args.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .with_context(|| format!("Invalid --date {:?}, expected YYYY/MM/DD", raw))?,
        None => today(),
    };

    let roster = Roster::from_file(&config.roster_path)?;
    info!(streamers = roster.len(), path = ?config.roster_path, "roster loaded");

    let filtered = config.filter(args.query).apply(&roster);
    let classification = classify_roster(filtered, kind, reference)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!("🎂 {} anniversaries as of {}", kind.label(), reference.format(DATE_FORMAT));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    print_section("🎉 Today", &classification.today, kind, &args.locale);
    print_section("📅 Upcoming", &classification.upcoming, kind, &args.locale);
    print_section("❔ Not disclosed", &classification.unknown, kind, &args.locale);

    if classification.is_empty() {
        println!("\nNo streamers found.");
    }

    Ok(())
}

fn print_section(title: &str, entries: &[ClassifiedStreamer<'_>], kind: AnniversaryKind, locale: &str) {
    if entries.is_empty() {
        return;
    }

    println!("\n{} ({})", title, entries.len());
    for entry in entries {
        let streamer = entry.streamer;
        let name = streamer
            .name(locale)
            .or_else(|| streamer.name("en"))
            .unwrap_or(&streamer.id);
        let date = streamer
            .anniversary(kind)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "--".to_string());

        let mut line = format!("  {:<28} {:<10} [{}]", name, date, streamer.region);
        if let Some(days) = entry.days_until {
            line.push_str(&format!("  in {} day{}", days, if days == 1 { "" } else { "s" }));
        }
        if let Some(age) = entry.age {
            line.push_str(&format!("  (#{})", age));
        }
        if streamer.is_ended() {
            line.push_str("  🎓");
        }
        println!("{}", line);
    }
}
