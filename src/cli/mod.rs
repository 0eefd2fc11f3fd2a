mod set_status;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::services::availability::{allocate_professional, available_professionals};
use crate::services::{agenda, display_string, parse_price, BookingNormalizer, StatsAggregator};
use crate::storage::{FileStore, KeyValueStore};
use crate::types::{BookingStats, Result, UnifiedBooking};

pub use set_status::SetStatusArgs;

/// Salon booking normalizer and agenda tools
#[derive(Parser)]
#[command(name = "salonbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Storage directory [default: ~/.salonbook/storage]
    #[arg(long, global = true, env = "SALONBOOK_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List unified bookings (default)
    List {
        /// Only bookings on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only bookings for this professional id
        #[arg(long)]
        pro: Option<String>,

        /// Keep merge order (app bookings, then manual) instead of sorting
        #[arg(long)]
        unsorted: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard counters
    Stats {
        /// Also report completed revenue for a calendar month (YYYY-MM)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the status of a booking
    SetStatus(SetStatusArgs),

    /// Show professionals available on a day, or allocate one for a slot
    Available {
        /// Day to check (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Slot time (HH:MM); picks one professional for an AI-assigned booking
        #[arg(long)]
        time: Option<String>,
    },

    /// List staff records
    Staff {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the service catalogue
    Services {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the keys held in the storage directory
    Keys,
}

/// `stats --json` payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    #[serde(flatten)]
    stats: BookingStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month_revenue: Option<f64>,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(self) -> anyhow::Result<()> {
        let store = FileStore::with_dir(resolve_data_dir(self.data_dir)?);
        let normalizer = BookingNormalizer::new(store);

        match self.command {
            None => run_list(&normalizer, None, None, false, false),
            Some(Commands::List {
                date,
                pro,
                unsorted,
                json,
            }) => run_list(&normalizer, date, pro.as_deref(), unsorted, json),
            Some(Commands::Stats { month, json }) => run_stats(&normalizer, month, json),
            Some(Commands::SetStatus(args)) => args.run(&normalizer).map_err(Into::into),
            Some(Commands::Available { date, time }) => {
                run_available(&normalizer, date, time.as_deref())
            }
            Some(Commands::Staff { json }) => run_staff(&normalizer, json),
            Some(Commands::Services { json }) => run_services(&normalizer, json),
            Some(Commands::Keys) => run_keys(&normalizer),
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir),
        None => FileStore::default_dir(),
    }
}

fn run_list(
    normalizer: &BookingNormalizer<FileStore>,
    date: Option<NaiveDate>,
    pro: Option<&str>,
    unsorted: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut bookings = normalizer.load_and_normalize().bookings;
    if !unsorted {
        agenda::sort_chronologically(&mut bookings);
    }

    let day = date.map(|d| d.format("%Y-%m-%d").to_string());
    let selected: Vec<&UnifiedBooking> = bookings
        .iter()
        .filter(|b| day.as_deref().map_or(true, |d| b.date == d))
        .filter(|b| pro.map_or(true, |p| b.pro_id == p))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No bookings found");
        return Ok(());
    }
    for booking in selected {
        println!("{}", format_booking_line(booking));
    }
    Ok(())
}

fn run_stats(
    normalizer: &BookingNormalizer<FileStore>,
    month: Option<(i32, u32)>,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = normalizer.snapshot();
    let month_revenue =
        month.map(|(y, m)| StatsAggregator::revenue_in_month(&snapshot.bookings, y, m));
    let month_label = month.map(|(y, m)| format!("{:04}-{:02}", y, m));

    if json {
        let report = StatsReport {
            stats: snapshot.stats,
            month: month_label,
            month_revenue,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Clients:           {}", snapshot.stats.total_clients);
    println!("Revenue:           {:.2}€", snapshot.stats.monthly_revenue);
    println!("Today's bookings:  {}", snapshot.stats.today_bookings_count);
    if let (Some(label), Some(revenue)) = (month_label, month_revenue) {
        println!("Revenue {}:   {:.2}€", label, revenue);
    }
    if !snapshot.warnings.is_empty() {
        println!("Warnings:          {}", snapshot.warnings.len());
    }
    Ok(())
}

fn run_available(
    normalizer: &BookingNormalizer<FileStore>,
    date: NaiveDate,
    time: Option<&str>,
) -> anyhow::Result<()> {
    let staff = normalizer.repository().staff().records;

    match time {
        Some(time) => {
            let bookings = normalizer.load_and_normalize().bookings;
            match allocate_professional(&staff, &bookings, date, time) {
                Some(id) => println!("{}", id),
                None => println!("No professional free on {} at {}", date, time),
            }
        }
        None => {
            let available = available_professionals(&staff, date);
            if available.is_empty() {
                println!("No professionals available on {}", date);
            }
            for member in available {
                println!(
                    "{:<6} {}",
                    display_string(member.id.as_ref()),
                    display_string(member.name.as_ref())
                );
            }
        }
    }
    Ok(())
}

fn run_staff(normalizer: &BookingNormalizer<FileStore>, json: bool) -> anyhow::Result<()> {
    let staff = normalizer.repository().staff().records;
    if json {
        println!("{}", serde_json::to_string_pretty(&staff)?);
        return Ok(());
    }
    for member in &staff {
        println!(
            "{:<6} {:<20} {:<16} {} vacation range(s)",
            display_string(member.id.as_ref()),
            display_string(member.name.as_ref()),
            display_string(member.role.as_ref()),
            member.vacations.len()
        );
    }
    Ok(())
}

fn run_services(normalizer: &BookingNormalizer<FileStore>, json: bool) -> anyhow::Result<()> {
    let services = normalizer.repository().services().records;
    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }
    for service in &services {
        println!(
            "{:<6} {:<24} {:>8.2}€",
            display_string(service.id.as_ref()),
            display_string(service.name.as_ref()),
            parse_price(service.price.as_ref())
        );
    }
    Ok(())
}

fn run_keys(normalizer: &BookingNormalizer<FileStore>) -> anyhow::Result<()> {
    let store = normalizer.repository().store();
    let keys = store.keys()?;
    if keys.is_empty() {
        println!("No stored keys in {}", store.dir().display());
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}

/// One text row per booking: `date time  client  service  price  status  pro  source`
fn format_booking_line(booking: &UnifiedBooking) -> String {
    let mut line = format!(
        "{} {:<5}  {:<20} {:<20} {:>8.2}€  {:<10} {:<6} {}",
        booking.date,
        booking.time,
        booking.client,
        booking.service,
        booking.price_value,
        booking.status,
        booking.pro_id,
        booking.source
    );
    if let Some(method) = &booking.payment_method {
        line.push_str(&format!("  [{}]", method));
    }
    line
}

/// Parse `YYYY-MM` into `(year, month)`
fn parse_month(value: &str) -> std::result::Result<(i32, u32), String> {
    let first_day = format!("{}-01", value);
    NaiveDate::parse_from_str(&first_day, "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| format!("expected YYYY-MM, got '{}'", value))
}
