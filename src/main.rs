//! CLI administration tool for website subscriptions.
//!
//! # Usage
//!
//! ```bash
//! # Show the plan catalog
//! cargo run -- plans
//!
//! # Renewal date for a subscription starting today / on a given date
//! cargo run -- renewal
//! cargo run -- renewal --date 2024-03-01
//!
//! # Register websites for a customer on a plan
//! cargo run -- simulate --plan plus https://a.com https://b.com https://c.com https://d.com
//! ```
//!
//! # Environment Variables
//!
//! - `SUBSCRIPTION_TTL_DAYS` (optional): fixed subscription length in days
//! - `RUST_LOG`, `LOG_FORMAT`: logging, see [`website_subscriptions::config`]

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;
use website_subscriptions::config::{self, Config};
use website_subscriptions::prelude::*;

/// CLI tool for inspecting subscription plans and quotas.
#[derive(Parser)]
#[command(name = "subscription-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the plan catalog
    Plans {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the renewal date of a new subscription
    Renewal {
        /// Subscription date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Subscribe a throwaway customer and register websites
    Simulate {
        /// Plan type: single, plus or infinite
        #[arg(short, long)]
        plan: PlanType,

        /// Website URLs, registered in order
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print the registered websites as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    match cli.command {
        Commands::Plans { json } => handle_plans(json)?,
        Commands::Renewal { date } => handle_renewal(&config, date)?,
        Commands::Simulate { plan, urls, json } => handle_simulate(&config, plan, urls, json)?,
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Prints the standard plan catalog.
///
/// # Output Format
///
/// ```text
/// Plans
///
///   Type       Name         Price      Websites
///   ───────────────────────────────────────────
///   single     Single       49.00      1
///   plus       Plus         99.00      3
///   infinite   Infinite     249.00     unlimited
/// ```
fn handle_plans(json: bool) -> Result<()> {
    let catalog = PlanCatalog::standard();

    if json {
        let plans: Vec<&Plan> = catalog.iter().map(|p| p.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    println!("{}", "Plans".bright_blue().bold());
    println!();
    println!(
        "  {:<10} {:<12} {:<10} {}",
        "Type".bright_white().bold(),
        "Name".bright_white().bold(),
        "Price".bright_white().bold(),
        "Websites".bright_white().bold()
    );
    println!("  {}", "─".repeat(43).bright_black());

    for plan in catalog.iter() {
        let limit = match plan.website_limit() {
            Some(n) => n.to_string(),
            None => "unlimited".to_string(),
        };
        println!(
            "  {:<10} {:<12} {:<10} {}",
            plan.plan_type().to_string().cyan(),
            plan.name(),
            plan.price().to_string(),
            limit.bright_white()
        );
    }
    println!();

    Ok(())
}

/// Prints the renewal date for a subscription starting on `date`.
fn handle_renewal(config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let start = date.unwrap_or_else(|| Local::now().date_naive());
    let policy = config.renewal_policy();

    let days = policy.ttl_days(start)?;
    let renewal = policy.renewal_date(start)?;

    println!("{}", "Renewal".bright_blue().bold());
    println!();
    println!("  Subscribed: {}", start.to_string().cyan());
    println!("  Renews:     {}", renewal.to_string().bright_yellow().bold());
    println!("  Period:     {} days", days.to_string().bright_white());
    if policy.override_ttl_days.is_some() {
        println!("  {}", "(SUBSCRIPTION_TTL_DAYS override)".bright_black());
    }
    println!();

    Ok(())
}

/// Registers `urls` for a fresh customer on `plan_type` and prints which
/// websites were accepted.
fn handle_simulate(
    config: &Config,
    plan_type: PlanType,
    urls: Vec<String>,
    json: bool,
) -> Result<()> {
    let mut service = SubscriptionService::new(PlanCatalog::standard(), config.renewal_policy());

    let customer_id = service.register_customer("simulated", "", "simulated@example.com");
    let renewal = service.subscribe(customer_id, plan_type)?;
    let report = service.add_websites(customer_id, urls)?;
    let customer = service.customer(customer_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(customer.websites().all())?);
        return Ok(());
    }

    println!("{}", "Simulation".bright_blue().bold());
    println!();
    println!("  Plan:    {}", plan_type.to_string().cyan());
    println!("  Renews:  {}", renewal.to_string().bright_black());
    println!();

    for website in customer.websites().iter() {
        println!("  {} {}", "ACCEPTED".green(), website.url);
    }
    for rejected in &report.rejected {
        println!(
            "  {} {} ({})",
            "REJECTED".red(),
            rejected.website.url,
            rejected.reason.to_string().bright_black()
        );
    }

    println!();
    println!(
        "  Total: {} accepted, {} rejected",
        report.added.len().to_string().bright_white().bold(),
        report.rejected.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}
