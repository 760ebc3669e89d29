//! Liquid CLI
//!
//! Command-line driver for the finance engine: ledger summary, budget
//! health, sentiment feedback, wealth projection, investment simulation and
//! take-home estimation.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Local, Months, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;

use liquid_engine::budget::{
    allocate, apply_feedback_with, bucket_spending, spending_health, Sentiment,
};
use liquid_engine::display::{format_compact, format_inr};
use liquid_engine::investment::InvestmentScenario;
use liquid_engine::ledger::{aggregate, daily_expense_series, load_transactions, Transaction};
use liquid_engine::tax::{estimate, TaxRegime};
use liquid_engine::{EngineConfig, Profile, ScenarioRunner};

/// Liquid - personal finance calculations from the terminal
#[derive(Parser)]
#[command(name = "liquid")]
#[command(about = "Budget, projection and investment calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Engine configuration (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Profile and ledger inputs shared by most subcommands
#[derive(clap::Args)]
struct Inputs {
    /// Profile JSON; the default profile is used when omitted
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Transactions CSV (id,amount,kind,category,timestamp,note)
    #[arg(short, long)]
    transactions: Option<PathBuf>,

    /// Reference month as YYYY-MM (defaults to the current month)
    #[arg(short, long)]
    month: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Balance, monthly totals and top spending categories
    Summary {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Needs/wants/savings targets and spending health
    Budget {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Adjust the budget from how it felt: too-strict, good or too-easy
    Feedback {
        #[command(flatten)]
        inputs: Inputs,

        /// too-strict, good or too-easy
        #[arg(short, long)]
        sentiment: String,

        /// Write the updated profile here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ten-year wealth projection from the current balance
    Project {
        #[command(flatten)]
        inputs: Inputs,

        /// Annual raise in percent (overrides config)
        #[arg(long)]
        hike: Option<f64>,

        /// Months to project (overrides config)
        #[arg(long)]
        months: Option<u32>,

        /// Write yearly snapshots to CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Compare projections across several raise rates
    Sweep {
        #[command(flatten)]
        inputs: Inputs,

        /// Comma-separated raise rates in percent
        #[arg(long, value_delimiter = ',', default_value = "0,5,10,15,20")]
        hikes: Vec<f64>,
    },

    /// Compound-interest simulation of an investment plan
    Invest {
        #[arg(long)]
        principal: Option<f64>,

        /// Monthly contribution (SIP)
        #[arg(long)]
        monthly: Option<f64>,

        /// Annual rate in percent
        #[arg(long)]
        rate: Option<f64>,

        #[arg(long)]
        years: Option<u32>,

        /// Write yearly snapshots to CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Estimate monthly take-home from annual fixed pay
    NetIncome {
        /// Annual fixed pay in rupees
        #[arg(long, required_unless_present = "lakhs")]
        fixed: Option<f64>,

        /// Annual fixed pay in lakhs
        #[arg(long, conflicts_with = "fixed")]
        lakhs: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let runner = ScenarioRunner::with_config(config);
    let now = Local::now().naive_local();

    match cli.command {
        Commands::Summary { inputs } => cmd_summary(&runner, &inputs, now),
        Commands::Budget { inputs } => cmd_budget(&inputs, now),
        Commands::Feedback {
            inputs,
            sentiment,
            output,
        } => cmd_feedback(&runner, &inputs, &sentiment, output.as_deref(), now),
        Commands::Project {
            inputs,
            hike,
            months,
            csv,
        } => cmd_project(&runner, &inputs, hike, months, csv.as_deref(), now),
        Commands::Sweep { inputs, hikes } => cmd_sweep(&runner, &inputs, &hikes, now),
        Commands::Invest {
            principal,
            monthly,
            rate,
            years,
            csv,
        } => {
            let defaults = &runner.config().investment;
            let scenario = InvestmentScenario {
                name: "CLI plan".to_string(),
                principal: principal.unwrap_or(defaults.principal),
                monthly_contribution: monthly.unwrap_or(defaults.monthly_contribution),
                annual_rate_percent: rate.unwrap_or(defaults.annual_rate_percent),
                years: years.unwrap_or(defaults.years),
            };
            cmd_invest(&scenario, csv.as_deref())
        }
        Commands::NetIncome { fixed, lakhs } => {
            let pay = match (fixed, lakhs) {
                (Some(rupees), _) => rupees,
                (None, Some(lakhs)) => lakhs * 100_000.0,
                (None, None) => return Err(anyhow!("pass --fixed or --lakhs")),
            };
            cmd_net_income(pay)
        }
    }
}

/// Loaded profile, ledger and reference date
struct Loaded {
    profile: Profile,
    transactions: Vec<Transaction>,
    reference: NaiveDate,
    /// Last day shown in trailing series: today, or the end of `--month`
    trend_end: NaiveDate,
}

fn load_inputs(inputs: &Inputs, now: NaiveDateTime) -> Result<Loaded> {
    let profile = match &inputs.profile {
        Some(path) => Profile::from_json_path(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => Profile::default(),
    };
    let transactions = match &inputs.transactions {
        Some(path) => load_transactions(path)
            .with_context(|| format!("Failed to load transactions {}", path.display()))?,
        None => Vec::new(),
    };
    let (reference, trend_end) = match &inputs.month {
        Some(month) => {
            let first = parse_month(month)?;
            (first, last_day_of_month(first)?)
        }
        None => (now.date(), now.date()),
    };
    log::debug!(
        "{} transactions, reference month {}",
        transactions.len(),
        reference.format("%Y-%m")
    );

    Ok(Loaded {
        profile,
        transactions,
        reference,
        trend_end,
    })
}

fn last_day_of_month(first: NaiveDate) -> Result<NaiveDate> {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| anyhow!("Month {} is out of range", first.format("%Y-%m")))
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{value}', expected YYYY-MM"))
}

fn cmd_summary(runner: &ScenarioRunner, inputs: &Inputs, now: NaiveDateTime) -> Result<()> {
    let loaded = load_inputs(inputs, now)?;
    let summary = aggregate(
        loaded.profile.base_balance,
        &loaded.transactions,
        loaded.reference,
    );
    let ledger = &runner.config().ledger;

    println!("Ledger Summary ({})", loaded.reference.format("%B %Y"));
    println!("{}", "=".repeat(40));
    println!("  Current Balance:  {}", format_inr(summary.current_balance));
    println!("  Income (month):   {}", format_inr(summary.monthly_income_actual));
    println!("  Expenses (month): {}", format_inr(summary.monthly_expense_actual));

    println!("\nTop Categories:");
    for entry in summary.top_categories(ledger.top_categories) {
        println!("  {:<20} {:>14}", entry.group.label(), format_inr(entry.total));
    }

    println!(
        "\nLast {} days to {}:",
        ledger.trend_days,
        loaded.trend_end.format("%d %b %Y")
    );
    for day in daily_expense_series(&loaded.transactions, loaded.trend_end, ledger.trend_days) {
        println!("  {}  {:>12}", day.date.format("%d %b"), format_inr(day.amount));
    }

    Ok(())
}

fn cmd_budget(inputs: &Inputs, now: NaiveDateTime) -> Result<()> {
    let loaded = load_inputs(inputs, now)?;
    let budget = &loaded.profile.budget;
    let balance = aggregate(
        loaded.profile.base_balance,
        &loaded.transactions,
        loaded.reference,
    )
    .current_balance;

    let targets = allocate(balance, &budget.ratios).context("Cannot allocate budget")?;
    let spent = bucket_spending(&loaded.transactions, loaded.reference);
    let health = spending_health(spent.total_spent(), budget.monthly_limit);

    println!("Budget ({})", loaded.reference.format("%B %Y"));
    println!("{}", "=".repeat(56));
    println!("{:<10} {:>6} {:>18} {:>18}", "Bucket", "Pct", "Target", "Actual");
    let rows = [
        ("Needs", budget.ratios.needs_percent, targets.needs_amount, spent.needs),
        ("Wants", budget.ratios.wants_percent, targets.wants_amount, spent.wants),
        ("Savings", budget.ratios.savings_percent, targets.savings_amount, spent.savings),
    ];
    for (name, percent, target, actual) in rows {
        println!(
            "{:<10} {:>5}% {:>18} {:>18}",
            name,
            percent,
            format_inr(target),
            format_inr(actual)
        );
    }

    println!("\n  Monthly Limit: {}", format_inr(budget.monthly_limit as f64));
    println!("  Limit Used:    {:.1}% ({:?})", health.used_percent, health.level);
    Ok(())
}

fn cmd_feedback(
    runner: &ScenarioRunner,
    inputs: &Inputs,
    sentiment: &str,
    output: Option<&Path>,
    now: NaiveDateTime,
) -> Result<()> {
    let sentiment = Sentiment::parse(sentiment)
        .ok_or_else(|| anyhow!("Unknown sentiment '{sentiment}' (too-strict, good, too-easy)"))?;
    let loaded = load_inputs(inputs, now)?;
    let policy = runner.config().feedback_policy;

    let outcome = apply_feedback_with(&loaded.profile.budget, sentiment, now, policy);
    let ratios = &outcome.state.ratios;

    println!("{}", outcome.description);
    println!(
        "  Needs {}% / Wants {}% / Savings {}%, Limit {}",
        ratios.needs_percent,
        ratios.wants_percent,
        ratios.savings_percent,
        format_inr(outcome.state.monthly_limit as f64)
    );

    if let Some(path) = output {
        let updated = Profile {
            budget: outcome.state,
            ..loaded.profile
        };
        updated
            .to_json_path(path)
            .with_context(|| format!("Failed to write profile {}", path.display()))?;
        println!("\nUpdated profile written to: {}", path.display());
    }
    Ok(())
}

fn cmd_project(
    runner: &ScenarioRunner,
    inputs: &Inputs,
    hike: Option<f64>,
    months: Option<u32>,
    csv: Option<&Path>,
    now: NaiveDateTime,
) -> Result<()> {
    let loaded = load_inputs(inputs, now)?;
    let opening = aggregate(
        loaded.profile.base_balance,
        &loaded.transactions,
        loaded.reference,
    )
    .current_balance;

    let mut config = runner.config().clone();
    if let Some(hike) = hike {
        config.projection.annual_hike_percent = hike;
    }
    if let Some(months) = months {
        config.projection.months = months;
    }
    let result = ScenarioRunner::with_config(config).run_projection(&loaded.profile, opening)?;

    println!(
        "Wealth Projection ({}% annual raise, {}% saved):",
        result.annual_hike_percent, loaded.profile.budget.ratios.savings_percent
    );
    println!("{:>8} {:>18} {:>14} {:>18}", "Period", "Balance", "Income", "Saved");
    println!("{}", "-".repeat(62));
    for snap in &result.snapshots {
        println!(
            "{:>8} {:>18} {:>14} {:>18}",
            snap.period_label,
            format_inr(snap.projected_balance),
            format_inr(snap.projected_income),
            format_inr(snap.cumulative_saved)
        );
    }

    let summary = result.summary();
    println!("\nProjected Wealth in {} years: {}", summary.years, format_compact(summary.final_balance));

    if let Some(path) = csv {
        write_csv(path, &result.snapshots)?;
    }
    Ok(())
}

fn cmd_sweep(
    runner: &ScenarioRunner,
    inputs: &Inputs,
    hikes: &[f64],
    now: NaiveDateTime,
) -> Result<()> {
    let loaded = load_inputs(inputs, now)?;
    let opening = aggregate(
        loaded.profile.base_balance,
        &loaded.transactions,
        loaded.reference,
    )
    .current_balance;

    let results = runner.run_hike_sweep(&loaded.profile, opening, hikes)?;

    println!("{:>8} {:>18} {:>14} {:>18}", "Raise", "Final Balance", "Final Income", "Saved");
    println!("{}", "-".repeat(62));
    for result in &results {
        let summary = result.summary();
        println!(
            "{:>7}% {:>18} {:>14} {:>18}",
            result.annual_hike_percent,
            format_compact(summary.final_balance),
            format_inr(summary.final_income),
            format_compact(summary.total_saved)
        );
    }
    Ok(())
}

fn cmd_invest(scenario: &InvestmentScenario, csv: Option<&Path>) -> Result<()> {
    let run = scenario.simulate()?;

    println!(
        "Investment Simulation: {} principal, {} / month at {}% for {} years",
        format_inr(scenario.principal),
        format_inr(scenario.monthly_contribution),
        scenario.annual_rate_percent,
        scenario.years
    );
    println!("{:>8} {:>18} {:>18} {:>18}", "Period", "Balance", "Invested", "Interest");
    println!("{}", "-".repeat(66));
    for snap in &run.snapshots {
        println!(
            "{:>8} {:>18} {:>18} {:>18}",
            snap.period_label,
            format_inr(snap.balance),
            format_inr(snap.total_contributed),
            format_inr(snap.interest_earned)
        );
    }

    if let Some(irr) = run.annualized_return() {
        println!("\nAnnualized Return: {:.2}%", irr * 100.0);
    }

    if let Some(path) = csv {
        write_csv(path, &run.snapshots)?;
    }
    Ok(())
}

fn cmd_net_income(annual_fixed_pay: f64) -> Result<()> {
    let regime = TaxRegime::new_regime_fy2024_25();
    let breakdown = estimate(&regime, annual_fixed_pay)?;

    println!("Take-home Estimate ({})", regime.name);
    println!("{}", "=".repeat(40));
    println!("  Fixed Pay:       {:>14}", format_inr(breakdown.annual_fixed_pay));
    println!("  Taxable Income:  {:>14}", format_inr(breakdown.taxable_income));
    println!("  Income Tax:      {:>14}", format_inr(breakdown.slab_tax));
    println!("  Cess:            {:>14}", format_inr(breakdown.cess));
    println!("  Provident Fund:  {:>14}", format_inr(breakdown.provident_fund));
    println!("  Professional Tax:{:>14}", format_inr(breakdown.professional_tax));
    println!("  Annual Net:      {:>14}", format_inr(breakdown.annual_net));
    println!("\n  Monthly In-hand: {:>14}", format_inr(breakdown.monthly_net as f64));
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("\nFull results written to: {}", path.display());
    Ok(())
}
