//! plan-runner: headless planning runner for Backfill.
//!
//! Usage:
//!   plan-runner --input plan.json
//!   plan-runner --input plan.json --seed 42 --out schedule.json
//!   plan-runner --input plan.json --json
//!
//! Reads a PlanRequest, runs allocate -> expand -> distribute, prints
//! a human summary (or raw JSON with --json), and optionally writes
//! the full PlanResponse to --out.

use anyhow::{Context, Result};
use backfill_core::{
    allocate, distribute, expand_assignments,
    request::{PlanRequest, PlanResponse},
};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = string_arg(&args, "--input").context("--input <file> is required")?;
    let out = string_arg(&args, "--out");
    let seed_override: Option<u64> = parse_arg(&args, "--seed");
    let raw_json = args.iter().any(|a| a == "--json");

    let content =
        fs::read_to_string(&input).with_context(|| format!("Cannot read {input}"))?;
    let request: PlanRequest = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse {input} as a plan request"))?;
    request.validate()?;

    // An explicit seed (flag first, then request) keeps the run
    // reproducible; otherwise fall back to wall clock for a one-off
    // schedule. Nondeterminism lives here, never in the core.
    let seed = seed_override.or(request.seed).unwrap_or_else(unix_seconds);

    let allocation = allocate(request.target_revenue, request.current_revenue, &request.roles);
    let assignments = expand_assignments(&allocation, &request.members, &request.work_items);
    let config = request.schedule.clone().unwrap_or_default();
    let schedule = distribute(
        &assignments,
        request.from,
        request.to,
        &request.worklogs,
        seed,
        &config,
    )?;

    let response = PlanResponse {
        allocation,
        assignments,
        schedule,
        seed,
    };

    if raw_json {
        println!("{}", serde_json::to_string(&response)?);
    } else {
        print_summary(&request, &response);
    }

    if let Some(path) = out {
        fs::write(&path, serde_json::to_string_pretty(&response)?)
            .with_context(|| format!("Cannot write {path}"))?;
        log::info!("wrote plan response to {path}");
    }

    Ok(())
}

fn print_summary(request: &PlanRequest, response: &PlanResponse) {
    let allocation = &response.allocation;
    let delta = request.target_revenue - request.current_revenue;

    println!("=== ALLOCATION SUMMARY ===");
    println!("  target revenue:   {:.2}", request.target_revenue);
    println!("  current revenue:  {:.2}", request.current_revenue);
    println!("  delta requested:  {delta:.2}");
    println!("  delta achieved:   {:.2}", allocation.total_delta_revenue);
    println!("  achieved revenue: {:.2}", allocation.achieved_revenue);
    for role in &allocation.roles {
        println!(
            "  {:<24} {:>5.1} h/member x {} = {:>6.1} h  ({:.2})",
            role.role_name,
            role.hours_per_member,
            role.member_count,
            role.total_hours,
            role.revenue_contribution
        );
    }

    let scheduled: f64 = response.schedule.iter().map(|e| e.hours).sum();
    let overflow: f64 = response
        .schedule
        .iter()
        .filter(|e| e.overflow)
        .map(|e| e.hours)
        .sum();

    println!();
    println!("=== SCHEDULE SUMMARY ===");
    println!("  window:           {} .. {}", request.from, request.to);
    println!("  seed:             {}", response.seed);
    println!("  assignments:      {}", response.assignments.len());
    println!("  entries:          {}", response.schedule.len());
    println!("  hours scheduled:  {scheduled:.1}");
    if overflow > 0.0 {
        println!("  overflow hours:   {overflow:.1}  (daily cap exceeded)");
    }
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}

fn unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
