// ==========================================
// 空间站货舱调度系统 - 命令行入口
// ==========================================
// 系统定位: 决策支持系统
// 数据: 本地 JSON 文件 (快照 / 操作日志 / 配置)
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use station_stowage::api::{RearrangementReport, StationStatus};
use station_stowage::app::{get_default_data_dir, AppState};
use station_stowage::config::config_keys;
use station_stowage::engine::DEFAULT_EXPIRY_WINDOW_DAYS;
use station_stowage::{logging, ActionType, Priority, Shipment};

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Cargo rearrangement advisor for station storage bays", long_about = None)]
struct Cli {
    /// Directory holding snapshot.json / action_log.json / config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Name recorded in the activity log
    #[arg(long, global = true, default_value = "operator")]
    actor: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ShipmentArgs {
    /// Incoming shipment volume (m³)
    #[arg(long)]
    volume: f64,

    /// Shipment priority: low, medium, high, critical
    #[arg(long, default_value = "medium", value_parser = parse_priority)]
    priority: Priority,

    /// Free-text description of the shipment
    #[arg(long)]
    contents: Option<String>,
}

impl ShipmentArgs {
    fn to_shipment(&self) -> Shipment {
        Shipment {
            volume: self.volume,
            priority: self.priority,
            contents: self.contents.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Replace the station snapshot with the built-in sample bays and items
    Seed,

    /// Show global and per-bay utilization
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Evaluate an incoming shipment and print the suggested rearrangement
    Evaluate {
        #[command(flatten)]
        shipment: ShipmentArgs,

        #[arg(long)]
        json: bool,
    },

    /// Evaluate a shipment and apply the suggested rearrangement
    Apply {
        #[command(flatten)]
        shipment: ShipmentArgs,
    },

    /// Evaluate a shipment and record that the suggestion was declined
    Cancel {
        #[command(flatten)]
        shipment: ShipmentArgs,

        #[arg(long)]
        reason: Option<String>,
    },

    /// List recent activity log entries
    Logs {
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Only show one action type (e.g. ApplyRearrangement)
        #[arg(long = "type")]
        action_type: Option<String>,
    },

    /// Import the item catalog from CSV (replaces all items)
    ImportItems { file: PathBuf },

    /// Import the storage bay catalog from CSV (replaces all bays)
    ImportZones { file: PathBuf },

    /// Set the station-wide capacity figures (m³)
    Capacity {
        #[arg(long)]
        total: f64,

        #[arg(long)]
        used: f64,
    },

    /// Search items by name or id
    Find {
        #[arg(default_value = "")]
        query: String,

        #[arg(long)]
        category: Option<String>,
    },

    /// List items expiring within the given number of days
    Expiring {
        #[arg(long, default_value_t = DEFAULT_EXPIRY_WINDOW_DAYS)]
        days: i64,
    },

    /// Record that an item was retrieved today
    Retrieve { item_id: String },

    /// Show or change engine settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print effective settings
    Show,
    /// Set one setting (alert_threshold, critical_threshold, minutes_per_move,
    /// min_completion_minutes)
    Set { key: String, value: String },
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority: {}", s))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.log_json {
        logging::init_json("info");
    } else {
        logging::init_with_default("warn");
    }

    let data_dir = cli.data_dir.unwrap_or_else(get_default_data_dir);
    tracing::info!("{} v{}", station_stowage::APP_NAME, station_stowage::VERSION);

    let state = AppState::new(&data_dir)
        .with_context(|| format!("无法初始化数据目录 {}", data_dir.display()))?;
    let api = &state.rearrange_api;
    let actor = cli.actor.as_str();

    match cli.command {
        Command::Seed => {
            let status = api.seed_sample_data(actor)?;
            println!("Sample data written to {}", state.data_dir().display());
            print_status(&status);
        }
        Command::Status { json } => {
            let status = api.get_status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
        Command::Evaluate { shipment, json } => {
            let report = api.evaluate_shipment(&shipment.to_shipment(), actor)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Apply { shipment } => {
            let report = api.evaluate_shipment(&shipment.to_shipment(), actor)?;
            print_report(&report);
            if report.suggestion.plan.is_empty() {
                println!("Nothing to apply.");
            } else {
                let outcome = api.apply_plan(&report.suggestion.plan, actor)?;
                println!(
                    "Applied {} move(s), {:.1} m³ relocated (log {}).",
                    outcome.moves_applied, outcome.space_recovered, outcome.action_id
                );
            }
        }
        Command::Cancel { shipment, reason } => {
            let report = api.evaluate_shipment(&shipment.to_shipment(), actor)?;
            let action_id = api.cancel_plan(&report.suggestion.plan, actor, reason.as_deref())?;
            println!("Rearrangement declined (log {}).", action_id);
        }
        Command::Logs { limit, action_type } => {
            let logs = match action_type {
                Some(raw) => {
                    let kind = ActionType::from_str(&raw)
                        .with_context(|| format!("unknown action type: {}", raw))?;
                    let mut logs = api.list_action_logs_by_type(kind)?;
                    logs.truncate(limit);
                    logs
                }
                None => api.list_action_logs(limit)?,
            };
            for log in logs {
                println!(
                    "{}  {:<20} {:<10} {}",
                    log.action_ts.format("%Y-%m-%d %H:%M:%S"),
                    log.action_type,
                    log.actor,
                    log.detail.unwrap_or_default()
                );
            }
        }
        Command::ImportItems { file } => {
            let status = api.import_items(&file, actor)?;
            println!("Imported {} item(s).", status.item_count);
        }
        Command::ImportZones { file } => {
            let status = api.import_zones(&file, actor)?;
            println!("Imported {} bay(s).", status.zones.len());
            print_status(&status);
        }
        Command::Capacity { total, used } => {
            let status = api.set_capacity(total, used, actor)?;
            print_status(&status);
        }
        Command::Find { query, category } => {
            let hits = api.find_items(&query, category.as_deref(), today())?;
            if hits.is_empty() {
                println!("No matching items.");
            }
            for hit in hits {
                let expiry = match hit.days_to_expiry {
                    Some(days) if hit.expiring_soon => format!(" [expires in {} day(s)]", days),
                    _ => String::new(),
                };
                println!(
                    "  {:<4} {:<24} {:<20} {:>5.1} m³ {}{}",
                    hit.item.id,
                    hit.item.name,
                    hit.item.location.to_string(),
                    hit.item.volume,
                    hit.item.priority,
                    expiry
                );
            }
        }
        Command::Expiring { days } => {
            let items = api.list_expiring_items(days, today())?;
            if items.is_empty() {
                println!("No items expire within {} day(s).", days);
            }
            for entry in items {
                println!(
                    "  {:<4} {:<24} {:<20} {} day(s)",
                    entry.item.id,
                    entry.item.name,
                    entry.item.location.to_string(),
                    entry.days_to_expiry
                );
            }
        }
        Command::Retrieve { item_id } => {
            let item = api.retrieve_item(&item_id, actor, today())?;
            println!("Retrieved {} ({}) from {}.", item.id, item.name, item.location);
        }
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                let cfg = state.config_manager.get_engine_config()?;
                let thresholds = cfg.thresholds;
                println!("{} = {}", config_keys::ALERT_THRESHOLD, thresholds.alert_threshold);
                println!("{} = {}", config_keys::CRITICAL_THRESHOLD, thresholds.critical_threshold);
                println!("{} = {}", config_keys::MINUTES_PER_MOVE, cfg.tasks.minutes_per_move);
                println!(
                    "{} = {}",
                    config_keys::MIN_COMPLETION_MINUTES,
                    cfg.tasks.min_completion_minutes
                );
            }
            ConfigCommand::Set { key, value } => {
                state.config_manager.set_config_value(&key, &value)?;
                println!("{} = {}", key, value.trim());
            }
        },
    }

    Ok(())
}

fn print_status(status: &StationStatus) {
    println!(
        "Station: {:.1}/{:.1} m³ used ({:.0}%), {:.1} m³ free [{}]",
        status.capacity.used_capacity,
        status.capacity.total_capacity,
        status.utilization * 100.0,
        status.available,
        status.status
    );
    for zone in &status.zones {
        println!(
            "  {:<8} {:>5.1}/{:<5.1} ({:>3.0}%) {:>2} item(s) [{}]{}",
            zone.name,
            zone.used,
            zone.capacity,
            zone.utilization * 100.0,
            zone.item_count,
            zone.status,
            zone.special_conditions
                .as_deref()
                .map(|c| format!(" - {}", c))
                .unwrap_or_default()
        );
    }
}

fn print_report(report: &RearrangementReport) {
    let eval = &report.suggestion.evaluation;
    println!(
        "Shipment {:.1} m³ ({}): {}",
        report.shipment.volume, report.shipment.priority, eval.outcome
    );
    println!(
        "  available {:.1} m³, projected utilization {:.0}%",
        eval.available_space,
        eval.projected_utilization * 100.0
    );
    if eval.is_required {
        println!(
            "  shortfall {:.1} m³, recovered {:.1} m³{}",
            eval.shortfall,
            report.summary.space_recovered,
            if report.summary.shortfall_met { "" } else { " (NOT ENOUGH)" }
        );
    }
    for task in &report.tasks.tasks {
        println!("  - {}", task);
    }
    if report.tasks.estimated_minutes > 0 {
        println!("  estimated completion: {} min", report.tasks.estimated_minutes);
    }
    for zone in report.projection.affected_zones() {
        println!(
            "  {:<8} {:>5.1} -> {:>5.1} m³ ({:.0}%){}",
            zone.zone_name,
            zone.used_before,
            zone.used_after,
            zone.utilization_after * 100.0,
            if zone.over_capacity { " OVER CAPACITY" } else { "" }
        );
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
