use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use clap::Parser;
use mudawama_core::config::MudawamaConfig;
use mudawama_core::due::{classify_due, DueTier};
use mudawama_core::milestone::milestones;
use mudawama_core::model::Snapshot;
use mudawama_core::overview::{overview, Overview};
use mudawama_core::streak::streaks;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "mudawama", about = "Mudawama: study-plan progress rollups", version)]
enum Cli {
    /// Initialize Mudawama in the current project
    Init,
    /// Full dashboard: rollup, per-project progress, streaks, milestones
    Overview {
        /// Snapshot JSON path (default from config)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Output raw JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Today's global rollup only
    Rollup {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Consecutive-day completion streaks
    Streaks {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Milestone standing for the lifetime completion count
    Milestones {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Use this lifetime count instead of reading a snapshot
        #[arg(long)]
        lifetime: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Per-project due-date status
    Due {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Validate a snapshot file and exit non-zero on structural errors
    Validate {
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = MudawamaConfig::load(Some(&std::env::current_dir()?))
        .unwrap_or_else(|_| MudawamaConfig::default());

    run(cli, &config)
}

fn run(cli: Cli, config: &MudawamaConfig) -> Result<()> {
    match cli {
        Cli::Init => cmd_init(config),
        Cli::Overview { snapshot, json } => {
            let snapshot = load_snapshot(snapshot, config)?;
            cmd_overview(&snapshot, config, json)
        }
        Cli::Rollup { snapshot, json } => {
            let snapshot = load_snapshot(snapshot, config)?;
            cmd_rollup(&snapshot, config, json)
        }
        Cli::Streaks { snapshot, json } => {
            let snapshot = load_snapshot(snapshot, config)?;
            cmd_streaks(&snapshot, config, json)
        }
        Cli::Milestones {
            snapshot,
            lifetime,
            json,
        } => {
            let lifetime = match lifetime {
                Some(n) => n,
                None => load_snapshot(snapshot, config)?.lifetime_completed(),
            };
            cmd_milestones(lifetime, config, json)
        }
        Cli::Due { snapshot, json } => {
            let snapshot = load_snapshot(snapshot, config)?;
            cmd_due(&snapshot, config, json)
        }
        Cli::Validate { snapshot } => {
            let snapshot = load_snapshot(snapshot, config)?;
            println!(
                "{} {} projects, {} activities",
                "Snapshot OK:".green(),
                snapshot.projects.len(),
                snapshot.activities.len()
            );
            Ok(())
        }
    }
}

/// "Now" in the configured local offset. Day classification follows this
/// offset, so it must be resolved once, up front.
fn local_now(config: &MudawamaConfig) -> DateTime<FixedOffset> {
    let offset =
        FixedOffset::east_opt(config.time.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset)
}

fn load_snapshot(path: Option<PathBuf>, config: &MudawamaConfig) -> Result<Snapshot> {
    let path = path
        .or_else(|| config.snapshot.path.as_ref().map(PathBuf::from))
        .context("no snapshot path: pass --snapshot or set snapshot.path in config")?;
    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    Snapshot::from_json(&data).with_context(|| format!("invalid snapshot {}", path.display()))
}

fn cmd_init(config: &MudawamaConfig) -> Result<()> {
    let dir = PathBuf::from(".mudawama");
    let path = dir.join("config.toml");
    if path.exists() {
        println!("Mudawama already initialized in this project.");
        return Ok(());
    }

    fs::create_dir_all(&dir).context("failed to create .mudawama/")?;
    fs::write(&path, config.to_toml()?).context("failed to write config")?;

    println!("{}", "Initialized Mudawama in .mudawama/".green());
    println!("  {}     .mudawama/config.toml", "Config:".dimmed());
    println!(
        "  {} {:?}",
        "Milestones:".dimmed(),
        config.milestones.thresholds
    );
    println!(
        "  {} UTC{:+} minutes",
        "Offset:".dimmed(),
        config.time.utc_offset_minutes
    );
    Ok(())
}

fn cmd_overview(snapshot: &Snapshot, config: &MudawamaConfig, json: bool) -> Result<()> {
    let now = local_now(config);
    let o: Overview = overview(snapshot, &config.milestones.thresholds, &now);

    if json {
        println!("{}", serde_json::to_string_pretty(&o)?);
        return Ok(());
    }

    println!("{} {}", "Today".bold(), o.day_key.cyan());
    println!(
        "  {} {} tasks · {} planned · {} to earn · {} earned",
        "Remaining:".dimmed(),
        o.rollup.remaining_tasks,
        format_minutes(o.rollup.planned_minutes),
        format_cents(o.rollup.planned_cents),
        format_cents(o.rollup.earned_cents_today).green(),
    );
    println!();

    for project in &o.projects {
        let p = &project.progress;
        println!(
            "{} {}",
            p.name.bold(),
            format!("[{}]", project.priority).dimmed()
        );
        println!(
            "  {}/{} today · {}/{} lifetime · {} remaining",
            p.done_today,
            p.done_today + p.remaining_today,
            p.done_total,
            p.total,
            p.remaining_today
        );
        if let Some(due) = &project.due {
            println!("  {}", paint_due(&due.label, due.tier));
        }
    }
    println!();

    println!(
        "{} current {} · best {}",
        "Streaks:".bold(),
        o.streaks.current,
        o.streaks.best
    );
    match o.milestones.next {
        Some(next) => println!(
            "{} {:?} achieved · next {} ({}%)",
            "Milestones:".bold(),
            o.milestones.achieved,
            next,
            o.milestones.progress_pct
        ),
        None => println!(
            "{} all achieved: {:?}",
            "Milestones:".bold(),
            o.milestones.achieved
        ),
    }
    Ok(())
}

fn cmd_rollup(snapshot: &Snapshot, config: &MudawamaConfig, json: bool) -> Result<()> {
    let now = local_now(config);
    let o = overview(snapshot, &config.milestones.thresholds, &now);

    if json {
        println!("{}", serde_json::to_string_pretty(&o.rollup)?);
        return Ok(());
    }

    println!("{} tasks remaining", o.rollup.remaining_tasks);
    println!("{} planned", format_minutes(o.rollup.planned_minutes));
    println!("{} to earn", format_cents(o.rollup.planned_cents));
    println!("{} earned today", format_cents(o.rollup.earned_cents_today));
    Ok(())
}

fn cmd_streaks(snapshot: &Snapshot, config: &MudawamaConfig, json: bool) -> Result<()> {
    let now = local_now(config);
    let s = streaks(&snapshot.completion_day_keys(&now), &now);

    if json {
        println!("{}", serde_json::to_string_pretty(&s)?);
        return Ok(());
    }

    if s.current == 0 {
        println!("{} (best {})", "No completion yet today.".dimmed(), s.best);
    } else {
        println!(
            "{} {} days {} (best {})",
            "Streak:".bold(),
            s.current,
            "and counting".green(),
            s.best
        );
    }
    Ok(())
}

fn cmd_milestones(lifetime: u64, config: &MudawamaConfig, json: bool) -> Result<()> {
    let status = milestones(lifetime, &config.milestones.thresholds);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{} {}", "Lifetime completions:".dimmed(), lifetime);
    for achieved in &status.achieved {
        println!("  {} {}", "*".green(), achieved);
    }
    match status.next {
        Some(next) => println!(
            "  {} {} ({}%)",
            "next".dimmed(),
            next.cyan(),
            status.progress_pct
        ),
        None => println!("  {}", "all milestones achieved".green()),
    }
    Ok(())
}

fn cmd_due(snapshot: &Snapshot, config: &MudawamaConfig, json: bool) -> Result<()> {
    let now = local_now(config);

    if json {
        let entries: Vec<serde_json::Value> = snapshot
            .projects
            .iter()
            .map(|p| {
                let due = classify_due(
                    p.due_at.map(|d| d.with_timezone(&now.timezone())).as_ref(),
                    &now,
                );
                serde_json::json!({ "project_id": p.id, "name": p.name, "due": due })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for project in &snapshot.projects {
        let due = classify_due(
            project
                .due_at
                .map(|d| d.with_timezone(&now.timezone()))
                .as_ref(),
            &now,
        );
        match due {
            Some(status) => println!(
                "{:<24} {}",
                project.name,
                paint_due(&status.label, status.tier)
            ),
            None => println!("{:<24} {}", project.name, "no due date".dimmed()),
        }
    }
    Ok(())
}

fn paint_due(label: &str, tier: DueTier) -> String {
    match tier {
        DueTier::Error => label.red().to_string(),
        DueTier::Warning => label.yellow().to_string(),
        DueTier::Default => label.dimmed().to_string(),
    }
}

/// Cents as a plain decimal string; currency symbols are up to the user.
fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(250), "2.50");
        assert_eq!(format_cents(12000), "120.00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(59), "59m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(135), "2h 15m");
    }
}
