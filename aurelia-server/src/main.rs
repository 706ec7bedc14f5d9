use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use aurelia_pipeline::audit::AuditReport;
use aurelia_pipeline::catalog::{CaseTemplate, Catalog};
use aurelia_pipeline::package_loader::{default_packages, load_packages_file};
use aurelia_pipeline::planner::compare_plans_checked;
use aurelia_pipeline::representation::ProblemSpec;
use aurelia_pipeline::session::{CockpitSession, RecordedSelection};
use aurelia_pipeline::types::{
    Criterion, DemandInputs, DemandPrediction, HybridPlan, Package, PlanComparison, RiskLevel,
};
use aurelia_pipeline::{CockpitConfig, CockpitError, CockpitResult};

const DEFAULT_CATALOG: &str = "cases/catalog.yml";
const DEFAULT_LOG_FILTER: &str = "info";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "aurelia-cockpit")]
#[command(version)]
#[command(about = "Decision cockpit for last-mile delivery: predict, optimize, plan, audit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Greedy truck loading (knapsack heuristic)
    Select {
        /// CSV with columns pkg_id,weight,value (defaults to the six demo packages)
        #[arg(long)]
        packages: Option<String>,
        /// Truck capacity (defaults to AURELIA_CAPACITY or 50)
        #[arg(long)]
        capacity: Option<f64>,
        /// Ranking criterion: value or ratio
        #[arg(long, default_value = "value")]
        criterion: String,
        #[arg(long)]
        json: bool,
    },
    /// Simulated demand forecast
    Predict {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long)]
        json: bool,
    },
    /// Static vs rain-adjusted stop budget for an 8-hour shift
    Plan {
        /// Rain intensity, 0 (sun) to 1 (heavy rain)
        #[arg(long)]
        rain: f64,
        /// conservative, neutral or aggressive
        #[arg(long, default_value = "neutral")]
        risk: String,
        #[arg(long)]
        json: bool,
    },
    /// Render the problem card of a catalog case
    Card {
        #[command(flatten)]
        case: CaseArgs,
    },
    /// Heuristic audit of a catalog case
    Audit {
        #[command(flatten)]
        case: CaseArgs,
        #[arg(long)]
        json: bool,
    },
    /// Run every module in order through one session
    Walkthrough {
        #[command(flatten)]
        case: CaseArgs,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long)]
        capacity: Option<f64>,
        #[arg(long, default_value = "value")]
        criterion: String,
        #[arg(long, default_value = "neutral")]
        risk: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Day of week, 0 = Monday .. 6 = Sunday
    #[arg(long, default_value_t = 0)]
    day: u32,
    /// Rain intensity, 0 (sun) to 1 (heavy rain)
    #[arg(long, default_value_t = 0.3)]
    rain: f64,
    /// Promotion running
    #[arg(long)]
    promo: bool,
}

impl ScenarioArgs {
    fn inputs(&self) -> DemandInputs {
        DemandInputs {
            day_of_week: self.day,
            rain: self.rain,
            promo: self.promo,
        }
    }
}

#[derive(Args, Debug)]
struct CaseArgs {
    /// YAML case catalog
    #[arg(long, default_value = DEFAULT_CATALOG)]
    catalog: String,
    /// Case id or name (defaults to the first case)
    #[arg(long = "case")]
    case: Option<String>,
    /// Hard constraint to keep checked (repeatable; defaults to all of them)
    #[arg(long = "hard")]
    hard: Vec<String>,
    /// Soft constraint to check (repeatable; none by default)
    #[arg(long = "soft")]
    soft: Vec<String>,
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SelectionJson<'a> {
    generated_at: String,
    capacity: f64,
    criterion: String,
    selected: Vec<&'a str>,
    total_weight: f64,
    total_value: f64,
    utilization: f64,
    candidates: usize,
    elapsed_us: u128,
}

#[derive(Serialize)]
struct WalkthroughJson<'a> {
    generated_at: String,
    case: Option<&'a str>,
    session: &'a CockpitSession,
    audit: &'a AuditReport,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn banner(title: &str) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", title);
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{00b7}".repeat(width - filled)
    )
}

fn print_selection(recorded: &RecordedSelection, candidates: usize) {
    let result = &recorded.result;
    println!(
        "  {} candidates  \u{00b7}  criterion {}  \u{00b7}  {} selected",
        candidates,
        recorded.criterion,
        result.selected.len()
    );
    println!();
    if result.selected.is_empty() {
        println!("  Nothing fits. Increase capacity or lighten the load.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, p) in result.selected.iter().enumerate() {
            println!(
                "  {:>2}. {:12} weight {:>8.1}   value {:>8.1}",
                i + 1,
                p.pkg_id,
                p.weight,
                p.value
            );
        }
        println!("  {:\u{2500}<64}", "");
    }
    println!();
    println!(
        "  Total weight: {:.1} / {:.1}",
        result.total_weight, recorded.capacity
    );
    println!("  Total value:  {:.1}", result.total_value);
    println!(
        "  Utilization:  {} {:.0}%",
        progress_bar(result.utilization, 30),
        result.utilization * 100.0
    );
    println!();
}

fn print_prediction(prediction: &DemandPrediction) {
    println!("  Estimated demand: {:.0} parcels", prediction.demand);
    println!();
    println!("    base          {:>8.2}", prediction.base);
    println!("    rain effect   {:>8.2}", prediction.rain_effect);
    println!("    promo effect  {:>8.2}", prediction.promo_effect);
    println!("    noise         {:>8.2}", prediction.noise);
    println!();
    println!("  This is a prediction (information), not a decision (action).");
    println!();
}

fn print_plan_column(label: &str, plan: &HybridPlan) {
    println!(
        "  {:14} {:>6.1} min/stop   {:>3} stops max (buffer {:.0}%)",
        label,
        plan.minutes_per_stop,
        plan.max_stops,
        plan.safety_buffer * 100.0
    );
}

fn print_plan(comparison: &PlanComparison) {
    println!(
        "  Rain {:.2} \u{2192} {:.1} traffic min/stop  \u{00b7}  risk {}",
        comparison.rain, comparison.ml_traffic_minutes, comparison.risk
    );
    println!();
    print_plan_column("Static plan", &comparison.static_plan);
    print_plan_column("ML plan", &comparison.ml_plan);
    println!();
    match comparison.stop_delta() {
        0 => println!("  The rain estimate matches the static assumption."),
        d if d > 0 => println!("  The ML plan drops {} stops to stay feasible.", d),
        d => println!("  The ML plan frees room for {} more stops.", -d),
    }
    println!("  More rain \u{2192} more traffic \u{2192} fewer feasible stops.");
    println!();
}

fn print_audit(report: &AuditReport) {
    println!("  Prompt template:");
    println!();
    for line in report.prompt.lines() {
        println!("    {}", line);
    }
    println!();
    println!("  Gaps found:");
    if report.is_clean() {
        println!("    - No obvious gaps with these heuristics.");
    } else {
        for finding in &report.findings {
            println!("    - {}", finding.message);
        }
    }
    println!();
    println!("  Recommended metrics: {}", report.recommended_metrics.join(", "));
    println!();
    println!("  The copilot documents and audits; it does not take operational decisions.");
    println!();
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn load_packages_or_default(path: Option<&str>) -> CockpitResult<Vec<Package>> {
    match path {
        Some(path) => load_packages_file(path),
        None => Ok(default_packages()),
    }
}

fn load_case_spec(args: &CaseArgs) -> CockpitResult<(Option<String>, ProblemSpec)> {
    let catalog = Catalog::load(&args.catalog)?;
    let case = match &args.case {
        Some(key) => Some(catalog.find(key).ok_or_else(|| CockpitError::InvalidParameter {
            op: "case".into(),
            reason: format!("no case '{}' in {}; available: {:?}", key, args.catalog, catalog.labels()),
        })?),
        None => catalog.cases.first(),
    };
    let hard = (!args.hard.is_empty()).then_some(args.hard.as_slice());
    Ok(match case {
        Some(case) => (
            Some(case.label().to_string()),
            ProblemSpec::from_choices(case, hard, &args.soft)?,
        ),
        None if hard.is_none() && args.soft.is_empty() => (None, ProblemSpec::default()),
        // No template: choices are drawn from the generic options.
        None => (
            None,
            ProblemSpec::from_choices(&CaseTemplate::default(), hard, &args.soft)?,
        ),
    })
}

fn emit_json<T: Serialize>(value: &T) -> CockpitResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli, config: CockpitConfig) -> CockpitResult<()> {
    let mut session = CockpitSession::new(config);

    match cli.command {
        Command::Select {
            packages,
            capacity,
            criterion,
            json,
        } => {
            let packages = load_packages_or_default(packages.as_deref())?;
            let criterion: Criterion = criterion.parse()?;
            let capacity = capacity.unwrap_or(session.config().default_capacity);

            let start = Instant::now();
            let recorded = session.optimize_load(capacity, &packages, criterion)?;
            let elapsed_us = start.elapsed().as_micros();

            if json {
                emit_json(&SelectionJson {
                    generated_at: Utc::now().to_rfc3339(),
                    capacity,
                    criterion: criterion.to_string(),
                    selected: recorded.result.selected_ids(),
                    total_weight: recorded.result.total_weight,
                    total_value: recorded.result.total_value,
                    utilization: recorded.result.utilization,
                    candidates: packages.len(),
                    elapsed_us,
                })?;
            } else {
                banner("AURELIA \u{2014} Greedy Load Optimizer");
                print_selection(recorded, packages.len());
            }
        }
        Command::Predict { scenario, json } => {
            let prediction = session.predict(scenario.inputs())?;
            if json {
                emit_json(prediction)?;
            } else {
                banner("AURELIA \u{2014} Demand Predictor");
                print_prediction(prediction);
            }
        }
        Command::Plan { rain, risk, json } => {
            let comparison = compare_plans_checked(
                rain,
                RiskLevel::from_label(&risk),
                session.config().base_stop_minutes,
            )?;
            if json {
                emit_json(&comparison)?;
            } else {
                banner("AURELIA \u{2014} Hybrid Route Planner");
                print_plan(&comparison);
            }
        }
        Command::Card { case } => {
            let (_, spec) = load_case_spec(&case)?;
            println!("{}", spec.to_markdown());
        }
        Command::Audit { case, json } => {
            let (_, spec) = load_case_spec(&case)?;
            session.record_problem_spec(spec);
            let report = session.audit()?;
            if json {
                emit_json(&report)?;
            } else {
                banner("AURELIA \u{2014} Copilot Audit");
                print_audit(&report);
            }
        }
        Command::Walkthrough {
            case,
            scenario,
            capacity,
            criterion,
            risk,
            json,
        } => {
            let (label, spec) = load_case_spec(&case)?;
            let criterion: Criterion = criterion.parse()?;
            let capacity = capacity.unwrap_or(session.config().default_capacity);
            let packages = default_packages();

            session.record_problem_spec(spec);
            session.predict(scenario.inputs())?;
            session.optimize_load(capacity, &packages, criterion)?;
            session.plan_from_prediction(RiskLevel::from_label(&risk))?;
            let report = session.audit()?;

            if json {
                emit_json(&WalkthroughJson {
                    generated_at: Utc::now().to_rfc3339(),
                    case: label.as_deref(),
                    session: &session,
                    audit: &report,
                })?;
            } else {
                banner("AURELIA \u{2014} Decision Cockpit Walkthrough");
                if let Some(spec) = &session.problem_spec {
                    println!("{}", spec.to_markdown());
                    println!();
                }
                if let Some(prediction) = &session.ml_prediction {
                    print_prediction(prediction);
                }
                if let Some(recorded) = &session.or_solution {
                    print_selection(recorded, packages.len());
                }
                if let Some(comparison) = &session.hybrid_plan {
                    print_plan(comparison);
                }
                print_audit(&report);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` when set and non-empty, `info` otherwise.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

fn init_logging() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = CockpitConfig::from_env();
    log::debug!("config: {:?}", config);

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    fn case_args(catalog: &str, hard: &[&str], soft: &[&str]) -> CaseArgs {
        CaseArgs {
            catalog: catalog.to_string(),
            case: None,
            hard: hard.iter().map(|s| s.to_string()).collect(),
            soft: soft.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn rust_log_can_raise_pipeline_verbosity() {
        let filter = log_filter(Some("aurelia_pipeline=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter(Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn soft_flags_reach_the_problem_card() {
        let catalog = format!("{}/../cases/catalog.yml", env!("CARGO_MANIFEST_DIR"));
        let (label, spec) = load_case_spec(&case_args(&catalog, &[], &["minimize co2"])).unwrap();
        assert!(label.is_some());
        assert_eq!(spec.soft_constraints.len(), 1);
        assert!(spec.to_markdown().contains("- Minimize CO2"));
    }

    #[test]
    fn unknown_constraint_flag_is_an_error() {
        let catalog = format!("{}/../cases/catalog.yml", env!("CARGO_MANIFEST_DIR"));
        assert!(load_case_spec(&case_args(&catalog, &["Teleportation"], &[])).is_err());
    }

    #[test]
    fn plan_command_rejects_nan_rain() {
        let cli = Cli::parse_from(["aurelia-cockpit", "plan", "--rain", "NaN", "--json"]);
        let err = run(cli, CockpitConfig::default()).unwrap_err();
        assert!(matches!(err, CockpitError::InvalidParameter { .. }));
    }
}
