use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use position_planner::config::Config;
use position_planner::models::{PlanInput, Side, Stage};
use position_planner::{PlanSummary, PositionPlanner};

const USAGE: &str = "usage: position-planner <SIDE> <LIMIT> <TP> <SL> <LEVERAGE> <ACCOUNT_SIZE> [LIMIT1] [LIMIT2] [--fee <x>] [--json]
       position-planner --input <plan.json> [--json]";

struct Args {
    input: PlanInput,
    json: bool,
}

fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    let planner = PositionPlanner::new(cfg.planner);
    info!(
        side = %args.input.side,
        levels = args.input.active_levels().len(),
        "computing plan"
    );

    let stages = compute(&planner, &args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stages)?);
    } else {
        print_plan(args.input.side, &stages);
    }

    Ok(())
}

fn compute(planner: &PositionPlanner, input: &PlanInput) -> Result<Vec<Stage>> {
    planner
        .calculate(input)
        .context("position plan rejected")
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut json = false;
    let mut fee: Option<f64> = None;
    let mut input_path: Option<String> = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--fee" => {
                let v = iter.next().context("--fee needs a value")?;
                fee = Some(parse_num("fee", v)?);
            }
            "--input" => {
                input_path = Some(iter.next().context("--input needs a path")?.clone());
            }
            "-h" | "--help" => bail!("{USAGE}"),
            other => positional.push(other),
        }
    }

    let mut input = match input_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<PlanInput>(&text)
                .with_context(|| format!("parsing {path}"))?
        }
        None => parse_positional(&positional)?,
    };

    if fee.is_some() {
        input.overrides.fee_per_unit = fee;
    }

    Ok(Args { input, json })
}

fn parse_positional(args: &[&str]) -> Result<PlanInput> {
    if args.len() < 6 || args.len() > 8 {
        bail!("{USAGE}");
    }

    let side: Side = args[0].parse()?;
    let mut input = PlanInput::new(
        side,
        parse_num("limit", args[1])?,
        parse_num("tp", args[2])?,
        parse_num("sl", args[3])?,
        parse_num("leverage", args[4])?,
        parse_num("account size", args[5])?,
    );
    if let Some(v) = args.get(6) {
        input.limit1 = Some(parse_num("limit1", v)?);
    }
    if let Some(v) = args.get(7) {
        input.limit2 = Some(parse_num("limit2", v)?);
    }

    Ok(input)
}

fn parse_num(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("{name}: '{raw}' is not a number"))
}

fn print_plan(side: Side, stages: &[Stage]) {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║          POSITION PLAN — {:<5}                           ║", side.as_str());
    println!("╚══════════════════════════════════════════════════════════╝");

    for (i, s) in stages.iter().enumerate() {
        println!();
        println!("Stage {}", i + 1);
        println!("  Price:      {}", s.price);
        println!("  Qty:        {}", s.qty);
        println!("  TP:         {}", s.take_profit);
        println!("  TP Amount:  {}", s.take_profit_amount);
        println!("  TP %:       {}%", s.take_profit_percent);
        println!("  SL:         {}", s.stop_loss);
        println!("  Leverage:   {}x", s.leverage);
    }

    if let Some(summary) = PlanSummary::from_stages(side, stages) {
        println!();
        println!("{}", "=".repeat(60));
        println!("  Total qty:      {}", summary.total_qty);
        println!("  Average entry:  {}", summary.average_entry);
        println!("  Risk at stop:   {}", summary.risk_at_stop);
        println!(
            "  Final TP:       {} (+{})",
            summary.final_take_profit, summary.final_target_amount
        );
        println!("{}", "=".repeat(60));
    }
}
