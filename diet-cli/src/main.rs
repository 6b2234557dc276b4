use anyhow::{Context, Result, bail};
use chrono::{Local, Timelike};
use clap::{Args, Parser, Subcommand, ValueEnum};
use diet_core::{
    ActivityLevel, BodyMetrics, ExerciseEntry, FoodEntry, LogEntry, MealSlot, PlanLabel, Sex,
    UserProfile, group_by_meal, healthy_weight_range, summarize, weekly_report,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod render;
mod store;

/// CLI enums mirror diet-core (derive for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
enum SexFlag {
    Male,
    Female,
}

impl From<SexFlag> for Sex {
    fn from(s: SexFlag) -> Self {
        match s {
            SexFlag::Male => Sex::Male,
            SexFlag::Female => Sex::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ActivityFlag {
    Low,
    Moderate,
    High,
    Extreme,
}

impl From<ActivityFlag> for ActivityLevel {
    fn from(a: ActivityFlag) -> Self {
        match a {
            ActivityFlag::Low => ActivityLevel::Low,
            ActivityFlag::Moderate => ActivityLevel::Moderate,
            ActivityFlag::High => ActivityLevel::High,
            ActivityFlag::Extreme => ActivityLevel::Extreme,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlanFlag {
    Gentle,
    Recommended,
    Fast,
}

impl From<PlanFlag> for PlanLabel {
    fn from(p: PlanFlag) -> Self {
        match p {
            PlanFlag::Gentle => PlanLabel::Gentle,
            PlanFlag::Recommended => PlanLabel::Recommended,
            PlanFlag::Fast => PlanLabel::Fast,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "diet-cli",
    about = "Daily calorie, macro and water targets with weight-change plans.",
    version
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute energy targets and the three weight-change plans
    Plan(PlanArgs),
    /// Summarize a day's food and exercise log against the profile targets
    Day(DayArgs),
    /// Add a food entry to a day log
    AddFood(AddFoodArgs),
    /// Calories burnt by an exercise, optionally appended to a day log
    Burn(BurnArgs),
    /// Record a new weight or activity level and recompute targets
    UpdateWeight(UpdateArgs),
    /// Weekly calorie report over the last seven day logs
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long, value_enum)]
    sex: Option<SexFlag>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Height in cm
    #[arg(long)]
    height: Option<f64>,

    /// Current weight in kg
    #[arg(long)]
    weight: Option<f64>,

    #[arg(long, value_enum)]
    activity: Option<ActivityFlag>,

    /// Target weight in kg
    #[arg(long)]
    target_weight: Option<f64>,

    /// Plan to select (default: recommended)
    #[arg(long, value_enum)]
    plan: Option<PlanFlag>,

    #[arg(long)]
    name: Option<String>,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the resulting profile to JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DayArgs {
    #[arg(long)]
    profile: PathBuf,

    /// Day log JSON
    #[arg(long)]
    log: PathBuf,

    /// Override the logged water intake (ml)
    #[arg(long)]
    water_ml: Option<u32>,
}

#[derive(Args, Debug)]
struct AddFoodArgs {
    #[arg(long)]
    log: PathBuf,

    #[arg(long)]
    name: String,

    #[arg(long, value_parser = parse_amount)]
    calories: f64,

    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    protein: f64,

    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    carb: f64,

    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    fat: f64,

    /// Meal slot; defaults to the slot for the current hour
    #[arg(long)]
    meal: Option<String>,

    #[arg(long)]
    portion: Option<String>,
}

#[derive(Args, Debug)]
struct BurnArgs {
    /// Metabolic equivalent of the activity
    #[arg(long, value_parser = parse_amount)]
    met: f64,

    #[arg(long)]
    minutes: u32,

    /// Body weight in kg (or taken from --profile)
    #[arg(long)]
    weight: Option<f64>,

    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long, default_value = "Exercise")]
    name: String,

    /// Append the exercise to this day log
    #[arg(long)]
    append: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(long)]
    profile: PathBuf,

    /// New weight in kg
    #[arg(long)]
    weight: Option<f64>,

    #[arg(long, value_enum)]
    activity: Option<ActivityFlag>,

    #[arg(long)]
    target_weight: Option<f64>,

    #[arg(long, value_enum)]
    plan: Option<PlanFlag>,

    /// Write the updated profile here instead of overwriting --profile
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[arg(long)]
    profile: PathBuf,

    /// Day log JSON, oldest first; repeat for each day (last 7 are used)
    #[arg(long = "log", required = true)]
    logs: Vec<PathBuf>,
}

/// Logged amounts must be finite and not negative.
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a finite number >= 0, got {s}"))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Merge CLI flags over a stored profile (CLI wins) and run onboarding.
fn resolve_profile(args: &PlanArgs, stored: Option<&UserProfile>) -> Result<UserProfile> {
    macro_rules! take {
        ($flag:expr, |$p:ident| $stored:expr, $what:literal) => {
            match ($flag, stored) {
                (Some(v), _) => v,
                (None, Some($p)) => $stored,
                (None, None) => bail!("--{} is required without --profile", $what),
            }
        };
    }

    let sex = take!(args.sex.map(Sex::from), |p| p.metrics.sex(), "sex");
    let age = take!(args.age, |p| p.metrics.age_years(), "age");
    let height = take!(args.height, |p| p.metrics.height_cm(), "height");
    let weight = take!(args.weight, |p| p.metrics.weight_kg(), "weight");
    let target = take!(args.target_weight, |p| p.target_weight_kg, "target-weight");
    let activity = args
        .activity
        .map(ActivityLevel::from)
        .or(stored.map(|p| p.metrics.activity_level()))
        .unwrap_or_default();
    let plan = args.plan.map(PlanLabel::from).or(stored.and_then(|p| p.plan));
    let name = args.name.clone().or(stored.and_then(|p| p.name.clone()));

    let metrics = BodyMetrics::new(sex, age, height, weight, activity)?;
    Ok(UserProfile::onboard(name, metrics, target, plan)?)
}

fn cmd_plan(args: PlanArgs) -> Result<()> {
    let stored = args
        .profile
        .as_deref()
        .map(store::load_profile)
        .transpose()?;
    let profile = resolve_profile(&args, stored.as_ref())?;

    let energy = profile.energy()?;
    let range = healthy_weight_range(profile.metrics.height_cm())?;
    let plans = profile.plans()?;
    let selected = profile.selected_plan()?;
    if let Some(w) = selected.warning {
        warn!(plan = %selected.label, "selected plan {w}");
    }
    info!(tdee = energy.tdee, plan = %selected.label, "plans generated");

    println!("\n=== Energy ===");
    println!("{}", render::energy_table(&profile, &energy, &range));

    println!("\n=== Plans ===");
    println!("{}", render::plans_table(&plans, selected.label));

    println!("\n=== Projection ({} plan) ===", selected.label);
    println!("{}", render::trajectory_table(&profile.trajectory()?));

    println!("\n=== Goal ===");
    println!("{}", render::goal_line(&profile.goal_progress()?));

    let targets = profile.daily_targets()?;
    println!("\n=== Daily targets ===");
    println!("- Calories: {} kcal", targets.calories);
    println!(
        "- Water:    {:.1} L ({} glasses)",
        profile.water_target_liters,
        targets.water_ml.div_ceil(diet_core::GLASS_ML)
    );
    println!("{}", render::macro_targets_table(&targets.macros));

    if let Some(path) = &args.save_profile {
        store::save_profile(path, &profile)?;
        println!("Profile saved to {}", path.display());
    }
    Ok(())
}

fn cmd_day(args: DayArgs) -> Result<()> {
    let profile = store::load_profile(&args.profile)?;
    let mut log = store::load_day_log(&args.log)?;
    if let Some(ml) = args.water_ml {
        log.water_ml = ml;
    }

    let targets = profile.daily_targets()?;
    let summary = summarize(&log, &targets)?;
    debug!(entries = log.entries.len(), net = summary.net_calories, "day summarized");
    if summary.remaining_calories < 0.0 {
        info!(over = -summary.remaining_calories, "over the daily calorie target");
    }

    println!("\n=== Summary ===");
    println!("{}", render::summary_table(&summary));

    let groups = group_by_meal(&log.entries);
    println!("\n=== Log ===");
    println!("{}", render::meals_table(&groups));
    for meal in summary.meals.iter().filter(|m| m.entries > 0) {
        println!("- {:<10} {}", meal.slot.to_string(), render::fmt_kcal(meal.calories));
    }
    Ok(())
}

fn cmd_add_food(args: AddFoodArgs) -> Result<()> {
    let slot = match args.meal.as_deref() {
        Some(name) => MealSlot::parse_lenient(name),
        None => MealSlot::for_hour(Local::now().hour()),
    };
    let food = FoodEntry {
        name: args.name.clone(),
        calories: args.calories,
        protein_g: args.protein,
        carb_g: args.carb,
        fat_g: args.fat,
        meal_slot: Some(slot.to_string().to_lowercase()),
        portion: args.portion,
    };
    food.validate()?;
    let mut log = store::load_day_log_or_default(&args.log)?;
    log.entries.push(LogEntry::Food(food));
    store::save_day_log(&args.log, &log)?;
    println!("Logged {} ({}) under {}", args.name, render::fmt_kcal(args.calories), slot);
    Ok(())
}

fn cmd_burn(args: BurnArgs) -> Result<()> {
    let weight = match (args.weight, &args.profile) {
        (Some(kg), _) => kg,
        (None, Some(path)) => store::load_profile(path)?.metrics.weight_kg(),
        (None, None) => bail!("pass --weight or --profile"),
    };
    let entry = ExerciseEntry::from_met(args.name, args.met, weight, args.minutes)?;
    println!(
        "{}: {} min at MET {} -> {}",
        entry.name,
        entry.duration_minutes,
        args.met,
        render::fmt_kcal(entry.calories_burnt)
    );

    if let Some(path) = &args.append {
        let mut log = store::load_day_log_or_default(path)?;
        log.entries.push(LogEntry::Exercise(entry));
        store::save_day_log(path, &log)?;
        println!("Appended to {}", path.display());
    }
    Ok(())
}

fn cmd_update(args: UpdateArgs) -> Result<()> {
    let before = store::load_profile(&args.profile)?;
    let mut after = before.clone();
    if let Some(kg) = args.weight {
        after = after.update_weight(kg).context("weight update rejected")?;
    }
    if let Some(a) = args.activity {
        after = after.update_activity_level(a.into())?;
    }
    if let Some(kg) = args.target_weight {
        after = after.update_target_weight(kg)?;
    }
    if let Some(p) = args.plan {
        after = after.select_plan(p.into())?;
    }
    if after == before {
        warn!("nothing to update");
    }

    println!(
        "Weight:   {} -> {}",
        render::fmt_kg(before.metrics.weight_kg()),
        render::fmt_kg(after.metrics.weight_kg())
    );
    println!(
        "Calories: {} -> {} kcal",
        before.daily_calorie_target, after.daily_calorie_target
    );
    println!(
        "Water:    {:.1} -> {:.1} L",
        before.water_target_liters, after.water_target_liters
    );
    println!("Goal:     {}", render::goal_line(&after.goal_progress()?));
    if after.at_target_weight() {
        println!("Target weight reached; calorie target set to maintenance.");
    }

    let out = args.output.as_ref().unwrap_or(&args.profile);
    store::save_profile(out, &after)?;
    println!("Profile saved to {}", out.display());
    Ok(())
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let profile = store::load_profile(&args.profile)?;
    let targets = profile.daily_targets()?;
    let summaries = args
        .logs
        .iter()
        .map(|path| -> Result<diet_core::DailySummary> {
            let log = store::load_day_log(path)?;
            summarize(&log, &targets).with_context(|| format!("in {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    if summaries.len() > diet_core::REPORT_DAYS {
        debug!(skipped = summaries.len() - diet_core::REPORT_DAYS, "older logs ignored");
    }

    let report = weekly_report(&summaries);
    info!(average = report.average_calories, streak = report.streak_days, "weekly report");

    println!("\n=== Last 7 days ===");
    println!("{}", render::weekly_table(&report, targets.calories));
    println!("- Average:  {} kcal/day", report.average_calories);
    println!("- Streak:   {} days", report.streak_days);
    println!("- Goal:     {}", render::goal_line(&profile.goal_progress()?));
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Plan(a) => cmd_plan(a),
        Command::Day(a) => cmd_day(a),
        Command::AddFood(a) => cmd_add_food(a),
        Command::Burn(a) => cmd_burn(a),
        Command::UpdateWeight(a) => cmd_update(a),
        Command::Report(a) => cmd_report(a),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn plan_args(argv: &[&str]) -> PlanArgs {
        let mut full = vec!["diet-cli", "plan"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Plan(a) => a,
            other => panic!("expected plan, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_from_flags() {
        let args = plan_args(&[
            "--sex", "male", "--age", "25", "--height", "180", "--weight", "80",
            "--target-weight", "70",
        ]);
        let p = resolve_profile(&args, None).unwrap();
        assert_eq!(p.metrics.activity_level(), ActivityLevel::Moderate);
        assert_eq!(p.daily_calorie_target, 1932);
    }

    #[test]
    fn test_missing_flag_without_profile() {
        let args = plan_args(&["--sex", "male", "--age", "25"]);
        let err = resolve_profile(&args, None).unwrap_err();
        assert!(err.to_string().contains("--height"));
    }

    #[test]
    fn test_add_food_rejects_bad_amounts() {
        let base = ["diet-cli", "add-food", "--log", "day.json", "--name", "Toast"];
        for bad in ["NaN", "inf", "-1", "abc"] {
            let mut argv = base.to_vec();
            argv.extend(["--calories", bad]);
            assert!(Cli::try_parse_from(argv).is_err(), "{bad} accepted");
        }

        let mut argv = base.to_vec();
        argv.extend(["--calories", "150", "--fat", "NaN"]);
        assert!(Cli::try_parse_from(argv).is_err());

        let mut argv = base.to_vec();
        argv.extend(["--calories", "150.5", "--protein", "0"]);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::AddFood(a) => assert_eq!(a.calories, 150.5),
            other => panic!("expected add-food, got {other:?}"),
        }
    }

    #[test]
    fn test_report_requires_a_log() {
        assert!(Cli::try_parse_from(["diet-cli", "report", "--profile", "p.json"]).is_err());
        let cli = Cli::try_parse_from([
            "diet-cli", "report", "--profile", "p.json", "--log", "a.json", "--log", "b.json",
        ])
        .unwrap();
        match cli.command {
            Command::Report(a) => assert_eq!(a.logs.len(), 2),
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_stored_profile() {
        let stored = resolve_profile(
            &plan_args(&[
                "--sex", "female", "--age", "30", "--height", "165", "--weight", "70",
                "--target-weight", "60", "--activity", "low", "--plan", "gentle",
            ]),
            None,
        )
        .unwrap();

        let p = resolve_profile(&plan_args(&["--weight", "68"]), Some(&stored)).unwrap();
        assert_eq!(p.metrics.weight_kg(), 68.0);
        assert_eq!(p.metrics.sex(), Sex::Female);
        assert_eq!(p.metrics.activity_level(), ActivityLevel::Low);
        assert_eq!(p.plan, Some(PlanLabel::Gentle));
        assert_eq!(p.target_weight_kg, 60.0);
    }
}
