use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use diet_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dietrack")]
#[command(about = "Personal diet and calorie budget tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored body profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Compute metrics for a one-off profile without storing it
    Metrics {
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Add a food or exercise entry to the journal
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// Show the calorie balance for a day
    ///
    /// The limit always comes from the current profile, so for past days it
    /// reflects today's weight and deficit, not the values in effect then.
    Summary {
        /// Day to summarize (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Export every logged day to CSV
    ///
    /// Every day's limit_kcal and remaining_kcal use the current profile's
    /// daily limit, not the profile as it was on that day.
    Export {
        /// Output path (default: <data-dir>/summaries.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the food catalog
    Foods,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create the profile, or update the given fields of an existing one
    Set {
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Show the stored profile and its metrics
    Show,
}

#[derive(clap::Args)]
struct BodyArgs {
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<f64>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Activity preset (sedentary, light, moderate, very, extreme) or multiplier
    #[arg(long, value_parser = parse_activity)]
    activity: Option<f64>,

    /// Daily calorie deficit in kcal
    #[arg(long, allow_hyphen_values = true)]
    deficit: Option<f64>,
}

#[derive(Subcommand)]
enum LogEntry {
    /// Log food eaten
    Food {
        /// Food name, looked up in the catalog unless --kcal is given
        #[arg(long)]
        name: String,

        /// Amount eaten in grams
        #[arg(long)]
        grams: f64,

        /// Energy density in kcal per 100 g
        #[arg(long)]
        kcal: Option<f64>,

        /// Day the entry counts towards (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Log an exercise; calories are estimated from the profile weight
    Exercise {
        #[arg(long)]
        name: String,

        /// Duration in minutes
        #[arg(long)]
        minutes: f64,

        /// Day the entry counts towards (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn parse_activity(s: &str) -> std::result::Result<f64, String> {
    if let Some(level) = ActivityLevel::from_name(s) {
        return Ok(level.multiplier());
    }
    s.parse::<f64>().map_err(|_| {
        format!(
            "'{}' is neither an activity preset (sedentary, light, moderate, very, extreme) nor a number",
            s
        )
    })
}

/// Paths inside the data directory
struct DataPaths {
    profile: PathBuf,
    journal: PathBuf,
    default_export: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            profile: data_dir.join("profile.json"),
            journal: data_dir.join("journal.jsonl"),
            default_export: data_dir.join("summaries.csv"),
        }
    }
}

fn main() -> ExitCode {
    diet_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Commands::Profile {
            action: ProfileAction::Set { body },
        } => cmd_profile_set(&paths, body, &config),
        Commands::Profile {
            action: ProfileAction::Show,
        } => cmd_profile_show(&paths),
        Commands::Metrics { body } => cmd_metrics(body, &config),
        Commands::Log { entry } => cmd_log(&paths, entry, &config),
        Commands::Summary { date } => cmd_summary(&paths, date),
        Commands::Export { out } => cmd_export(&paths, out),
        Commands::Foods => cmd_foods(&config),
    }
}

fn cmd_profile_set(paths: &DataPaths, body: BodyArgs, config: &Config) -> Result<()> {
    let profile = if UserProfile::load(&paths.profile)?.is_some() {
        UserProfile::update(&paths.profile, |p| {
            apply_body_args(p, &body);
            Ok(())
        })?
    } else {
        let profile = profile_from_args(&body, config)?;
        profile.validate()?;
        profile.save(&paths.profile)?;
        profile
    };

    println!("✓ Profile saved");
    display_profile(&profile);
    display_metrics(&compute_metrics(&profile));
    Ok(())
}

fn cmd_profile_show(paths: &DataPaths) -> Result<()> {
    let profile = UserProfile::load_required(&paths.profile)?;
    display_profile(&profile);
    display_metrics(&compute_metrics(&profile));
    Ok(())
}

fn cmd_metrics(body: BodyArgs, config: &Config) -> Result<()> {
    let profile = profile_from_args(&body, config)?;
    profile.validate()?;
    display_metrics(&compute_metrics(&profile));
    Ok(())
}

fn cmd_log(paths: &DataPaths, entry: LogEntry, config: &Config) -> Result<()> {
    let entry = match entry {
        LogEntry::Food {
            name,
            grams,
            kcal,
            date,
        } => {
            check_amount("grams", grams)?;
            let item = match kcal {
                Some(kcal_per_100g) => {
                    check_amount("kcal", kcal_per_100g)?;
                    FoodItem {
                        name,
                        kcal_per_100g,
                    }
                }
                None => build_catalog(config)?.require(&name)?.clone(),
            };
            JournalEntry::food(&item, grams, date.unwrap_or_else(today))
        }
        LogEntry::Exercise {
            name,
            minutes,
            date,
        } => {
            check_amount("minutes", minutes)?;
            let profile = UserProfile::load_required(&paths.profile)?;
            JournalEntry::exercise(&name, minutes, profile.weight, date.unwrap_or_else(today))
        }
    };

    let mut journal = JsonlJournal::new(&paths.journal);
    journal.append(&entry)?;

    match entry.kind {
        EntryKind::Food { calories, .. } => {
            println!("✓ Logged {} ({:.1} kcal) for {}", entry.name(), calories, entry.day)
        }
        EntryKind::Exercise {
            calories_burned, ..
        } => println!(
            "✓ Logged {} ({:.1} kcal burned) for {}",
            entry.name(),
            calories_burned,
            entry.day
        ),
    }
    Ok(())
}

fn cmd_summary(paths: &DataPaths, date: Option<NaiveDate>) -> Result<()> {
    let profile = UserProfile::load_required(&paths.profile)?;
    let metrics = compute_metrics(&profile);
    let day = date.unwrap_or_else(today);

    let entries = diet_core::journal::entries_for_day(&paths.journal, day)?;
    let summary = DailySummary::build(day, &entries, &metrics);

    println!("\nSummary for {}", summary.day);
    println!("─────────────────────────────────────────");
    for entry in &entries {
        match entry.kind {
            EntryKind::Food {
                grams, calories, ..
            } => println!("  + {} {:.0} g: {:.1} kcal", entry.name(), grams, calories),
            EntryKind::Exercise {
                duration_minutes,
                calories_burned,
                ..
            } => println!(
                "  - {} {:.0} min: {:.1} kcal",
                entry.name(),
                duration_minutes,
                calories_burned
            ),
        }
    }
    println!(
        "  Consumed:   {:.1} kcal ({} foods)",
        summary.consumed, summary.food_entries
    );
    println!(
        "  Burned:     {:.1} kcal ({} exercises)",
        summary.burned, summary.exercise_entries
    );
    println!("  Net:        {:.1} kcal", summary.net);
    println!("  Limit:      {:.1} kcal", summary.limit);
    println!("  Remaining:  {:.1} kcal", summary.remaining);

    if summary.over_budget() {
        println!("\n⚠ Over budget by {:.1} kcal", -summary.remaining);
    }
    Ok(())
}

fn cmd_export(paths: &DataPaths, out: Option<PathBuf>) -> Result<()> {
    let profile = UserProfile::load_required(&paths.profile)?;
    let metrics = compute_metrics(&profile);

    let entries = diet_core::journal::read_entries(&paths.journal)?;
    if entries.is_empty() {
        println!("No journal entries found - nothing to export.");
        return Ok(());
    }

    let summaries = summarize_days(&entries, &metrics);
    let out = out.unwrap_or_else(|| paths.default_export.clone());
    let count = export_summaries_csv(&summaries, &out)?;

    println!("✓ Exported {} days to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_foods(config: &Config) -> Result<()> {
    let catalog = build_catalog(config)?;
    for item in catalog.items() {
        println!("  {:<20} {:>6.0} kcal/100g", item.name, item.kcal_per_100g);
    }
    Ok(())
}

fn build_catalog(config: &Config) -> Result<FoodCatalog> {
    let errors = diet_core::catalog::validate_custom(&config.foods.custom);
    if !errors.is_empty() {
        eprintln!("Custom food errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Config("Invalid custom foods".into()));
    }
    Ok(FoodCatalog::with_custom(&config.foods.custom))
}

fn profile_from_args(body: &BodyArgs, config: &Config) -> Result<UserProfile> {
    let missing: Vec<&str> = [
        ("--gender", body.gender.is_none()),
        ("--age", body.age.is_none()),
        ("--height", body.height.is_none()),
        ("--weight", body.weight.is_none()),
    ]
    .iter()
    .filter(|(_, absent)| *absent)
    .map(|(flag, _)| *flag)
    .collect();

    match (body.gender, body.age, body.height, body.weight) {
        (Some(gender), Some(age), Some(height), Some(weight)) => Ok(UserProfile {
            gender: gender.into(),
            age,
            height,
            weight,
            activity_level: body.activity.unwrap_or(config.defaults.activity_level),
            calorie_deficit: body.deficit.unwrap_or(config.defaults.calorie_deficit),
        }),
        _ => Err(Error::InvalidProfile(format!(
            "missing required {}",
            missing.join(", ")
        ))),
    }
}

fn apply_body_args(profile: &mut UserProfile, body: &BodyArgs) {
    if let Some(gender) = body.gender {
        profile.gender = gender.into();
    }
    if let Some(age) = body.age {
        profile.age = age;
    }
    if let Some(height) = body.height {
        profile.height = height;
    }
    if let Some(weight) = body.weight {
        profile.weight = weight;
    }
    if let Some(activity) = body.activity {
        profile.activity_level = activity;
    }
    if let Some(deficit) = body.deficit {
        profile.calorie_deficit = deficit;
    }
}

fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Other(format!(
            "--{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn display_profile(profile: &UserProfile) {
    let gender = match profile.gender {
        Gender::Male => "male",
        Gender::Female => "female",
    };
    println!("\n  Gender:         {}", gender);
    println!("  Age:            {} years", profile.age);
    println!("  Height:         {:.1} cm", profile.height);
    println!("  Weight:         {:.1} kg", profile.weight);
    println!("  Activity:       x{}", profile.activity_level);
    println!("  Deficit:        {:.0} kcal/day", profile.calorie_deficit);
}

fn display_metrics(metrics: &CalculatedMetrics) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  METRICS");
    println!("╰─────────────────────────────────────────╯");
    println!("  BMI:            {:.1} ({})", metrics.bmi, metrics.bmi_category);
    println!("  BMR:            {:.1} kcal/day", metrics.bmr);
    println!("  TDEE:           {:.1} kcal/day", metrics.tdee);
    println!("  Daily limit:    {:.1} kcal/day", metrics.daily_calorie_limit);
    println!();
}
