//! playstats CLI
//!
//! Engagement-level prediction for game players and a basketball metrics
//! explorer over season box-score stats.

use clap::{Args, Parser, Subcommand};
use playstats::features::RawPlayerProfile;
use playstats::{Config, Result};

#[derive(Parser)]
#[command(name = "playstats")]
#[command(about = "Player engagement prediction and basketball metrics explorer", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a player's engagement level
    Predict {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Download the classifier and label encoder if they are missing
    Fetch,
    /// Train the engagement classifier from a labelled CSV
    Train {
        /// Labelled engagement CSV
        data: String,
        /// Override number of epochs
        #[arg(long)]
        epochs: Option<usize>,
        /// Override learning rate
        #[arg(long)]
        lr: Option<f64>,
    },
    /// Basketball metrics explorer
    Stats {
        #[command(subcommand)]
        action: StatsCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Args)]
struct ProfileArgs {
    /// Age (10-60)
    #[arg(long, default_value_t = 25)]
    age: u32,
    /// Average play time per session in hours (0-20)
    #[arg(long, default_value_t = 5.0)]
    play_time: f32,
    /// In-game purchases (0 or 1)
    #[arg(long, default_value_t = 0)]
    purchases: u8,
    /// Game difficulty: Easy, Medium or Hard
    #[arg(long, default_value = "Easy")]
    difficulty: String,
    /// Sessions per week (1-30)
    #[arg(long, default_value_t = 5)]
    sessions: u32,
    /// Average session duration in minutes (10-300)
    #[arg(long, default_value_t = 90)]
    duration: u32,
    /// Player level (1-100)
    #[arg(long, default_value_t = 20)]
    level: u32,
    /// Achievements unlocked (0-100)
    #[arg(long, default_value_t = 10)]
    achievements: u32,
    /// Gender: Female or Male
    #[arg(long, default_value = "Female")]
    gender: String,
    /// Location: Europe, Other or USA
    #[arg(long, default_value = "USA")]
    location: String,
    /// Game genre: Action, RPG, Simulation, Sports or Strategy
    #[arg(long, default_value = "Action")]
    genre: String,
}

impl ProfileArgs {
    fn to_profile(&self) -> Result<RawPlayerProfile> {
        let profile = RawPlayerProfile {
            age: self.age,
            play_time_hours: self.play_time,
            in_game_purchases: self.purchases,
            difficulty: self.difficulty.parse()?,
            sessions_per_week: self.sessions,
            avg_session_minutes: self.duration,
            player_level: self.level,
            achievements_unlocked: self.achievements,
            gender: self.gender.parse()?,
            location: self.location.parse()?,
            genre: self.genre.parse()?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Args)]
struct SelectionArgs {
    /// Stats CSV (defaults to the configured path)
    #[arg(long)]
    csv: Option<String>,
    /// Team code or full name (repeatable, default: all teams)
    #[arg(long = "team")]
    teams: Vec<String>,
    /// Position (repeatable, default: all positions)
    #[arg(long = "pos")]
    positions: Vec<String>,
    /// X-axis metric, column name or label
    #[arg(long)]
    x: Option<String>,
    /// Y-axis metric, column name or label
    #[arg(long)]
    y: Option<String>,
    /// Output format
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum StatsCommands {
    /// Filtered players ranked by the y metric
    Table {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Only show the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Scatter series of x against y
    Scatter {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// List selectable metrics
    Metrics,
    /// List teams and positions present in the data
    Teams {
        /// Stats CSV (defaults to the configured path)
        #[arg(long)]
        csv: Option<String>,
    },
}

#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Predict { profile, format } => commands::predict(&config, &profile, format),
        Commands::Fetch => commands::fetch(&config),
        Commands::Train { data, epochs, lr } => commands::train(&config, &data, epochs, lr),
        Commands::Stats { action } => match action {
            StatsCommands::Table { selection, limit } => {
                commands::stats_table(&config, &selection, limit)
            }
            StatsCommands::Scatter { selection } => commands::stats_scatter(&config, &selection),
            StatsCommands::Metrics => commands::stats_metrics(),
            StatsCommands::Teams { csv } => commands::stats_teams(&config, csv),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use burn::backend::NdArray;
    use playstats::artifacts::{ArtifactLoader, HttpFetcher};
    use playstats::stats::derive::prepare;
    use playstats::stats::present::{available_positions, available_teams, chart_title};
    use playstats::stats::{
        load_csv, ranked_table, scatter_points, Metric, PlayerStatRow, Selection,
    };
    use std::path::Path;

    type MyBackend = NdArray<f32>;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        std::fs::create_dir_all("model")?;
        println!("Created data/ and model/ directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'playstats fetch' to download the classifier artifacts");
        println!("  3. Run 'playstats predict --age 30 --difficulty Hard' to predict");
        println!("  4. Run 'playstats stats table' to explore player metrics");

        Ok(())
    }

    fn loader(config: &Config) -> Result<ArtifactLoader<HttpFetcher>> {
        let fetcher = HttpFetcher::new(&config.artifacts.url_template)?;
        Ok(ArtifactLoader::new(fetcher, config.artifacts.clone()))
    }

    pub fn fetch(config: &Config) -> Result<()> {
        let loader = loader(config)?;
        let fetched = loader.ensure_present()?;
        println!("Downloaded {} artifact(s)", fetched);
        println!("  Model:   {}", loader.model_file().display());
        println!("  Encoder: {}", loader.encoder_file().display());
        Ok(())
    }

    pub fn predict(config: &Config, args: &ProfileArgs, format: OutputFormat) -> Result<()> {
        use playstats::predict::inference::format_prediction;

        let profile = args.to_profile()?;

        let artifacts = loader(config)?.load::<MyBackend>(&config.classifier, Default::default())?;
        let predictor = artifacts.into_predictor();
        let prediction = predictor.predict(&profile)?;

        match format {
            OutputFormat::Table => {
                print!("{}", format_prediction(&prediction, &profile));
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "profile": profile,
                    "input_shape": [prediction.shape.0, prediction.shape.1],
                    "class_index": prediction.class_index,
                    "engagement_level": prediction.label,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => {
                println!("engagement_level,class_index,rows,features");
                println!(
                    "{},{},{},{}",
                    prediction.label, prediction.class_index, prediction.shape.0, prediction.shape.1
                );
            }
        }

        Ok(())
    }

    pub fn train(
        config: &Config,
        data: &str,
        epochs: Option<usize>,
        lr: Option<f64>,
    ) -> Result<()> {
        use burn::backend::Autodiff;
        use playstats::model::EngagementNetConfig;
        use playstats::training::{dataset, EngagementTrainer};

        type MyAutodiffBackend = Autodiff<MyBackend>;

        let mut training = config.training.clone();
        if let Some(e) = epochs {
            training.epochs = e;
        }
        if let Some(lr) = lr {
            training.learning_rate = lr;
        }

        println!("Loading training data from {}...", data);
        let (dataset, encoder) = dataset::load_csv(Path::new(data))?;
        println!("  {} rows, classes: {}", dataset.len(), encoder.classes().join(", "));

        let (train_set, val_set) = dataset.split(training.validation_fraction, training.seed);
        println!("  {} training / {} validation rows", train_set.len(), val_set.len());

        let net_config = EngagementNetConfig::from_config(&config.classifier, encoder.len());
        let trainer = EngagementTrainer::<MyAutodiffBackend>::new(
            Default::default(),
            &net_config,
            training.learning_rate,
        );

        println!("\nStarting training...\n");
        let (model, history) = trainer.train(&train_set, &val_set, &training)?;

        if let Some(parent) = Path::new(&config.artifacts.model_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        model.save(&config.artifacts.model_path)?;
        encoder.save(Path::new(&config.artifacts.encoder_path))?;

        println!("\nTraining complete!");
        println!("  Best epoch:     {}", history.best_epoch + 1);
        println!("  Best val acc:   {:.1}%", history.best_val_accuracy * 100.0);
        println!("  Model:          {}.mpk", config.artifacts.model_path);
        println!("  Label encoder:  {}", config.artifacts.encoder_path);

        Ok(())
    }

    fn load_rows(config: &Config, csv: Option<&str>) -> Result<Vec<PlayerStatRow>> {
        let path = csv.unwrap_or(&config.stats.csv_path);
        let rows = load_csv(Path::new(path))?;
        Ok(prepare(rows, config.stats.min_minutes))
    }

    fn selection(
        config: &Config,
        rows: &[PlayerStatRow],
        args: &SelectionArgs,
    ) -> Result<Selection> {
        let x = args.x.as_deref().unwrap_or(&config.stats.default_x);
        let y = args.y.as_deref().unwrap_or(&config.stats.default_y);
        Selection::from_args(rows, &args.teams, &args.positions, Some(x), Some(y))
    }

    fn fmt_value(value: Option<f64>) -> String {
        value.map(|v| format!("{:.3}", v)).unwrap_or_default()
    }

    pub fn stats_table(config: &Config, args: &SelectionArgs, limit: Option<usize>) -> Result<()> {
        let rows = load_rows(config, args.csv.as_deref())?;
        let selection = selection(config, &rows, args)?;
        let mut table = ranked_table(&rows, &selection);
        if let Some(limit) = limit {
            table.truncate(limit);
        }

        let header = [
            "Player".to_string(),
            "Team".to_string(),
            "Position".to_string(),
            selection.x.label().to_string(),
            selection.y.label().to_string(),
        ];

        match args.format {
            OutputFormat::Table => {
                if table.is_empty() {
                    println!("(no players match the selection)");
                    return Ok(());
                }
                let mut builder = tabled::builder::Builder::default();
                builder.push_record(header);
                for row in &table {
                    builder.push_record([
                        row.player.clone(),
                        row.team.clone(),
                        row.pos.clone(),
                        fmt_value(row.x),
                        fmt_value(row.y),
                    ]);
                }
                println!("{}", chart_title(&selection));
                println!("{}", builder.build());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&table)?);
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                writer.write_record(&header)?;
                for row in &table {
                    writer.write_record([
                        row.player.as_str(),
                        row.team.as_str(),
                        row.pos.as_str(),
                        fmt_value(row.x).as_str(),
                        fmt_value(row.y).as_str(),
                    ])?;
                }
                writer.flush()?;
            }
        }

        Ok(())
    }

    pub fn stats_scatter(config: &Config, args: &SelectionArgs) -> Result<()> {
        let rows = load_rows(config, args.csv.as_deref())?;
        let selection = selection(config, &rows, args)?;
        let points = scatter_points(&rows, &selection);
        log::info!("{}: {} points", chart_title(&selection), points.len());

        match args.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "title": chart_title(&selection),
                    "x": { "column": selection.x.column(), "label": selection.x.label() },
                    "y": { "column": selection.y.column(), "label": selection.y.label() },
                    "points": points,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv | OutputFormat::Table => {
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                writer.write_record([
                    "player",
                    "team",
                    "pos",
                    selection.x.column(),
                    selection.y.column(),
                ])?;
                for p in &points {
                    writer.write_record([
                        p.player.clone(),
                        p.team.clone(),
                        p.pos.clone(),
                        p.x.to_string(),
                        p.y.to_string(),
                    ])?;
                }
                writer.flush()?;
            }
        }

        Ok(())
    }

    pub fn stats_metrics() -> Result<()> {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Column", "Label"]);
        for metric in Metric::ALL {
            builder.push_record([metric.column(), metric.label()]);
        }
        println!("{}", builder.build());
        Ok(())
    }

    pub fn stats_teams(config: &Config, csv: Option<String>) -> Result<()> {
        let rows = load_rows(config, csv.as_deref())?;

        println!("Teams");
        println!("───────────────────────────────");
        for team in available_teams(&rows) {
            println!("  {}", team);
        }
        println!("\nPositions");
        println!("───────────────────────────────");
        for pos in available_positions(&rows) {
            println!("  {}", pos);
        }

        Ok(())
    }
}
