//! FlutterFeista CLI
//!
//! Predicts the food category for an event from trained encoder, classifier
//! and label artifacts.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use flutterfeista::data::record::{
    AGE_GROUPS, CUISINE_PREFERENCES, EVENT_TYPES, FOOD_TYPES, LOCATION_TYPES, SEASONS,
    SERVICE_STYLES, TIMES_OF_DAY,
};
use flutterfeista::{Config, EventRecord, Result};

#[derive(Parser)]
#[command(name = "feista")]
#[command(about = "Event food category prediction", long_about = None)]
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
    /// Predict the food category for one event
    Predict {
        #[command(flatten)]
        event: EventArgs,
        /// Read the event from a JSON file instead of flags
        #[arg(long)]
        record: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the trained columns, vocabulary and labels
    Schema,
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model information
    Info,
    /// Check that the artifacts were trained together
    Validate,
}

/// Event details, mirroring the event form
#[derive(clap::Args)]
struct EventArgs {
    #[arg(long, default_value = "Wedding", value_parser = PossibleValuesParser::new(EVENT_TYPES.iter().copied()))]
    event_type: String,
    /// Number of guests
    #[arg(long, default_value = "50")]
    guests: u32,
    /// Total budget
    #[arg(long, default_value = "100000")]
    budget: f64,
    /// Event duration in hours
    #[arg(long, default_value = "4")]
    duration: f64,
    #[arg(long, default_value = "Indoor", value_parser = PossibleValuesParser::new(LOCATION_TYPES.iter().copied()))]
    location: String,
    #[arg(long, default_value = "Summer", value_parser = PossibleValuesParser::new(SEASONS.iter().copied()))]
    season: String,
    #[arg(long, default_value = "Morning", value_parser = PossibleValuesParser::new(TIMES_OF_DAY.iter().copied()))]
    time_of_day: String,
    #[arg(long, default_value = "Veg", value_parser = PossibleValuesParser::new(FOOD_TYPES.iter().copied()))]
    food_type: String,
    #[arg(long, default_value = "Indian", value_parser = PossibleValuesParser::new(CUISINE_PREFERENCES.iter().copied()))]
    cuisine: String,
    #[arg(long, default_value = "Children", value_parser = PossibleValuesParser::new(AGE_GROUPS.iter().copied()))]
    age_group: String,
    #[arg(long, default_value = "Buffet", value_parser = PossibleValuesParser::new(SERVICE_STYLES.iter().copied()))]
    service_style: String,
    /// Any special requests, e.g. "Live counters"
    #[arg(long, default_value = "")]
    special_requests: String,
}

impl EventArgs {
    fn into_record(self) -> EventRecord {
        EventRecord {
            event_type: self.event_type,
            location_type: self.location,
            season: self.season,
            time_of_day: self.time_of_day,
            food_type: self.food_type,
            cuisine_preference: self.cuisine,
            age_group_of_guests: self.age_group,
            service_style: self.service_style,
            special_requests: Some(self.special_requests),
            guests: self.guests,
            budget: self.budget,
            event_duration: self.duration,
        }
    }
}

#[derive(Clone, Debug)]
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
        Commands::Predict {
            event,
            record,
            format,
        } => commands::predict(&config, event, record, format),
        Commands::Schema => commands::schema(&config),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
            ModelCommands::Validate => commands::model_validate(&config),
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
    use flutterfeista::artifacts::{ArtifactBundle, ArtifactContext};
    use flutterfeista::data::record::{documented_options, CATEGORICAL_COLUMNS};
    use flutterfeista::predict::{format_prediction, Celebration, RequestHandler};
    use std::sync::Arc;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("model")?;
        println!("Created model/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!(
            "  2. Place the artifact bundle at {} and weights at {}.mpk",
            config.artifacts.bundle_path, config.artifacts.weights_path
        );
        println!("  3. Run 'feista model validate' to check the artifacts");
        println!("  4. Run 'feista predict --event-type Wedding --guests 200' to make a prediction");

        Ok(())
    }

    pub fn predict(
        config: &Config,
        event: EventArgs,
        record_path: Option<String>,
        format: OutputFormat,
    ) -> Result<()> {
        let record = match record_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                EventRecord::from_json(&serde_json::from_str(&content)?)?
            }
            None => event.into_record(),
        };

        let ctx = Arc::new(ArtifactContext::load(&config.artifacts)?);
        let handler = RequestHandler::with_config(ctx, config);
        let prediction = handler.handle(&record)?;

        match format {
            OutputFormat::Table => {
                print!("{}", format_prediction(&prediction, &record));
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_value(&prediction)?;
                json["celebration"] = format!("{:?}", Celebration::for_label(&prediction.label)).into();
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => {
                println!("event_type,guests,budget,duration,label");
                println!(
                    "{},{},{:.0},{},{}",
                    record.event_type,
                    record.guests,
                    record.budget,
                    record.event_duration,
                    prediction.label
                );
            }
        }

        Ok(())
    }

    pub fn schema(config: &Config) -> Result<()> {
        let bundle = ArtifactBundle::load(&config.artifacts.bundle_path)?;
        let schema = &bundle.schema;

        println!("Categorical columns");
        println!("───────────────────────────────");
        for column in &schema.categorical_columns {
            let vocab = schema.vocabulary(column).unwrap_or_default();
            println!("  {:<18} {}", column, vocab.join(", "));
        }

        println!("\nNumerical columns");
        println!("───────────────────────────────");
        println!("  {}", schema.numerical_columns.join(", "));

        println!("\nExpected features: {}", schema.feature_names.len());
        println!("Labels:            {}", bundle.labels.join(", "));

        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let bundle = ArtifactBundle::load(&config.artifacts.bundle_path)?;
        let model = bundle.classifier_config();

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Bundle:         {}", config.artifacts.bundle_path);
        println!("  Weights:        {}.mpk", config.artifacts.weights_path);
        println!("  Input features: {}", model.input_dim);
        println!("  Hidden layers:  {:?}", model.hidden_dims);
        println!("  Classes:        {}", model.num_classes);

        Ok(())
    }

    pub fn model_validate(config: &Config) -> Result<()> {
        let ctx = ArtifactContext::load(&config.artifacts)?;
        println!("Artifacts are consistent");

        let unreachable = ctx.unreachable_features();
        if !unreachable.is_empty() {
            println!("\nExpected features never produced (always 0):");
            for name in unreachable {
                println!("  {}", name);
            }
        }

        let ignored = ctx.ignored_features();
        if !ignored.is_empty() {
            println!("\nEncoder features the model ignores:");
            for name in ignored {
                println!("  {}", name);
            }
        }

        // Form options the trained encoder would reject
        for column in CATEGORICAL_COLUMNS {
            let Some(options) = documented_options(column) else {
                continue;
            };
            let rejected: Vec<&str> = options
                .iter()
                .copied()
                .filter(|option| !ctx.schema().is_known(column, option))
                .collect();
            if !rejected.is_empty() {
                println!("\n{} options outside the vocabulary: {}", column, rejected.join(", "));
            }
        }

        let sentinel = &config.encoding.blank_sentinel;
        for column in &config.encoding.free_text_columns {
            if !ctx.schema().is_known(column, sentinel) {
                println!("\nWarning: {} has no '{}' category for blank input", column, sentinel);
            }
        }

        Ok(())
    }
}
