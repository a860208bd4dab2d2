use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use messageapi::application::errors::ConfigError;
use messageapi::application::services::MessageService;
use messageapi::domain::entities::{Message, MessageDraft};
use messageapi::infrastructure::config::Config;
use messageapi::infrastructure::ids::SequentialIdAllocator;
use messageapi::infrastructure::logging::{self, TracingSink};

#[derive(Parser)]
#[command(name = "messageapi")]
#[command(about = "Create and validate messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "messageapi.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a single message and print it as JSON
    Create {
        #[arg(short, long)]
        sender: String,
        #[arg(short, long)]
        receiver: String,
        #[arg(short = 'm', long)]
        content: Option<String>,
    },
    /// Create messages from a YAML list of drafts
    Batch {
        /// YAML file with a list of {sender, receiver, content}
        file: PathBuf,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    logging::init(&config.logging);

    match cli.command {
        Commands::Create { sender, receiver, content } => {
            let service = service(&config);
            match service.create(&sender, &receiver, content.as_deref()) {
                Ok(message) if print_message(&message) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            }
        }
        Commands::Batch { file } => run_batch(&config, &file),
        Commands::Version => {
            println!("messageapi v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(&cli.config),
    }
}

fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        Config::load(path)
    } else {
        Config::load_env()
    }
}

fn service(config: &Config) -> MessageService<SequentialIdAllocator, TracingSink> {
    MessageService::new(SequentialIdAllocator::starting_at(config.ids.first_id), TracingSink)
}

fn print_message(message: &Message) -> bool {
    match serde_json::to_string(message) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            tracing::error!("Failed to serialize message {}: {}", message.id(), e);
            false
        }
    }
}

fn run_batch(config: &Config, file: &Path) -> ExitCode {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let drafts: Vec<MessageDraft> = match serde_yaml::from_str(&content) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to parse {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let service = service(config);
    let mut created = 0usize;
    let mut rejected = 0usize;
    for result in service.create_batch(&drafts) {
        match result {
            Ok(message) if print_message(&message) => created += 1,
            _ => rejected += 1,
        }
    }

    tracing::info!("Batch done: {} created, {} rejected", created, rejected);
    if rejected == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_config(path: &Path) -> ExitCode {
    if path.exists() {
        tracing::warn!("{} already exists, not overwriting", path.display());
        return ExitCode::FAILURE;
    }
    let yaml = match Config::default().to_yaml() {
        Ok(y) => y,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match std::fs::write(path, yaml) {
        Ok(()) => {
            println!("Wrote default config to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}
