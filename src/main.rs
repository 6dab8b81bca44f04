use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use bopodrill::drill;
use bopodrill::store::{self, settings, stats, student, StudentProfile, Theme};

/// bopodrill - mastery drill for single bopomofo phonetic symbols
#[derive(Parser)]
#[command(name = "bopodrill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mastery-gated bopomofo drill with explainable trace grading", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default settings
    Init,

    /// Show settings, student profile and cumulative stats
    Status,

    /// Learn mode: show and speak a symbol, optionally grade a trace
    Learn {
        /// Symbol to practice (defaults to the first enabled symbol)
        symbol: Option<String>,
        /// Traced ink raster (320x320 binary PPM) to grade
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Grade a traced raster against a symbol's reference mask
    Grade {
        /// Target symbol
        symbol: String,
        /// Traced ink raster (320x320 binary PPM)
        trace: PathBuf,
    },

    /// Run the mastery checkpoint quiz
    Checkpoint,

    /// Set the student identity used in reported results
    Student {
        /// Seat number or code (required before a checkpoint can start)
        #[arg(long)]
        id: Option<String>,
        /// Student name (optional)
        #[arg(long)]
        name: Option<String>,
    },

    /// Adjust teacher settings
    Settings {
        /// Questions per level before it can be evaluated (1-100)
        #[arg(long)]
        required_questions: Option<u32>,
        /// Accuracy percent required to pass a level (1-100)
        #[arg(long)]
        required_accuracy: Option<u32>,
        /// Replace the enabled symbol set (repeatable)
        #[arg(long = "enable")]
        enable: Vec<String>,
        /// Enable the full catalog
        #[arg(long)]
        all: bool,
        /// Result collection endpoint URL (empty string clears it)
        #[arg(long)]
        endpoint: Option<String>,
        /// Speak the symbol automatically when a question opens
        #[arg(long)]
        auto_speak: Option<bool>,
        /// Lock the choice after a pick until the next question
        #[arg(long)]
        lock_after_pick: Option<bool>,
        /// Display theme preference: light or dark
        #[arg(long)]
        theme: Option<String>,
    },

    /// Show cumulative local stats
    Stats {
        /// Clear the local record
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let dir = store::data_dir()?;

    match cli.command {
        Commands::Init => {
            store::init(&dir)?;
            println!("Initialized at {:?}", dir);
        }
        Commands::Status => {
            show_status(&dir)?;
        }
        Commands::Learn { symbol, trace } => {
            drill::run_learn(&dir, symbol, trace.as_deref())?;
        }
        Commands::Grade { symbol, trace } => {
            let verdict = drill::grade_trace_file(&symbol, &trace);
            println!(
                "{}: score {} -> {}",
                symbol,
                verdict.score,
                if verdict.passed { "通過" } else { "未通過" }
            );
        }
        Commands::Checkpoint => {
            drill::run_checkpoint(&dir).await?;
        }
        Commands::Student { id, name } => {
            let current = student::load(&dir);
            let updated = StudentProfile {
                student_id: id.unwrap_or(current.student_id),
                student_name: name.unwrap_or(current.student_name),
            }
            .normalized();
            student::save(&dir, &updated)?;
            println!(
                "Student: id={:?} name={:?}{}",
                updated.student_id,
                updated.student_name,
                if updated.is_ready() { "" } else { " (id still required)" }
            );
        }
        Commands::Settings {
            required_questions,
            required_accuracy,
            enable,
            all,
            endpoint,
            auto_speak,
            lock_after_pick,
            theme,
        } => {
            let mut cfg = settings::load(&dir);
            if let Some(n) = required_questions {
                cfg.required_questions = n;
            }
            if let Some(n) = required_accuracy {
                cfg.required_accuracy = n;
            }
            if all {
                cfg.enabled_symbols = bopodrill::catalog::all_symbols();
            } else if !enable.is_empty() {
                cfg.enabled_symbols = enable;
            }
            if let Some(url) = endpoint {
                cfg.result_endpoint = if url.trim().is_empty() { None } else { Some(url) };
            }
            if let Some(v) = auto_speak {
                cfg.auto_speak_on_question = v;
            }
            if let Some(v) = lock_after_pick {
                cfg.lock_after_pick = v;
            }
            let cfg = cfg.validated();
            settings::save(&dir, &cfg)?;

            if let Some(t) = theme {
                let theme = match t.as_str() {
                    "dark" => Theme::Dark,
                    _ => Theme::Light,
                };
                store::save_theme(&dir, theme)?;
            }
            print_settings(&cfg);
        }
        Commands::Stats { reset } => {
            if reset {
                stats::reset(&dir)?;
                println!("Local record cleared.");
            } else {
                let totals = stats::load(&dir);
                println!(
                    "答對 {} / 總題數 {} / 正確率 {}%",
                    totals.correct,
                    totals.total,
                    totals.accuracy_percent()
                );
            }
        }
    }

    Ok(())
}

fn show_status(dir: &std::path::Path) -> Result<()> {
    println!("bopodrill Status");
    println!("================");
    println!();
    println!("Data directory: {:?}", dir);

    if !dir.exists() {
        println!("Status: NOT INITIALIZED");
        println!("Run 'bopodrill init' first.");
        return Ok(());
    }

    let cfg = settings::load(dir);
    let profile = student::load(dir);
    let totals = stats::load(dir);

    println!("Device id: {}", store::device_id(dir)?);
    println!("Theme: {:?}", store::load_theme(dir));
    println!();
    print_settings(&cfg);
    println!();
    println!(
        "Student: {}",
        if profile.is_ready() {
            format!("{} {}", profile.student_id, profile.student_name)
        } else {
            "(not set: checkpoint start is disabled)".to_string()
        }
    );
    println!(
        "Local record: {} correct / {} total ({}%)",
        totals.correct,
        totals.total,
        totals.accuracy_percent()
    );
    Ok(())
}

fn print_settings(cfg: &settings::TeacherSettings) {
    println!(
        "Pass thresholds: {} questions at {}% accuracy",
        cfg.required_questions, cfg.required_accuracy
    );
    println!(
        "Enabled symbols ({}/{}): {}",
        cfg.enabled_symbols.len(),
        bopodrill::catalog::BOPOMOFO.len(),
        cfg.enabled_symbols.join(" ")
    );
    println!("Auto-speak on question: {}", cfg.auto_speak_on_question);
    println!("Lock after pick: {}", cfg.lock_after_pick);
    match cfg.endpoint() {
        Some(url) => println!("Result endpoint: {}", url),
        None => println!("Result endpoint: (unset, delivery skipped)"),
    }
}
