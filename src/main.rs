use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wellcoach::score::{aggregate, ScoreInput};
use wellcoach::state::StateStore;
use wellcoach::timing::{Phase, TimingEditor};
use wellcoach::{output, verbose};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_REJECTED: i32 = 5;
const EXIT_STATE: i32 = 6;
const EXIT_OUTPUT: i32 = 7;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the wellness score from sub-scores
    Score {
        /// Sleep sub-score (0-100)
        #[arg(long, allow_negative_numbers = true)]
        sleep: f64,
        /// Nutrition sub-score (0-100)
        #[arg(long, allow_negative_numbers = true)]
        nutrition: f64,
        /// Mood sub-score (0-100)
        #[arg(long, allow_negative_numbers = true)]
        mood: f64,
        /// Previous aggregate for the trend (defaults to the last recorded score)
        #[arg(long, allow_negative_numbers = true)]
        previous: Option<i64>,
        /// Print JSON instead of a score card
        #[arg(long)]
        json: bool,
        /// Print "score<TAB>trend<TAB>tier"
        #[arg(long, conflicts_with = "json")]
        tsv: bool,
        /// Remember this score as the baseline for the next trend
        #[arg(long)]
        record: bool,
    },
    /// Show or edit breathing-timer phases
    Timing {
        #[command(subcommand)]
        action: TimingCommand,
    },
    /// Interactive dashboard (default if no subcommand)
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum TimingCommand {
    /// Print the committed timing set with permitted ranges
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set one phase, e.g. `timing set holdIn 6`
    Set {
        /// inhale, exhale, holdIn or holdOut
        phase: Phase,
        /// Duration in whole seconds
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Treat editing as disabled (the edit is always rejected)
        #[arg(long)]
        disabled: bool,
    },
    /// Save the committed timing set as the default
    Save,
}

#[derive(Parser, Debug)]
#[command(name = "wellcoach")]
#[command(about = "Wellness score and breathing-timer settings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/wellcoach/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to state file (defaults to ~/.config/wellcoach/state.json)
    #[arg(long, global = true)]
    state: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    wellcoach::diag::set_verbose(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Dashboard);

    let config = match wellcoach::config::load_config(cli.config.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = wellcoach::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let ranges = match config.range_set() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let state_path = match cli.state.map(PathBuf::from) {
        Some(p) => p,
        None => match wellcoach::state::get_state_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("State error: {:#}", e);
                std::process::exit(EXIT_STATE);
            }
        },
    };
    verbose!("Using state file {}", state_path.display());

    let mut store = match StateStore::open(state_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("State error: {:#}", e);
            std::process::exit(EXIT_STATE);
        }
    };

    let use_colors = output::should_use_colors();
    let committed = store
        .state()
        .committed_timing(&ranges, config.default_timing());
    let mut editor = TimingEditor::new(committed, ranges);
    editor.set_disabled(config.timing_disabled());

    match command {
        Commands::Score {
            sleep,
            nutrition,
            mood,
            previous,
            json,
            tsv,
            record,
        } => {
            let previous = previous.unwrap_or_else(|| store.state().previous_score());
            verbose!("Previous score: {}", previous);
            let result = aggregate(sleep, nutrition, mood, previous);

            if json {
                match output::format_score_json(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                }
            } else if tsv {
                println!("{}", output::format_score_tsv(&result));
            } else {
                let inputs = (sleep, nutrition, mood);
                let card = output::format_score_card(&result, inputs, previous, use_colors);
                println!("{}", card);
            }

            if record {
                store.state_mut().record_score(&result);
                if let Err(e) = store.persist() {
                    eprintln!("State error: {:#}", e);
                    std::process::exit(EXIT_STATE);
                }
                verbose!("Recorded score {}", result.score);
            }
        }
        Commands::Timing { action } => match action {
            TimingCommand::Show { json } => {
                if json {
                    let mut ranges = serde_json::Map::new();
                    for phase in Phase::ALL {
                        let label = editor.ranges().get(phase).to_string();
                        ranges.insert(phase.name().to_string(), label.into());
                    }
                    let doc = serde_json::json!({
                        "timing": editor.current(),
                        "ranges": ranges,
                        "disabled": editor.is_disabled(),
                    });
                    println!("{}", doc);
                } else {
                    println!(
                        "{}",
                        output::format_timing_table(
                            editor.current(),
                            editor.ranges(),
                            editor.is_disabled(),
                            use_colors
                        )
                    );
                }
            }
            TimingCommand::Set {
                phase,
                value,
                disabled,
            } => {
                if disabled {
                    editor.set_disabled(true);
                }
                let outcome = editor.edit(phase, &value, &mut store);
                let line = output::format_edit_outcome(phase, &outcome, use_colors);
                if !outcome.is_accepted() {
                    eprintln!("{}", line);
                    std::process::exit(EXIT_REJECTED);
                }
                if let Err(e) = store.persist() {
                    eprintln!("State error: {:#}", e);
                    std::process::exit(EXIT_STATE);
                }
                println!("{}", line);
            }
            TimingCommand::Save => match editor.save(&mut store) {
                Ok(true) => println!("Saved timing as default ({})", store.path().display()),
                Ok(false) => {
                    eprintln!("Editing is disabled; nothing saved");
                    std::process::exit(EXIT_REJECTED);
                }
                Err(e) => {
                    eprintln!("State error: {:#}", e);
                    std::process::exit(EXIT_STATE);
                }
            },
        },
        Commands::Dashboard => {
            let input = ScoreInput {
                sleep: 50.0,
                nutrition: 50.0,
                mood: 50.0,
                previous: store.state().previous_score(),
            };
            let theme = wellcoach::tui::resolve_theme(config.theme);
            let app = wellcoach::tui::App::new(input, editor, store, theme);
            if let Err(e) = wellcoach::tui::run_tui(app).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_STATE);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
