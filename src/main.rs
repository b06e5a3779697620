use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use sprint_verify::buffered_eprintln;
use sprint_verify::output::CheckedSprint;
use sprint_verify::sprint::LoadedSprint;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more recorded sprints
    Check {
        /// Sprint recordings (JSON, or YAML with a .yaml/.yml extension)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Maximum heart rate in BPM (overrides the config profile)
        #[arg(long, conflicts_with = "age", value_parser = clap::value_parser!(u32).range(1..))]
        max_hr: Option<u32>,

        /// Age in years; max HR is estimated as 220 - age
        #[arg(long)]
        age: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "sprint-verify")]
#[command(about = "Checks recorded sprints for genuine sprint-level effort", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/sprint-verify/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    let (files, max_hr_flag, age_flag, format) = match cli.command {
        Commands::Init => {
            if let Err(e) = sprint_verify::config::init::run_init_wizard(config_path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Check {
            files,
            max_hr,
            age,
            format,
        } => (files, max_hr, age, format),
    };
    let start_time = Instant::now();

    // Load config
    let config_file = config_path
        .clone()
        .unwrap_or_else(sprint_verify::config::get_config_path);
    let config = match sprint_verify::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = sprint_verify::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let max_hr_source = match sprint_verify::profile::resolve_max_hr(
        max_hr_flag,
        age_flag,
        config.profile.as_ref(),
    ) {
        Ok(Some(source)) => source,
        Ok(None) => {
            eprintln!("No maximum heart rate available.");
            eprintln!("{}", sprint_verify::profile::missing_profile_hint(&config_file));
            std::process::exit(EXIT_CONFIG);
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let max_hr = max_hr_source.max_hr();

    if cli.verbose {
        eprintln!("Max HR: {}", max_hr_source.describe());
        eprintln!(
            "Pass threshold: {} (weights: HR {}, cadence {}, HRD {})",
            effective_scoring.pass_threshold,
            effective_scoring.weights.heart_rate,
            effective_scoring.weights.cadence,
            effective_scoring.weights.hrd
        );
    }

    // Hold warnings back until the results are printed
    sprint_verify::stderr_buffer::activate();

    // Load every file; a bad file is reported but doesn't stop the others
    let mut sprints: Vec<LoadedSprint> = Vec::new();
    let mut any_unreadable = false;
    for path in &files {
        match sprint_verify::sprint::load_sprint(path) {
            Ok(sprint) => {
                if sprint.data.hr_samples().is_empty() {
                    buffered_eprintln!(
                        "Warning: {} has no heart-rate samples; HR and HR rise scores are 0",
                        sprint.label
                    );
                }
                if sprint.data.cadence_samples().is_empty() {
                    buffered_eprintln!(
                        "Warning: {} has no cadence samples; cadence score is 0",
                        sprint.label
                    );
                }
                sprints.push(sprint);
            }
            Err(e) => {
                buffered_eprintln!("Skipping {}: {:#}", path.display(), e);
                any_unreadable = true;
            }
        }
    }

    if cli.verbose {
        eprintln!("Loaded {} of {} sprint files", sprints.len(), files.len());
    }

    // Validate
    let validator = sprint_verify::SprintValidator::with_config(effective_scoring);
    let results: Vec<_> = sprints
        .iter()
        .map(|sprint| validator.validate(&sprint.data, max_hr))
        .collect();

    let checked: Vec<CheckedSprint> = sprints
        .iter()
        .zip(results.iter())
        .map(|(sprint, result)| CheckedSprint {
            label: &sprint.label,
            result,
        })
        .collect();

    // Output results
    match format {
        OutputFormat::Json => match sprint_verify::output::format_json(&checked) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                sprint_verify::stderr_buffer::flush();
                eprintln!("{:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        OutputFormat::Tsv => {
            if !checked.is_empty() {
                println!("{}", sprint_verify::output::format_tsv(&checked));
            }
        }
        OutputFormat::Table => {
            let use_colors = sprint_verify::output::should_use_colors();
            if cli.verbose && !checked.is_empty() {
                // Verbose mode: full breakdown per sprint
                for sprint in &checked {
                    println!(
                        "{}",
                        sprint_verify::output::format_result_detail(sprint, use_colors)
                    );
                    println!();
                }
            } else {
                println!(
                    "{}",
                    sprint_verify::output::format_results_table(&checked, use_colors)
                );
            }
        }
    }

    sprint_verify::stderr_buffer::flush();

    if cli.verbose {
        let passed = results.iter().filter(|r| r.is_valid).count();
        eprintln!();
        eprintln!(
            "Total: {} sprints, {} passed in {:?}",
            results.len(),
            passed,
            start_time.elapsed()
        );
    }

    let exit_code = if any_unreadable {
        EXIT_INPUT
    } else if results.iter().any(|r| !r.is_valid) {
        EXIT_INVALID
    } else {
        EXIT_SUCCESS
    };
    std::process::exit(exit_code);
}
