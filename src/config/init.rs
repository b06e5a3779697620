use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config};
use crate::profile::{estimate_max_hr, ProfileConfig};
use crate::scoring::{validate_scoring, ScoreWeights, ScoringConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until the answer parses and passes `check`.
fn prompt_number<T>(message: &str, default: &str, check: impl Fn(&T) -> Result<(), String>) -> Result<T>
where
    T: std::str::FromStr,
{
    loop {
        let input = prompt_with_default(message, default)?;
        match input.parse::<T>() {
            Ok(v) => match check(&v) {
                Ok(()) => return Ok(v),
                Err(e) => println!("  Invalid: {}. Try again.", e),
            },
            Err(_) => println!("  Invalid: not a number. Try again."),
        }
    }
}

/// Parse a max-HR answer: a bare number, or "age N" to estimate it.
pub fn parse_profile_answer(input: &str) -> Result<ProfileConfig, String> {
    let input = input.trim();
    if let Some(age) = input.strip_prefix("age") {
        let age: u32 = age
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not an age", age.trim()))?;
        if age == 0 || age >= 120 {
            return Err(format!("age {} is out of range", age));
        }
        return Ok(ProfileConfig {
            age: Some(age),
            max_hr: None,
        });
    }
    let max_hr: u32 = input
        .parse()
        .map_err(|_| format!("'{}' is neither a max HR nor 'age N'", input))?;
    if !(100..=250).contains(&max_hr) {
        return Err(format!("max HR {} is out of range (100-250)", max_hr));
    }
    Ok(ProfileConfig {
        age: None,
        max_hr: Some(max_hr),
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Sprint Verify Configuration Wizard");
    println!("==================================");
    println!();

    // 1. Profile
    println!("The target heart-rate zone is 80% of your maximum heart rate.");
    println!("Enter a measured max HR (e.g. '188'), or 'age N' to estimate it as 220 - N.");
    let profile = loop {
        let input = prompt_with_default("Max HR", "age 30")?;
        match parse_profile_answer(&input) {
            Ok(p) => break p,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };
    if let Some(age) = profile.age {
        println!("  Estimated max HR: {} BPM", estimate_max_hr(age));
    }

    // 2. Scoring
    println!();
    let defaults = ScoringConfig::default();
    let configure_scoring = prompt_yes_no("Configure scoring? (n accepts defaults)", false)?;

    let scoring = if configure_scoring {
        let pass_threshold: f64 = prompt_number(
            "Pass threshold (0-100)",
            &defaults.pass_threshold.to_string(),
            |v: &f64| {
                if (0.0..=100.0).contains(v) {
                    Ok(())
                } else {
                    Err("must be between 0 and 100".to_string())
                }
            },
        )?;

        println!();
        println!("Weights for heart rate, cadence and HR rise rate must add up to 1.0.");
        let weights = loop {
            let heart_rate: f64 = prompt_number(
                "  Heart-rate weight",
                &defaults.weights.heart_rate.to_string(),
                non_negative,
            )?;
            let cadence: f64 = prompt_number(
                "  Cadence weight",
                &defaults.weights.cadence.to_string(),
                non_negative,
            )?;
            let weights = ScoreWeights {
                heart_rate,
                cadence,
                hrd: 1.0 - heart_rate - cadence,
            };
            if weights.hrd >= 0.0 {
                println!("  HR rise rate weight: {:.2}", weights.hrd);
                break weights;
            }
            println!("  Invalid: heart-rate and cadence weights exceed 1.0. Try again.");
        };

        println!();
        let cadence_target_spm: f64 = prompt_number(
            "Target sprint cadence (steps/min)",
            &defaults.cadence_target_spm.to_string(),
            |v: &f64| {
                if *v > 0.0 {
                    Ok(())
                } else {
                    Err("must be positive".to_string())
                }
            },
        )?;

        ScoringConfig {
            weights,
            pass_threshold,
            cadence_target_spm,
            ..defaults
        }
    } else {
        defaults
    };

    if let Err(errors) = validate_scoring(&scoring) {
        anyhow::bail!("Scoring config is invalid: {}", errors.join("; "));
    }

    // 3. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        profile: Some(profile),
        scoring: Some(scoring),
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `sprint-verify check <FILE>` to validate a sprint.");

    Ok(())
}

fn non_negative(v: &f64) -> Result<(), String> {
    if *v >= 0.0 {
        Ok(())
    } else {
        Err("must be non-negative".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_hr_answer() {
        let profile = parse_profile_answer("188").unwrap();
        assert_eq!(profile.max_hr, Some(188));
        assert_eq!(profile.age, None);
    }

    #[test]
    fn test_parse_age_answer() {
        let profile = parse_profile_answer("age 42").unwrap();
        assert_eq!(profile.age, Some(42));
        assert_eq!(profile.max_hr, None);
    }

    #[test]
    fn test_parse_answer_out_of_range() {
        assert!(parse_profile_answer("40").is_err());
        assert!(parse_profile_answer("age 0").is_err());
        assert!(parse_profile_answer("age 150").is_err());
    }

    #[test]
    fn test_parse_answer_garbage() {
        let err = parse_profile_answer("fast").unwrap_err();
        assert!(err.contains("fast"));
        assert!(parse_profile_answer("age old").is_err());
    }
}
