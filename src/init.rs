//! Startup: reads the command line and, if needed, stdin into a [Settings].

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::config::{self, BuildingConfig, Timing, WorkloadConfig};


/// Everything the binary needs to start a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Building size
    pub building: BuildingConfig,
    /// Motion delays
    pub timing: Timing,
    /// Random call generator settings
    pub workload: WorkloadConfig,
    /// Whether to start the random call generators
    pub run_workload: bool,
}

/// Values picked up from the command line. Counts stay `None` if not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// `floors::N`
    pub floors: Option<u8>,
    /// `elevators::N`
    pub elevators: Option<u8>,
    /// `step_ms::N`
    pub step_ms: Option<u64>,
    /// `door_ms::N`
    pub door_ms: Option<u64>,
    /// `seed::N`
    pub seed: Option<u64>,
    /// `workload::true/false`, on unless turned off
    pub workload: Option<bool>,
    /// `help` was given
    pub help: bool,
}


/// ### Reads arguments from `cargo run`
///
/// Available options:
///
/// `floors::N` &rarr; Number of floors (asked for on stdin if missing)
/// `elevators::N` &rarr; Number of elevators (asked for on stdin if missing)
/// `step_ms::N` &rarr; Milliseconds per floor-step
/// `door_ms::N` &rarr; Milliseconds the doors stay open
/// `seed::N` &rarr; Seed for the random call generators
/// `workload::(true/false)` &rarr; Start the random call generators
/// `print_wv::(true/false)` &rarr; Prints the status table periodically
/// `print_err::(true/false)` &rarr; Prints error messages
/// `print_warn::(true/false)` &rarr; Prints warning messages
/// `print_ok::(true/false)` &rarr; Prints OK messages
/// `print_info::(true/false)` &rarr; Prints informational messages
/// `print_else::(true/false)` &rarr; Prints elevator events and other messages
/// `json` &rarr; Prints elevator events as JSON lines
/// `debug` &rarr; Disables all prints except error messages
/// `help` &rarr; Displays all possible arguments without starting the program
///
/// If no arguments are provided, all prints are enabled by default.
pub fn parse_args() -> Result<Settings> {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = parse_arg_list(&args)?;

    if parsed.help {
        print_help();
        std::process::exit(0);
    }

    let num_floors = match parsed.floors {
        Some(n) => n,
        None => read_count("Number of floors:\t")?,
    };
    let num_elevators = match parsed.elevators {
        Some(n) => n,
        None => read_count("Number of elevators:\t")?,
    };

    settings_from(&parsed, num_floors, num_elevators)
}

/// Builds [Settings] from parsed arguments and the two counts.
pub fn settings_from(args: &Args, num_floors: u8, num_elevators: u8) -> Result<Settings> {
    let building = BuildingConfig::new(num_floors, num_elevators).context("invalid building configuration")?;

    let mut timing = Timing::default();
    if let Some(ms) = args.step_ms {
        timing.floor_step = Duration::from_millis(ms);
    }
    if let Some(ms) = args.door_ms {
        timing.door_cycle = Duration::from_millis(ms);
    }

    let workload = WorkloadConfig {
        seed: args.seed,
        ..WorkloadConfig::default()
    };

    Ok(Settings {
        building,
        timing,
        workload,
        run_workload: args.workload.unwrap_or(true),
    })
}

/// Parses `key::value` arguments. Print toggles are applied to [config] right away.
pub fn parse_arg_list(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();

    for arg in args {
        let parts: Vec<&str> = arg.split("::").collect();
        if parts.len() == 2 {
            let key = parts[0].to_lowercase();
            let value = parts[1].to_lowercase();
            let is_true = value == "true";

            match key.as_str() {
                "floors" => parsed.floors = Some(value.parse().with_context(|| format!("bad floor count '{}'", value))?),
                "elevators" => parsed.elevators = Some(value.parse().with_context(|| format!("bad elevator count '{}'", value))?),
                "step_ms" => parsed.step_ms = Some(value.parse().with_context(|| format!("bad step_ms '{}'", value))?),
                "door_ms" => parsed.door_ms = Some(value.parse().with_context(|| format!("bad door_ms '{}'", value))?),
                "seed" => parsed.seed = Some(value.parse().with_context(|| format!("bad seed '{}'", value))?),
                "workload" => parsed.workload = Some(is_true),
                "print_wv" => config::set_flag(&config::PRINT_WV_ON, is_true),
                "print_err" => config::set_flag(&config::PRINT_ERR_ON, is_true),
                "print_warn" => config::set_flag(&config::PRINT_WARN_ON, is_true),
                "print_ok" => config::set_flag(&config::PRINT_OK_ON, is_true),
                "print_info" => config::set_flag(&config::PRINT_INFO_ON, is_true),
                "print_else" => config::set_flag(&config::PRINT_ELSE_ON, is_true),
                _ => bail!("unknown argument '{}', try 'help'", arg),
            }
        } else {
            match arg.to_lowercase().as_str() {
                "help" => parsed.help = true,
                "json" => config::set_flag(&config::PRINT_JSON_ON, true),
                "debug" => {
                    // Kun error-meldingar
                    config::set_flag(&config::PRINT_WV_ON, false);
                    config::set_flag(&config::PRINT_WARN_ON, false);
                    config::set_flag(&config::PRINT_OK_ON, false);
                    config::set_flag(&config::PRINT_INFO_ON, false);
                    config::set_flag(&config::PRINT_ELSE_ON, false);
                }
                _ => bail!("unknown argument '{}', try 'help'", arg),
            }
        }
    }

    Ok(parsed)
}

fn print_help() {
    println!("Available arguments:");
    println!("  floors::N / elevators::N");
    println!("  step_ms::N / door_ms::N");
    println!("  seed::N");
    println!("  workload::true/false");
    println!("  print_wv::true/false");
    println!("  print_err::true/false");
    println!("  print_warn::true/false");
    println!("  print_ok::true/false");
    println!("  print_info::true/false");
    println!("  print_else::true/false");
    println!("  json (events as JSON lines)");
    println!("  debug (only error messages)");
}

/// Asks for a positive count on stdin.
fn read_count(prompt: &str) -> Result<u8> {
    print!("{}", prompt);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read from stdin")?;
    let value = line.trim();
    value.parse::<u8>().with_context(|| format!("'{}' is not a valid count", value))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_counts_and_timing() {
        let args = parse_arg_list(&strings(&["floors::7", "elevators::3", "step_ms::10", "door_ms::40", "seed::42"])).unwrap();
        assert_eq!(args.floors, Some(7));
        assert_eq!(args.elevators, Some(3));

        let settings = settings_from(&args, 7, 3).unwrap();
        assert_eq!(settings.timing.floor_step, Duration::from_millis(10));
        assert_eq!(settings.timing.door_cycle, Duration::from_millis(40));
        assert_eq!(settings.workload.seed, Some(42));
        assert!(settings.run_workload);
    }

    #[test]
    fn workload_can_be_disabled() {
        let args = parse_arg_list(&strings(&["workload::false"])).unwrap();
        assert!(!settings_from(&args, 3, 1).unwrap().run_workload);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_arg_list(&strings(&["floors::many"])).is_err());
        assert!(parse_arg_list(&strings(&["teleport"])).is_err());
    }

    #[test]
    fn zero_counts_fail_configuration() {
        let args = Args::default();
        assert!(settings_from(&args, 0, 2).is_err());
        assert!(settings_from(&args, 3, 0).is_err());
    }
}
