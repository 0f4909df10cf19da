use clap::{Arg, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name (`warning` is an alias of `warn`) or a count up to 4.
fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_ascii_lowercase();

    if let Ok(count) = level.parse::<u8>() {
        return if usize::from(count) < LEVELS.len() {
            Ok(count)
        } else {
            Err(format!("verbosity count must be 0-4, got {count}"))
        };
    }

    let name = if level == "warning" { "warn" } else { &level };
    LEVELS
        .iter()
        .position(|candidate| *candidate == name)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unknown log level {level:?}, expected one of {}", LEVELS.join(", ")))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log verbosity for login audit and HTTP events: error, warn, info, debug, trace (default: error)")
            .env("TUTORGATE_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_map_to_counts() {
        assert_eq!(parse_log_level("error"), Ok(0));
        assert_eq!(parse_log_level("WARN"), Ok(1));
        assert_eq!(parse_log_level("warning"), Ok(1));
        assert_eq!(parse_log_level(" info "), Ok(2));
        assert_eq!(parse_log_level("debug"), Ok(3));
        assert_eq!(parse_log_level("Trace"), Ok(4));
    }

    #[test]
    fn counts_above_trace_are_rejected() {
        assert_eq!(parse_log_level("4"), Ok(4));
        assert!(parse_log_level("5").is_err());
        assert!(parse_log_level("verbose").is_err_and(|e| e.contains("error, warn, info")));
    }

    #[test]
    fn env_level_name_sets_verbosity() {
        temp_env::with_var("TUTORGATE_LOG_LEVEL", Some("debug"), || {
            let matches = with_args(Command::new("tutorgate")).try_get_matches_from(["tutorgate"]);
            assert!(matches.is_ok());
            let Ok(matches) = matches else { return };
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(3));
        });
    }
}
