use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Environment variable naming the launch table when no path argument is given.
pub const DATA_ENV_VAR: &str = "LAUNCH_DASH_DATA";

/// Data file used when neither an argument nor the environment names one.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

pub const WINDOW_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [600.0, 400.0];

/// Startup configuration.
///
/// Precedence for the data path: positional argument, then
/// `LAUNCH_DASH_DATA`, then `spacex_launch_dash.csv`.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "launch-dash", version, about = "Interactive launch records dashboard", long_about = None)]
pub struct DashConfig {
    /// Launch table to load (.csv, .json or .parquet)
    #[arg(env = DATA_ENV_VAR, default_value = DEFAULT_DATA_FILE, value_hint = ValueHint::FilePath)]
    pub data_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_positional_path() {
        let cfg = DashConfig::try_parse_from(["launch-dash", "launches.parquet"]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("launches.parquet"));
    }

    #[test]
    fn test_default_path() {
        // The environment can legitimately override the default.
        if std::env::var_os(DATA_ENV_VAR).is_some() {
            return;
        }
        let cfg = DashConfig::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_help_is_not_a_data_path() {
        let err = DashConfig::try_parse_from(["launch-dash", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = DashConfig::try_parse_from(["launch-dash", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_data_path_reads_environment() {
        let cmd = DashConfig::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "data_path")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(DATA_ENV_VAR)));
    }

    #[test]
    fn test_command_definition_is_valid() {
        DashConfig::command().debug_assert();
    }
}
