// Runtime configuration, read from the environment
//
// ANIMAL_LIST_LOG_FILE  - append tracing output to this file (unset: no logs
//                         in TUI mode, stderr in `list` mode)
// RUST_LOG              - tracing filter (default "info")

use std::path::PathBuf;

pub const LOG_FILE_VAR: &str = "ANIMAL_LIST_LOG_FILE";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a closure instead of touching
    /// the process environment)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Config {
            log_file,
            log_filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_reads_log_file_and_filter() {
        let config = Config::from_lookup(lookup_from(&[
            (LOG_FILE_VAR, "/tmp/animals.log"),
            (LOG_FILTER_VAR, "animal_list=debug"),
        ]));

        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/animals.log")));
        assert_eq!(config.log_filter, "animal_list=debug");
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            (LOG_FILE_VAR, "  "),
            (LOG_FILTER_VAR, ""),
        ]));

        assert_eq!(config.log_file, None);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
