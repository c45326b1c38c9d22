use std::env;
use std::path::PathBuf;

const ENV_LOG: &str = "LS8_LOG";
const ENV_LOG_FILE: &str = "LS8_LOG_FILE";
const ENV_DUMP_STATE: &str = "LS8_DUMP_STATE";

const DEFAULT_LOG_FILTER: &str = "warn";

/// `LogKind` represents where logs go: `stderr` or a log file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogKind {
    /// Logs to stderr, the default choice. Stdout belongs to the program.
    Stderr,

    /// Logs to a file in the temp dir, `ls8-<timestamp>.log`.
    File,
}

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `tracing` filter directive, e.g. `emu=trace`.
    pub log_filter: String,
    pub log_kind: LogKind,
    /// Where to write the final machine state as JSON.
    pub dump_state: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key| lookup(key).filter(|value| !value.trim().is_empty());

        let log_kind = match non_empty(ENV_LOG_FILE).as_deref() {
            None | Some("0") => LogKind::Stderr,
            Some(_) => LogKind::File,
        };

        Self {
            log_filter: non_empty(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_kind,
            dump_state: non_empty(ENV_DUMP_STATE).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(
            config_from(&[]),
            Config {
                log_filter: "warn".to_string(),
                log_kind: LogKind::Stderr,
                dump_state: None,
            }
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("LS8_LOG", "emu=trace"),
            ("LS8_LOG_FILE", "1"),
            ("LS8_DUMP_STATE", "/tmp/state.json"),
        ]);

        assert_eq!(config.log_filter, "emu=trace");
        assert_eq!(config.log_kind, LogKind::File);
        assert_eq!(config.dump_state, Some(PathBuf::from("/tmp/state.json")));
    }

    #[test]
    fn zero_or_blank_keeps_stderr() {
        assert_eq!(config_from(&[("LS8_LOG_FILE", "0")]).log_kind, LogKind::Stderr);
        assert_eq!(config_from(&[("LS8_LOG_FILE", " ")]).log_kind, LogKind::Stderr);
        assert_eq!(config_from(&[("LS8_LOG", "")]).log_filter, "warn");
    }
}
