use std::num::ParseIntError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub work_minutes: u64,
    pub rest_minutes: u64,
    pub long_rest_minutes: u64,
    pub sessions_before_long_rest: u64,
    pub help_requested: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            work_minutes: 25,
            rest_minutes: 5,
            long_rest_minutes: 15,
            sessions_before_long_rest: 4,
            help_requested: false,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing parameter after option '{0}'")]
    MissingValue(String),

    #[error("invalid integer '{value}' for option '{option}': {source}")]
    InvalidInteger {
        option: String,
        value: String,
        source: ParseIntError,
    },

    #[error("option '{option}' must be a positive number, got {value}")]
    NotPositive { option: String, value: i64 },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Clone, Copy)]
pub enum OptionKind {
    Flag(fn(&mut Settings)),
    Value(fn(&mut Settings, u64)),
}

pub struct OptionSpec {
    pub long: &'static str,
    pub short: &'static str,
    pub value_name: Option<&'static str>,
    pub help: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    fn matches(&self, token: &str) -> bool {
        token == self.long || token == self.short
    }
}

pub static OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        long: "--help",
        short: "-h",
        value_name: None,
        help: "Show this message",
        kind: OptionKind::Flag(|s| s.help_requested = true),
    },
    OptionSpec {
        long: "--work-minutes",
        short: "-w",
        value_name: Some("<minutes>"),
        help: "Length of a work session (default: 25 min)",
        kind: OptionKind::Value(|s, v| s.work_minutes = v),
    },
    OptionSpec {
        long: "--rest-minutes",
        short: "-r",
        value_name: Some("<minutes>"),
        help: "Length of a short rest (default: 5 min)",
        kind: OptionKind::Value(|s, v| s.rest_minutes = v),
    },
    OptionSpec {
        long: "--long-rest-minutes",
        short: "-l",
        value_name: Some("<minutes>"),
        help: "Length of the long rest after a set of sessions (default: 15 min)",
        kind: OptionKind::Value(|s, v| s.long_rest_minutes = v),
    },
    OptionSpec {
        long: "--sessions",
        short: "-s",
        value_name: Some("<count>"),
        help: "Number of sessions before a long rest (default: 4 sessions)",
        kind: OptionKind::Value(|s, v| s.sessions_before_long_rest = v),
    },
];

/// Settings together with the tokens that were not recognised.
#[derive(Debug, PartialEq)]
pub struct Resolved {
    pub settings: Settings,
    pub ignored: Vec<String>,
}

impl Settings {
    /// Resolve settings from an argument list (program name already stripped).
    ///
    /// Unknown tokens are warned about and skipped. A value-taking option with no
    /// value, or with a value that is not a positive integer, fails the whole
    /// resolution.
    pub fn resolve<I, S>(args: I) -> Result<Resolved>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Settings::default();
        let mut ignored = Vec::new();
        let mut tokens = args.into_iter().map(Into::into);

        while let Some(token) = tokens.next() {
            let Some(spec) = OPTIONS.iter().find(|o| o.matches(&token)) else {
                warn!("Ignoring unknown option '{token}'");
                ignored.push(token);
                continue;
            };

            match spec.kind {
                OptionKind::Flag(set) => set(&mut settings),
                OptionKind::Value(set) => {
                    let raw = tokens
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(token.clone()))?;
                    set(&mut settings, parse_positive(&token, &raw)?);
                }
            }
        }

        Ok(Resolved { settings, ignored })
    }
}

fn parse_positive(option: &str, raw: &str) -> Result<u64> {
    let value: i64 = raw.trim().parse().map_err(|source| ConfigError::InvalidInteger {
        option: option.to_string(),
        value: raw.to_string(),
        source,
    })?;

    if value <= 0 {
        return Err(ConfigError::NotPositive {
            option: option.to_string(),
            value,
        });
    }
    Ok(value as u64)
}

pub fn usage() -> String {
    let mut text = String::from("Usage:\n\tsimple-pomodoro [OPTIONS]\n\nOptions:\n");
    for opt in OPTIONS {
        let names = match opt.value_name {
            Some(value) => format!("{}, {} {value}", opt.long, opt.short),
            None => format!("{}, {}", opt.long, opt.short),
        };
        text.push_str(&format!("\t{names:<34} {}\n", opt.help));
    }
    text.push_str("\nSend SIGUSR1 to the process to skip the current phase.\n");
    text
}
