//! Environment variables, timestamps, and the elapsed-time line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ElapsedTime, EnvVar, TimeLine};
use crate::units::parse_datetime;

pub fn parse_env_var(line: &str) -> EnvVar {
    let (key, value) = line.split_once('=').unwrap_or((line, ""));
    EnvVar {
        raw: line.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

pub fn parse_time(line: &str) -> TimeLine {
    let rest = line
        .strip_prefix("time:")
        .or_else(|| line.strip_prefix("Time:"))
        .unwrap_or(line);
    TimeLine {
        raw: line.to_string(),
        timestamp: parse_datetime(rest.trim()),
    }
}

static ELAPSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"elapsed time:\s*([0-9]+(?:\.[0-9]+)?)\s*seconds").unwrap());

pub fn parse_elapsed_time(line: &str) -> ElapsedTime {
    ElapsedTime {
        raw: line.to_string(),
        seconds: ELAPSED_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok()),
    }
}
