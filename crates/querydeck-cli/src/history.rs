//! Shell history location.
//!
//! Defaults to `~/.querydeck_history`. `QUERYDECK_HISTORY` overrides the
//! path; setting it to an empty string disables persistence.

use std::{env, path::PathBuf};

const DEFAULT_HISTORY_FILE: &str = ".querydeck_history";
const HISTORY_ENV_VAR: &str = "QUERYDECK_HISTORY";

pub fn history_path() -> Option<PathBuf> {
    resolve(
        env::var(HISTORY_ENV_VAR).ok(),
        env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve(custom: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match custom {
        Some(path) if path.is_empty() => None,
        Some(path) => Some(PathBuf::from(path)),
        None => home.map(|home| home.join(DEFAULT_HISTORY_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_path_is_in_home() {
        let path = resolve(None, Some(PathBuf::from("/home/ann")));

        assert_eq!(path, Some(PathBuf::from("/home/ann/.querydeck_history")));
    }

    #[test]
    fn custom_path_wins() {
        let path = resolve(Some("/tmp/h".to_string()), Some(PathBuf::from("/home/ann")));

        assert_eq!(path, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn empty_override_disables_history() {
        assert_eq!(resolve(Some(String::new()), Some(PathBuf::from("/home/ann"))), None);
    }

    #[test]
    fn no_home_no_history() {
        assert_eq!(resolve(None, None), None);
    }
}
