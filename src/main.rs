//! # caniuse-tui CLI Entry Point
//!
//! Loads a feature record or a list of search matches from JSON and shows
//! them in the interactive terminal screens.
//!
//! ## Usage
//!
//! ```bash
//! # Browse one feature
//! caniuse-tui feature ./flexbox.json
//!
//! # Pick one of several matches; prints the chosen identifier
//! caniuse-tui select ./matches.json
//!
//! # Override the configured theme
//! caniuse-tui --theme nord feature ./flexbox.json
//! ```
//!
//! ## Key Bindings
//!
//! ### Feature screen
//! - `←` / `→` / `h` / `l` - Focus previous/next browser
//! - `↑` / `↓` / `k` / `j` - Scroll the focused browser's ranges
//! - `PageUp` / `PageDown` - Move a page of browsers and scroll the details tab
//! - `Home` / `End` - Jump to the top/bottom of ranges and details
//! - `Tab` / `Shift+Tab` / `[` / `]` - Switch details tab
//! - `q` / `Esc` / `Ctrl+C` - Quit
//!
//! ### Selection screen
//! - `↑` / `↓` / `k` / `j` - Move
//! - `Enter` - Select
//! - `q` / `Esc` - Cancel

use caniuse_tui::logging;
use caniuse_tui::model::{FeatureRecord, SearchMatch};
use caniuse_tui::terminal;
use caniuse_tui::ui::{self, Config};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "caniuse-tui")]
#[command(about = "Interactive terminal viewer for caniuse browser support tables", long_about = None)]
#[command(version)]
struct Args {
    /// Colour theme (overrides the config file)
    #[arg(long, global = true, value_name = "NAME")]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse a feature record (JSON)
    Feature {
        /// Path to the feature record
        file: PathBuf,
    },
    /// Choose one of several search matches (JSON list) and print its identifier
    Select {
        /// Path to the match list
        file: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _logging = logging::init();
    terminal::install_panic_hook();

    let succeeded = run_application(args, terminal::is_interactive())?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Returns `false` when there was nothing to show or nothing was chosen.
fn run_application(args: Args, interactive: bool) -> Result<bool> {
    let mut config = Config::load();
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    match args.command {
        Command::Feature { file } => {
            let feature: FeatureRecord = load_json(&file)?;
            if !interactive {
                eprintln!("caniuse-tui: the feature screen needs an interactive terminal");
                return Ok(false);
            }
            ui::run_feature_screen(&feature, &config)?;
            Ok(true)
        }
        Command::Select { file } => {
            let matches: Vec<SearchMatch> = load_json(&file)?;
            match ui::choose_match(&matches, interactive, &config)? {
                Some(identifier) => {
                    println!("{identifier}");
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn test_args_parsing_feature() {
        let args = Args::try_parse_from(["caniuse-tui", "feature", "flexbox.json"])
            .expect("parse args");
        assert!(args.theme.is_none());
        match args.command {
            Command::Feature { file } => assert_eq!(file, PathBuf::from("flexbox.json")),
            Command::Select { .. } => panic!("expected feature subcommand"),
        }
    }

    #[test]
    fn test_args_parsing_theme_after_subcommand() {
        let args = Args::try_parse_from(["caniuse-tui", "select", "m.json", "--theme", "nord"])
            .expect("parse args");
        assert_eq!(args.theme.as_deref(), Some("nord"));
        assert!(matches!(args.command, Command::Select { .. }));
    }

    #[test]
    fn test_args_parsing_requires_subcommand() {
        assert!(Args::try_parse_from(["caniuse-tui"]).is_err());
    }

    #[test]
    fn test_load_json_missing_file() {
        let err = load_json::<FeatureRecord>(Path::new("/nonexistent/feature.json"))
            .expect_err("should fail");
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_load_json_invalid() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "bad.json", "{ not json");
        let err = load_json::<Vec<SearchMatch>>(&path).expect_err("should fail");
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_feature_refuses_non_interactive() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "feature.json", r#"{"title": "Flexbox"}"#);
        let args = Args {
            theme: None,
            command: Command::Feature { file: path },
        };
        assert!(!run_application(args, false).expect("run"));
    }

    #[test]
    fn test_select_non_interactive_picks_first() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(
            &dir,
            "matches.json",
            r#"[{"label": "CSS Grid", "identifier": "css-grid"},
                {"label": "Flexbox", "identifier": "flexbox"}]"#,
        );
        let args = Args {
            theme: Some("dracula".to_string()),
            command: Command::Select { file: path },
        };
        assert!(run_application(args, false).expect("run"));
    }

    #[test]
    fn test_select_empty_list_fails() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "matches.json", "[]");
        let args = Args {
            theme: None,
            command: Command::Select { file: path },
        };
        assert!(!run_application(args, true).expect("run"));
    }
}
