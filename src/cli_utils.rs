//! Shared CLI utility functions used across command handlers.

use anyhow::{Context, Result};
use colored::*;
use std::io::Read;
use std::path::{Path, PathBuf};

use wikilint_lib::config as wikilint_config;
use wikilint_lib::exit_codes::exit;

/// Extensions picked up when walking directories
pub const WIKI_EXTENSIONS: &[&str] = &["wiki", "wikitext", "mediawiki", "txt"];

/// Split a comma-separated CLI list
pub fn split_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Load the configuration given with `--config`, or the one discovered from `discovery_dir`.
/// Errors are reported on stderr and end the process with the tool-error code.
pub fn load_config_with_cli_error_handling(config_path: Option<&str>, discovery_dir: &Path) -> wikilint_config::Config {
    let result = match config_path {
        Some(path) => wikilint_config::Config::load(Path::new(path)),
        None => wikilint_config::Config::load_with_discovery(discovery_dir),
    };
    match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

/// Read a file, or stdin for `-`
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {path}"))
}

fn has_wiki_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WIKI_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Expand the CLI paths into the list of documents to lint.
///
/// Files are kept as given; directories are walked (honoring .gitignore) for files
/// with a wiki extension. `-` is kept for stdin.
pub fn collect_input_paths(paths: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for path in paths {
        if path == "-" {
            files.push(path.clone());
            continue;
        }
        let root = PathBuf::from(path);
        if !root.exists() {
            anyhow::bail!("Path does not exist: {path}");
        }
        if root.is_file() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<String> = Vec::new();
        for entry in ignore::WalkBuilder::new(&root).build() {
            let entry = entry.with_context(|| format!("Failed to walk {path}"))?;
            let entry_path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_file()) && has_wiki_extension(entry_path) {
                found.push(entry_path.to_string_lossy().to_string());
            }
        }
        found.sort();
        log::debug!("Found {} file(s) under {path}", found.len());
        files.extend(found);
    }
    Ok(files)
}
