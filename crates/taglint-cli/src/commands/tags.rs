use std::path::PathBuf;

use taglint_core::config::TaglintConfig;
use taglint_enforce::check::{registry_from_config, tags_result};
use taglint_output::OutputFormatter;

/// Run `taglint tags` -- print the stability registry after config overrides.
pub fn run(formatter: &dyn OutputFormatter, config_dir: Option<PathBuf>) -> i32 {
    let config_dir = match config_dir.map_or_else(std::env::current_dir, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("taglint tags: failed to get current directory: {}", e);
            return 2;
        }
    };
    let config = TaglintConfig::load(&config_dir);
    let result = tags_result(&registry_from_config(&config));
    print!("{}", formatter.format_tags(&result));
    0
}
