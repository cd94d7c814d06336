//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "cstyle.toml";

const DEFAULT_CONFIG: &str = r#"# cstyle configuration

# "recommended" runs every rule, "minimal" only type names and literals.
preset = "recommended"

# Lowest severity that makes `cstyle check` exit with status 1.
fail_on = "warning"

[analyzer]
# Also check declarations that come from included headers.
include_all_files = false

# Glob patterns to exclude from discovery
exclude = [
    "**/build/**",
    "**/third_party/**",
]

extensions = ["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"]
respect_gitignore = true

# Extra directories searched for quoted includes.
# include_dirs = ["include"]

# Each rule can be disabled or have its severity overridden.

[rules.forbidden-call]
enabled = true
# severity = "error"
functions = ["gets", "strcpy", "sprintf"]

[rules.literal-control-character]
# Offer a fix that removes tabs from string literals.
fix_tabs = false

# [rules.non-ascii-identifier]
# enabled = false
"#;

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = write_config(dir, force)?;
    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: cstyle check");
    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
