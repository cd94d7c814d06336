//! Source file discovery.

use anyhow::{Context, Result};
use cstyle_core::AnalyzerConfig;
use std::path::{Path, PathBuf};

/// Walks `paths` and returns the sources to check, sorted and deduplicated.
///
/// Explicit file arguments are kept even when their extension is not in
/// the configured list; directory walks respect `.gitignore` when asked to.
pub fn discover(paths: &[PathBuf], config: &AnalyzerConfig, extra_exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = compile_excludes(config.exclude.iter().chain(extra_exclude))?;
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .hidden(false)
            .git_ignore(config.respect_gitignore)
            .git_exclude(config.respect_gitignore)
            .require_git(false);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !has_extension(path, &config.extensions) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if excludes
                .iter()
                .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
            {
                tracing::debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn compile_excludes<'a>(patterns: impl Iterator<Item = &'a String>) -> Result<Vec<glob::Pattern>> {
    patterns
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("build/gen")).unwrap();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("src/a.c"), "").unwrap();
        fs::write(root.join("src/b.HPP"), "").unwrap();
        fs::write(root.join("src/notes.txt"), "").unwrap();
        fs::write(root.join("build/gen/out.c"), "").unwrap();
        fs::write(root.join("vendor/lib.c"), "").unwrap();
        fs::write(root.join(".gitignore"), "vendor/\n").unwrap();
        tmp
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn walks_sources_honoring_excludes_and_gitignore() {
        let tmp = tree();
        let files = discover(&[tmp.path().to_path_buf()], &AnalyzerConfig::default(), &[]).unwrap();
        assert_eq!(names(&files, tmp.path()), ["src/a.c", "src/b.HPP"]);
    }

    #[test]
    fn gitignore_can_be_ignored() {
        let tmp = tree();
        let config = AnalyzerConfig {
            respect_gitignore: false,
            ..AnalyzerConfig::default()
        };
        let files = discover(&[tmp.path().to_path_buf()], &config, &["src/*.HPP".to_string()]).unwrap();
        assert_eq!(names(&files, tmp.path()), ["src/a.c", "vendor/lib.c"]);
    }

    #[test]
    fn explicit_files_are_kept() {
        let tmp = tree();
        let notes = tmp.path().join("src/notes.txt");
        let files = discover(&[notes.clone(), notes.clone()], &AnalyzerConfig::default(), &[]).unwrap();
        assert_eq!(files, [notes]);
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = discover(&[], &AnalyzerConfig::default(), &["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid exclude pattern"));
    }
}
