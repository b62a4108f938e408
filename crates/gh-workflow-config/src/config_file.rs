use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".gh-workflow-lander.toml";

/// Load config file content
///
/// Searches in:
/// 1. Current working directory as `.gh-workflow-lander.toml`
/// 2. Home directory as `.gh-workflow-lander.toml`
/// 3. The app config directory as `config.toml`
///
/// Returns the file content of the first readable candidate, None otherwise.
pub fn load_config_file() -> Option<String> {
    candidates().iter().find_map(|path| read(path))
}

fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE));
    }
    match crate::paths::app_config_path() {
        Ok(path) => paths.push(path),
        Err(e) => log::debug!("No app config directory: {}", e),
    }
    paths
}

fn read(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    log::debug!("Loaded config from {}", path.display());
    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwd_file_is_searched_first() {
        let paths = candidates();
        assert_eq!(paths.first(), Some(&PathBuf::from(CONFIG_FILE)));
        assert!(paths.last().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn test_missing_file_reads_nothing() {
        assert_eq!(read(Path::new("/nonexistent/gh-workflow-lander.toml")), None);
    }
}
