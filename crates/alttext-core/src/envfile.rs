//! `KEY=VALUE` env file store used to persist API keys.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// A dotenv-style file on disk.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, message: impl std::fmt::Display) -> ConfigError {
        ConfigError::EnvFile {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    /// Parse all entries. A missing file yields no entries.
    ///
    /// Lines that do not parse are skipped with a warning so one bad line
    /// cannot hide the keys around it.
    pub fn load(&self) -> Result<Vec<(String, String)>, ConfigError> {
        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!("No env file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.error(e)),
        };

        let mut entries = Vec::new();
        for item in iter {
            match item {
                Ok(entry) => entries.push(entry),
                Err(e @ dotenvy::Error::Io(_)) => return Err(self.error(e)),
                Err(e) => {
                    tracing::warn!("Skipping line in {}: {e}", self.path.display());
                }
            }
        }
        tracing::debug!(
            "Loaded {} entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    /// Set `key` to `value`, creating the file if needed.
    ///
    /// Replaces the first line starting with `KEY=`; otherwise appends a new
    /// line. All other lines are kept as they are. Values that `load` would
    /// otherwise reinterpret are written double-quoted and escaped.
    pub fn upsert(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        if key.is_empty() || key.contains(['=', '\n', '\r']) || key.contains(char::is_whitespace)
        {
            return Err(ConfigError::ValidationError(format!(
                "Invalid env key: {key:?}"
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(ConfigError::ValidationError(format!(
                "Value for {key} must be a single line"
            )));
        }

        let existing = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.error(e)),
        };

        let prefix = format!("{key}=");
        let entry = format!("{key}={}", quote_value(value));
        let mut lines: Vec<&str> = existing.split('\n').collect();

        let updated = match lines.iter().position(|line| line.starts_with(&prefix)) {
            Some(index) => {
                lines[index] = &entry;
                lines.join("\n")
            }
            None => {
                let mut content = existing.clone();
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(&entry);
                content.push('\n');
                content
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        std::fs::write(&self.path, updated).map_err(|e| self.error(e))?;
        tracing::info!("Saved {key} to {}", self.path.display());
        Ok(())
    }
}

/// Render `value` so that dotenvy parses it back unchanged.
fn quote_value(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.,:/+=@%".contains(c));
    if plain {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));
        assert!(env.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# keys\n\nOPEN_AI_API_KEY=sk-one\nANTHROPIC_API_KEY=sk-two\n",
        )
        .unwrap();

        let entries = EnvFile::new(&path).load().unwrap();
        assert_eq!(
            entries,
            vec![
                ("OPEN_AI_API_KEY".to_string(), "sk-one".to_string()),
                ("ANTHROPIC_API_KEY".to_string(), "sk-two".to_string()),
            ]
        );
    }

    #[test]
    fn test_upsert_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".env");
        let env = EnvFile::new(&path);

        env.upsert("ANTHROPIC_API_KEY", "sk-ant").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ANTHROPIC_API_KEY=sk-ant\n"
        );
    }

    #[test]
    fn test_upsert_replaces_first_match_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# comment\nOPEN_AI_API_KEY=old\nOTHER=1\nOPEN_AI_API_KEY=dup\n",
        )
        .unwrap();

        EnvFile::new(&path).upsert("OPEN_AI_API_KEY", "new").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# comment\nOPEN_AI_API_KEY=new\nOTHER=1\nOPEN_AI_API_KEY=dup\n"
        );
    }

    #[test]
    fn test_upsert_appends_after_unterminated_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "OTHER=1").unwrap();

        EnvFile::new(&path).upsert("OPEN_AI_API_KEY", "sk").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "OTHER=1\nOPEN_AI_API_KEY=sk\n"
        );
    }

    #[test]
    fn test_upsert_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));
        env.upsert("ANTHROPIC_API_KEY", "first").unwrap();
        env.upsert("ANTHROPIC_API_KEY", "second").unwrap();

        let entries = env.load().unwrap();
        assert_eq!(
            entries,
            vec![("ANTHROPIC_API_KEY".to_string(), "second".to_string())]
        );
    }

    #[test]
    fn test_upsert_rejects_multiline_value() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));
        let err = env.upsert("OPEN_AI_API_KEY", "sk\nEVIL=1").unwrap_err();
        assert!(err.to_string().contains("single line"));
        assert!(!env.path().exists());
    }

    #[test]
    fn test_load_skips_unparseable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "just some note\nOPEN_AI_API_KEY=sk-one\n=orphan\nANTHROPIC_API_KEY=sk-two\n",
        )
        .unwrap();

        let entries = EnvFile::new(&path).load().unwrap();
        assert_eq!(
            entries,
            vec![
                ("OPEN_AI_API_KEY".to_string(), "sk-one".to_string()),
                ("ANTHROPIC_API_KEY".to_string(), "sk-two".to_string()),
            ]
        );
    }

    #[test]
    fn test_upsert_special_characters_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::new(dir.path().join(".env"));

        for value in [
            "sk-ant$abc",
            "sk'ant",
            "sk\"ant",
            "sk#ant",
            "sk ant",
            "back\\slash",
            "${HOME}",
            "sk-plain_1.2",
        ] {
            env.upsert("ANTHROPIC_API_KEY", value).unwrap();
            assert_eq!(
                env.load().unwrap(),
                vec![("ANTHROPIC_API_KEY".to_string(), value.to_string())],
                "value {value:?} did not survive a save"
            );
        }
    }

    #[test]
    fn test_upsert_quotes_only_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let env = EnvFile::new(&path);

        env.upsert("OPEN_AI_API_KEY", "sk-proj_abc").unwrap();
        env.upsert("ANTHROPIC_API_KEY", "a$b").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "OPEN_AI_API_KEY=sk-proj_abc\nANTHROPIC_API_KEY=\"a\\$b\"\n"
        );
    }
}
