//! API key resolution.
//!
//! Keys are held as explicit values and handed to the generator, so the
//! process environment is only read when credentials are resolved. Entries
//! in the env file take precedence over the environment.

use crate::llm::Provider;
use std::collections::HashMap;

/// API keys per provider. Empty keys are treated as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: HashMap<Provider, String>,
}

impl Credentials {
    /// Keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut credentials = Self::default();
        for provider in Provider::ALL {
            if let Some(value) = lookup(provider.env_var()) {
                credentials.set(provider, value);
            }
        }
        credentials
    }

    /// Keys from the process environment, overridden by env file entries.
    ///
    /// A key present in the file always wins, even when its value is empty.
    pub fn resolve<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_env().with_entries(entries)
    }

    fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in entries {
            if let Some(provider) = Provider::ALL
                .into_iter()
                .find(|p| p.env_var() == key.as_ref())
            {
                self.set(provider, value);
            }
        }
        self
    }

    /// Key for `provider`, if one is configured.
    pub fn get(&self, provider: Provider) -> Option<&str> {
        self.keys
            .get(&provider)
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn has(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }

    pub fn set(&mut self, provider: Provider, key: impl Into<String>) {
        self.keys.insert(provider, key.into());
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let configured: Vec<&str> = Provider::ALL
            .into_iter()
            .filter(|p| self.has(*p))
            .map(|p| p.as_str())
            .collect();
        f.debug_struct("Credentials")
            .field("configured", &configured)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_absent() {
        let mut credentials = Credentials::default();
        assert!(!credentials.has(Provider::OpenAi));

        credentials.set(Provider::OpenAi, "   ");
        assert_eq!(credentials.get(Provider::OpenAi), None);

        credentials.set(Provider::OpenAi, "sk-test");
        assert_eq!(credentials.get(Provider::OpenAi), Some("sk-test"));
        assert!(!credentials.has(Provider::Anthropic));
    }

    #[test]
    fn test_resolve_reads_env_file_entries() {
        let credentials = Credentials::resolve(vec![
            ("ANTHROPIC_API_KEY", "sk-ant-file"),
            ("UNRELATED", "value"),
        ]);
        assert_eq!(credentials.get(Provider::Anthropic), Some("sk-ant-file"));
    }

    #[test]
    fn test_from_lookup_reads_provider_variables() {
        let credentials = Credentials::from_lookup(|name| match name {
            "OPEN_AI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        });
        assert_eq!(credentials.get(Provider::OpenAi), Some("sk-env"));
        assert!(!credentials.has(Provider::Anthropic));
    }

    #[test]
    fn test_env_file_wins_over_environment() {
        let environment = |name: &str| match name {
            "OPEN_AI_API_KEY" => Some("sk-env-openai".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-env-anthropic".to_string()),
            _ => None,
        };
        let credentials = Credentials::from_lookup(environment).with_entries(vec![
            ("OPEN_AI_API_KEY", "sk-file-openai"),
            ("ANTHROPIC_API_KEY", ""),
        ]);

        assert_eq!(credentials.get(Provider::OpenAi), Some("sk-file-openai"));
        // An empty file entry clears the environment value.
        assert_eq!(credentials.get(Provider::Anthropic), None);
    }

    #[test]
    fn test_debug_hides_keys() {
        let mut credentials = Credentials::default();
        credentials.set(Provider::Anthropic, "sk-ant-secret");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("anthropic"));
    }
}
