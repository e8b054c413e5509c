use serde::{Deserialize, Serialize};

use crate::navigation::HistoryMode;

/// Store behavior knobs. Missing keys in a config file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Navigator call used by mutations.
    pub history: HistoryMode,
    /// Remove a key whose value equals its default instead of writing it.
    pub clear_on_default: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            history: HistoryMode::Push,
            clear_on_default: true,
        }
    }
}

impl StoreOptions {
    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    pub fn with_clear_on_default(mut self, clear_on_default: bool) -> Self {
        self.clear_on_default = clear_on_default;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_push_and_clear() {
        let o = StoreOptions::default();
        assert_eq!(o.history, HistoryMode::Push);
        assert!(o.clear_on_default);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let o: StoreOptions = toml::from_str(r#"history = "replace""#).unwrap();
        assert_eq!(o.history, HistoryMode::Replace);
        assert!(o.clear_on_default);

        let o: StoreOptions = toml::from_str("clear_on_default = false").unwrap();
        assert_eq!(o, StoreOptions::default().with_clear_on_default(false));
    }
}
