//! Deck legality configuration.
//!
//! `DeckRules` collects every limit the engine enforces:
//! - Per-zone capacity (`main_max`, `extra_max`, optional `side_max`)
//! - Per-card copy limit across all zones (`max_copies`)
//! - Decks per owner (`max_decks_per_owner`)
//! - How imports behave on failure (`import_policy`)
//!
//! Defaults follow the standard format. Embedders can override individual
//! fields with the builder methods or from a TOML document.
//!
//! ```
//! use ccg_decks::core::DeckRules;
//! use ccg_decks::zones::Zone;
//!
//! let rules = DeckRules::from_toml_str("extra_max = 15").unwrap();
//! assert_eq!(rules.cap(Zone::Extra), Some(15));
//! assert_eq!(rules.cap(Zone::Main), Some(60));
//! assert_eq!(rules.cap(Zone::Side), None);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{DeckError, Result};
use crate::zones::Zone;

/// Maximum cards in the main deck.
pub const MAIN_DECK_MAX: u32 = 60;
/// Maximum cards in the extra deck.
pub const EXTRA_DECK_MAX: u32 = 20;
/// Maximum copies of a single card across the whole deck.
pub const MAX_COPIES_PER_CARD: u32 = 3;
/// Maximum decks a single owner may hold.
pub const MAX_DECKS_PER_OWNER: usize = 10;

/// What an import does when one of its cards fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Stop at the first failure and keep every card already added.
    #[default]
    BestEffort,
    /// Stop at the first failure and remove every card this import added.
    AllOrNothing,
}

/// Legality limits for deck building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckRules {
    /// Main deck capacity.
    pub main_max: u32,

    /// Extra deck capacity.
    pub extra_max: u32,

    /// Side deck capacity. `None` for unlimited.
    pub side_max: Option<u32>,

    /// Copies of one card allowed across all zones.
    pub max_copies: u32,

    /// Decks a single owner may create.
    pub max_decks_per_owner: usize,

    /// Failure behaviour for imports.
    pub import_policy: ImportPolicy,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            main_max: MAIN_DECK_MAX,
            extra_max: EXTRA_DECK_MAX,
            side_max: None,
            max_copies: MAX_COPIES_PER_CARD,
            max_decks_per_owner: MAX_DECKS_PER_OWNER,
            import_policy: ImportPolicy::BestEffort,
        }
    }
}

impl DeckRules {
    /// Create the default rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let rules: DeckRules =
            toml::from_str(text).map_err(|e| DeckError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject limits that would make every deck illegal.
    pub fn validate(&self) -> Result<()> {
        if self.main_max == 0 {
            return Err(DeckError::InvalidRules("main_max must be at least 1".into()));
        }
        if self.extra_max == 0 {
            return Err(DeckError::InvalidRules("extra_max must be at least 1".into()));
        }
        if self.side_max == Some(0) {
            return Err(DeckError::InvalidRules("side_max must be at least 1".into()));
        }
        if self.max_copies == 0 {
            return Err(DeckError::InvalidRules("max_copies must be at least 1".into()));
        }
        if self.max_decks_per_owner == 0 {
            return Err(DeckError::InvalidRules(
                "max_decks_per_owner must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Capacity of a zone. `None` means the zone is uncapped.
    #[must_use]
    pub fn cap(&self, zone: Zone) -> Option<u32> {
        match zone {
            Zone::Main => Some(self.main_max),
            Zone::Extra => Some(self.extra_max),
            Zone::Side => self.side_max,
        }
    }

    /// Set the main deck capacity.
    #[must_use]
    pub fn with_main_max(mut self, max: u32) -> Self {
        self.main_max = max;
        self
    }

    /// Set the extra deck capacity.
    #[must_use]
    pub fn with_extra_max(mut self, max: u32) -> Self {
        self.extra_max = max;
        self
    }

    /// Cap the side deck.
    #[must_use]
    pub fn with_side_max(mut self, max: u32) -> Self {
        self.side_max = Some(max);
        self
    }

    /// Set the per-card copy limit.
    #[must_use]
    pub fn with_max_copies(mut self, max: u32) -> Self {
        self.max_copies = max;
        self
    }

    /// Set how many decks one owner may hold.
    #[must_use]
    pub fn with_max_decks(mut self, max: usize) -> Self {
        self.max_decks_per_owner = max;
        self
    }

    /// Set the import failure policy.
    #[must_use]
    pub fn with_import_policy(mut self, policy: ImportPolicy) -> Self {
        self.import_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = DeckRules::default();
        assert_eq!(rules.cap(Zone::Main), Some(60));
        assert_eq!(rules.cap(Zone::Extra), Some(20));
        assert_eq!(rules.cap(Zone::Side), None);
        assert_eq!(rules.max_copies, 3);
        assert_eq!(rules.max_decks_per_owner, 10);
        assert_eq!(rules.import_policy, ImportPolicy::BestEffort);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let rules = DeckRules::new()
            .with_main_max(40)
            .with_extra_max(15)
            .with_side_max(15)
            .with_max_copies(1)
            .with_max_decks(2)
            .with_import_policy(ImportPolicy::AllOrNothing);

        assert_eq!(rules.cap(Zone::Main), Some(40));
        assert_eq!(rules.cap(Zone::Extra), Some(15));
        assert_eq!(rules.cap(Zone::Side), Some(15));
        assert_eq!(rules.max_copies, 1);
        assert_eq!(rules.max_decks_per_owner, 2);
        assert_eq!(rules.import_policy, ImportPolicy::AllOrNothing);
    }

    #[test]
    fn test_toml_partial_override() {
        let rules = DeckRules::from_toml_str(
            r#"
            extra_max = 15
            side_max = 15
            import_policy = "all_or_nothing"
            "#,
        )
        .unwrap();

        assert_eq!(rules.main_max, 60);
        assert_eq!(rules.extra_max, 15);
        assert_eq!(rules.side_max, Some(15));
        assert_eq!(rules.import_policy, ImportPolicy::AllOrNothing);
    }

    #[test]
    fn test_toml_empty_is_default() {
        assert_eq!(DeckRules::from_toml_str("").unwrap(), DeckRules::default());
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = DeckRules::from_toml_str("main_deck = 40").unwrap_err();
        assert!(matches!(err, DeckError::InvalidRules(_)));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        assert!(DeckRules::new().with_main_max(0).validate().is_err());
        assert!(DeckRules::new().with_max_copies(0).validate().is_err());
        assert!(DeckRules::new().with_side_max(0).validate().is_err());
        assert!(DeckRules::from_toml_str("max_decks_per_owner = 0").is_err());
    }
}
