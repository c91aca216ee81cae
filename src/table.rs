use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::Read;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Key of the entry whose level blocks hold the effective reactions.
pub const EFFECTIVE_THINKING: &str = "effective_thinking";

/// The reaction table shipped with the crate.
pub static REACTION_TABLE: Lazy<ReactionTable> = Lazy::new(|| {
    ReactionTable::from_reader(include_str!("../resources/reaction_table.json").as_bytes())
        .expect("embedded reaction table must be valid")
});

/// One defense category of the reaction table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReactionEntry {
    pub key: String,
    pub title: String,
    /// Level index (1..=4) to the questions of that level.
    pub levels: BTreeMap<u8, BTreeSet<u32>>,
}

impl ReactionEntry {
    pub fn level(&self, index: u8) -> Option<&BTreeSet<u32>> {
        self.levels.get(&index)
    }
}

/// Reference table of defense categories and their question blocks per level.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ReactionTable {
    entries: Vec<ReactionEntry>,
}

impl ReactionTable {
    pub fn embedded() -> &'static ReactionTable {
        &REACTION_TABLE
    }

    /// Loads a table in the embedded JSON format.
    ///
    /// Keys must be unique and level indices must lie in 1..=4.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let entries: Vec<ReactionEntry> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    pub fn new(entries: Vec<ReactionEntry>) -> Result<Self, Error> {
        let mut keys = HashSet::new();
        for entry in &entries {
            if !keys.insert(entry.key.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate entry key {:?}",
                    entry.key
                )));
            }
            if let Some(level) = entry.levels.keys().find(|level| !(1..=4).contains(*level)) {
                return Err(Error::InvalidTable(format!(
                    "entry {:?} has level {} outside 1..=4",
                    entry.key, level
                )));
            }
        }
        tracing::debug!("loaded reaction table with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ReactionEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&ReactionEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Effective-reaction questions for a category.
    ///
    /// Categories are the questionnaire's level blocks, so the category id
    /// addresses a level of the effective-thinking entry.
    pub fn effective_questions(&self, category_id: u32) -> Option<&BTreeSet<u32>> {
        let level = u8::try_from(category_id).ok()?;
        self.entry(EFFECTIVE_THINKING)?.level(level)
    }
}
