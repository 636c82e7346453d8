//! Keyed record stores for spells and characters, persisted as versioned
//! JSON files.
//!
//! The stores treat the filesystem as a simple record store: the whole
//! collection is loaded once and saved after mutations. No transactions; if
//! a save fails, in-memory and persisted state diverge until the next
//! successful save.

use crate::character::CharacterSpellList;
use crate::classes::CharacterClass;
use crate::spell::{builtin_spells, Spell};
use crate::validation::SpellLookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("No character named \"{0}\"")]
    CharacterNotFound(String),

    #[error("A character named \"{0}\" already exists")]
    DuplicateCharacter(String),

    #[error("No spell named \"{0}\"")]
    SpellNotFound(String),

    #[error("\"{0}\" is a cantrip; cantrips are always prepared")]
    CantripAlwaysPrepared(String),
}

/// Current spell library save format version.
const LIBRARY_SAVE_VERSION: u32 = 1;

/// Current character roster save format version.
const ROSTER_SAVE_VERSION: u32 = 1;

/// Get current timestamp as unix seconds string.
fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

// ============================================================================
// Spell Library
// ============================================================================

/// In-memory spell collection keyed by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct SpellLibrary {
    spells: HashMap<String, Spell>,
}

/// On-disk envelope for a spell library.
#[derive(Serialize, Deserialize)]
struct SavedLibrary {
    version: u32,
    saved_at: String,
    spells: Vec<Spell>,
}

impl SpellLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library seeded with the built-in SRD starter spells.
    pub fn with_builtin() -> Self {
        let mut library = Self::new();
        for spell in builtin_spells() {
            library.add(spell);
        }
        library
    }

    /// Look up a spell by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.spells.get(&name.to_lowercase())
    }

    /// Insert a spell, replacing any existing spell of the same name.
    pub fn add(&mut self, spell: Spell) {
        self.spells.insert(spell.name.to_lowercase(), spell);
    }

    /// Remove a spell by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Spell> {
        self.spells.remove(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    /// All spells available to a class, sorted by level then name.
    pub fn spells_for_class(&self, class: CharacterClass) -> Vec<&Spell> {
        let mut spells: Vec<&Spell> = self
            .spells
            .values()
            .filter(|s| s.classes.contains(&class))
            .collect();
        spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        spells
    }

    /// All spells of a specific level, sorted by name.
    pub fn spells_by_level(&self, level: u8) -> Vec<&Spell> {
        let mut spells: Vec<&Spell> = self.spells.values().filter(|s| s.level == level).collect();
        spells.sort_by(|a, b| a.name.cmp(&b.name));
        spells
    }

    /// Spells matching a search string, sorted by level then name.
    pub fn search(&self, text: &str) -> Vec<&Spell> {
        let mut spells: Vec<&Spell> = self
            .spells
            .values()
            .filter(|s| s.matches_search(text))
            .collect();
        spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        spells
    }

    /// Save the library to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let mut spells: Vec<&Spell> = self.spells.values().collect();
        spells.sort_by(|a, b| a.name.cmp(&b.name));

        let saved = SavedLibrary {
            version: LIBRARY_SAVE_VERSION,
            saved_at: timestamp(),
            spells: spells.into_iter().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&saved)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load a library from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).await?;
        let saved: SavedLibrary = serde_json::from_str(&content)?;

        if saved.version != LIBRARY_SAVE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: LIBRARY_SAVE_VERSION,
                found: saved.version,
            });
        }

        let mut library = Self::new();
        for spell in saved.spells {
            library.add(spell);
        }
        Ok(library)
    }
}

impl SpellLookup for SpellLibrary {
    fn spell(&self, name: &str) -> Option<&Spell> {
        self.get(name)
    }
}

// ============================================================================
// Character Roster
// ============================================================================

/// The collection of character spell lists, keyed by character name.
///
/// Keeps insertion order for display.
#[derive(Debug, Clone, Default)]
pub struct CharacterRoster {
    characters: Vec<CharacterSpellList>,
}

/// On-disk envelope for a character roster.
#[derive(Serialize, Deserialize)]
struct SavedRoster {
    version: u32,
    saved_at: String,
    characters: Vec<CharacterSpellList>,
}

impl CharacterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterSpellList> {
        self.characters.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CharacterSpellList> {
        self.characters
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CharacterSpellList> {
        self.characters
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Add a character; fails if the name is already taken.
    pub fn add(&mut self, character: CharacterSpellList) -> Result<(), StoreError> {
        if self.get(&character.name).is_some() {
            return Err(StoreError::DuplicateCharacter(character.name.clone()));
        }
        self.characters.push(character);
        Ok(())
    }

    /// Remove a character by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<CharacterSpellList> {
        let index = self
            .characters
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))?;
        Some(self.characters.remove(index))
    }

    /// Rename a character; fails if the target name is already taken by a
    /// different character.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        if !old_name.eq_ignore_ascii_case(new_name) && self.get(new_name).is_some() {
            return Err(StoreError::DuplicateCharacter(new_name.to_string()));
        }
        let character = self
            .get_mut(old_name)
            .ok_or_else(|| StoreError::CharacterNotFound(old_name.to_string()))?;
        character.name = new_name.to_string();
        Ok(())
    }

    /// Prepare a known spell for a character, looking the spell up in the
    /// library first. Refuses cantrips (they are always prepared) and spells
    /// the library does not know. Returns false if already prepared.
    pub fn prepare_spell(
        &mut self,
        character_name: &str,
        spell_name: &str,
        library: &SpellLibrary,
    ) -> Result<bool, StoreError> {
        let spell = library
            .get(spell_name)
            .ok_or_else(|| StoreError::SpellNotFound(spell_name.to_string()))?;
        if spell.is_cantrip() {
            return Err(StoreError::CantripAlwaysPrepared(spell.name.clone()));
        }
        let spell_name = spell.name.clone();

        let character = self
            .get_mut(character_name)
            .ok_or_else(|| StoreError::CharacterNotFound(character_name.to_string()))?;
        Ok(character.prepare_spell(&spell_name))
    }

    /// Save the roster to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let saved = SavedRoster {
            version: ROSTER_SAVE_VERSION,
            saved_at: timestamp(),
            characters: self.characters.clone(),
        };
        let content = serde_json::to_string_pretty(&saved)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load a roster from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).await?;
        let saved: SavedRoster = serde_json::from_str(&content)?;

        if saved.version != ROSTER_SAVE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: ROSTER_SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(Self {
            characters: saved.characters,
        })
    }
}
