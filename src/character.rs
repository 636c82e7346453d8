//! Character spell-list state: classes, known and prepared spells, slot
//! consumption, Warlock pact slots, Mystic Arcanum usage, and the rest cycle.
//!
//! Maxima are never stored here; they are recomputed through the resolver
//! (or taken from the Custom-class overrides) whenever class levels change.

use crate::classes::{CharacterClass, ClassLevel};
use crate::resolver;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A character's spell list and spellcasting resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpellList {
    pub name: String,
    /// One entry per class taken; the first entry is the primary class for
    /// display purposes only.
    #[serde(default)]
    pub classes: Vec<ClassLevel>,
    /// Known spell names; membership is case-insensitive and unique.
    #[serde(default)]
    pub known_spells: Vec<String>,
    /// Subset of known spells currently prepared. Cantrips are always
    /// prepared implicitly and must not be added here; see
    /// [`CharacterSpellList::prepare_spell`].
    #[serde(default)]
    pub prepared_spells: Vec<String>,
    /// Remaining slots per spell level (1-9).
    #[serde(default)]
    pub current_slots: BTreeMap<u8, u8>,
    /// Remaining Warlock Pact Magic slots.
    #[serde(default)]
    pub warlock_slots_current: u8,
    /// Spell levels (6-9) whose Mystic Arcanum has been expended since the
    /// last long rest.
    #[serde(default)]
    pub mystic_arcanum_used: BTreeSet<u8>,
    /// Slot maxima override, used only for Custom-class characters.
    #[serde(default)]
    pub custom_max_slots: BTreeMap<u8, u8>,
    /// Cantrip maximum override for Custom-class characters; 0 means
    /// unlimited.
    #[serde(default)]
    pub custom_max_cantrips: u8,
}

impl CharacterSpellList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            known_spells: Vec::new(),
            prepared_spells: Vec::new(),
            current_slots: BTreeMap::new(),
            warlock_slots_current: 0,
            mystic_arcanum_used: BTreeSet::new(),
            custom_max_slots: BTreeMap::new(),
            custom_max_cantrips: 0,
        }
    }

    // ------------------------------------------------------------------
    // Derived class properties
    // ------------------------------------------------------------------

    /// The first class entry, conventionally the primary class.
    pub fn primary_class(&self) -> Option<&ClassLevel> {
        self.classes.first()
    }

    /// Sum of all class levels.
    pub fn total_level(&self) -> u8 {
        self.classes
            .iter()
            .fold(0u8, |acc, cl| acc.saturating_add(cl.level))
    }

    /// True if the character has more than one class.
    pub fn is_multiclass(&self) -> bool {
        self.classes.len() > 1
    }

    /// True if any class entry is the Custom pseudo-class.
    pub fn has_custom_class(&self) -> bool {
        self.classes
            .iter()
            .any(|cl| cl.class == CharacterClass::Custom)
    }

    /// Fighter level of an Eldritch Knight entry, or 0 if none.
    pub fn eldritch_knight_level(&self) -> u8 {
        self.classes
            .iter()
            .find(|cl| cl.is_eldritch_knight())
            .map(|cl| cl.level)
            .unwrap_or(0)
    }

    /// "Wizard 5 / Warlock 3" style summary, or "No class".
    pub fn display_classes(&self) -> String {
        if self.classes.is_empty() {
            return "No class".to_string();
        }
        self.classes
            .iter()
            .map(|cl| cl.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    // ------------------------------------------------------------------
    // Class editing
    // ------------------------------------------------------------------

    /// Add a class; returns false if the class is already present.
    pub fn add_class(&mut self, class: CharacterClass, level: u8) -> bool {
        if self.classes.iter().any(|cl| cl.class == class) {
            return false;
        }
        self.classes.push(ClassLevel::new(class, level));
        true
    }

    /// Remove a class; returns false if the class was not present.
    pub fn remove_class(&mut self, class: CharacterClass) -> bool {
        let before = self.classes.len();
        self.classes.retain(|cl| cl.class != class);
        self.classes.len() != before
    }

    /// Set the level of an existing class, clamped to 1-20. Returns false if
    /// the class is not present.
    pub fn set_class_level(&mut self, class: CharacterClass, level: u8) -> bool {
        for cl in &mut self.classes {
            if cl.class == class {
                cl.level = level.clamp(1, 20);
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Known spells
    // ------------------------------------------------------------------

    /// Add a spell to the known list; returns false if already known.
    pub fn add_spell(&mut self, spell_name: &str) -> bool {
        if self.has_spell(spell_name) {
            return false;
        }
        self.known_spells.push(spell_name.to_string());
        true
    }

    /// Remove a spell from the known list (and unprepare it). Returns false
    /// if the spell was not known.
    pub fn remove_spell(&mut self, spell_name: &str) -> bool {
        let before = self.known_spells.len();
        self.known_spells
            .retain(|s| !s.eq_ignore_ascii_case(spell_name));
        if self.known_spells.len() != before {
            self.unprepare_spell(spell_name);
            true
        } else {
            false
        }
    }

    pub fn has_spell(&self, spell_name: &str) -> bool {
        self.known_spells
            .iter()
            .any(|s| s.eq_ignore_ascii_case(spell_name))
    }

    // ------------------------------------------------------------------
    // Preparation
    // ------------------------------------------------------------------

    /// Mark a spell as prepared; returns false if already prepared.
    ///
    /// Cantrips are always prepared and must not be passed here; the state
    /// object does not look spells up by level, so enforcement lives at the
    /// roster boundary ([`crate::store::CharacterRoster::prepare_spell`]).
    pub fn prepare_spell(&mut self, spell_name: &str) -> bool {
        if self.is_prepared(spell_name) {
            return false;
        }
        self.prepared_spells.push(spell_name.to_string());
        true
    }

    /// Remove a spell from the prepared list; returns false if it was not
    /// prepared.
    pub fn unprepare_spell(&mut self, spell_name: &str) -> bool {
        let before = self.prepared_spells.len();
        self.prepared_spells
            .retain(|s| !s.eq_ignore_ascii_case(spell_name));
        self.prepared_spells.len() != before
    }

    pub fn is_prepared(&self, spell_name: &str) -> bool {
        self.prepared_spells
            .iter()
            .any(|s| s.eq_ignore_ascii_case(spell_name))
    }

    pub fn prepared_count(&self) -> usize {
        self.prepared_spells.len()
    }

    // ------------------------------------------------------------------
    // Spell slots
    // ------------------------------------------------------------------

    /// Set the remaining slots for a level, clamped into `[0, max]`.
    ///
    /// Callers resolve `max` through the resolver (or custom overrides)
    /// first; out-of-range values are clamped rather than rejected so a
    /// mistyped number in the UI never turns into an error.
    pub fn set_current_slots(&mut self, spell_level: u8, count: u8, max: u8) {
        self.current_slots.insert(spell_level, count.min(max));
    }

    /// Remaining slots for a level; 0 when the level was never initialized.
    pub fn current_slots(&self, spell_level: u8) -> u8 {
        self.current_slots.get(&spell_level).copied().unwrap_or(0)
    }

    /// Fill in current slots for any level present in the resolved maxima
    /// but absent from the tracked state, setting each to its maximum.
    /// Levels already tracked are left alone.
    pub fn initialize_slots(&mut self) {
        for (level, max) in self.effective_max_slots() {
            self.current_slots.entry(level).or_insert(max);
        }
    }

    // ------------------------------------------------------------------
    // Mystic Arcanum
    // ------------------------------------------------------------------

    /// Mark a Mystic Arcanum level as used. Idempotent.
    pub fn use_mystic_arcanum(&mut self, spell_level: u8) {
        self.mystic_arcanum_used.insert(spell_level);
    }

    /// Mark a Mystic Arcanum level as available again. Idempotent.
    pub fn reset_mystic_arcanum(&mut self, spell_level: u8) {
        self.mystic_arcanum_used.remove(&spell_level);
    }

    pub fn is_mystic_arcanum_available(&self, spell_level: u8) -> bool {
        !self.mystic_arcanum_used.contains(&spell_level)
    }

    // ------------------------------------------------------------------
    // Rest cycle
    // ------------------------------------------------------------------

    /// Long rest: restore every slot level in `max_slots` to its maximum,
    /// refill warlock pact slots, and make all Mystic Arcanum available.
    pub fn long_rest(&mut self, max_slots: &BTreeMap<u8, u8>, warlock_max_slots: u8) {
        for (level, max) in max_slots {
            self.current_slots.insert(*level, *max);
        }
        self.warlock_slots_current = warlock_max_slots;
        self.mystic_arcanum_used.clear();
    }

    /// Short rest: only Warlock Pact Magic recovers. Regular slots and
    /// Mystic Arcanum are untouched.
    pub fn short_rest(&mut self, warlock_max_slots: u8) {
        self.warlock_slots_current = warlock_max_slots;
    }

    // ------------------------------------------------------------------
    // Effective maxima
    // ------------------------------------------------------------------

    /// Maximum spell slots, honoring the Custom-class override when set,
    /// otherwise resolved from class levels.
    pub fn effective_max_slots(&self) -> BTreeMap<u8, u8> {
        if self.has_custom_class() && !self.custom_max_slots.is_empty() {
            return self.custom_max_slots.clone();
        }
        resolver::max_spell_slots(&self.classes, self.eldritch_knight_level())
    }

    /// Maximum cantrips, honoring the Custom-class override. A Custom-class
    /// character with an override of 0 has no limit (`u8::MAX`).
    pub fn effective_max_cantrips(&self) -> u8 {
        if self.has_custom_class() {
            if self.custom_max_cantrips > 0 {
                return self.custom_max_cantrips;
            }
            return u8::MAX;
        }
        resolver::max_cantrips(&self.classes, self.eldritch_knight_level())
    }

    /// Highest castable spell level, honoring the Custom-class slot
    /// override when set.
    pub fn effective_max_spell_level(&self) -> u8 {
        if self.has_custom_class() && !self.custom_max_slots.is_empty() {
            return self.custom_max_slots.keys().max().copied().unwrap_or(0);
        }
        resolver::max_spell_level(&self.classes, self.eldritch_knight_level())
    }

    /// Maximum Warlock pact slots from the character's warlock level.
    pub fn warlock_max_slots(&self) -> u8 {
        let (count, _) = resolver::warlock_pact_slots(resolver::warlock_level(&self.classes));
        count
    }
}
