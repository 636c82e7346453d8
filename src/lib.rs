//! D&D 5e spellbook engine.
//!
//! This crate provides:
//! - Spell slot tables and multiclass caster resolution (full, half, and
//!   Eldritch Knight third-caster progressions, Warlock Pact Magic, Mystic
//!   Arcanum)
//! - Character spell-list state with the long/short rest cycle
//! - Advisory validation of spells against a character's capabilities
//! - JSON-backed spell and character stores
//!
//! # Quick Start
//!
//! ```
//! use spellbook_core::{CharacterClass, CharacterSpellList, resolver};
//!
//! let mut character = CharacterSpellList::new("Elira");
//! character.add_class(CharacterClass::Paladin, 4);
//! character.add_class(CharacterClass::Warlock, 3);
//!
//! // Paladin 4 contributes ceil(4 / 2) = 2; Warlock is excluded.
//! assert_eq!(resolver::multiclass_caster_level(&character.classes, 0), 2);
//!
//! let max_slots = character.effective_max_slots();
//! character.long_rest(&max_slots, character.warlock_max_slots());
//! assert_eq!(character.current_slots(1), 3);
//! assert_eq!(character.warlock_slots_current, 2);
//! ```

pub mod character;
pub mod classes;
pub mod resolver;
pub mod spell;
pub mod store;
pub mod tables;
pub mod validation;

// Primary public API
pub use character::CharacterSpellList;
pub use classes::{CharacterClass, ClassLevel, ClassParseError};
pub use spell::{builtin_spells, Spell, SpellSchool};
pub use store::{CharacterRoster, SpellLibrary, StoreError};
pub use validation::{validate_spell_for_character, SpellLookup, ValidationSettings};
