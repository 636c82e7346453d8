//! Character classes and per-class levels.
//!
//! The class list is closed: "Custom" is a pseudo-class for user-defined
//! casters whose slot progression comes from per-character overrides rather
//! than the standard tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a string does not name any known class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character class: {0}")]
pub struct ClassParseError(pub String);

/// D&D character classes, plus the "Custom" pseudo-class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterClass {
    Artificer,
    Barbarian,
    Bard,
    Cleric,
    Custom,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Artificer => "Artificer",
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Custom => "Custom",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    /// Returns true if this class can cast spells.
    ///
    /// Fighter is non-casting here; it gains spellcasting only through the
    /// Eldritch Knight subclass, which is tracked on [`ClassLevel::subclass`].
    pub fn is_spellcaster(&self) -> bool {
        !matches!(
            self,
            CharacterClass::Barbarian
                | CharacterClass::Fighter
                | CharacterClass::Monk
                | CharacterClass::Rogue
        )
    }

    /// All character classes, in alphabetical order.
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Artificer,
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Custom,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }

    /// Only the classes capable of spellcasting.
    pub fn spellcasting_classes() -> impl Iterator<Item = CharacterClass> {
        Self::all().iter().copied().filter(|c| c.is_spellcaster())
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = ClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| ClassParseError(trimmed.to_string()))
    }
}

/// A class a character has taken, with its level and optional subclass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub class: CharacterClass,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
}

impl ClassLevel {
    /// Create a class level, clamping the level into 1-20.
    pub fn new(class: CharacterClass, level: u8) -> Self {
        Self {
            class,
            level: level.clamp(1, 20),
            subclass: None,
        }
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    /// Whether this entry is a Fighter with the Eldritch Knight subclass.
    pub fn is_eldritch_knight(&self) -> bool {
        self.class == CharacterClass::Fighter
            && self
                .subclass
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains("eldritch knight"))
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellcaster_split() {
        let non_casters = [
            CharacterClass::Barbarian,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Rogue,
        ];
        for class in CharacterClass::all() {
            assert_eq!(
                class.is_spellcaster(),
                !non_casters.contains(class),
                "{class} miscategorized"
            );
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("wizard".parse::<CharacterClass>(), Ok(CharacterClass::Wizard));
        assert_eq!("WARLOCK".parse::<CharacterClass>(), Ok(CharacterClass::Warlock));
        assert_eq!(" Artificer ".parse::<CharacterClass>(), Ok(CharacterClass::Artificer));
    }

    #[test]
    fn test_parse_unknown_fails() {
        let err = "Mage".parse::<CharacterClass>().unwrap_err();
        assert_eq!(err, ClassParseError("Mage".to_string()));
    }

    #[test]
    fn test_class_level_clamps() {
        assert_eq!(ClassLevel::new(CharacterClass::Bard, 0).level, 1);
        assert_eq!(ClassLevel::new(CharacterClass::Bard, 25).level, 20);
    }

    #[test]
    fn test_eldritch_knight_detection() {
        let ek = ClassLevel::new(CharacterClass::Fighter, 7).with_subclass("Eldritch Knight");
        assert!(ek.is_eldritch_knight());

        let champion = ClassLevel::new(CharacterClass::Fighter, 7).with_subclass("Champion");
        assert!(!champion.is_eldritch_knight());

        // Subclass flag only counts on a Fighter entry
        let wizard = ClassLevel::new(CharacterClass::Wizard, 7).with_subclass("Eldritch Knight");
        assert!(!wizard.is_eldritch_knight());
    }
}
