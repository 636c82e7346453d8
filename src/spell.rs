//! Spell records and the built-in SRD starter library.

use crate::classes::CharacterClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schools of magic in D&D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl SpellSchool {
    pub fn name(&self) -> &'static str {
        match self {
            SpellSchool::Abjuration => "Abjuration",
            SpellSchool::Conjuration => "Conjuration",
            SpellSchool::Divination => "Divination",
            SpellSchool::Enchantment => "Enchantment",
            SpellSchool::Evocation => "Evocation",
            SpellSchool::Illusion => "Illusion",
            SpellSchool::Necromancy => "Necromancy",
            SpellSchool::Transmutation => "Transmutation",
        }
    }
}

impl fmt::Display for SpellSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for SpellSchool {
    fn default() -> Self {
        SpellSchool::Evocation
    }
}

/// A spell record as persisted and displayed.
///
/// Casting time, range, components, and duration are stored as the plain
/// rulebook strings; this crate does not parse or interpret them. Fields
/// other than name/level/school default when missing from a stored record,
/// and unknown fields in stored JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    /// 0 for cantrips, 1-9 for leveled spells.
    pub level: u8,
    pub school: SpellSchool,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    #[serde(default)]
    pub description: String,
    /// Classes whose spell list includes this spell.
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    /// True when a class feature grants this spell for free (e.g. the
    /// Artificer's Mending). Feature-granted cantrips do not count against
    /// the cantrip cap.
    #[serde(default)]
    pub feature_granted: bool,
}

impl Spell {
    /// Create a minimal spell; the remaining fields start empty.
    pub fn new(name: impl Into<String>, level: u8, school: SpellSchool) -> Self {
        Self {
            name: name.into(),
            level,
            school,
            casting_time: String::new(),
            range: String::new(),
            components: String::new(),
            duration: String::new(),
            concentration: false,
            ritual: false,
            description: String::new(),
            classes: Vec::new(),
            tags: Vec::new(),
            source: String::new(),
            feature_granted: false,
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    /// "Cantrip" or "Level N" for display.
    pub fn level_name(&self) -> String {
        if self.is_cantrip() {
            "Cantrip".to_string()
        } else {
            format!("Level {}", self.level)
        }
    }

    /// Comma-separated class names for display and warnings.
    pub fn classes_display(&self) -> String {
        self.classes
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Case-insensitive substring match over name and description.
    pub fn matches_search(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Builder-style helpers used by the built-in library below.
impl Spell {
    fn for_classes(mut self, classes: &[CharacterClass]) -> Self {
        self.classes = classes.to_vec();
        self
    }

    fn cast(mut self, casting_time: &str, range: &str, duration: &str) -> Self {
        self.casting_time = casting_time.to_string();
        self.range = range.to_string();
        self.duration = duration.to_string();
        self
    }

    fn with_components(mut self, components: &str) -> Self {
        self.components = components.to_string();
        self
    }

    fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn concentrating(mut self) -> Self {
        self.concentration = true;
        self
    }

    fn as_ritual(mut self) -> Self {
        self.ritual = true;
        self
    }

    fn from_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }
}

/// A starter set of SRD spells covering cantrips and leveled spells for
/// every caster class, enough to seed a new library.
pub fn builtin_spells() -> Vec<Spell> {
    use CharacterClass::*;

    let srd = "SRD";
    vec![
        // Cantrips
        Spell::new("Fire Bolt", 0, SpellSchool::Evocation)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 action", "120 feet", "Instantaneous")
            .with_components("V, S")
            .describe("You hurl a mote of fire at a creature or object within range. Make a ranged spell attack. On a hit, the target takes 1d10 fire damage.")
            .from_source(srd),
        Spell::new("Eldritch Blast", 0, SpellSchool::Evocation)
            .for_classes(&[Warlock])
            .cast("1 action", "120 feet", "Instantaneous")
            .with_components("V, S")
            .describe("A beam of crackling energy streaks toward a creature within range. Make a ranged spell attack. On a hit, the target takes 1d10 force damage.")
            .from_source(srd),
        Spell::new("Sacred Flame", 0, SpellSchool::Evocation)
            .for_classes(&[Cleric])
            .cast("1 action", "60 feet", "Instantaneous")
            .with_components("V, S")
            .describe("Flame-like radiance descends on a creature that you can see within range. The target must succeed on a Dexterity saving throw or take 1d8 radiant damage.")
            .from_source(srd),
        Spell::new("Druidcraft", 0, SpellSchool::Transmutation)
            .for_classes(&[Druid])
            .cast("1 action", "30 feet", "Instantaneous")
            .with_components("V, S")
            .describe("Whispering to the spirits of nature, you create one of several minor natural effects within range.")
            .from_source(srd),
        Spell::new("Mage Hand", 0, SpellSchool::Conjuration)
            .for_classes(&[Bard, Sorcerer, Warlock, Wizard])
            .cast("1 action", "30 feet", "1 minute")
            .with_components("V, S")
            .describe("A spectral, floating hand appears at a point you choose within range. It can manipulate objects but can't attack or carry more than 10 pounds.")
            .from_source(srd),
        Spell::new("Mending", 0, SpellSchool::Transmutation)
            .for_classes(&[Artificer, Bard, Cleric, Druid, Sorcerer, Wizard])
            .cast("1 minute", "Touch", "Instantaneous")
            .with_components("V, S, M (two lodestones)")
            .describe("This spell repairs a single break or tear in an object you touch, as long as the damage is no larger than 1 foot in any dimension.")
            .from_source(srd),
        // 1st level
        Spell::new("Magic Missile", 1, SpellSchool::Evocation)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 action", "120 feet", "Instantaneous")
            .with_components("V, S")
            .describe("You create three glowing darts of magical force. Each dart hits a creature of your choice that you can see within range, dealing 1d4 + 1 force damage.")
            .from_source(srd),
        Spell::new("Cure Wounds", 1, SpellSchool::Evocation)
            .for_classes(&[Bard, Cleric, Druid, Paladin, Ranger])
            .cast("1 action", "Touch", "Instantaneous")
            .with_components("V, S")
            .describe("A creature you touch regains hit points equal to 1d8 + your spellcasting ability modifier. This spell has no effect on undead or constructs.")
            .from_source(srd),
        Spell::new("Shield", 1, SpellSchool::Abjuration)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 reaction", "Self", "1 round")
            .with_components("V, S")
            .describe("An invisible barrier of magical force appears and protects you. Until the start of your next turn, you have a +5 bonus to AC.")
            .from_source(srd),
        Spell::new("Hex", 1, SpellSchool::Enchantment)
            .for_classes(&[Warlock])
            .cast("1 bonus action", "90 feet", "Concentration, up to 1 hour")
            .with_components("V, S, M (the petrified eye of a newt)")
            .describe("You place a curse on a creature that you can see within range. You deal an extra 1d6 necrotic damage to the target whenever you hit it with an attack.")
            .concentrating()
            .from_source("PHB"),
        Spell::new("Detect Magic", 1, SpellSchool::Divination)
            .for_classes(&[Artificer, Bard, Cleric, Druid, Paladin, Ranger, Sorcerer, Wizard])
            .cast("1 action", "Self", "Concentration, up to 10 minutes")
            .with_components("V, S")
            .describe("For the duration, you sense the presence of magic within 30 feet of you.")
            .concentrating()
            .as_ritual()
            .from_source(srd),
        // 2nd level
        Spell::new("Misty Step", 2, SpellSchool::Conjuration)
            .for_classes(&[Sorcerer, Warlock, Wizard])
            .cast("1 bonus action", "Self", "Instantaneous")
            .with_components("V")
            .describe("Briefly surrounded by silvery mist, you teleport up to 30 feet to an unoccupied space that you can see.")
            .from_source(srd),
        // 3rd level
        Spell::new("Fireball", 3, SpellSchool::Evocation)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 action", "150 feet", "Instantaneous")
            .with_components("V, S, M (a tiny ball of bat guano and sulfur)")
            .describe("A bright streak flashes from your pointing finger to a point you choose within range and blossoms into an explosion of flame. Each creature in a 20-foot-radius sphere must make a Dexterity saving throw, taking 8d6 fire damage on a failure.")
            .from_source(srd),
        Spell::new("Spirit Guardians", 3, SpellSchool::Conjuration)
            .for_classes(&[Cleric])
            .cast("1 action", "Self (15-foot radius)", "Concentration, up to 10 minutes")
            .with_components("V, S, M (a holy symbol)")
            .describe("You call forth spirits to protect you. They flit around you to a distance of 15 feet for the duration, damaging hostile creatures that enter the area.")
            .concentrating()
            .from_source(srd),
        // 5th level
        Spell::new("Cone of Cold", 5, SpellSchool::Evocation)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 action", "Self (60-foot cone)", "Instantaneous")
            .with_components("V, S, M (a small crystal or glass cone)")
            .describe("A blast of cold air erupts from your hands. Each creature in a 60-foot cone must make a Constitution saving throw, taking 8d8 cold damage on a failure.")
            .from_source(srd),
        // 7th level
        Spell::new("Finger of Death", 7, SpellSchool::Necromancy)
            .for_classes(&[Sorcerer, Warlock, Wizard])
            .cast("1 action", "60 feet", "Instantaneous")
            .with_components("V, S")
            .describe("You send negative energy coursing through a creature that you can see within range. The target makes a Constitution saving throw, taking 7d8 + 30 necrotic damage on a failure.")
            .from_source(srd),
        // 9th level
        Spell::new("Wish", 9, SpellSchool::Conjuration)
            .for_classes(&[Sorcerer, Wizard])
            .cast("1 action", "Self", "Instantaneous")
            .with_components("V")
            .describe("Wish is the mightiest spell a mortal creature can cast. By simply speaking aloud, you can alter the very foundations of reality in accord with your desires.")
            .from_source(srd),
    ]
}
