//! Advisory validation of a spell against a character's capabilities.
//!
//! Every finding is a plain sentence for direct display; nothing here blocks
//! or mutates. The caller decides whether to proceed, confirm, or ignore.

use crate::character::CharacterSpellList;
use crate::classes::CharacterClass;
use crate::resolver;
use crate::spell::Spell;

/// Which validation warnings to produce. Each flag disables one check
/// entirely when false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSettings {
    pub warn_wrong_class: bool,
    pub warn_spell_too_high_level: bool,
    pub warn_too_many_cantrips: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            warn_wrong_class: true,
            warn_spell_too_high_level: true,
            warn_too_many_cantrips: true,
        }
    }
}

/// Read-only spell lookup used by the cantrip-count check. Implemented by
/// [`crate::store::SpellLibrary`].
pub trait SpellLookup {
    fn spell(&self, name: &str) -> Option<&Spell>;
}

fn class_level(character: &CharacterSpellList, class: CharacterClass) -> u8 {
    character
        .classes
        .iter()
        .find(|cl| cl.class == class)
        .map(|cl| cl.level)
        .unwrap_or(0)
}

fn bard_subclass_matches(character: &CharacterSpellList, fragment: &str) -> bool {
    character
        .classes
        .iter()
        .filter(|cl| cl.class == CharacterClass::Bard)
        .any(|cl| {
            cl.subclass
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(fragment))
        })
}

/// Check a spell against a character's resolved capabilities, returning
/// human-readable warnings (empty when nothing is amiss).
///
/// Checks, in order: class compatibility, spell level versus maximum
/// castable level, and the cantrip cap. The cantrip-count portion of the
/// last check only runs when a `lookup` is supplied, since it needs the
/// levels of the character's known spells.
pub fn validate_spell_for_character(
    spell: &Spell,
    character: &CharacterSpellList,
    lookup: Option<&dyn SpellLookup>,
    settings: &ValidationSettings,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let has_custom_class = character.has_custom_class();

    // Check 1: class compatibility. Custom-class characters can learn
    // anything; a level 10+ Bard can too (Magical Secrets).
    if settings.warn_wrong_class && !has_custom_class {
        let bard_level = class_level(character, CharacterClass::Bard);
        let magical_secrets = bard_level >= 10;

        if !magical_secrets {
            let char_classes = resolver::character_classes(&character.classes);
            let mut allowed = spell.classes.iter().any(|c| char_classes.contains(c));

            // Eldritch Knights learn from the Wizard list.
            if !allowed && character.eldritch_knight_level() > 0 {
                allowed = spell.classes.contains(&CharacterClass::Wizard);
            }

            // Bard college features widen the accessible lists.
            if !allowed && bard_level >= 6 && bard_subclass_matches(character, "lore") {
                allowed = spell.classes.iter().any(|c| {
                    matches!(
                        c,
                        CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Wizard
                    )
                });
            }
            if !allowed && bard_level >= 3 && bard_subclass_matches(character, "moon") {
                allowed = spell.classes.contains(&CharacterClass::Druid);
            }

            if !allowed {
                let char_class_names = char_classes
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                warnings.push(format!(
                    "This spell is for {}, but this character is a {}.",
                    spell.classes_display(),
                    char_class_names
                ));
            }
        }
    }

    // Check 2: spell level too high. Cantrips are exempt.
    if settings.warn_spell_too_high_level && spell.level > 0 {
        let max_level = character.effective_max_spell_level();
        if spell.level > max_level {
            if max_level == 0 {
                warnings.push(format!(
                    "This is a level {} spell, but this character cannot cast any leveled spells yet.",
                    spell.level
                ));
            } else {
                warnings.push(format!(
                    "This is a level {} spell, but this character can only cast spells up to level {}.",
                    spell.level, max_level
                ));
            }
        }
    }

    // Check 3: cantrip cap. Only for cantrips.
    if settings.warn_too_many_cantrips && spell.is_cantrip() {
        let max_cantrips = if has_custom_class {
            character.custom_max_cantrips
        } else {
            resolver::max_cantrips(&character.classes, character.eldritch_knight_level())
        };

        if max_cantrips == 0 && !has_custom_class {
            // A Custom class with 0 means unlimited, so no warning there.
            warnings.push(
                "This is a cantrip, but this character's class(es) cannot learn cantrips."
                    .to_string(),
            );
        } else if max_cantrips > 0 {
            if let Some(lookup) = lookup {
                let current_cantrips = character
                    .known_spells
                    .iter()
                    .filter_map(|name| lookup.spell(name))
                    .filter(|s| s.is_cantrip() && !s.feature_granted)
                    .count();

                if current_cantrips >= max_cantrips as usize {
                    warnings.push(format!(
                        "This character already knows {} cantrip(s), which is the maximum ({}) for their class(es) and level.",
                        current_cantrips, max_cantrips
                    ));
                }
            }
        }
    }

    warnings
}
