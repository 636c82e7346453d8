//! Multiclass caster resolution.
//!
//! Pure functions computing a character's derived spellcasting capability
//! from its class-level list: effective caster level, maximum spell slots,
//! cantrip counts, Warlock Pact Magic, and Mystic Arcanum availability.
//! No mutation, no I/O; callers re-run these after any class change.

use crate::classes::{CharacterClass, ClassLevel};
use crate::tables;
use std::collections::BTreeMap;

/// Full casters contribute their whole level to the multiclass sum.
const FULL_CASTERS: [CharacterClass; 5] = [
    CharacterClass::Bard,
    CharacterClass::Cleric,
    CharacterClass::Druid,
    CharacterClass::Sorcerer,
    CharacterClass::Wizard,
];

/// Half casters contribute half their level, rounded up.
const HALF_CASTERS: [CharacterClass; 3] = [
    CharacterClass::Artificer,
    CharacterClass::Paladin,
    CharacterClass::Ranger,
];

fn is_full_caster(class: CharacterClass) -> bool {
    FULL_CASTERS.contains(&class)
}

fn is_half_caster(class: CharacterClass) -> bool {
    HALF_CASTERS.contains(&class)
}

/// Caster-level contribution from the class list alone, before the Eldritch
/// Knight addition and before the level-20 clamp.
fn class_caster_level(classes: &[ClassLevel]) -> u16 {
    classes
        .iter()
        .map(|cl| {
            if is_full_caster(cl.class) {
                cl.level as u16
            } else if is_half_caster(cl.class) {
                // Round up: level 1 -> 1, 2 -> 1, 3 -> 2, ...
                (cl.level as u16).div_ceil(2)
            } else {
                // Warlock uses Pact Magic separately; Custom and the
                // non-casters contribute nothing.
                0
            }
        })
        .sum()
}

/// Third-caster contribution from an Eldritch Knight fighter level.
///
/// Only applies from level 3, when the subclass is chosen.
fn eldritch_knight_contribution(fighter_level: u8) -> u16 {
    if fighter_level >= 3 {
        (fighter_level as u16).div_ceil(3)
    } else {
        0
    }
}

/// Effective caster level for the full-caster slot table.
///
/// Full casters count whole levels, half casters count `ceil(level / 2)`,
/// Warlock is excluded, and an Eldritch Knight fighter of level 3+ adds
/// `ceil(level / 3)`. Capped at 20.
pub fn multiclass_caster_level(classes: &[ClassLevel], eldritch_knight_level: u8) -> u8 {
    let total = class_caster_level(classes) + eldritch_knight_contribution(eldritch_knight_level);
    total.min(20) as u8
}

/// Maximum spell slots per spell level, as `{spell_level: slots}`.
///
/// Looks up the effective caster level in the full-caster table. When the
/// Eldritch Knight is the character's only source of slots, the dedicated
/// (smaller) Eldritch Knight table is used instead. Warlock Pact Magic slots
/// are never included; query [`warlock_pact_slots`] separately.
pub fn max_spell_slots(classes: &[ClassLevel], eldritch_knight_level: u8) -> BTreeMap<u8, u8> {
    let base = class_caster_level(classes);

    if base == 0 {
        if eldritch_knight_level >= 3 {
            return tables::eldritch_knight_slots(eldritch_knight_level.min(20))
                .iter()
                .copied()
                .collect();
        }
        return BTreeMap::new();
    }

    let effective = (base + eldritch_knight_contribution(eldritch_knight_level)).min(20) as u8;
    tables::full_caster_slots(effective).iter().copied().collect()
}

/// The character's Warlock level, or 0 if they have no Warlock levels.
pub fn warlock_level(classes: &[ClassLevel]) -> u8 {
    classes
        .iter()
        .find(|cl| cl.class == CharacterClass::Warlock)
        .map(|cl| cl.level)
        .unwrap_or(0)
}

/// Warlock Pact Magic slots as `(slot_count, slot_level)`, or `(0, 0)` for
/// non-warlocks. Keyed purely on warlock level, independent of other classes.
pub fn warlock_pact_slots(warlock_level: u8) -> (u8, u8) {
    tables::warlock_pact_slots(warlock_level.min(20))
}

/// Spell levels (6-9) for which the warlock has Mystic Arcanum, ascending.
///
/// Each is usable once per long rest; usage is tracked on the character.
pub fn warlock_mystic_arcanum_levels(warlock_level: u8) -> Vec<u8> {
    tables::MYSTIC_ARCANUM_UNLOCKS
        .iter()
        .filter(|(required, _)| warlock_level >= *required)
        .map(|(_, spell_level)| *spell_level)
        .collect()
}

/// Cantrips known for a single class at a given level, from that class's
/// threshold table.
pub fn cantrips_for_class(class: CharacterClass, level: u8) -> u8 {
    tables::cantrip_thresholds(class)
        .iter()
        .filter(|(threshold, _)| level >= *threshold)
        .map(|(_, count)| *count)
        .last()
        .unwrap_or(0)
}

/// Maximum cantrips known across all classes.
///
/// Unlike spell slots, cantrip counts are additive per class rather than
/// resolved through a shared effective caster level. An Eldritch Knight
/// fighter of level 3+ adds its own step-function contribution.
pub fn max_cantrips(classes: &[ClassLevel], eldritch_knight_level: u8) -> u8 {
    let mut total: u8 = classes
        .iter()
        .fold(0, |acc: u8, cl| acc.saturating_add(cantrips_for_class(cl.class, cl.level)));
    if eldritch_knight_level >= 3 {
        total = total.saturating_add(tables::eldritch_knight_cantrips(eldritch_knight_level));
    }
    total
}

/// The highest spell level the character can cast from any source: regular
/// slots, Warlock pact slots, or unlocked Mystic Arcanum. 0 if none.
pub fn max_spell_level(classes: &[ClassLevel], eldritch_knight_level: u8) -> u8 {
    let mut max_level = max_spell_slots(classes, eldritch_knight_level)
        .keys()
        .max()
        .copied()
        .unwrap_or(0);

    let warlock = warlock_level(classes);
    if warlock > 0 {
        let (_, slot_level) = warlock_pact_slots(warlock);
        max_level = max_level.max(slot_level);

        if let Some(arcanum_max) = warlock_mystic_arcanum_levels(warlock).last() {
            max_level = max_level.max(*arcanum_max);
        }
    }

    max_level
}

/// True if the character draws spellcasting from two or more sources.
///
/// Warlock alone is not multiclass for this purpose, but Warlock combined
/// with any full or half caster is.
pub fn is_multiclass_caster(classes: &[ClassLevel]) -> bool {
    let caster_count = classes
        .iter()
        .filter(|cl| is_full_caster(cl.class) || is_half_caster(cl.class))
        .count();

    if warlock_level(classes) > 0 && caster_count > 0 {
        return true;
    }

    caster_count > 1
}

/// The classes present in a class-level list, in order.
pub fn character_classes(classes: &[ClassLevel]) -> Vec<CharacterClass> {
    classes.iter().map(|cl| cl.class).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(entries: &[(CharacterClass, u8)]) -> Vec<ClassLevel> {
        entries
            .iter()
            .map(|(class, level)| ClassLevel::new(*class, *level))
            .collect()
    }

    #[test]
    fn test_full_caster_counts_whole_levels() {
        let classes = levels(&[(CharacterClass::Wizard, 5)]);
        assert_eq!(multiclass_caster_level(&classes, 0), 5);
    }

    #[test]
    fn test_half_caster_rounds_up() {
        for (level, expected) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (20, 10)] {
            let classes = levels(&[(CharacterClass::Paladin, level)]);
            assert_eq!(multiclass_caster_level(&classes, 0), expected, "paladin {level}");
        }
    }

    #[test]
    fn test_half_caster_contribution_is_monotonic() {
        let mut prev = 0;
        for level in 1..=20u8 {
            let classes = levels(&[(CharacterClass::Ranger, level)]);
            let contribution = multiclass_caster_level(&classes, 0);
            assert!(contribution >= prev);
            prev = contribution;
        }
    }

    #[test]
    fn test_warlock_excluded_from_caster_level() {
        let classes = levels(&[(CharacterClass::Warlock, 20)]);
        assert_eq!(multiclass_caster_level(&classes, 0), 0);

        let mixed = levels(&[(CharacterClass::Wizard, 4), (CharacterClass::Warlock, 10)]);
        assert_eq!(multiclass_caster_level(&mixed, 0), 4);
    }

    #[test]
    fn test_caster_level_caps_at_20() {
        let classes = levels(&[
            (CharacterClass::Wizard, 20),
            (CharacterClass::Cleric, 20),
            (CharacterClass::Paladin, 20),
        ]);
        assert_eq!(multiclass_caster_level(&classes, 0), 20);
    }

    #[test]
    fn test_eldritch_knight_contribution_thresholds() {
        let none: Vec<ClassLevel> = Vec::new();
        assert_eq!(multiclass_caster_level(&none, 2), 0);
        assert_eq!(multiclass_caster_level(&none, 3), 1);
        assert_eq!(multiclass_caster_level(&none, 6), 2);
        assert_eq!(multiclass_caster_level(&none, 9), 3);
    }

    #[test]
    fn test_eldritch_knight_blends_with_other_casters() {
        // EK 6 (+2) alongside Wizard 5 indexes the shared full-caster table.
        let classes = levels(&[(CharacterClass::Wizard, 5)]);
        assert_eq!(multiclass_caster_level(&classes, 6), 7);
        let slots = max_spell_slots(&classes, 6);
        assert_eq!(slots.get(&4), Some(&1)); // full-caster level 7 row
    }

    #[test]
    fn test_single_class_slots_match_official_table() {
        let classes = levels(&[(CharacterClass::Cleric, 5)]);
        let slots = max_spell_slots(&classes, 0);
        assert_eq!(slots, BTreeMap::from([(1, 4), (2, 3), (3, 2)]));
    }

    #[test]
    fn test_warlock_only_gets_no_regular_slots() {
        let classes = levels(&[(CharacterClass::Warlock, 5)]);
        assert!(max_spell_slots(&classes, 0).is_empty());
        assert_eq!(warlock_pact_slots(5), (2, 3));
    }

    #[test]
    fn test_eldritch_knight_only_uses_ek_table() {
        // Fighter 7 with no other caster reads the third-caster table, not
        // the full-caster row for its contribution.
        let slots = max_spell_slots(&[], 7);
        assert_eq!(slots, BTreeMap::from([(1, 4), (2, 2)]));
    }

    #[test]
    fn test_no_casters_no_slots() {
        let classes = levels(&[(CharacterClass::Rogue, 10), (CharacterClass::Monk, 5)]);
        assert!(max_spell_slots(&classes, 0).is_empty());
        assert_eq!(max_spell_level(&classes, 0), 0);
    }

    #[test]
    fn test_custom_class_is_ignored() {
        let classes = levels(&[(CharacterClass::Custom, 15)]);
        assert_eq!(multiclass_caster_level(&classes, 0), 0);
        assert!(max_spell_slots(&classes, 0).is_empty());
        assert_eq!(max_cantrips(&classes, 0), 0);
    }

    #[test]
    fn test_mystic_arcanum_unlocks() {
        assert!(warlock_mystic_arcanum_levels(10).is_empty());
        assert_eq!(warlock_mystic_arcanum_levels(11), vec![6]);
        assert_eq!(warlock_mystic_arcanum_levels(13), vec![6, 7]);
        assert_eq!(warlock_mystic_arcanum_levels(17), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_cantrips_are_additive_across_classes() {
        // Wizard 4 knows 4 cantrips, Cleric 1 knows 3; totals add.
        let classes = levels(&[(CharacterClass::Wizard, 4), (CharacterClass::Cleric, 1)]);
        assert_eq!(max_cantrips(&classes, 0), 7);
    }

    #[test]
    fn test_cantrips_for_class_thresholds() {
        assert_eq!(cantrips_for_class(CharacterClass::Wizard, 1), 3);
        assert_eq!(cantrips_for_class(CharacterClass::Wizard, 4), 4);
        assert_eq!(cantrips_for_class(CharacterClass::Wizard, 10), 5);
        assert_eq!(cantrips_for_class(CharacterClass::Paladin, 20), 0);
    }

    #[test]
    fn test_max_spell_level_considers_all_sources() {
        // Warlock 11: pact slot level 5, arcanum level 6.
        let classes = levels(&[(CharacterClass::Warlock, 11)]);
        assert_eq!(max_spell_level(&classes, 0), 6);

        // Wizard 3: slots up to level 2.
        let classes = levels(&[(CharacterClass::Wizard, 3)]);
        assert_eq!(max_spell_level(&classes, 0), 2);

        // Warlock 5 + Wizard 1: pact slot level 3 beats the level 1 slots.
        let classes = levels(&[(CharacterClass::Wizard, 1), (CharacterClass::Warlock, 5)]);
        assert_eq!(max_spell_level(&classes, 0), 3);
    }

    #[test]
    fn test_is_multiclass_caster() {
        let paladin_warlock = levels(&[(CharacterClass::Paladin, 2), (CharacterClass::Warlock, 3)]);
        assert!(is_multiclass_caster(&paladin_warlock));

        let wizard_only = levels(&[(CharacterClass::Wizard, 10)]);
        assert!(!is_multiclass_caster(&wizard_only));

        let warlock_only = levels(&[(CharacterClass::Warlock, 5)]);
        assert!(!is_multiclass_caster(&warlock_only));

        let wizard_cleric = levels(&[(CharacterClass::Wizard, 1), (CharacterClass::Cleric, 1)]);
        assert!(is_multiclass_caster(&wizard_cleric));

        // A non-caster class alongside one caster is not multiclass casting.
        let wizard_rogue = levels(&[(CharacterClass::Wizard, 3), (CharacterClass::Rogue, 2)]);
        assert!(!is_multiclass_caster(&wizard_rogue));
    }

    #[test]
    fn test_paladin_warlock_end_to_end() {
        let classes = levels(&[(CharacterClass::Paladin, 4), (CharacterClass::Warlock, 3)]);
        assert_eq!(multiclass_caster_level(&classes, 0), 2);
        assert_eq!(max_spell_slots(&classes, 0), BTreeMap::from([(1, 3)]));
        assert_eq!(warlock_pact_slots(3), (2, 2));
    }
}
