//! Static spellcasting progression tables.
//!
//! These are the standard 5e lookup tables: the shared multiclass full-caster
//! slot table, the Eldritch Knight third-caster table, Warlock Pact Magic,
//! Mystic Arcanum unlocks, and per-class cantrip thresholds. Rows are
//! `(spell_level, slot_count)` pairs in ascending spell-level order.

use crate::classes::CharacterClass;

/// Full-caster spell slot row for an effective caster level (1-20).
///
/// Returns an empty slice for level 0 or anything out of range.
pub fn full_caster_slots(caster_level: u8) -> &'static [(u8, u8)] {
    match caster_level {
        1 => &[(1, 2)],
        2 => &[(1, 3)],
        3 => &[(1, 4), (2, 2)],
        4 => &[(1, 4), (2, 3)],
        5 => &[(1, 4), (2, 3), (3, 2)],
        6 => &[(1, 4), (2, 3), (3, 3)],
        7 => &[(1, 4), (2, 3), (3, 3), (4, 1)],
        8 => &[(1, 4), (2, 3), (3, 3), (4, 2)],
        9 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 1)],
        10 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2)],
        11 | 12 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1)],
        13 | 14 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1)],
        15 | 16 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1)],
        17 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1), (9, 1)],
        18 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 1), (7, 1), (8, 1), (9, 1)],
        19 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 2), (7, 1), (8, 1), (9, 1)],
        20 => &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 2), (7, 2), (8, 1), (9, 1)],
        _ => &[],
    }
}

/// Eldritch Knight spell slot row for a fighter level (3-20).
///
/// This is the distinct third-caster table, used only when the Eldritch
/// Knight is the character's sole source of spell slots. Not a derivation of
/// the full-caster table.
pub fn eldritch_knight_slots(fighter_level: u8) -> &'static [(u8, u8)] {
    match fighter_level {
        3 => &[(1, 2)],
        4..=6 => &[(1, 3)],
        7..=9 => &[(1, 4), (2, 2)],
        10..=12 => &[(1, 4), (2, 3)],
        13..=15 => &[(1, 4), (2, 3), (3, 2)],
        16..=18 => &[(1, 4), (2, 3), (3, 3)],
        19 | 20 => &[(1, 4), (2, 3), (3, 3), (4, 1)],
        _ => &[],
    }
}

/// Warlock Pact Magic slots as `(slot_count, slot_level)` for a warlock
/// level. Levels above 20 use the level 20 row; level 0 means no slots.
pub fn warlock_pact_slots(warlock_level: u8) -> (u8, u8) {
    match warlock_level {
        0 => (0, 0),
        1 => (1, 1),
        2 => (2, 1),
        3 | 4 => (2, 2),
        5 | 6 => (2, 3),
        7 | 8 => (2, 4),
        9 | 10 => (2, 5),
        11..=16 => (3, 5),
        _ => (4, 5),
    }
}

/// Mystic Arcanum unlocks as `(warlock_level_required, spell_level)`.
pub const MYSTIC_ARCANUM_UNLOCKS: [(u8, u8); 4] = [(11, 6), (13, 7), (15, 8), (17, 9)];

/// Cantrip-count thresholds for a class, as `(class_level, cantrips_known)`
/// in ascending order. Classes with no cantrip progression (Paladin, Ranger,
/// the non-casters, and Custom) return an empty slice.
pub fn cantrip_thresholds(class: CharacterClass) -> &'static [(u8, u8)] {
    match class {
        CharacterClass::Artificer => &[(1, 2), (10, 3), (14, 4)],
        CharacterClass::Bard => &[(1, 2), (4, 3), (10, 4)],
        CharacterClass::Cleric => &[(1, 3), (4, 4), (10, 5)],
        CharacterClass::Druid => &[(1, 2), (4, 3), (10, 4)],
        CharacterClass::Sorcerer => &[(1, 4), (4, 5), (10, 6)],
        CharacterClass::Warlock => &[(1, 2), (4, 3), (10, 4)],
        CharacterClass::Wizard => &[(1, 3), (4, 4), (10, 5)],
        _ => &[],
    }
}

/// Cantrips known by an Eldritch Knight fighter: 2 at level 3, 3 at level 10.
pub fn eldritch_knight_cantrips(fighter_level: u8) -> u8 {
    match fighter_level {
        0..=2 => 0,
        3..=9 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_caster_anchor_rows() {
        // Regression anchors against the official table.
        assert_eq!(full_caster_slots(1), &[(1, 2)]);
        assert_eq!(full_caster_slots(5), &[(1, 4), (2, 3), (3, 2)]);
        assert_eq!(
            full_caster_slots(20),
            &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 3), (6, 2), (7, 2), (8, 1), (9, 1)]
        );
        assert!(full_caster_slots(0).is_empty());
        assert!(full_caster_slots(21).is_empty());
    }

    #[test]
    fn test_full_caster_rows_are_sorted_and_monotonic() {
        for level in 1..=20u8 {
            let row = full_caster_slots(level);
            assert!(!row.is_empty());
            assert!(row.windows(2).all(|w| w[0].0 < w[1].0), "row {level} unsorted");
        }
        // Highest slot level never decreases as caster level rises.
        let mut prev_max = 0;
        for level in 1..=20u8 {
            let max = full_caster_slots(level).last().unwrap().0;
            assert!(max >= prev_max);
            prev_max = max;
        }
    }

    #[test]
    fn test_eldritch_knight_rows() {
        assert_eq!(eldritch_knight_slots(3), &[(1, 2)]);
        assert_eq!(eldritch_knight_slots(7), &[(1, 4), (2, 2)]);
        assert_eq!(eldritch_knight_slots(20), &[(1, 4), (2, 3), (3, 3), (4, 1)]);
        assert!(eldritch_knight_slots(2).is_empty());
    }

    #[test]
    fn test_warlock_pact_slots() {
        assert_eq!(warlock_pact_slots(0), (0, 0));
        assert_eq!(warlock_pact_slots(1), (1, 1));
        assert_eq!(warlock_pact_slots(5), (2, 3));
        assert_eq!(warlock_pact_slots(11), (3, 5));
        assert_eq!(warlock_pact_slots(17), (4, 5));
        assert_eq!(warlock_pact_slots(20), (4, 5));
    }

    #[test]
    fn test_cantrip_thresholds() {
        assert_eq!(cantrip_thresholds(CharacterClass::Wizard), &[(1, 3), (4, 4), (10, 5)]);
        assert!(cantrip_thresholds(CharacterClass::Paladin).is_empty());
        assert!(cantrip_thresholds(CharacterClass::Custom).is_empty());
    }

    #[test]
    fn test_eldritch_knight_cantrips_step_function() {
        assert_eq!(eldritch_knight_cantrips(2), 0);
        assert_eq!(eldritch_knight_cantrips(3), 2);
        assert_eq!(eldritch_knight_cantrips(9), 2);
        assert_eq!(eldritch_knight_cantrips(10), 3);
        assert_eq!(eldritch_knight_cantrips(20), 3);
    }
}
