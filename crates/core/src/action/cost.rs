//! The two AP cost maps.
//!
//! [`nominal_cost`] is the static action → cost table. [`discounted_cost`]
//! layers the pre-action status discounts on top. Outcome-dependent
//! overrides (all-remaining-AP drains, the Frenzied free hit, the
//! weapon reload stat) are applied by the dispatcher because they need
//! the handler result; keeping the two maps separate keeps each
//! independently testable.

use crate::character::{StatusEffects, StatusKind};

use super::ActionKind;

/// Nominal AP cost of an action, before any discount or override.
pub fn nominal_cost(kind: ActionKind) -> u32 {
    use ActionKind::*;
    match kind {
        PowerAttack | ChargeAttack | PickLock | DisarmTrap | SearchRoom | HealSelf => 2,
        IdentifyItem | ReloadWhileMoving | Pray | UsePerk | ShieldBash | StunningStrike => 0,
        _ => 1,
    }
}

/// Nominal cost adjusted for the actor's active status effects.
///
/// Battle Fury discounts PowerAttack to 1 AP.
pub fn discounted_cost(kind: ActionKind, statuses: &StatusEffects) -> u32 {
    match kind {
        ActionKind::PowerAttack if statuses.has(StatusKind::BattleFury) => 1,
        _ => nominal_cost(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ActiveStatusEffect;
    use strum::IntoEnumIterator;

    #[test]
    fn table_matches_the_rulebook() {
        use ActionKind::*;

        for kind in [
            StandardAttack,
            Shove,
            Move,
            OpenDoor,
            SearchFurniture,
            SearchCorpse,
            HealOther,
            Aim,
            HarvestParts,
            ThrowPotion,
            EquipGear,
            AddItemToQuickSlot,
            BreakDownDoor,
            StandUp,
        ] {
            assert_eq!(nominal_cost(kind), 1, "{kind}");
        }
        for kind in [PowerAttack, ChargeAttack, PickLock, DisarmTrap, SearchRoom, HealSelf] {
            assert_eq!(nominal_cost(kind), 2, "{kind}");
        }
        for kind in [
            IdentifyItem,
            ReloadWhileMoving,
            Pray,
            UsePerk,
            ShieldBash,
            StunningStrike,
        ] {
            assert_eq!(nominal_cost(kind), 0, "{kind}");
        }
    }

    #[test]
    fn every_kind_has_a_cost() {
        for kind in ActionKind::iter() {
            assert!(nominal_cost(kind) <= 2);
        }
    }

    #[test]
    fn battle_fury_discounts_power_attack_only() {
        let mut statuses = StatusEffects::empty();
        statuses.add(ActiveStatusEffect::timed(StatusKind::BattleFury, 2));

        assert_eq!(discounted_cost(ActionKind::PowerAttack, &statuses), 1);
        assert_eq!(discounted_cost(ActionKind::ChargeAttack, &statuses), 2);

        let plain = StatusEffects::empty();
        assert_eq!(discounted_cost(ActionKind::PowerAttack, &plain), 2);
    }
}
