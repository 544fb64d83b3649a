//! The awkward customers: door bashing with its open-door fallback,
//! taunting, dragon breath targeting and weapon recovery under pressure.

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, ActiveStatusEffect, CharacterId,
    DoorState, DungeonState, Item, ItemKind, Perk, Position, StatusKind, nominal_cost,
};

use super::{ActionDispatcher, character, character_mut, invalid_target, missing_position};
use crate::error::EngineError;

impl ActionDispatcher {
    /// Bashing a locked door is a strength test; bashing an unlocked one
    /// is wasted effort and falls back to simply opening it.
    pub(super) async fn break_down_door(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Door(door_id) = request.target else {
            return Ok(invalid_target(ActionKind::BreakDownDoor));
        };
        let name = character(dungeon, actor)?.name.clone();
        let state = match dungeon.door(door_id) {
            Some(door) => door.state,
            None => return Ok(invalid_target(ActionKind::BreakDownDoor)),
        };

        match state {
            DoorState::Open => Ok(ActionOutcome::failure("The door is already open.")),
            DoorState::BashedDown => {
                Ok(ActionOutcome::failure("Nothing is left of that door."))
            }
            DoorState::Closed { locked: false } => {
                // Depth-one delegation: the shoulder never touches an
                // unlocked door.
                let opened = self.open_door(dungeon, actor, door_id)?;
                Ok(ActionOutcome::failure_with_cost(
                    format!("The door was not even locked. {}", opened.message),
                    opened.ap_spent,
                ))
            }
            DoorState::Closed { locked: true } => {
                let ap = nominal_cost(ActionKind::BreakDownDoor);
                let smashed = self
                    .services()
                    .locksmith()?
                    .bash_lock(dungeon, actor, door_id)
                    .await;
                if smashed {
                    if let Some(door) = dungeon.door_mut(door_id) {
                        door.state = DoorState::BashedDown;
                    }
                    Ok(ActionOutcome::success(
                        format!("{name} smashes the door from its hinges."),
                        ap,
                    ))
                } else {
                    Ok(ActionOutcome::failure_with_cost(
                        format!("{name} bounces off the door."),
                        ap,
                    ))
                }
            }
        }
    }

    pub(super) async fn taunt(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::Taunt));
        };

        let name = {
            let ch = character(dungeon, actor)?;
            if !ch.has_perk(Perk::Taunt) {
                return Ok(ActionOutcome::failure(format!(
                    "{} does not know how to taunt.",
                    ch.name
                )));
            }
            ch.name.clone()
        };
        let target_name = {
            let Some(monster) = dungeon.character(target) else {
                return Ok(invalid_target(ActionKind::Taunt));
            };
            if monster.is_hero() {
                return Ok(ActionOutcome::failure(format!(
                    "{name} cannot taunt an ally."
                )));
            }
            monster.name.clone()
        };
        // A monster already trading blows will not be goaded away.
        if dungeon.adjacent_to_any_hero(target) {
            return Ok(ActionOutcome::failure(format!(
                "{target_name} is already engaged and ignores the taunt."
            )));
        }

        let activation = self
            .services()
            .powers()?
            .activate_perk(dungeon, actor, Perk::Taunt)
            .await;
        if !activation.success {
            return Ok(ActionOutcome::failure(activation.message));
        }

        let applied = self
            .services()
            .status()?
            .attempt_to_apply_status(
                dungeon,
                actor,
                target,
                ActiveStatusEffect::until_removed(StatusKind::Taunt),
            )
            .await;
        let ap = nominal_cost(ActionKind::Taunt);
        if applied {
            character_mut(dungeon, target)?.taunted_by = Some(actor);
            Ok(ActionOutcome::success(
                format!("{target_name} takes the bait and turns on {name}!"),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{target_name} is unmoved by the taunt."),
                ap,
            ))
        }
    }

    /// Offers every breath shape around the breather, widest first, and
    /// lets the player decline them all for free.
    pub(super) async fn dragon_breath(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, position) = {
            let ch = character(dungeon, actor)?;
            if !ch.statuses.has(StatusKind::DragonBreath) {
                return Ok(ActionOutcome::failure(format!(
                    "{} has no fire to breathe.",
                    ch.name
                )));
            }
            (ch.name.clone(), ch.position)
        };
        let Some(position) = position else {
            return Ok(missing_position(&name));
        };

        let spots = position.neighbors();
        let mut options: Vec<Vec<Position>> = Vec::new();
        // Jets first: pairs of mutually adjacent squares burn a wider
        // swathe and are offered before single spots.
        for (i, a) in spots.iter().enumerate() {
            for b in &spots[i + 1..] {
                if a.is_adjacent(*b) {
                    options.push(vec![*a, *b]);
                }
            }
        }
        for spot in &spots {
            options.push(vec![*spot]);
        }

        let interaction = self.services().interaction()?;
        let mut chosen: Option<Vec<Position>> = None;
        for option in options {
            let prompt = match option.as_slice() {
                [a, b] => format!("Breathe a jet over ({}, {}) and ({}, {})?", a.x, a.y, b.x, b.y),
                [a] => format!("Breathe fire over ({}, {})?", a.x, a.y),
                _ => continue,
            };
            if interaction.request_yes_no(actor, &prompt).await {
                chosen = Some(option);
                break;
            }
        }
        let Some(squares) = chosen else {
            return Ok(ActionOutcome::failure(format!(
                "{name} decided not to breathe fire."
            )));
        };

        let message = self
            .services()
            .combat()?
            .breath_attack(dungeon, actor, &squares)
            .await;
        character_mut(dungeon, actor)?
            .statuses
            .remove(StatusKind::DragonBreath);
        Ok(ActionOutcome::success(
            message,
            nominal_cost(ActionKind::DragonBreath),
        ))
    }

    pub(super) async fn pickup_weapon(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, dropped, hands_free, is_hero, position) = {
            let ch = character(dungeon, actor)?;
            (
                ch.name.clone(),
                ch.dropped_weapon.clone(),
                ch.weapon.is_none(),
                ch.is_hero(),
                ch.position,
            )
        };
        let Some(dropped) = dropped else {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no weapon on the ground to recover."
            )));
        };
        // A monster with a weapon in hand has nowhere to put a second.
        if !hands_free && !is_hero {
            return Ok(ActionOutcome::failure(format!(
                "{name}'s hands are already full."
            )));
        }

        let ap = nominal_cost(ActionKind::PickupWeapon);

        // Stooping next to an enemy invites a fumble.
        let under_pressure = match position {
            Some(pos) => {
                let enemies = dungeon.opposition_positions(actor);
                let grid = self.services().grid()?;
                enemies.iter().any(|&e| grid.is_adjacent(pos, e))
            }
            None => false,
        };
        if under_pressure {
            let recovered = self
                .services()
                .interaction()?
                .request_roll(actor, "snatch up the weapon", 0)
                .await;
            if !recovered {
                return Ok(ActionOutcome::failure_with_cost(
                    format!("{name} fumbles for the {} under pressure.", dropped.name),
                    ap,
                ));
            }
        }

        let ch = character_mut(dungeon, actor)?;
        ch.dropped_weapon = None;
        if hands_free {
            ch.weapon = Some(dropped.clone());
            Ok(ActionOutcome::success(
                format!("{name} recovers the {}.", dropped.name),
                ap,
            ))
        } else {
            // Hands full but a hero: the weapon goes into the pack.
            if let Some(hero) = ch.hero_mut() {
                hero.backpack
                    .push(Item::new(dropped.name.clone(), ItemKind::Weapon));
            }
            Ok(ActionOutcome::success(
                format!("{name} stows the {} in the pack.", dropped.name),
                ap,
            ))
        }
    }
}
