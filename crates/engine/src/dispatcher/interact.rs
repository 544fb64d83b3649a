//! Local-effect handlers: doors, locks, traps, searching, inventory,
//! healing, stances, reloads and turn end.
//!
//! These actions mutate character or dungeon state directly, with
//! collaborators supplying the dice and the domain-specific outcomes.

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, CharacterId, DoorId, DoorState,
    DungeonState, Item, ItemKind, SearchSpotKind, Stance, StatusKind, nominal_cost,
};

use super::{ActionDispatcher, character, character_mut, invalid_target, missing_position};
use crate::error::EngineError;

impl ActionDispatcher {
    // ========================================================================
    // Doors, locks and traps
    // ========================================================================

    pub(super) fn open_door_request(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Door(door) = request.target else {
            return Ok(invalid_target(ActionKind::OpenDoor));
        };
        self.open_door(dungeon, actor, door)
    }

    /// Shared by the OpenDoor action and the BreakDownDoor fallback.
    pub(super) fn open_door(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        door: DoorId,
    ) -> Result<ActionOutcome, EngineError> {
        let name = character(dungeon, actor)?.name.clone();
        let Some(door) = dungeon.door_mut(door) else {
            return Ok(invalid_target(ActionKind::OpenDoor));
        };

        match door.state {
            DoorState::Open => Ok(ActionOutcome::failure("The door is already open.")),
            DoorState::BashedDown => {
                Ok(ActionOutcome::failure("Nothing is left of that door."))
            }
            DoorState::Closed { locked: true } => {
                Ok(ActionOutcome::failure("The door is locked."))
            }
            DoorState::Closed { locked: false } => {
                door.state = DoorState::Open;
                Ok(ActionOutcome::success(
                    format!("{name} opens the door."),
                    nominal_cost(ActionKind::OpenDoor),
                ))
            }
        }
    }

    pub(super) async fn pick_lock(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Door(door_id) = request.target else {
            return Ok(invalid_target(ActionKind::PickLock));
        };
        let name = character(dungeon, actor)?.name.clone();
        let Some(door) = dungeon.door(door_id) else {
            return Ok(invalid_target(ActionKind::PickLock));
        };
        if door.state != (DoorState::Closed { locked: true }) {
            return Ok(ActionOutcome::failure("That door has no lock to pick."));
        }

        let ap = nominal_cost(ActionKind::PickLock);
        let picked = self
            .services()
            .interaction()?
            .request_roll(actor, "pick the lock", 0)
            .await;
        if picked {
            if let Some(door) = dungeon.door_mut(door_id) {
                door.state = DoorState::Closed { locked: false };
            }
            Ok(ActionOutcome::success(
                format!("{name} picks the lock; the door is unlocked."),
                ap,
            ))
        } else {
            // The attempt was made; the AP is gone either way.
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} fails to pick the lock."),
                ap,
            ))
        }
    }

    pub(super) async fn disarm_trap(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Position(pos) = request.target else {
            return Ok(invalid_target(ActionKind::DisarmTrap));
        };
        let name = character(dungeon, actor)?.name.clone();
        let Some(index) = dungeon.trap_at(pos) else {
            return Ok(ActionOutcome::failure("There is no armed trap there."));
        };

        let ap = nominal_cost(ActionKind::DisarmTrap);
        let disarmed = self
            .services()
            .interaction()?
            .request_roll(actor, "disarm the trap", 0)
            .await;
        if disarmed {
            let trap_name = {
                let trap = &mut dungeon.traps[index];
                trap.armed = false;
                trap.name.clone()
            };
            Ok(ActionOutcome::success(
                format!("{name} disarms the {trap_name}."),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} fails to disarm the trap."),
                ap,
            ))
        }
    }

    // ========================================================================
    // Searching and scavenging
    // ========================================================================

    pub(super) async fn search_spot(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
        kind: SearchSpotKind,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Position(pos) = request.target else {
            return Ok(invalid_target(request.kind));
        };
        let name = character(dungeon, actor)?.name.clone();
        let Some(index) = dungeon.search_spot_at(kind, pos) else {
            return Ok(ActionOutcome::failure(format!(
                "There is no {kind} to search there."
            )));
        };
        if dungeon.search_spots[index].searched {
            return Ok(ActionOutcome::failure(format!(
                "That {kind} has already been picked over."
            )));
        }

        let ap = nominal_cost(request.kind);
        let found = self
            .services()
            .interaction()?
            .request_roll(actor, &format!("search the {kind}"), 0)
            .await;
        // One attempt per spot, fruitful or not.
        dungeon.search_spots[index].searched = true;
        if found {
            Ok(ActionOutcome::success(
                format!("{name} searches the {kind} and finds something of use."),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} searches the {kind} but finds nothing."),
                ap,
            ))
        }
    }

    pub(super) async fn search_room(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, room_id) = {
            let ch = character(dungeon, actor)?;
            (ch.name.clone(), ch.room)
        };
        let Some(room_id) = room_id else {
            return Ok(missing_position(&name));
        };
        {
            let Some(room) = dungeon.room(room_id) else {
                return Ok(missing_position(&name));
            };
            if room.searched {
                return Ok(ActionOutcome::failure(
                    "This room has already been searched.",
                ));
            }
        }

        let ap = nominal_cost(ActionKind::SearchRoom);
        let found = self
            .services()
            .interaction()?
            .request_roll(actor, "search the room", 0)
            .await;
        if let Some(room) = dungeon.room_mut(room_id) {
            room.searched = true;
        }
        if found {
            Ok(ActionOutcome::success(
                format!("{name} turns the room over and finds something."),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} searches the room but finds nothing."),
                ap,
            ))
        }
    }

    pub(super) async fn harvest_parts(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::HarvestParts));
        };
        let name = character(dungeon, actor)?.name.clone();
        if !character(dungeon, actor)?.has_inventory() {
            return Ok(ActionOutcome::failure(format!(
                "{name} has nowhere to carry harvested parts."
            )));
        }
        let (corpse_name, dead) = {
            let Some(target) = dungeon.character(target) else {
                return Ok(invalid_target(ActionKind::HarvestParts));
            };
            (target.name.clone(), !target.is_hero() && target.hp.is_empty())
        };
        if !dead {
            return Ok(ActionOutcome::failure(format!(
                "{corpse_name} is in no state to be harvested."
            )));
        }

        let ap = nominal_cost(ActionKind::HarvestParts);
        let harvested = self
            .services()
            .interaction()?
            .request_roll(actor, "harvest parts", 0)
            .await;
        if harvested {
            if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
                hero.backpack
                    .push(Item::new(format!("{corpse_name} parts"), ItemKind::Part));
            }
            Ok(ActionOutcome::success(
                format!("{name} harvests usable parts from {corpse_name}."),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} ruins the parts while harvesting."),
                ap,
            ))
        }
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    pub(super) async fn equip_gear(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.target else {
            return Ok(invalid_target(ActionKind::EquipGear));
        };
        let (name, item) = {
            let ch = character(dungeon, actor)?;
            let Some(hero) = ch.hero() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} carries no gear to equip.",
                    ch.name
                )));
            };
            let Some(item) = hero.backpack.get(slot) else {
                return Ok(invalid_target(ActionKind::EquipGear));
            };
            (ch.name.clone(), item.clone())
        };

        let equipped = self
            .services()
            .inventory()?
            .equip_item(dungeon, actor, &item)
            .await;
        if equipped {
            if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
                hero.backpack.remove(slot);
            }
            Ok(ActionOutcome::success(
                format!("{name} equips the {}.", item.name),
                nominal_cost(ActionKind::EquipGear),
            ))
        } else {
            Ok(ActionOutcome::failure(format!(
                "{name} cannot equip the {}.",
                item.name
            )))
        }
    }

    pub(super) fn add_to_quick_slot(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.target else {
            return Ok(invalid_target(ActionKind::AddItemToQuickSlot));
        };
        let ch = character_mut(dungeon, actor)?;
        let name = ch.name.clone();
        let Some(hero) = ch.hero_mut() else {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no quick slots."
            )));
        };
        if slot >= hero.backpack.len() {
            return Ok(invalid_target(ActionKind::AddItemToQuickSlot));
        }
        if hero.quick_slots.is_full() {
            return Ok(ActionOutcome::failure(format!(
                "{name}'s quick slots are all taken."
            )));
        }

        let item = hero.backpack.remove(slot);
        let item_name = item.name.clone();
        hero.quick_slots.push(item);
        Ok(ActionOutcome::success(
            format!("{name} tucks the {item_name} into a quick slot."),
            nominal_cost(ActionKind::AddItemToQuickSlot),
        ))
    }

    pub(super) async fn identify_item(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.target else {
            return Ok(invalid_target(ActionKind::IdentifyItem));
        };
        let item = {
            let ch = character(dungeon, actor)?;
            let Some(hero) = ch.hero() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} carries nothing to identify.",
                    ch.name
                )));
            };
            let Some(item) = hero.backpack.get(slot) else {
                return Ok(invalid_target(ActionKind::IdentifyItem));
            };
            if item.identified {
                return Ok(ActionOutcome::failure(format!(
                    "The {} holds no further secrets.",
                    item.name
                )));
            }
            item.clone()
        };

        let message = self
            .services()
            .identifier()?
            .identify_item(dungeon, actor, &item)
            .await;
        if let Some(hero) = character_mut(dungeon, actor)?.hero_mut()
            && let Some(item) = hero.backpack.get_mut(slot)
        {
            item.identified = true;
        }
        Ok(ActionOutcome::success(
            message,
            nominal_cost(ActionKind::IdentifyItem),
        ))
    }

    pub(super) async fn throw_potion(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.secondary else {
            return Ok(invalid_target(ActionKind::ThrowPotion));
        };
        let target_name = match request.target {
            ActionTarget::Character(id) => character(dungeon, id)?.name.clone(),
            ActionTarget::Position(pos) => format!("square ({}, {})", pos.x, pos.y),
            _ => return Ok(invalid_target(ActionKind::ThrowPotion)),
        };

        let (name, potion, modifier) = {
            let ch = character(dungeon, actor)?;
            let Some(hero) = ch.hero() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} carries no potions.",
                    ch.name
                )));
            };
            match hero.backpack.get(slot) {
                Some(item) if item.kind == ItemKind::Potion => {
                    // A practiced throwing arm makes the lob easier.
                    let modifier = if ch.statuses.has(StatusKind::Pitcher) {
                        10
                    } else {
                        0
                    };
                    (ch.name.clone(), item.clone(), modifier)
                }
                _ => return Ok(invalid_target(ActionKind::ThrowPotion)),
            }
        };

        // The potion leaves the backpack the moment it is thrown.
        if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
            hero.backpack.remove(slot);
        }

        let ap = nominal_cost(ActionKind::ThrowPotion);
        let on_target = self
            .services()
            .interaction()?
            .request_roll(actor, "throw the potion", modifier)
            .await;
        if on_target {
            Ok(ActionOutcome::success(
                format!("{name} shatters the {} over {target_name}.", potion.name),
                ap,
            ))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("The {} sails wide of {target_name}.", potion.name),
                ap,
            ))
        }
    }

    pub(super) fn drink_potion(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.target else {
            return Ok(invalid_target(ActionKind::DrinkPotion));
        };
        let ch = character_mut(dungeon, actor)?;
        let name = ch.name.clone();
        let Some(hero) = ch.hero_mut() else {
            return Ok(ActionOutcome::failure(format!(
                "{name} carries no potions."
            )));
        };
        match hero.backpack.get(slot) {
            Some(item) if item.kind == ItemKind::Potion => {}
            _ => return Ok(invalid_target(ActionKind::DrinkPotion)),
        }

        let potion = hero.backpack.remove(slot);
        Ok(ActionOutcome::success(
            format!("{name} drinks the {}.", potion.name),
            nominal_cost(ActionKind::DrinkPotion),
        ))
    }

    pub(super) async fn use_trinket(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Item(slot) = request.target else {
            return Ok(invalid_target(ActionKind::UseTrinket));
        };
        let (name, trinket) = {
            let ch = character(dungeon, actor)?;
            let Some(hero) = ch.hero() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} carries no trinkets.",
                    ch.name
                )));
            };
            match hero.backpack.get(slot) {
                Some(item) if item.kind == ItemKind::Trinket => {
                    (ch.name.clone(), item.clone())
                }
                _ => return Ok(invalid_target(ActionKind::UseTrinket)),
            }
        };

        let confirmed = self
            .services()
            .interaction()?
            .request_yes_no(actor, &format!("Use the {}?", trinket.name))
            .await;
        if !confirmed {
            return Ok(ActionOutcome::failure(format!(
                "{name} decided not to use the {}.",
                trinket.name
            )));
        }

        if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
            hero.backpack.remove(slot);
        }
        Ok(ActionOutcome::success(
            format!("{name} invokes the {}.", trinket.name),
            nominal_cost(ActionKind::UseTrinket),
        ))
    }

    // ========================================================================
    // Healing
    // ========================================================================

    pub(super) async fn heal_other(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::HealOther));
        };
        self.heal(dungeon, actor, target, nominal_cost(ActionKind::HealOther))
            .await
    }

    pub(super) async fn heal(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        target: CharacterId,
        ap: u32,
    ) -> Result<ActionOutcome, EngineError> {
        let name = {
            let ch = character(dungeon, actor)?;
            let Some(hero) = ch.hero() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} carries no bandages.",
                    ch.name
                )));
            };
            if hero.bandages == 0 {
                return Ok(ActionOutcome::failure(format!(
                    "{} is out of bandages.",
                    ch.name
                )));
            }
            ch.name.clone()
        };

        if target != actor {
            let healer_pos = character(dungeon, actor)?.position;
            let target_pos = character(dungeon, target)?.position;
            let adjacent = match (healer_pos, target_pos) {
                (Some(a), Some(b)) => self.services().grid()?.is_adjacent(a, b),
                _ => false,
            };
            if !adjacent {
                return Ok(ActionOutcome::failure(format!(
                    "{name} cannot reach that patient."
                )));
            }
        }

        // The bandage is used up before the roll; a bad roll does not
        // put it back in the pack.
        if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
            hero.bandages -= 1;
        }

        let outcome = self
            .services()
            .healer()?
            .apply_bandage(dungeon, actor, target)
            .await;
        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.success,
            ap_spent: ap,
        })
    }

    // ========================================================================
    // Ranged upkeep
    // ========================================================================

    pub(super) async fn reload(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, weapon) = {
            let ch = character(dungeon, actor)?;
            (ch.name.clone(), ch.weapon.clone())
        };
        let Some(weapon) = weapon else {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no weapon to reload."
            )));
        };
        if !weapon.needs_reload() {
            return Ok(ActionOutcome::failure(format!(
                "The {} does not need reloading.",
                weapon.name
            )));
        }

        // Reload costs the weapon's reload stat, not the table value.
        let ap = weapon.reload_cost;
        if !character(dungeon, actor)?.budget.can_afford(ap) {
            return Ok(ActionOutcome::failure(format!(
                "{name} needs {ap} AP to reload the {}.",
                weapon.name
            )));
        }

        let reloaded = self
            .services()
            .interaction()?
            .request_roll(actor, "reload", 0)
            .await;
        if reloaded {
            if let Some(w) = character_mut(dungeon, actor)?.weapon.as_mut() {
                w.loaded = true;
            }
            Ok(ActionOutcome::success(
                format!("{name} reloads the {}.", weapon.name),
                ap,
            ))
        } else {
            // Policy: a fumbled reload still costs the full reload AP,
            // for heroes and monsters alike.
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} fumbles the reload."),
                ap,
            ))
        }
    }

    pub(super) async fn reload_while_moving(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, weapon) = {
            let ch = character(dungeon, actor)?;
            (ch.name.clone(), ch.weapon.clone())
        };
        let Some(weapon) = weapon else {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no weapon to reload."
            )));
        };
        if !weapon.needs_reload() {
            return Ok(ActionOutcome::failure(format!(
                "The {} does not need reloading.",
                weapon.name
            )));
        }

        let reloaded = self
            .services()
            .interaction()?
            .request_roll(actor, "reload on the move", 0)
            .await;
        if reloaded {
            if let Some(w) = character_mut(dungeon, actor)?.weapon.as_mut() {
                w.loaded = true;
            }
            Ok(ActionOutcome::success(
                format!("{name} reloads the {} on the move.", weapon.name),
                nominal_cost(ActionKind::ReloadWhileMoving),
            ))
        } else {
            Ok(ActionOutcome::failure(format!(
                "{name} cannot manage the reload while moving."
            )))
        }
    }

    // ========================================================================
    // Stances and turn flow
    // ========================================================================

    pub(super) fn enter_stance(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        stance: Stance,
    ) -> Result<ActionOutcome, EngineError> {
        let ch = character_mut(dungeon, actor)?;
        if ch.stance == Stance::Prone {
            return Ok(ActionOutcome::failure(format!(
                "{} must stand up first.",
                ch.name
            )));
        }
        ch.stance = stance;
        ch.statuses.remove(StatusKind::Overwatch);
        Ok(ActionOutcome::success(
            format!("{} takes the {stance} stance.", ch.name),
            nominal_cost(ActionKind::Aim),
        ))
    }

    pub(super) fn parry(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let ch = character_mut(dungeon, actor)?;
        if ch.stance == Stance::Prone {
            return Ok(ActionOutcome::failure(format!(
                "{} must stand up first.",
                ch.name
            )));
        }
        ch.stance = Stance::Parry;
        ch.statuses.remove(StatusKind::Overwatch);
        // Parrying consumes the rest of the activation; the dispatcher
        // drains the remaining AP centrally.
        Ok(ActionOutcome::success(
            format!("{} raises a guard, parrying until the next turn.", ch.name),
            0,
        ))
    }

    pub(super) fn set_overwatch(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let ch = character_mut(dungeon, actor)?;
        if ch.stance == Stance::Prone {
            return Ok(ActionOutcome::failure(format!(
                "{} must stand up first.",
                ch.name
            )));
        }
        ch.stance = Stance::Overwatch;
        // The ledger entry is what opposing movement checks against; it
        // lasts until the stance is given up.
        ch.statuses
            .add(crawl_core::ActiveStatusEffect::until_removed(
                StatusKind::Overwatch,
            ));
        Ok(ActionOutcome::success(
            format!("{} settles into overwatch.", ch.name),
            0,
        ))
    }

    pub(super) fn stand_up(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let ch = character_mut(dungeon, actor)?;
        if ch.stance != Stance::Prone {
            return Ok(ActionOutcome::failure(format!(
                "{} is already on their feet.",
                ch.name
            )));
        }
        ch.stance = Stance::Normal;
        ch.statuses.remove(StatusKind::Overwatch);
        Ok(ActionOutcome::success(
            format!("{} stands up.", ch.name),
            nominal_cost(ActionKind::StandUp),
        ))
    }

    pub(super) async fn end_turn(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let ch = character_mut(dungeon, actor)?;
        // Timed effects run down as the activation closes. Leftover AP
        // is drained centrally by the dispatcher.
        ch.statuses.tick_down();
        Ok(ActionOutcome::success(
            format!("{} ends the turn.", ch.name),
            0,
        ))
    }

    pub(super) async fn break_free(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, modifier) = {
            let ch = character(dungeon, actor)?;
            let Some(modifier) = ch.statuses.entangle_escape_modifier() else {
                return Ok(ActionOutcome::failure(format!(
                    "{} is not entangled.",
                    ch.name
                )));
            };
            (ch.name.clone(), modifier)
        };

        let ap = nominal_cost(ActionKind::BreakFree);
        let freed = self
            .services()
            .interaction()?
            .request_roll(actor, "break free", modifier)
            .await;
        if freed {
            character_mut(dungeon, actor)?
                .statuses
                .remove(StatusKind::Entangled);
            Ok(ActionOutcome::success(format!("{name} tears free."), ap))
        } else {
            Ok(ActionOutcome::failure_with_cost(
                format!("{name} strains but stays entangled."),
                ap,
            ))
        }
    }
}
