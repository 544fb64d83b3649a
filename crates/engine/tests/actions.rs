//! Door, inventory, healing and special-action behavior.

mod common;

use std::sync::Arc;

use crawl_core::{
    ActionKind, ActionRequest, ActionTarget, ActiveStatusEffect, Door, DoorId, DoorState, Item,
    ItemKind, Perk, Position, StatusKind, Weapon,
};

use common::*;

fn with_door(state: DoorState) -> (crawl_core::DungeonState, crawl_core::CharacterId, DoorId) {
    let (mut dungeon, hero, _) = duel();
    let id = DoorId(0);
    dungeon.doors.push(Door { id, state });
    (dungeon, hero, id)
}

fn door_request(kind: ActionKind, door: DoorId) -> ActionRequest {
    ActionRequest::new(kind).with_target(ActionTarget::Door(door))
}

// ============================================================================
// Doors and locks
// ============================================================================

#[tokio::test]
async fn opening_an_unlocked_door() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: false });
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, door_request(ActionKind::OpenDoor, door))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert_eq!(dungeon.door(door).unwrap().state, DoorState::Open);
}

#[tokio::test]
async fn a_locked_door_refuses_to_open_for_free() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: true });
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, door_request(ActionKind::OpenDoor, door))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
    assert_eq!(ap_of(&dungeon, hero), 2);
}

#[tokio::test]
async fn breaking_down_a_locked_door() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: true });
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(
            &mut dungeon,
            hero,
            door_request(ActionKind::BreakDownDoor, door),
        )
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert_eq!(dungeon.door(door).unwrap().state, DoorState::BashedDown);
}

#[tokio::test]
async fn bouncing_off_a_sturdy_lock_still_costs_the_ap() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: true });
    let dispatcher =
        dispatcher_with(base_services().with_locksmith(Arc::new(StubLocksmith::sturdy())));

    let outcome = dispatcher
        .perform_action(
            &mut dungeon,
            hero,
            door_request(ActionKind::BreakDownDoor, door),
        )
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert_eq!(
        dungeon.door(door).unwrap().state,
        DoorState::Closed { locked: true }
    );
}

#[tokio::test]
async fn bashing_an_unlocked_door_falls_back_to_opening_it() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: false });
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(
            &mut dungeon,
            hero,
            door_request(ActionKind::BreakDownDoor, door),
        )
        .await
        .unwrap();

    // The bash itself is a failure, but the door ends up open and the
    // open-door cost was paid.
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert!(outcome.message.contains("opens the door"));
    assert_eq!(dungeon.door(door).unwrap().state, DoorState::Open);
}

#[tokio::test]
async fn picking_a_lock_only_unlocks_it() {
    let (mut dungeon, hero, door) = with_door(DoorState::Closed { locked: true });
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, door_request(ActionKind::PickLock, door))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 2);
    assert_eq!(
        dungeon.door(door).unwrap().state,
        DoorState::Closed { locked: false }
    );
}

// ============================================================================
// Reloading
// ============================================================================

#[tokio::test]
async fn a_fumbled_reload_charges_the_weapon_cost() {
    let (mut dungeon, hero, _) = duel();
    dungeon.character_mut(hero).unwrap().weapon =
        Some(Weapon::ranged("Crossbow", 1).unloaded());
    let dispatcher =
        dispatcher_with(base_services().with_interaction(Arc::new(ScriptedInteraction::refusing())));

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::Reload))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert_eq!(ap_of(&dungeon, hero), 1);
    assert!(dungeon.character(hero).unwrap().weapon.as_ref().unwrap().needs_reload());
}

#[tokio::test]
async fn firing_an_unloaded_weapon_folds_the_reload_into_the_attack() {
    let (mut dungeon, hero, ghoul) = duel();
    dungeon.character_mut(hero).unwrap().weapon =
        Some(Weapon::ranged("Crossbow", 1).unloaded());
    // No Hunter's Eye: the bonus-shot prompt must not fire.
    let dispatcher = dispatcher();

    let request = ActionRequest::new(ActionKind::StandardAttack)
        .with_target(ActionTarget::Character(ghoul));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 2);
    assert_eq!(ap_of(&dungeon, hero), 0);
    assert!(dungeon.character(hero).unwrap().weapon.as_ref().unwrap().loaded);
}

// ============================================================================
// Healing and items
// ============================================================================

#[tokio::test]
async fn healing_without_bandages_is_refused() {
    let (mut dungeon, hero, _) = duel();
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::HealSelf))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
}

#[tokio::test]
async fn self_heal_consumes_a_bandage_and_two_ap() {
    let (mut dungeon, hero, _) = duel();
    dungeon
        .character_mut(hero)
        .unwrap()
        .hero_mut()
        .unwrap()
        .bandages = 2;
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::HealSelf))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 2);
    assert_eq!(
        dungeon.character(hero).unwrap().hero().unwrap().bandages,
        1
    );
}

#[tokio::test]
async fn pitcher_status_improves_the_potion_throw() {
    let (mut dungeon, hero, ghoul) = duel();
    {
        let ch = dungeon.character_mut(hero).unwrap();
        ch.statuses
            .add(ActiveStatusEffect::until_removed(StatusKind::Pitcher));
        ch.hero_mut()
            .unwrap()
            .backpack
            .push(Item::new("Firebomb", ItemKind::Potion));
    }
    let recorder = Arc::new(ModifierRecorder::failing());
    let dispatcher = dispatcher_with(base_services().with_interaction(recorder.clone()));

    let request = ActionRequest::new(ActionKind::ThrowPotion)
        .with_target(ActionTarget::Character(ghoul))
        .with_secondary(ActionTarget::Item(0));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();

    assert_eq!(*recorder.modifiers.lock().unwrap(), vec![10]);
    // The potion shatters somewhere regardless of the miss.
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert!(dungeon
        .character(hero)
        .unwrap()
        .hero()
        .unwrap()
        .backpack
        .is_empty());
}

#[tokio::test]
async fn quick_slots_are_bounded() {
    let (mut dungeon, hero, _) = duel();
    {
        let hero_state = dungeon.character_mut(hero).unwrap().hero_mut().unwrap();
        for i in 0..4 {
            hero_state
                .backpack
                .push(Item::new(format!("Vial {i}"), ItemKind::Potion));
        }
    }
    let dispatcher = dispatcher();

    for _ in 0..3 {
        let request = ActionRequest::new(ActionKind::AddItemToQuickSlot)
            .with_target(ActionTarget::Item(0));
        let outcome = dispatcher
            .perform_action(&mut dungeon, hero, request)
            .await
            .unwrap();
        assert!(outcome.success);
        // 3 slot moves exhaust the default 2 AP budget unless we top up.
        dungeon
            .character_mut(hero)
            .unwrap()
            .budget
            .reset_for_activation(2, 4);
    }

    let request =
        ActionRequest::new(ActionKind::AddItemToQuickSlot).with_target(ActionTarget::Item(0));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert!(outcome.message.contains("quick slots"));
}

#[tokio::test]
async fn identifying_an_item_is_free_and_permanent() {
    let (mut dungeon, hero, _) = duel();
    dungeon
        .character_mut(hero)
        .unwrap()
        .hero_mut()
        .unwrap()
        .backpack
        .push(Item::unidentified("Murky Vial", ItemKind::Potion));
    let dispatcher = dispatcher();

    let request =
        ActionRequest::new(ActionKind::IdentifyItem).with_target(ActionTarget::Item(0));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request.clone())
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 0);

    // A second identify of the same item is pointless.
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();
    assert!(!outcome.success);
}

// ============================================================================
// Special actions
// ============================================================================

#[tokio::test]
async fn taunt_pulls_an_unengaged_monster() {
    let (mut dungeon, hero, ghoul) = duel();
    give_perk(&mut dungeon, hero, Perk::Taunt);
    let dispatcher = dispatcher();

    let request =
        ActionRequest::new(ActionKind::Taunt).with_target(ActionTarget::Character(ghoul));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    let monster = dungeon.character(ghoul).unwrap();
    assert!(monster.statuses.has(StatusKind::Taunt));
    assert_eq!(monster.taunted_by, Some(hero));
}

#[tokio::test]
async fn an_engaged_monster_ignores_the_taunt() {
    let (mut dungeon, hero, ghoul) = duel();
    give_perk(&mut dungeon, hero, Perk::Taunt);
    // Put the hero right next to the ghoul.
    dungeon.character_mut(hero).unwrap().position = Some(Position::new(4, 5));
    let dispatcher = dispatcher();

    let request =
        ActionRequest::new(ActionKind::Taunt).with_target(ActionTarget::Character(ghoul));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
    assert!(!dungeon.character(ghoul).unwrap().statuses.has(StatusKind::Taunt));
}

#[tokio::test]
async fn declining_every_breath_option_costs_nothing() {
    let (mut dungeon, _, ghoul) = duel();
    give_status(
        &mut dungeon,
        ghoul,
        ActiveStatusEffect::until_removed(StatusKind::DragonBreath),
    );
    let dispatcher =
        dispatcher_with(base_services().with_interaction(Arc::new(ScriptedInteraction::refusing())));

    let outcome = dispatcher
        .perform_action(&mut dungeon, ghoul, ActionRequest::new(ActionKind::DragonBreath))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
    assert!(dungeon
        .character(ghoul)
        .unwrap()
        .statuses
        .has(StatusKind::DragonBreath));
}

#[tokio::test]
async fn breathing_fire_spends_the_charge() {
    let (mut dungeon, _, ghoul) = duel();
    give_status(
        &mut dungeon,
        ghoul,
        ActiveStatusEffect::until_removed(StatusKind::DragonBreath),
    );
    // Accept the very first offered shape, a two-square jet.
    let dispatcher = dispatcher_with(
        base_services().with_interaction(Arc::new(
            ScriptedInteraction::approving().with_answers([true]),
        )),
    );

    let outcome = dispatcher
        .perform_action(&mut dungeon, ghoul, ActionRequest::new(ActionKind::DragonBreath))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert!(outcome.message.contains("2 square(s)"));
    assert!(!dungeon
        .character(ghoul)
        .unwrap()
        .statuses
        .has(StatusKind::DragonBreath));
}

#[tokio::test]
async fn recovering_a_dropped_weapon() {
    let (mut dungeon, hero, _) = duel();
    {
        let ch = dungeon.character_mut(hero).unwrap();
        ch.dropped_weapon = ch.weapon.take();
    }
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::PickupWeapon))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    let ch = dungeon.character(hero).unwrap();
    assert_eq!(ch.weapon.as_ref().map(|w| w.name.as_str()), Some("Sword"));
    assert!(ch.dropped_weapon.is_none());
}

#[tokio::test]
async fn fumbling_the_pickup_next_to_an_enemy() {
    let (mut dungeon, hero, _) = duel();
    {
        let ch = dungeon.character_mut(hero).unwrap();
        ch.dropped_weapon = ch.weapon.take();
        ch.position = Some(Position::new(4, 5));
    }
    let dispatcher =
        dispatcher_with(base_services().with_interaction(Arc::new(ScriptedInteraction::refusing())));

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::PickupWeapon))
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert!(dungeon.character(hero).unwrap().dropped_weapon.is_some());
}

#[tokio::test]
async fn entangle_escape_gets_harder_the_longer_it_holds() {
    let (mut dungeon, hero, _) = duel();
    give_status(
        &mut dungeon,
        hero,
        ActiveStatusEffect::until_removed(StatusKind::Entangled),
    );
    // Two activations pass while stuck.
    dungeon.character_mut(hero).unwrap().statuses.tick_down();
    dungeon.character_mut(hero).unwrap().statuses.tick_down();

    let recorder = Arc::new(ModifierRecorder::failing());
    let dispatcher = dispatcher_with(base_services().with_interaction(recorder.clone()));

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::BreakFree))
        .await
        .unwrap();

    assert_eq!(*recorder.modifiers.lock().unwrap(), vec![-20]);
    // The attempt itself costs the AP even on a failure.
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 1);
    assert!(dungeon.character(hero).unwrap().statuses.has(StatusKind::Entangled));
}

#[tokio::test]
async fn breaking_free_clears_the_entanglement() {
    let (mut dungeon, hero, _) = duel();
    give_status(
        &mut dungeon,
        hero,
        ActiveStatusEffect::until_removed(StatusKind::Entangled),
    );
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::BreakFree))
        .await
        .unwrap();

    assert!(outcome.success);
    assert!(!dungeon.character(hero).unwrap().statuses.has(StatusKind::Entangled));
}

#[tokio::test]
async fn a_search_spot_gives_up_its_contents_once() {
    let (mut dungeon, hero, _) = duel();
    dungeon.search_spots.push(crawl_core::SearchSpot::new(
        crawl_core::SearchSpotKind::Furniture,
        Position::new(1, 0),
    ));
    let dispatcher = dispatcher();

    let request = ActionRequest::new(ActionKind::SearchFurniture)
        .with_target(ActionTarget::Position(Position::new(1, 0)));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request.clone())
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 1);

    // The same drawer holds nothing the second time.
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);

    // An empty square has nothing to rummage through at all.
    let elsewhere = ActionRequest::new(ActionKind::SearchFurniture)
        .with_target(ActionTarget::Position(Position::new(2, 0)));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, elsewhere)
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
}

#[tokio::test]
async fn a_primed_hunters_eye_status_grants_the_bonus_shot() {
    let (mut dungeon, hero, ghoul) = duel();
    {
        let ch = dungeon.character_mut(hero).unwrap();
        ch.weapon = Some(Weapon::ranged("Longbow", 1));
        ch.statuses
            .add(ActiveStatusEffect::timed(StatusKind::HuntersEye, 1));
    }
    let dispatcher = dispatcher();

    let request = ActionRequest::new(ActionKind::StandardAttack)
        .with_target(ActionTarget::Character(ghoul));
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, request)
        .await
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.message.contains("Bonus shot"));
}

#[tokio::test]
async fn search_room_succeeds_at_most_once() {
    let (mut dungeon, hero, _) = duel();
    let dispatcher = dispatcher();

    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::SearchRoom))
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.ap_spent, 2);

    dungeon
        .character_mut(hero)
        .unwrap()
        .budget
        .reset_for_activation(2, 4);
    let outcome = dispatcher
        .perform_action(&mut dungeon, hero, ActionRequest::new(ActionKind::SearchRoom))
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.ap_spent, 0);
}
