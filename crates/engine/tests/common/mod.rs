//! Shared fixtures: a small dungeon and scripted collaborator doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crawl_core::{
    ActiveStatusEffect, CastingOptions, Character, CharacterId, DungeonState, HeroClass, Perk,
    Position, Room, RoomId, SpellRef, SpellTarget, Weapon,
};
use crawl_engine::{
    ActionDispatcher, ActivationOutcome, AttackOutcome, CastAttempt, ChargeOutcome, CombatResolver,
    GridOracle, HealOutcome, Healer, Identifier, Interaction, Inventory, Locksmith,
    MovementWatcher, PowerActivator, Services, ShoveOutcome, Spellcaster, StatusApplier,
};

// ============================================================================
// Dungeon fixtures
// ============================================================================

/// One warrior with a sword facing one revealed ghoul across the room.
pub fn duel() -> (DungeonState, CharacterId, CharacterId) {
    let mut dungeon = DungeonState::new();
    dungeon.rooms.push(Room::new(RoomId(0)));

    let mut hero = Character::new_hero("Brand", HeroClass::Warrior)
        .with_position(Position::new(0, 0))
        .with_weapon(Weapon::melee("Sword"));
    hero.room = Some(RoomId(0));
    let hero = dungeon.spawn(hero);

    let mut ghoul = Character::new_monster("Ghoul").with_position(Position::new(5, 5));
    ghoul.room = Some(RoomId(0));
    let ghoul = dungeon.spawn(ghoul);

    (dungeon, hero, ghoul)
}

/// Every collaborator wired to a permissive default double.
pub fn base_services() -> Services {
    Services::new()
        .with_combat(Arc::new(StubCombat::default()))
        .with_grid(Arc::new(GridStub))
        .with_caster(Arc::new(ScriptedCaster::default()))
        .with_powers(Arc::new(StubPowers::default()))
        .with_interaction(Arc::new(ScriptedInteraction::approving()))
        .with_healer(Arc::new(StubHealer))
        .with_inventory(Arc::new(StubInventory::default()))
        .with_identifier(Arc::new(StubIdentifier))
        .with_locksmith(Arc::new(StubLocksmith::default()))
        .with_status(Arc::new(StubStatusApplier::default()))
}

pub fn dispatcher() -> ActionDispatcher {
    init_tracing();
    ActionDispatcher::new(base_services())
}

/// Test-writer tracing, honoring RUST_LOG. Safe to call repeatedly.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn dispatcher_with(services: Services) -> ActionDispatcher {
    init_tracing();
    ActionDispatcher::new(services)
}

pub fn ap_of(dungeon: &DungeonState, id: CharacterId) -> u32 {
    dungeon.character(id).unwrap().budget.action_points()
}

pub fn give_status(dungeon: &mut DungeonState, id: CharacterId, effect: ActiveStatusEffect) {
    dungeon.character_mut(id).unwrap().statuses.add(effect);
}

pub fn give_perk(dungeon: &mut DungeonState, id: CharacterId, perk: Perk) {
    dungeon
        .character_mut(id)
        .unwrap()
        .hero_mut()
        .unwrap()
        .perks
        .push(perk);
}

// ============================================================================
// Combat double
// ============================================================================

/// Combat resolver whose attacks always resolve the same way.
pub struct StubCombat {
    pub hit: bool,
    pub shove_room: Option<RoomId>,
    pub charge_room: Option<RoomId>,
}

impl Default for StubCombat {
    fn default() -> Self {
        Self {
            hit: true,
            shove_room: None,
            charge_room: None,
        }
    }
}

impl StubCombat {
    pub fn missing() -> Self {
        Self {
            hit: false,
            ..Self::default()
        }
    }

    fn outcome(&self, verb: &str) -> AttackOutcome {
        if self.hit {
            AttackOutcome::hit(format!("The {verb} lands."))
        } else {
            AttackOutcome::miss(format!("The {verb} misses."))
        }
    }
}

#[async_trait]
impl CombatResolver for StubCombat {
    async fn standard_attack(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        _target: CharacterId,
    ) -> AttackOutcome {
        self.outcome("attack")
    }

    async fn power_attack(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        _target: CharacterId,
    ) -> AttackOutcome {
        self.outcome("power attack")
    }

    async fn charge_attack(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        _target: CharacterId,
    ) -> ChargeOutcome {
        ChargeOutcome {
            hit: self.hit,
            message: "The charge connects.".into(),
            attacker_room: self.charge_room,
        }
    }

    async fn shove(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        _target: CharacterId,
    ) -> ShoveOutcome {
        ShoveOutcome {
            hit: self.hit,
            message: "The shove connects.".into(),
            target_room: self.shove_room,
        }
    }

    async fn stunning_strike(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        _target: CharacterId,
    ) -> AttackOutcome {
        self.outcome("stunning strike")
    }

    async fn breath_attack(
        &self,
        _dungeon: &mut DungeonState,
        _attacker: CharacterId,
        squares: &[Position],
    ) -> String {
        format!("Fire washes over {} square(s).", squares.len())
    }
}

// ============================================================================
// Grid double
// ============================================================================

/// Straight-line pathfinder on an open plane; ignores zone of control.
pub struct GridStub;

impl GridOracle for GridStub {
    fn find_shortest_path(
        &self,
        _dungeon: &DungeonState,
        from: Position,
        to: Position,
        _zoc: &[Position],
    ) -> Option<Vec<Position>> {
        let mut path = Vec::new();
        let mut cur = from;
        while cur != to {
            cur = Position::new(
                cur.x + (to.x - cur.x).signum(),
                cur.y + (to.y - cur.y).signum(),
            );
            path.push(cur);
        }
        Some(path)
    }

    fn move_character(
        &self,
        dungeon: &mut DungeonState,
        mover: CharacterId,
        path: &[Position],
    ) -> u32 {
        if let Some(last) = path.last()
            && let Some(ch) = dungeon.character_mut(mover)
        {
            ch.position = Some(*last);
        }
        path.len() as u32
    }

    fn is_adjacent(&self, a: Position, b: Position) -> bool {
        a.is_adjacent(b)
    }

    fn neighbors(&self, position: Position) -> Vec<Position> {
        position.neighbors()
    }

    fn has_line_of_sight(&self, _dungeon: &DungeonState, _from: Position, _to: Position) -> bool {
        true
    }
}

// ============================================================================
// Interaction double
// ============================================================================

/// Scripted prompts: queued answers first, then a fixed default.
pub struct ScriptedInteraction {
    rolls: Mutex<VecDeque<bool>>,
    answers: Mutex<VecDeque<bool>>,
    default: bool,
}

impl ScriptedInteraction {
    /// Every unscripted roll succeeds and every prompt is accepted.
    pub fn approving() -> Self {
        Self {
            rolls: Mutex::new(VecDeque::new()),
            answers: Mutex::new(VecDeque::new()),
            default: true,
        }
    }

    /// Every unscripted roll fails and every prompt is declined.
    pub fn refusing() -> Self {
        Self {
            default: false,
            ..Self::approving()
        }
    }

    pub fn with_rolls(self, rolls: impl IntoIterator<Item = bool>) -> Self {
        *self.rolls.lock().unwrap() = rolls.into_iter().collect();
        self
    }

    pub fn with_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
        *self.answers.lock().unwrap() = answers.into_iter().collect();
        self
    }
}

#[async_trait]
impl Interaction for ScriptedInteraction {
    async fn request_roll(&self, _who: CharacterId, _prompt: &str, _modifier: i32) -> bool {
        self.rolls.lock().unwrap().pop_front().unwrap_or(self.default)
    }

    async fn request_yes_no(&self, _who: CharacterId, _prompt: &str) -> bool {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default)
    }

    async fn request_choice(
        &self,
        _who: CharacterId,
        _prompt: &str,
        options: &[String],
    ) -> Option<usize> {
        if self.default && !options.is_empty() {
            Some(0)
        } else {
            None
        }
    }
}

/// Interaction double that records the modifiers passed to rolls.
pub struct ModifierRecorder {
    pub modifiers: Mutex<Vec<i32>>,
    pub result: bool,
}

impl ModifierRecorder {
    pub fn failing() -> Self {
        Self {
            modifiers: Mutex::new(Vec::new()),
            result: false,
        }
    }
}

#[async_trait]
impl Interaction for ModifierRecorder {
    async fn request_roll(&self, _who: CharacterId, _prompt: &str, modifier: i32) -> bool {
        self.modifiers.lock().unwrap().push(modifier);
        self.result
    }

    async fn request_yes_no(&self, _who: CharacterId, _prompt: &str) -> bool {
        self.result
    }

    async fn request_choice(
        &self,
        _who: CharacterId,
        _prompt: &str,
        _options: &[String],
    ) -> Option<usize> {
        None
    }
}

// ============================================================================
// Casting doubles
// ============================================================================

/// Spellcaster double with a scripted options queue.
pub struct ScriptedCaster {
    options: Mutex<VecDeque<Option<CastingOptions>>>,
    pub attempt: CastAttempt,
}

impl Default for ScriptedCaster {
    fn default() -> Self {
        Self {
            options: Mutex::new(VecDeque::new()),
            attempt: CastAttempt::Funded,
        }
    }
}

impl ScriptedCaster {
    pub fn with_options(self, options: impl IntoIterator<Item = Option<CastingOptions>>) -> Self {
        *self.options.lock().unwrap() = options.into_iter().collect();
        self
    }

    pub fn out_of_mana() -> Self {
        Self {
            attempt: CastAttempt::InsufficientMana,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Spellcaster for ScriptedCaster {
    async fn request_casting_options(
        &self,
        _dungeon: &DungeonState,
        _caster: CharacterId,
        _spell: &SpellRef,
    ) -> Option<CastingOptions> {
        self.options
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Some(CastingOptions::default()))
    }

    async fn cast_spell(
        &self,
        _dungeon: &mut DungeonState,
        _caster: CharacterId,
        _spell: &SpellRef,
        _options: &CastingOptions,
    ) -> CastAttempt {
        self.attempt
    }

    async fn resolve_spell(
        &self,
        _dungeon: &mut DungeonState,
        _caster: CharacterId,
        spell: &SpellRef,
        _target: &SpellTarget,
        _options: &CastingOptions,
    ) -> String {
        format!("{} resolves.", spell.name)
    }
}

/// Power activator double that always grants or always refuses.
pub struct StubPowers {
    pub accept: bool,
}

impl Default for StubPowers {
    fn default() -> Self {
        Self { accept: true }
    }
}

impl StubPowers {
    pub fn refusing() -> Self {
        Self { accept: false }
    }
}

#[async_trait]
impl PowerActivator for StubPowers {
    async fn activate_perk(
        &self,
        _dungeon: &mut DungeonState,
        _who: CharacterId,
        perk: Perk,
    ) -> ActivationOutcome {
        ActivationOutcome {
            success: self.accept,
            message: if self.accept {
                format!("The {perk} perk takes hold.")
            } else {
                format!("Not enough energy for {perk}.")
            },
        }
    }

    async fn activate_prayer(
        &self,
        _dungeon: &mut DungeonState,
        _who: CharacterId,
        prayer: &str,
    ) -> ActivationOutcome {
        ActivationOutcome {
            success: self.accept,
            message: if self.accept {
                format!("The prayer of {prayer} is answered.")
            } else {
                format!("The prayer of {prayer} goes unanswered.")
            },
        }
    }

    async fn request_perk_activation(
        &self,
        _dungeon: &DungeonState,
        _who: CharacterId,
        _perk: Perk,
    ) -> bool {
        self.accept
    }
}

// ============================================================================
// Support doubles
// ============================================================================

pub struct StubHealer;

#[async_trait]
impl Healer for StubHealer {
    async fn apply_bandage(
        &self,
        _dungeon: &mut DungeonState,
        _healer: CharacterId,
        _target: CharacterId,
    ) -> HealOutcome {
        HealOutcome {
            success: true,
            message: "The bandage stops the bleeding.".into(),
        }
    }
}

pub struct StubInventory {
    pub accept: bool,
}

impl Default for StubInventory {
    fn default() -> Self {
        Self { accept: true }
    }
}

#[async_trait]
impl Inventory for StubInventory {
    async fn equip_item(
        &self,
        _dungeon: &mut DungeonState,
        _who: CharacterId,
        _item: &crawl_core::Item,
    ) -> bool {
        self.accept
    }
}

pub struct StubIdentifier;

#[async_trait]
impl Identifier for StubIdentifier {
    async fn identify_item(
        &self,
        _dungeon: &mut DungeonState,
        _who: CharacterId,
        item: &crawl_core::Item,
    ) -> String {
        format!("The {} turns out to be a potion of healing.", item.name)
    }
}

pub struct StubLocksmith {
    pub smash: bool,
}

impl Default for StubLocksmith {
    fn default() -> Self {
        Self { smash: true }
    }
}

impl StubLocksmith {
    pub fn sturdy() -> Self {
        Self { smash: false }
    }
}

#[async_trait]
impl Locksmith for StubLocksmith {
    async fn bash_lock(
        &self,
        _dungeon: &mut DungeonState,
        _who: CharacterId,
        _door: crawl_core::DoorId,
    ) -> bool {
        self.smash
    }
}

pub struct StubStatusApplier {
    pub apply: bool,
}

impl Default for StubStatusApplier {
    fn default() -> Self {
        Self { apply: true }
    }
}

#[async_trait]
impl StatusApplier for StubStatusApplier {
    async fn attempt_to_apply_status(
        &self,
        dungeon: &mut DungeonState,
        _source: CharacterId,
        target: CharacterId,
        effect: ActiveStatusEffect,
    ) -> bool {
        if self.apply
            && let Some(ch) = dungeon.character_mut(target)
        {
            ch.statuses.add(effect);
        }
        self.apply
    }
}

// ============================================================================
// Movement hooks
// ============================================================================

pub struct AlwaysInterrupt;

#[async_trait]
impl MovementWatcher for AlwaysInterrupt {
    async fn on_movement(
        &self,
        _dungeon: &DungeonState,
        _mover: CharacterId,
        _path: &[Position],
    ) -> bool {
        true
    }
}

pub struct NeverInterrupt;

#[async_trait]
impl MovementWatcher for NeverInterrupt {
    async fn on_movement(
        &self,
        _dungeon: &DungeonState,
        _mover: CharacterId,
        _path: &[Position],
    ) -> bool {
        false
    }
}
