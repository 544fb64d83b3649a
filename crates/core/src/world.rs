//! Dungeon state: the character arena, rooms, doors and traps.
//!
//! [`DungeonState`] is the single mutable aggregate the dispatcher works
//! on. Grid geometry and pathfinding stay behind the engine's grid
//! collaborator; this module only records who is where.

use alloc::string::String;
use alloc::vec::Vec;

use crate::character::{Character, CharacterId};

/// A grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev adjacency: the eight surrounding squares.
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    /// The eight neighboring squares.
    pub fn neighbors(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) {
                    out.push(Position::new(self.x + dx, self.y + dy));
                }
            }
        }
        out
    }
}

/// Identifies a room in the dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u32);

/// Identifies a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorId(pub u32);

/// Door state as the engine cares about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    Open,
    Closed { locked: bool },
    /// Destroyed by BreakDownDoor; cannot be closed again.
    BashedDown,
}

/// A door between two rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub id: DoorId,
    pub state: DoorState,
}

/// A room with its occupant list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id: RoomId,
    pub occupants: Vec<CharacterId>,
    /// SearchRoom may only succeed once per room.
    pub searched: bool,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            occupants: Vec::new(),
            searched: false,
        }
    }
}

/// A floor trap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trap {
    pub name: String,
    pub position: Position,
    pub armed: bool,
}

/// What a point search target is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchSpotKind {
    Furniture,
    Corpse,
}

/// A searchable point of interest on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpot {
    pub kind: SearchSpotKind,
    pub position: Position,
    /// Each spot gives up its contents at most once.
    pub searched: bool,
}

impl SearchSpot {
    pub fn new(kind: SearchSpotKind, position: Position) -> Self {
        Self {
            kind,
            position,
            searched: false,
        }
    }
}

/// The mutable encounter state the dispatcher operates on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonState {
    characters: Vec<Character>,

    /// The hero party, in marching order.
    pub party: Vec<CharacterId>,

    /// Monsters currently revealed to the party.
    pub revealed_monsters: Vec<CharacterId>,

    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub traps: Vec<Trap>,
    pub search_spots: Vec<SearchSpot>,
}

impl DungeonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character, assigning its id and registering it with the
    /// party or revealed-monster roster and its room's occupant list.
    pub fn spawn(&mut self, mut character: Character) -> CharacterId {
        let id = CharacterId(self.characters.len() as u32);
        character.id = id;

        match &character.kind {
            crate::character::CharacterKind::Hero(_) => self.party.push(id),
            crate::character::CharacterKind::Monster(m) => {
                if m.revealed {
                    self.revealed_monsters.push(id);
                }
            }
        }
        if let Some(room) = character.room
            && let Some(room) = self.room_mut(room)
        {
            room.occupants.push(id);
        }

        self.characters.push(character);
        id
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0 as usize)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0 as usize)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.id == id)
    }

    /// Moves a character to a new room, keeping occupant lists in sync.
    pub fn move_to_room(&mut self, id: CharacterId, to: RoomId) {
        let from = self.character(id).and_then(|c| c.room);
        if from == Some(to) {
            return;
        }
        if let Some(from) = from
            && let Some(room) = self.room_mut(from)
        {
            room.occupants.retain(|&o| o != id);
        }
        if let Some(room) = self.room_mut(to) {
            room.occupants.push(id);
        }
        if let Some(character) = self.character_mut(id) {
            character.room = Some(to);
        }
    }

    /// The opposing-faction set for zone-of-control purposes.
    ///
    /// Heroes are opposed by revealed monsters, monsters by the party.
    /// If the relevant global list is empty, fall back to whoever else
    /// shares the mover's room.
    pub fn opposition_of(&self, id: CharacterId) -> Vec<CharacterId> {
        let Some(mover) = self.character(id) else {
            return Vec::new();
        };

        let global: Vec<CharacterId> = if mover.is_hero() {
            self.revealed_monsters.clone()
        } else {
            self.party.clone()
        };
        if !global.is_empty() {
            return global;
        }

        mover
            .room
            .and_then(|r| self.room(r))
            .map(|room| {
                room.occupants
                    .iter()
                    .copied()
                    .filter(|&o| o != id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Positions of the opposition, for path planning.
    pub fn opposition_positions(&self, id: CharacterId) -> Vec<Position> {
        self.opposition_of(id)
            .into_iter()
            .filter_map(|o| self.character(o).and_then(|c| c.position))
            .collect()
    }

    /// Whether any party hero stands adjacent to the given character.
    pub fn adjacent_to_any_hero(&self, id: CharacterId) -> bool {
        let Some(pos) = self.character(id).and_then(|c| c.position) else {
            return false;
        };
        self.party.iter().any(|&h| {
            h != id
                && self
                    .character(h)
                    .and_then(|c| c.position)
                    .is_some_and(|p| p.is_adjacent(pos))
        })
    }

    /// The armed trap at a position, if any.
    pub fn trap_at(&self, position: Position) -> Option<usize> {
        self.traps
            .iter()
            .position(|t| t.position == position && t.armed)
    }

    /// The search spot of the given kind at a position, if any.
    pub fn search_spot_at(&self, kind: SearchSpotKind, position: Position) -> Option<usize> {
        self.search_spots
            .iter()
            .position(|s| s.kind == kind && s.position == position)
    }
}
