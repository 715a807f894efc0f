//! Versioned save states.
//!
//! A single [`SaveState`] is a self-describing JSON object. [`SaveSlots`]
//! packs several of them into the compact array form
//! `[version, [tiles, [undo…], [redo…], player] | null, …]`, with one version
//! header for the whole container.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::board::Snapshot;
use crate::error::{GameError, LayoutError};
use crate::game::Game;
use crate::history::History;
use crate::player::Player;

pub const SAVESTATE_VERSION: u32 = 2;
pub const SAVE_SLOTS: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub tiles: String,
    pub undo: Vec<String>,
    pub redo: Vec<String>,
    pub player: u8,
}

/// A save state checked against a board size, ready to be applied.
struct Validated {
    board: Snapshot,
    history: History,
    turn: Player,
}

impl SaveState {
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(s)?)
    }

    fn validate(&self, cell_count: usize) -> Result<Validated, GameError> {
        if self.version != SAVESTATE_VERSION {
            return Err(GameError::InvalidSaveVersion {
                found: self.version,
                expected: SAVESTATE_VERSION,
            });
        }

        let parse_all = |stack: &[String]| {
            stack
                .iter()
                .map(|s| Snapshot::parse(s, cell_count))
                .collect::<Result<Vec<_>, _>>()
        };
        let board = Snapshot::parse(&self.tiles, cell_count)?;
        let undo = parse_all(&self.undo)?;
        let redo = parse_all(&self.redo)?;
        let turn = Player::from_int(self.player).ok_or_else(|| {
            LayoutError::InvalidPlayer(char::from_digit(self.player as u32, 10).unwrap_or('?'))
        })?;

        Ok(Validated {
            board,
            history: History::from_stacks(undo, redo),
            turn,
        })
    }
}

impl Game {
    pub fn save_state(&self) -> SaveState {
        let strings = |stack: &[Snapshot]| stack.iter().map(|s| s.to_string()).collect();
        SaveState {
            version: SAVESTATE_VERSION,
            tiles: self.board().snapshot().to_string(),
            undo: strings(self.history().undo_stack()),
            redo: strings(self.history().redo_stack()),
            player: self.turn() as u8,
        }
    }

    /// Replace the session with `state`. The whole record is validated first;
    /// on error the game is untouched.
    pub fn load_state(&mut self, state: &SaveState) -> Result<(), GameError> {
        let valid = state.validate(self.cell_count())?;
        self.restore_session(&valid.board, valid.history, valid.turn);
        debug!(
            player = %valid.turn,
            undo = state.undo.len(),
            redo = state.redo.len(),
            "save state loaded"
        );
        Ok(())
    }

    pub fn save_to(&self, slots: &mut SaveSlots, slot: usize) -> Result<(), GameError> {
        let entry = slots
            .slots
            .get_mut(slot)
            .ok_or(GameError::EmptySlot(slot))?;
        *entry = Some(self.save_state());
        debug!(slot, "saved to slot");
        Ok(())
    }

    pub fn load_from(&mut self, slots: &SaveSlots, slot: usize) -> Result<(), GameError> {
        let state = slots.get(slot).ok_or(GameError::EmptySlot(slot))?;
        self.load_state(state)
    }
}

/// A fixed number of optional save states sharing one version header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSlots {
    slots: Vec<Option<SaveState>>,
}

impl Default for SaveSlots {
    fn default() -> Self {
        SaveSlots {
            slots: vec![None; SAVE_SLOTS],
        }
    }
}

impl SaveSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&SaveState> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the compact form. A container with a different version, or with
    /// more than [`SAVE_SLOTS`] slots, is rejected as a whole.
    pub fn from_json(s: &str) -> Result<Self, GameError> {
        let packed: PackedSlots = serde_json::from_str(s)?;
        if packed.version != SAVESTATE_VERSION {
            return Err(GameError::InvalidSaveVersion {
                found: packed.version,
                expected: SAVESTATE_VERSION,
            });
        }
        if packed.slots.len() > SAVE_SLOTS {
            return Err(GameError::MalformedSave(format!(
                "expected at most {} save slots, found {}",
                SAVE_SLOTS,
                packed.slots.len()
            )));
        }

        let mut slots: Vec<Option<SaveState>> = packed
            .slots
            .into_iter()
            .map(|slot| {
                slot.map(|(tiles, undo, redo, player)| SaveState {
                    version: packed.version,
                    tiles,
                    undo,
                    redo,
                    player,
                })
            })
            .collect();
        if slots.len() < SAVE_SLOTS {
            slots.resize(SAVE_SLOTS, None);
        }
        Ok(SaveSlots { slots })
    }
}

type PackedSlot = (String, Vec<String>, Vec<String>, u8);

struct PackedSlots {
    version: u32,
    slots: Vec<Option<PackedSlot>>,
}

impl Serialize for SaveSlots {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.slots.len() + 1))?;
        seq.serialize_element(&SAVESTATE_VERSION)?;
        for slot in &self.slots {
            let packed = slot
                .as_ref()
                .map(|s| (&s.tiles, &s.undo, &s.redo, s.player));
            seq.serialize_element(&packed)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PackedSlots {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PackedVisitor;

        impl<'de> Visitor<'de> for PackedVisitor {
            type Value = PackedSlots;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a version number followed by save slots")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let version: u32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::custom("missing save state version"))?;

                let mut slots = Vec::new();
                while let Some(slot) = seq.next_element::<Option<PackedSlot>>()? {
                    slots.push(slot);
                }
                if slots.is_empty() {
                    return Err(de::Error::custom("no save slots"));
                }

                Ok(PackedSlots { version, slots })
            }
        }

        deserializer.deserialize_seq(PackedVisitor)
    }
}
