//! Room-reference resolution - maps diagnostic room labels onto plan rooms
//!
//! Diagnostics name rooms with free text. Resolution order:
//! 1. room id, when the diagnostic carries one and it names a room
//! 2. exact name match after trimming and lowercasing
//! 3. the first room, in plan order, whose name contains the reference or
//!    is contained by it
//!
//! Step 3 is a heuristic: if two rooms both contain the reference, the one
//! listed first in the plan wins.

use crate::core::types::Point;
use crate::model::Room;
use ahash::AHashMap;

/// How a reference was matched, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchReason {
    Id,
    ExactName,
    PartialName,
}

/// A resolved reference
#[derive(Debug, Clone, Copy)]
pub struct RoomMatch<'a> {
    pub room: &'a Room,
    pub index: usize,
    pub reason: MatchReason,
}

impl RoomMatch<'_> {
    pub fn centroid(&self) -> Point {
        self.room.centroid()
    }
}

/// Normalize a label for comparison
pub fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// How (if at all) a label/id pair refers to a single room
pub fn room_matches(room: &Room, label: &str, id: Option<&str>) -> Option<MatchReason> {
    if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
        if room.id.trim() == id {
            return Some(MatchReason::Id);
        }
    }

    let reference = normalize(label);
    let name = normalize(&room.name);
    if reference.is_empty() || name.is_empty() {
        return None;
    }
    if reference == name {
        Some(MatchReason::ExactName)
    } else if name.contains(&reference) || reference.contains(&name) {
        Some(MatchReason::PartialName)
    } else {
        None
    }
}

/// For one room, pick the entry that refers to it most precisely
///
/// Ties go to the earliest entry. `key` extracts (label, id) from an entry.
pub fn best_entry_for<'e, T, F>(room: &Room, entries: &'e [T], key: F) -> Option<&'e T>
where
    F: Fn(&T) -> (&str, Option<&str>),
{
    entries
        .iter()
        .filter_map(|entry| {
            let (label, id) = key(entry);
            room_matches(room, label, id).map(|reason| (reason, entry))
        })
        .min_by_key(|(reason, _)| *reason)
        .map(|(_, entry)| entry)
}

/// Lookup tables over a plan's rooms
pub struct RoomIndex<'a> {
    rooms: &'a [Room],
    by_name: AHashMap<String, usize>,
    by_id: AHashMap<String, usize>,
}

impl<'a> RoomIndex<'a> {
    pub fn new(rooms: &'a [Room]) -> Self {
        let mut by_name = AHashMap::with_capacity(rooms.len());
        let mut by_id = AHashMap::with_capacity(rooms.len());

        // First occurrence wins for duplicate names or ids
        for (i, room) in rooms.iter().enumerate() {
            let name = normalize(&room.name);
            if !name.is_empty() {
                by_name.entry(name).or_insert(i);
            }
            let id = room.id.trim();
            if !id.is_empty() {
                by_id.entry(id.to_string()).or_insert(i);
            }
        }

        Self {
            rooms,
            by_name,
            by_id,
        }
    }

    /// Resolve a free-text reference
    pub fn resolve(&self, label: &str) -> Option<RoomMatch<'a>> {
        self.resolve_with_id(label, None)
    }

    /// Resolve a reference, trying its room id first when given
    pub fn resolve_with_id(&self, label: &str, id: Option<&str>) -> Option<RoomMatch<'a>> {
        if let Some(&index) = id.and_then(|id| self.by_id.get(id.trim())) {
            return Some(self.hit(index, MatchReason::Id));
        }

        let reference = normalize(label);
        if reference.is_empty() {
            return None;
        }

        if let Some(&index) = self.by_name.get(&reference) {
            return Some(self.hit(index, MatchReason::ExactName));
        }

        let found = self.rooms.iter().position(|room| {
            let name = normalize(&room.name);
            !name.is_empty() && (name.contains(&reference) || reference.contains(&name))
        });
        if found.is_none() {
            tracing::debug!(reference = %label, "room reference did not resolve");
        }
        found.map(|index| self.hit(index, MatchReason::PartialName))
    }

    fn hit(&self, index: usize, reason: MatchReason) -> RoomMatch<'a> {
        RoomMatch {
            room: &self.rooms[index],
            index,
            reason,
        }
    }
}
