//! The live-ship roster: the player followed by every enemy, in spawn order.
//!
//! Ships live in an arena of slots threaded into a singly-linked list by
//! index.  Slot 0 is always the player and is never unlinked; enemy slots
//! are recycled through a free list and carry a generation counter so a
//! stale `ShipId` can never reach the ship that later reuses its slot.

use tracing::debug;

use crate::entities::{Entity, Spaceship};

const PLAYER_INDEX: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShipId {
    index: usize,
    generation: u32,
}

impl ShipId {
    pub fn is_player(&self) -> bool {
        self.index == PLAYER_INDEX
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    ship: Option<Spaceship>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct Roster {
    nodes: Vec<Node>,
    free: Vec<usize>,
    /// Last node of the list, where new enemies are linked in.
    last: usize,
    len: usize,
}

impl Roster {
    pub fn new(player: Spaceship) -> Self {
        Roster {
            nodes: vec![Node {
                generation: 0,
                ship: Some(player),
                next: None,
            }],
            free: Vec::new(),
            last: PLAYER_INDEX,
            len: 1,
        }
    }

    pub fn player_id(&self) -> ShipId {
        ShipId {
            index: PLAYER_INDEX,
            generation: self.nodes[PLAYER_INDEX].generation,
        }
    }

    pub fn player(&self) -> &Spaceship {
        match self.nodes[PLAYER_INDEX].ship.as_ref() {
            Some(ship) => ship,
            None => unreachable!("player slot is never vacated"),
        }
    }

    pub fn player_mut(&mut self) -> &mut Spaceship {
        match self.nodes[PLAYER_INDEX].ship.as_mut() {
            Some(ship) => ship,
            None => unreachable!("player slot is never vacated"),
        }
    }

    /// Put a fresh player in place and drop every enemy.  Enemy slots are
    /// kept and retired like any other removal, so ids from before the
    /// reset stay stale.
    pub fn reset(&mut self, player: Spaceship) {
        self.free.clear();
        for (index, node) in self.nodes.iter_mut().enumerate().skip(PLAYER_INDEX + 1) {
            node.next = None;
            if node.ship.take().is_some() {
                node.generation = node.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        let head = &mut self.nodes[PLAYER_INDEX];
        head.ship = Some(player);
        head.next = None;
        self.last = PLAYER_INDEX;
        self.len = 1;
    }

    /// Number of ships, player included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn enemy_count(&self) -> usize {
        self.len - 1
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.nodes
            .get(id.index)
            .is_some_and(|node| node.generation == id.generation && node.ship.is_some())
    }

    pub fn get(&self, id: ShipId) -> Option<&Spaceship> {
        let node = self.nodes.get(id.index)?;
        if node.generation != id.generation {
            return None;
        }
        node.ship.as_ref()
    }

    pub fn get_mut(&mut self, id: ShipId) -> Option<&mut Spaceship> {
        let node = self.nodes.get_mut(id.index)?;
        if node.generation != id.generation {
            return None;
        }
        node.ship.as_mut()
    }

    /// Mutable access to two distinct ships at once.
    pub fn get_pair_mut(&mut self, a: ShipId, b: ShipId) -> Option<(&mut Spaceship, &mut Spaceship)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (lo, hi, swapped) = if a.index < b.index {
            (a.index, b.index, false)
        } else {
            (b.index, a.index, true)
        };
        let (left, right) = self.nodes.split_at_mut(hi);
        let first = left[lo].ship.as_mut()?;
        let second = right[0].ship.as_mut()?;
        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    /// The ship linked after `id`, if any.
    pub fn next_of(&self, id: ShipId) -> Option<ShipId> {
        if !self.contains(id) {
            return None;
        }
        let index = self.nodes[id.index].next?;
        Some(ShipId {
            index,
            generation: self.nodes[index].generation,
        })
    }

    /// Ships in list order, player first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            roster: self,
            cursor: Some(PLAYER_INDEX),
        }
    }

    /// Snapshot of the ids in list order, for passes that mutate ships.
    pub fn ids(&self) -> Vec<ShipId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Link a new enemy after the current last ship.
    pub fn append_enemy(&mut self, entity: Entity, health: u32) -> ShipId {
        let ship = Spaceship::new(entity, health);
        let index = match self.free.pop() {
            Some(index) => {
                let node = &mut self.nodes[index];
                node.ship = Some(ship);
                node.next = None;
                index
            }
            None => {
                self.nodes.push(Node {
                    generation: 0,
                    ship: Some(ship),
                    next: None,
                });
                self.nodes.len() - 1
            }
        };
        self.nodes[self.last].next = Some(index);
        self.last = index;
        self.len += 1;
        ShipId {
            index,
            generation: self.nodes[index].generation,
        }
    }

    /// Unlink and drop `node`, which must directly follow `predecessor`.
    /// Returns the ship that now follows `predecessor` so a traversal can
    /// carry on from there.
    ///
    /// The player can never be removed.  Asking for it, or passing a pair
    /// that is not linked, asserts in debug builds and returns `None`
    /// without touching the list in release builds.
    pub fn remove(&mut self, predecessor: ShipId, node: ShipId) -> Option<ShipId> {
        let linked = !node.is_player()
            && self.contains(predecessor)
            && self.contains(node)
            && self.nodes[predecessor.index].next == Some(node.index);
        debug_assert!(linked, "remove({predecessor:?}, {node:?}): not a removable link");
        if !linked {
            return None;
        }

        let successor = self.nodes[node.index].next;
        self.nodes[predecessor.index].next = successor;
        if self.last == node.index {
            self.last = predecessor.index;
        }

        let slot = &mut self.nodes[node.index];
        slot.ship = None;
        slot.next = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(node.index);
        self.len -= 1;

        successor.map(|index| ShipId {
            index,
            generation: self.nodes[index].generation,
        })
    }

    /// Remove every enemy whose rectangle is entirely above or entirely
    /// below the screen.  Returns how many were removed.
    pub fn reclaim_offscreen(&mut self, screen_height: i32) -> usize {
        let mut removed = 0;
        let mut predecessor = self.player_id();
        let mut cursor = self.next_of(predecessor);
        while let Some(id) = cursor {
            let offscreen = self
                .get(id)
                .map(|ship| ship.rect().bottom() < 0 || ship.rect().y > screen_height)
                .unwrap_or(false);
            if offscreen {
                cursor = self.remove(predecessor, id);
                removed += 1;
            } else {
                predecessor = id;
                cursor = self.next_of(id);
            }
        }
        if removed > 0 {
            debug!(removed, "reclaimed off-screen enemies");
        }
        removed
    }

    /// Keep the player on screen: `x ∈ [-w/2, screen_w - w/2]`,
    /// `y ∈ [-h/2, screen_h - h]`.
    pub fn clamp_player_bounds(&mut self, screen_width: i32, screen_height: i32) {
        let rect = &mut self.player_mut().entity.rect;
        rect.x = rect.x.max(-(rect.w / 2)).min(screen_width - rect.w / 2);
        rect.y = rect.y.max(-(rect.h / 2)).min(screen_height - rect.h);
    }
}

pub struct Iter<'a> {
    roster: &'a Roster,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ShipId, &'a Spaceship);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = &self.roster.nodes[index];
        self.cursor = node.next;
        let ship = node.ship.as_ref()?;
        Some((
            ShipId {
                index,
                generation: node.generation,
            },
            ship,
        ))
    }
}
