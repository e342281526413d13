//! Live dice in spawn order

use crate::tray::physics::BodyHandle;
use crate::tray::types::{Die, DieId, DieKind, Polyhedron};

#[derive(Clone, Debug, Default)]
pub struct DiceRegistry {
    dice: Vec<Die>,
    next_id: u64,
}

impl DiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, polyhedron: Polyhedron, body: BodyHandle) -> DieId {
        let id = DieId(self.next_id);
        self.next_id += 1;
        self.dice.push(Die {
            id,
            kind: polyhedron.kind,
            polyhedron,
            body,
            at_rest: false,
        });
        id
    }

    /// Remove and return every die of `kind`, keeping the others in order.
    pub fn remove_kind(&mut self, kind: DieKind) -> Vec<Die> {
        let (removed, kept) = std::mem::take(&mut self.dice)
            .into_iter()
            .partition(|die| die.kind == kind);
        self.dice = kept;
        removed
    }

    pub fn drain(&mut self) -> Vec<Die> {
        std::mem::take(&mut self.dice)
    }

    pub fn get(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|die| die.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.dice.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Die> {
        self.dice.iter_mut()
    }

    pub fn as_slice(&self) -> &[Die] {
        &self.dice
    }

    pub fn as_mut_slice(&mut self) -> &mut [Die] {
        &mut self.dice
    }

    pub fn count(&self, kind: DieKind) -> usize {
        self.dice.iter().filter(|die| die.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn any_rolling(&self) -> bool {
        self.dice.iter().any(|die| !die.at_rest)
    }
}
