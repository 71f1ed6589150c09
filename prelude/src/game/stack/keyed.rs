//! Insertion-ordered map of child stacks.

use std::collections::HashMap;

use super::Stack;

/// Children of a stack, keyed by `u32` and iterated in insertion order.
#[derive(Debug, Default)]
pub struct KeyedStacks {
    order: Vec<u32>,
    stacks: HashMap<u32, Stack>,
}

impl KeyedStacks {
    pub(super) fn new() -> Self {
        KeyedStacks::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, key: u32) -> bool {
        self.stacks.contains_key(&key)
    }

    pub fn get(&self, key: u32) -> Option<&Stack> {
        self.stacks.get(&key)
    }

    pub(super) fn get_mut(&mut self, key: u32) -> Option<&mut Stack> {
        self.stacks.get_mut(&key)
    }

    /// The first child still present, in insertion order.
    pub fn first(&self) -> Option<&Stack> {
        self.order.first().and_then(|key| self.stacks.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &Stack> {
        self.iter().map(|(_, stack)| stack)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Stack)> {
        self.order
            .iter()
            .filter_map(move |key| self.stacks.get(key).map(|stack| (*key, stack)))
    }

    /// Caller has already checked that `key` is free.
    pub(super) fn insert(&mut self, key: u32, stack: Stack) {
        self.order.push(key);
        self.stacks.insert(key, stack);
    }

    pub(super) fn remove(&mut self, key: u32) -> Option<Stack> {
        let stack = self.stacks.remove(&key)?;
        self.order.retain(|k| *k != key);
        Some(stack)
    }

    /// Picks the key for a child with the given preferred id, or `None` when it would collide.
    ///
    /// A preferred id of 0 asks for a generated key: the next sequential index, or the lowest
    /// free index once earlier children have been taken out.
    pub(super) fn allocate_key(&self, preferred: u32) -> Option<u32> {
        let mut key = preferred;

        if key == 0 && !self.is_empty() {
            key = self.len() as u32;

            if self.contains_key(key) {
                // len keys are present and one of them is len, so a gap exists below it
                key = (0..).find(|k| !self.contains_key(*k)).unwrap_or(key);
            }
        }

        if self.contains_key(key) {
            None
        } else {
            Some(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::game::unit::{Counter, Unit, UnitType};

    fn leaf(label: &str, stack_id: i64) -> Stack {
        let unit: Rc<dyn Counter> = Rc::new(Unit::new(label.to_owned(), UnitType::Squad));
        Stack::new_leaf(Some(unit), 0, stack_id).unwrap()
    }

    fn keyed(keys: &[u32]) -> KeyedStacks {
        let mut map = KeyedStacks::new();
        for key in keys {
            map.insert(*key, leaf(&key.to_string(), 0));
        }
        map
    }

    #[test]
    fn empty_map_uses_preferred_id() {
        let map = KeyedStacks::new();
        assert_eq!(map.allocate_key(0), Some(0));
        assert_eq!(map.allocate_key(7), Some(7));
    }

    #[test]
    fn generated_keys_are_sequential() {
        assert_eq!(keyed(&[0]).allocate_key(0), Some(1));
        assert_eq!(keyed(&[0, 1, 2]).allocate_key(0), Some(3));
    }

    #[test]
    fn generated_key_fills_lowest_gap() {
        assert_eq!(keyed(&[0, 2]).allocate_key(0), Some(1));
        assert_eq!(keyed(&[1, 2]).allocate_key(0), Some(0));
    }

    #[test]
    fn generated_key_collision_without_gap_below_len() {
        // len is 2 and key 2 is free, so no scan happens
        assert_eq!(keyed(&[5, 9]).allocate_key(0), Some(2));
    }

    #[test]
    fn preferred_id_collision_is_refused() {
        assert_eq!(keyed(&[0, 3]).allocate_key(3), None);
        assert_eq!(keyed(&[0, 1]).allocate_key(1), None);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut map = keyed(&[4, 1, 9]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![4, 1, 9]);

        assert!(map.remove(1).is_some());
        assert!(map.remove(1).is_none());
        map.insert(1, leaf("again", 0));

        assert_eq!(map.keys().collect::<Vec<_>>(), vec![4, 9, 1]);
        assert_eq!(map.first().and_then(Stack::label), Some("4"));
        assert_eq!(map.values().count(), 3);
    }
}
