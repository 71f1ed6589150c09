//! Setup files describing the units on the board and how they are stacked.
//!
//! ```json
//! {
//!   "units": [
//!     { "label": "4-6-7", "unit_type": "Squad" },
//!     { "label": "LMG", "unit_type": "SupportWeapon" }
//!   ],
//!   "groups": [
//!     { "position": "B3", "stacks": [{ "unit": 0, "portaged": [{ "unit": 1 }] }] }
//!   ]
//! }
//! ```
//!
//! A group with a single entry becomes a single-unit stack, larger groups become a group stack.

use std::rc::Rc;

use eyre::Result;
use log::{debug, warn};
use prelude::game::{Counter, Stack, StackCreationError, Unit};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Unit number {0} is not in the unit list")]
    UnknownUnit(usize),
    #[error("Group number {0} has no stacks")]
    EmptyGroup(usize),
    #[error("{0} could not be added, key {1} is already taken")]
    KeyTaken(String, u32),
    #[error(transparent)]
    Creation(#[from] StackCreationError),
}

#[derive(Debug, Deserialize)]
pub struct Setup {
    units: Vec<Unit>,
    groups: Vec<GroupSetup>,
}

#[derive(Debug, Deserialize)]
struct GroupSetup {
    #[serde(default)]
    position: Option<String>,
    stacks: Vec<LeafSetup>,
}

#[derive(Debug, Deserialize)]
struct LeafSetup {
    unit: usize,
    #[serde(default)]
    unit_id: i64,
    #[serde(default)]
    stack_id: i64,
    #[serde(default)]
    portaged: Vec<LeafSetup>,
}

fn key_taken(stack: Stack) -> SetupError {
    SetupError::KeyTaken(stack.to_string(), stack.stack_id())
}

impl LeafSetup {
    fn unit<'a>(&self, units: &'a [Rc<Unit>]) -> Result<&'a Rc<Unit>, SetupError> {
        units.get(self.unit).ok_or(SetupError::UnknownUnit(self.unit))
    }

    fn build(&self, units: &[Rc<Unit>]) -> Result<Stack, SetupError> {
        let unit = Rc::clone(self.unit(units)?) as Rc<dyn Counter>;
        let mut stack = Stack::new_leaf(Some(unit), self.unit_id, self.stack_id)?;

        for item in &self.portaged {
            let carried = item.unit(units)?;
            if !carried.unit_type().is_portable() {
                warn!(
                    "{stack} carries {carried}, a {:?} is not normally portaged",
                    carried.unit_type()
                );
            }

            let key = stack
                .add_portaged_item(item.build(units)?)
                .map_err(key_taken)?;
            debug!("{stack} carries item {key}");
        }

        Ok(stack)
    }
}

impl GroupSetup {
    fn build(&self, number: usize, units: &[Rc<Unit>]) -> Result<Stack, SetupError> {
        let mut leaves = self.stacks.iter().map(|leaf| leaf.build(units));
        let first = leaves.next().ok_or(SetupError::EmptyGroup(number))??;

        let mut stack = if self.stacks.len() == 1 {
            first
        } else {
            let mut branch = Stack::new_branch(Some(first))?;
            for leaf in leaves {
                branch.add_sub_stack(leaf?).map_err(key_taken)?;
            }
            branch
        };

        stack.set_position_label(self.position.as_deref());
        Ok(stack)
    }
}

impl Setup {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Builds one stack per group, in file order.
    pub fn build(&self) -> Result<Vec<Stack>, SetupError> {
        let units: Vec<Rc<Unit>> = self.units.iter().cloned().map(Rc::new).collect();

        self.groups
            .iter()
            .enumerate()
            .map(|(i, group)| group.build(i, &units))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: &str = r#"[
        { "label": "4-6-7", "unit_type": "Squad" },
        { "label": "9-1", "unit_type": "Leader" },
        { "label": "LMG", "unit_type": "SupportWeapon" },
        { "label": "MMG", "unit_type": "SupportWeapon" }
    ]"#;

    fn setup(groups: &str) -> Setup {
        Setup::from_json(&format!(r#"{{ "units": {UNITS}, "groups": {groups} }}"#)).unwrap()
    }

    #[test]
    fn single_entry_group_is_a_leaf() {
        let stacks = setup(r#"[{ "position": "B3", "stacks": [{ "unit": 0, "portaged": [{ "unit": 2 }] }] }]"#)
            .build()
            .unwrap();

        assert_eq!(stacks.len(), 1);
        assert!(stacks[0].is_leaf());
        assert_eq!(stacks[0].label(), Some("B3"));
        assert_eq!(stacks[0].portaged_items().unwrap().len(), 1);
    }

    #[test]
    fn larger_group_is_a_branch() {
        let stacks = setup(
            r#"[
                { "stacks": [{ "unit": 0 }, { "unit": 1, "unit_id": 4 }] },
                { "position": "C5", "stacks": [{ "unit": 3 }] }
            ]"#,
        )
        .build()
        .unwrap();

        assert!(stacks[0].is_branch());
        assert_eq!(stacks[0].label(), Some("4-6-7"));
        let sub_stacks = stacks[0].sub_stacks().unwrap();
        assert_eq!(sub_stacks.keys().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(sub_stacks.get(1).unwrap().unit_id(), 4);
        assert_eq!(stacks[1].label(), Some("C5"));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = setup(r#"[{ "stacks": [{ "unit": 9 }] }]"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::UnknownUnit(9)));
    }

    #[test]
    fn empty_group_is_reported() {
        let err = setup(r#"[{ "stacks": [] }, { "stacks": [] }]"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::EmptyGroup(0)));
    }

    #[test]
    fn clashing_ids_are_reported() {
        let err = setup(
            r#"[{ "stacks": [{ "unit": 0, "portaged": [
                { "unit": 2, "stack_id": 2 },
                { "unit": 3, "stack_id": 2 }
            ] }] }]"#,
        )
        .build()
        .unwrap_err();

        match err {
            SetupError::KeyTaken(label, key) => {
                assert_eq!(label, "MMG");
                assert_eq!(key, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unusual_portaged_unit_is_still_carried() {
        let stacks = setup(r#"[{ "stacks": [{ "unit": 0, "portaged": [{ "unit": 1 }] }] }]"#)
            .build()
            .unwrap();

        let items = stacks[0].portaged_items().unwrap();
        assert_eq!(items.get(0).and_then(Stack::label), Some("9-1"));
    }

    #[test]
    fn unknown_portaged_unit_is_reported() {
        let err = setup(r#"[{ "stacks": [{ "unit": 0, "portaged": [{ "unit": 12 }] }] }]"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::UnknownUnit(12)));
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(Setup::from_json(r#"{ "units": [] }"#).is_err());
    }
}
