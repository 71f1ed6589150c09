//! Stacks group units together, track what each unit is carrying, and hold the position of the
//! group on the board.
//!
//! A stack is either a *leaf*, wrapping a single unit plus the items that unit portages, or a
//! *branch*, grouping leaves so they can be moved together. Branches never hold other branches,
//! and the mode of a stack never changes after construction.
//!
//! While a stack sits inside another one its position label is cleared: the parent is the
//! authority on where the group is. Taking a child back out hands it the parent's position.

use std::{fmt, rc::Rc};

use log::{debug, trace};

use super::unit::Counter;

mod errors;
mod keyed;
mod render;

pub use errors::StackCreationError;
pub use keyed::KeyedStacks;

#[derive(Debug)]
enum Contents {
    Leaf {
        unit: Rc<dyn Counter>,
        unit_id: u32,
        stack_id: u32,
        portaged_items: KeyedStacks,
    },
    Branch {
        sub_stacks: KeyedStacks,
    },
}

#[derive(Debug)]
pub struct Stack {
    contents: Contents,
    position_label: String,
}

fn clamp_id(id: i64) -> u32 {
    id.clamp(0, u32::MAX as i64) as u32
}

impl Stack {
    /// Wraps a single unit. Negative ids are stored as 0.
    ///
    /// A non-zero `stack_id` is used as this stack's key when it is added to another stack, so
    /// either leave every id at 0 or make every id unique: mixing the two can make adds fail.
    pub fn new_leaf(
        unit: Option<Rc<dyn Counter>>,
        unit_id: i64,
        stack_id: i64,
    ) -> Result<Self, StackCreationError> {
        let unit = unit.ok_or(StackCreationError::NullArgument)?;

        Ok(Stack {
            contents: Contents::Leaf {
                unit,
                unit_id: clamp_id(unit_id),
                stack_id: clamp_id(stack_id),
                portaged_items: KeyedStacks::new(),
            },
            position_label: String::new(),
        })
    }

    pub fn new_leaf_simple(unit: Option<Rc<dyn Counter>>) -> Result<Self, StackCreationError> {
        Stack::new_leaf(unit, 0, 0)
    }

    /// Starts a group from a leaf. The group takes over the leaf's position.
    pub fn new_branch(initial: Option<Stack>) -> Result<Self, StackCreationError> {
        let mut initial = initial.ok_or(StackCreationError::NullArgument)?;
        if initial.is_branch() {
            return Err(StackCreationError::InvalidArgument);
        }

        let position_label = std::mem::take(&mut initial.position_label);

        // The first key of an empty group is the preferred id
        let mut sub_stacks = KeyedStacks::new();
        sub_stacks.insert(initial.stack_id(), initial);

        Ok(Stack {
            contents: Contents::Branch { sub_stacks },
            position_label,
        })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.contents, Contents::Leaf { .. })
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.contents, Contents::Branch { .. })
    }

    /// The wrapped unit, `None` for a branch.
    pub fn unit(&self) -> Option<&Rc<dyn Counter>> {
        match &self.contents {
            Contents::Leaf { unit, .. } => Some(unit),
            Contents::Branch { .. } => None,
        }
    }

    /// Caller-supplied id of the wrapped unit; always 0 for a branch.
    pub fn unit_id(&self) -> u32 {
        match self.contents {
            Contents::Leaf { unit_id, .. } => unit_id,
            Contents::Branch { .. } => 0,
        }
    }

    /// Preferred key of this stack inside a parent; always 0 for a branch.
    pub fn stack_id(&self) -> u32 {
        match self.contents {
            Contents::Leaf { stack_id, .. } => stack_id,
            Contents::Branch { .. } => 0,
        }
    }

    pub fn position_label(&self) -> &str {
        &self.position_label
    }

    /// `None` clears the position. The label is not validated.
    pub fn set_position_label(&mut self, label: Option<&str>) {
        self.position_label = label.unwrap_or_default().to_owned();
    }

    /// The position if one is set, otherwise the unit's label, otherwise the label of the first
    /// stack in the group. An empty group without a position has no label.
    pub fn label(&self) -> Option<&str> {
        if !self.position_label.is_empty() {
            return Some(self.position_label.as_str());
        }

        match &self.contents {
            Contents::Leaf { unit, .. } => Some(unit.label()),
            Contents::Branch { sub_stacks } => sub_stacks.first().and_then(Stack::label),
        }
    }

    /// Read-only view of the carried items, `None` for a branch or when nothing is carried.
    pub fn portaged_items(&self) -> Option<&KeyedStacks> {
        match &self.contents {
            Contents::Leaf { portaged_items, .. } if !portaged_items.is_empty() => {
                Some(portaged_items)
            }
            _ => None,
        }
    }

    pub fn portaged_item_mut(&mut self, key: u32) -> Option<&mut Stack> {
        match &mut self.contents {
            Contents::Leaf { portaged_items, .. } => portaged_items.get_mut(key),
            Contents::Branch { .. } => None,
        }
    }

    /// Adds an item for the wrapped unit to carry and returns its key.
    ///
    /// The item is handed back unchanged if this stack is a branch, the item is a branch, or
    /// its key collides with an item already carried.
    pub fn add_portaged_item(&mut self, item: Stack) -> Result<u32, Stack> {
        if item.is_branch() {
            debug!("Refusing to portage a group");
            return Err(item);
        }

        match &mut self.contents {
            Contents::Leaf { portaged_items, .. } => add_stack(item, portaged_items),
            Contents::Branch { .. } => {
                debug!("Refusing to portage an item with a group");
                Err(item)
            }
        }
    }

    /// Removes a carried item. It leaves with this stack's current position.
    pub fn take_portaged_item(&mut self, key: u32) -> Option<Stack> {
        let position_label = &self.position_label;
        match &mut self.contents {
            Contents::Leaf { portaged_items, .. } => take_stack(key, portaged_items, position_label),
            Contents::Branch { .. } => None,
        }
    }

    /// Read-only view of the grouped stacks, `None` for a leaf or an emptied group.
    pub fn sub_stacks(&self) -> Option<&KeyedStacks> {
        match &self.contents {
            Contents::Branch { sub_stacks } if !sub_stacks.is_empty() => Some(sub_stacks),
            _ => None,
        }
    }

    pub fn sub_stack_mut(&mut self, key: u32) -> Option<&mut Stack> {
        match &mut self.contents {
            Contents::Branch { sub_stacks } => sub_stacks.get_mut(key),
            Contents::Leaf { .. } => None,
        }
    }

    /// Adds a leaf to this group and returns its key.
    ///
    /// The stack is handed back unchanged if this stack is a leaf, the argument is a branch, or
    /// its key collides with a stack already in the group.
    pub fn add_sub_stack(&mut self, stack: Stack) -> Result<u32, Stack> {
        if stack.is_branch() {
            debug!("Refusing to nest a group inside a group");
            return Err(stack);
        }

        match &mut self.contents {
            Contents::Branch { sub_stacks } => add_stack(stack, sub_stacks),
            Contents::Leaf { .. } => {
                debug!("Refusing to group a stack under a single unit");
                Err(stack)
            }
        }
    }

    /// Removes a stack from this group. It leaves with the group's current position.
    pub fn take_sub_stack(&mut self, key: u32) -> Option<Stack> {
        let position_label = &self.position_label;
        match &mut self.contents {
            Contents::Branch { sub_stacks } => take_stack(key, sub_stacks, position_label),
            Contents::Leaf { .. } => None,
        }
    }
}

fn add_stack(mut stack: Stack, destination: &mut KeyedStacks) -> Result<u32, Stack> {
    let Some(key) = destination.allocate_key(stack.stack_id()) else {
        debug!(
            "Key {} already in use, not adding {}",
            stack.stack_id(),
            stack.label().unwrap_or_default()
        );
        return Err(stack);
    };

    trace!("Adding {} under key {key}", stack.label().unwrap_or_default());
    stack.position_label.clear();
    destination.insert(key, stack);

    Ok(key)
}

fn take_stack(key: u32, source: &mut KeyedStacks, position_label: &str) -> Option<Stack> {
    let Some(mut stack) = source.remove(key) else {
        debug!("No stack under key {key}");
        return None;
    };

    stack.position_label = position_label.to_owned();
    Some(stack)
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label().unwrap_or_default())
    }
}
