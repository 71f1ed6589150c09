//! Text and JSON summaries of a stack.

use itertools::Itertools;
use serde::Serialize;

use super::{Contents, KeyedStacks, Stack};

#[derive(Debug, Serialize)]
struct SerializedEntry<'a> {
    key: u32,
    stack: SerializedStack<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum SerializedStack<'a> {
    Leaf {
        label: Option<&'a str>,
        position: &'a str,
        unit: &'a str,
        unit_id: u32,
        stack_id: u32,
        portaged_items: Vec<SerializedEntry<'a>>,
    },
    Branch {
        label: Option<&'a str>,
        position: &'a str,
        sub_stacks: Vec<SerializedEntry<'a>>,
    },
}

fn serialize_entries(stacks: &KeyedStacks) -> Vec<SerializedEntry<'_>> {
    stacks
        .iter()
        .map(|(key, stack)| SerializedEntry {
            key,
            stack: serialize_stack(stack),
        })
        .collect()
}

fn serialize_stack(stack: &Stack) -> SerializedStack<'_> {
    match &stack.contents {
        Contents::Leaf {
            unit,
            unit_id,
            stack_id,
            portaged_items,
        } => SerializedStack::Leaf {
            label: stack.label(),
            position: &stack.position_label,
            unit: unit.label(),
            unit_id: *unit_id,
            stack_id: *stack_id,
            portaged_items: serialize_entries(portaged_items),
        },
        Contents::Branch { sub_stacks } => SerializedStack::Branch {
            label: stack.label(),
            position: &stack.position_label,
            sub_stacks: serialize_entries(sub_stacks),
        },
    }
}

impl Stack {
    /// One-level overview: ids and label of this stack, then the labels of its direct children.
    pub fn to_text(&self) -> String {
        let children = self.portaged_items().or(self.sub_stacks());

        let mut text = format!("Stack ({},{}):\t{}", self.unit_id(), self.stack_id(), self);

        if let Some(children) = children {
            text.push('\n');
            text += &children.values().map(|child| format!("\t{child}")).join("");
        }

        text
    }

    /// Pretty-printed JSON of the whole tree, children included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serialize_stack(self))
    }
}
