use std::{error, fmt};

use crate::lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCreationError {
    NullArgument,
    InvalidArgument,
}

impl fmt::Display for StackCreationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use StackCreationError::*;
        match self {
            NullArgument => write!(
                f,
                "Stack(constructor) - {}",
                lang!["Hiányzó paraméter.", "Null parameter received."]
            ),
            InvalidArgument => write!(
                f,
                "Stack(constructor) - {}",
                lang![
                    "Érvénytelen paraméter: csoport nem tartalmazhat csoportot.",
                    "Invalid parameter: a group cannot hold another group."
                ]
            ),
        }
    }
}

impl error::Error for StackCreationError {}
