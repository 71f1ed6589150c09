//! Units are the playing pieces that stacks group and carry.
//!
//! A stack only needs to know a unit's label, so anything implementing [`Counter`] can be
//! wrapped. [`Unit`] is the plain piece used by setup files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can sit on the board as a counter.
pub trait Counter: fmt::Debug {
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitType {
    Squad,
    HalfSquad,
    Crew,
    Leader,
    Hero,
    SupportWeapon,
    Gun,
}

impl UnitType {
    /// Whether units of this type are normally carried by other units.
    /// Stacks do not enforce this, it is left to the rules layer.
    pub fn is_portable(self) -> bool {
        matches!(self, UnitType::SupportWeapon | UnitType::Gun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    label: String,
    unit_type: UnitType,
}

impl Unit {
    pub fn new(label: String, unit_type: UnitType) -> Self {
        Unit { label, unit_type }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }
}

impl Counter for Unit {
    fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_weapons_are_portable() {
        assert!(UnitType::SupportWeapon.is_portable());
        assert!(UnitType::Gun.is_portable());
        assert!(!UnitType::Squad.is_portable());
        assert!(!UnitType::Leader.is_portable());
    }

    #[test]
    fn unit_reads_from_json() {
        let unit: Unit =
            serde_json::from_str(r#"{"label":"4-6-7","unit_type":"Squad"}"#).unwrap();
        assert_eq!(unit.label(), "4-6-7");
        assert_eq!(unit.unit_type(), UnitType::Squad);
        assert_eq!(unit.to_string(), "4-6-7");
    }
}
