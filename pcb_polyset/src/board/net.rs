use crate::error::BoardError;
use std::{collections::BTreeMap, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Electrical net, used purely as a grouping key. Equality, ordering, and hashing are by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Net {
    name: String,
}

impl Net {
    pub fn new(name: impl Into<String>) -> Self {
        Net { name: name.into() }
    }

    /// The net items with no connection belong to (empty name).
    pub fn unconnected() -> Self {
        Net::new("")
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Per board number referencing a net, items store the code and the board resolves it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetCode(pub u32);

impl NetCode {
    pub const UNCONNECTED: NetCode = NetCode(0);
}

/// Mapping of net codes to nets. Code `0` is always the unconnected net.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetTable {
    nets: BTreeMap<NetCode, Net>,
}

impl Default for NetTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NetTable {
    pub fn new() -> Self {
        let mut nets = BTreeMap::new();
        nets.insert(NetCode::UNCONNECTED, Net::unconnected());
        NetTable { nets }
    }

    /// Returns the code of the net with `name`, registering it with the next free code if not
    /// present.
    pub fn add(&mut self, name: &str) -> NetCode {
        if let Some((code, _)) = self.nets.iter().find(|(_, n)| n.name() == name) {
            return *code;
        }

        let code = NetCode(self.nets.keys().next_back().map(|c| c.0 + 1).unwrap_or(0));
        self.nets.insert(code, Net::new(name));
        code
    }

    /// Register `net` under a specific `code`, replacing any existing entry.
    pub fn insert(&mut self, code: NetCode, net: Net) {
        self.nets.insert(code, net);
    }

    pub fn get(&self, code: NetCode) -> Result<&Net, BoardError> {
        self.nets
            .get(&code)
            .ok_or(BoardError::MissingNetMapping { code: code.0 })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NetCode, &Net)> + '_ {
        self.nets.iter().map(|(c, n)| (*c, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reuses_existing_codes() {
        let mut table = NetTable::new();
        let gnd = table.add("GND");
        let vcc = table.add("VCC");
        assert_eq!(gnd, NetCode(1));
        assert_eq!(vcc, NetCode(2));
        assert_eq!(table.add("GND"), gnd);
        assert_eq!(table.add(""), NetCode::UNCONNECTED);
        assert_eq!(table.get(vcc).unwrap().name(), "VCC");
        assert_eq!(
            table.get(NetCode(9)),
            Err(BoardError::MissingNetMapping { code: 9 })
        );
    }

    #[test]
    fn nets_compare_by_name() {
        assert_eq!(Net::new("GND"), Net::new(String::from("GND")));
        assert!(Net::new("AGND") < Net::new("GND"));
    }
}
