use indexmap::{map::Entry, IndexMap};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub address: u16,
    pub line: usize,
}

/// Label name -> address, keyed by the upper-cased name so lookups ignore
/// case. Entries keep their definition order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable(IndexMap<String, Symbol>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    pub fn define(&mut self, name: &str, address: u16, line: usize) -> Result<(), ErrorKind> {
        match self.0.entry(name.to_ascii_uppercase()) {
            Entry::Occupied(prev) => Err(ErrorKind::DuplicateLabel(
                name.to_string(),
                prev.get().line,
            )),
            Entry::Vacant(slot) => {
                slot.insert(Symbol {
                    name: name.to_string(),
                    address,
                    line,
                });
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Result<u16, ErrorKind> {
        self.get(name)
            .map(|sym| sym.address)
            .ok_or_else(|| ErrorKind::UndefinedLabel(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(&name.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.values()
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.0.into_values().collect()
    }
}
