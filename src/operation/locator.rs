//! Locators: references to a position inside a named structure

use std::fmt;

/// The named operand slots an operation may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Source,
    Target,
    Var1,
    Var2,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Source, Slot::Target, Slot::Var1, Slot::Var2];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Source => "source",
            Slot::Target => "target",
            Slot::Var1 => "var1",
            Slot::Var2 => "var2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structure identifier plus an index path within that structure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub identifier: String,
    pub index: Vec<usize>,
}

impl Locator {
    pub fn new(identifier: impl Into<String>, index: impl Into<Vec<usize>>) -> Self {
        Locator {
            identifier: identifier.into(),
            index: index.into(),
        }
    }

    /// Locator for a single element of a one-dimensional structure
    pub fn at(identifier: impl Into<String>, index: usize) -> Self {
        Locator::new(identifier, vec![index])
    }

    /// The outermost index, if the locator addresses an element
    pub fn first_index(&self) -> Option<usize> {
        self.index.first().copied()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        for i in &self.index {
            write!(f, "[{}]", i)?;
        }
        Ok(())
    }
}

/// The fixed set of optional locator slots carried by an operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locators {
    pub source: Option<Locator>,
    pub target: Option<Locator>,
    pub var1: Option<Locator>,
    pub var2: Option<Locator>,
}

impl Locators {
    pub fn get(&self, slot: Slot) -> Option<&Locator> {
        match slot {
            Slot::Source => self.source.as_ref(),
            Slot::Target => self.target.as_ref(),
            Slot::Var1 => self.var1.as_ref(),
            Slot::Var2 => self.var2.as_ref(),
        }
    }

    pub fn set(&mut self, slot: Slot, locator: Locator) {
        let entry = match slot {
            Slot::Source => &mut self.source,
            Slot::Target => &mut self.target,
            Slot::Var1 => &mut self.var1,
            Slot::Var2 => &mut self.var2,
        };
        *entry = Some(locator);
    }

    /// Iterate over the slots that are present, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Locator)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|loc| (slot, loc)))
    }
}
