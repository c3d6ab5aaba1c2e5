use std::{
    fmt::{self, Display, Formatter},
    iter::FusedIterator,
};

/// An owned copy of a monitor's gamma ramp
///
/// The three channel tables always have the same length, which is the ramp
/// size chosen by the backend (typically 256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GammaRamp {
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
}

impl GammaRamp {
    /// Combine three channel tables into a ramp
    ///
    /// Returns `None` when the tables differ in length.
    pub fn new(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Option<Self> {
        match red.len() == green.len() && green.len() == blue.len() {
            true => Some(Self { red, green, blue }),
            false => None,
        }
    }

    /// Number of entries per channel
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Whether the ramp has no entries
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Red channel table
    pub fn red(&self) -> &[u16] {
        &self.red
    }

    /// Green channel table
    pub fn green(&self) -> &[u16] {
        &self.green
    }

    /// Blue channel table
    pub fn blue(&self) -> &[u16] {
        &self.blue
    }

    /// The `(red, green, blue)` entry at `index`
    pub fn get(&self, index: usize) -> Option<(u16, u16, u16)> {
        Some((*self.red.get(index)?, self.green[index], self.blue[index]))
    }

    /// Iterate over `(red, green, blue)` entries in ramp order
    pub fn entries(&self) -> Entries<'_> {
        Entries { ramp: self, index: 0 }
    }
}

/// One `red,green,blue` line per entry
impl Display for GammaRamp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (red, green, blue) in self.entries() {
            writeln!(f, "{red},{green},{blue}")?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`GammaRamp`]
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    ramp: &'a GammaRamp,
    index: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u16, u16, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.ramp.get(self.index)?;
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ramp.len().saturating_sub(self.index);
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Entries<'a> {}

impl<'a> FusedIterator for Entries<'a> {}
