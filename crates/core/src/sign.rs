//! Sign id mapping between editor markers and line numbers
//!
//! The editor's sign layer only knows marker ids while persistence only
//! knows line numbers, so the mapping must stay trivially invertible. The
//! `* 10` multiplier keeps the id namespace clear of other plugins' markers.
//! Ids are scoped per file by the marker protocol itself (both place and
//! remove carry the file), so two files sharing a line number never clash.

/// Identifier of one placed sign, derived from its line number
///
/// Held as `u64` so the `* 10` id of any `u32` line is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignId(u64);

impl SignId {
    /// Id for a 1-based line number: `line * 10`
    pub fn for_line(line: u32) -> Self {
        Self(u64::from(line) * 10)
    }

    /// Recover the line number: `id / 10`
    ///
    /// Only meaningful for ids produced by [`SignId::for_line`]; anything
    /// else truncates.
    pub fn line(self) -> u32 {
        (self.0 / 10) as u32
    }

    /// Raw id as passed to the editor
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
