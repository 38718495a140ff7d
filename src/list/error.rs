//! Error types for intrusive list operations

/// Errors reported by [`List`](super::List) insertions.
///
/// Lookups and removals never fail: a missing node or an empty list is
/// reported through `false`/`None` instead.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The node is already a member of a list (this one or another).
    AlreadyLinked,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::AlreadyLinked => defmt::write!(f, "AlreadyLinked"),
        }
    }
}
