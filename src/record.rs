//! The record seam between the generic table store and concrete entities.

/// A domain entity backed one-to-one by rows of a single logical table.
///
/// The generic layer never sees concrete field names; it only needs the
/// table name, the identifier, and a way to obtain a fresh blank instance
/// for a newly generated identifier.
pub trait Record {
    /// Name of the logical table holding all instances of this type.
    const TABLE: &'static str;

    /// Factory for a blank in-memory instance carrying the given identifier.
    /// Domain fields start at their default values; nothing is persisted.
    fn blank(id: String) -> Self;

    /// The immutable identifier assigned at creation time. Primary key of
    /// the backing row.
    fn id(&self) -> &str;
}
