/// A grid coordinate pair.
///
/// The first component indexes rows (`x`) and the second columns (`y`),
/// matching how [`crate::grid::Grid::elevation`] is queried. Entries in
/// [`crate::visit_log::VisitLog`] are the one deliberate exception: they
/// are stored axis-swapped as `(column, row)`.
pub type Coord = (usize, usize);
