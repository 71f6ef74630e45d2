//! Matching input images to labelled slots.
//!
//! Images are consumed in the order they are supplied. Each image takes the
//! next unused ordinal of its own orientation; the slot with that ordinal in
//! the [`NameTable`] is its match. When the table has no such slot the image
//! is unmatched: it is reported, never substituted, and it does not use up
//! an ordinal.

use crate::naming::{NameEntry, NameTable, Slot};
use crate::orientation::{OrientationCounter, Oriented};

/// An image paired with the slot it should be placed into.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<'t, T> {
    /// Position of the image in the input sequence.
    pub index: usize,
    pub image: T,
    pub entry: &'t NameEntry,
}

impl<T> Assignment<'_, T> {
    pub fn slot(&self) -> Slot {
        self.entry.slot
    }

    pub fn label(&self) -> &str {
        &self.entry.label
    }
}

/// Result of matching one image.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'t, T> {
    Matched(Assignment<'t, T>),
    /// `slot` is what the image asked for; the table has no such slot.
    Unmatched { index: usize, image: T, slot: Slot },
}

impl<T> MatchOutcome<'_, T> {
    pub fn index(&self) -> usize {
        match self {
            Self::Matched(a) => a.index,
            Self::Unmatched { index, .. } => *index,
        }
    }
}

/// Lazy matcher returned by [`match_images`].
///
/// Finite and single-use: it walks the image iterator once.
pub struct Matches<'t, I> {
    images: std::iter::Enumerate<I>,
    table: &'t NameTable,
    counter: OrientationCounter,
}

impl<'t, I> Matches<'t, I>
where
    I: Iterator,
    I::Item: Oriented,
{
    /// Hand the slot of a failed placement back to the next image of the same
    /// orientation. Only the most recently matched slot can be released.
    pub fn release(&mut self, slot: Slot) -> bool {
        self.counter.release(slot.orientation, slot.ordinal)
    }

    /// Only the matched images, in input order.
    pub fn assignments(self) -> impl Iterator<Item = Assignment<'t, I::Item>> {
        self.filter_map(|outcome| match outcome {
            MatchOutcome::Matched(a) => Some(a),
            MatchOutcome::Unmatched { .. } => None,
        })
    }
}

impl<'t, I> Iterator for Matches<'t, I>
where
    I: Iterator,
    I::Item: Oriented,
{
    type Item = MatchOutcome<'t, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, image) = self.images.next()?;
        let orientation = image.orientation();
        let slot = Slot::new(orientation, self.counter.peek(orientation));

        match self.table.get(slot) {
            Some(entry) => {
                self.counter.take(orientation);
                Some(MatchOutcome::Matched(Assignment {
                    index,
                    image,
                    entry,
                }))
            }
            None => Some(MatchOutcome::Unmatched { index, image, slot }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.images.size_hint()
    }
}

/// Match `images` against `table`, lazily and in input order.
pub fn match_images<I>(images: I, table: &NameTable) -> Matches<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Oriented,
{
    Matches {
        images: images.into_iter().enumerate(),
        table,
        counter: OrientationCounter::new(),
    }
}
