//! Publisher precedence orderings.
//!
//! When several publishers supply equivalent content, one comparator decides
//! whose value wins for each field. A [`PublisherOrdering`] is that comparator:
//! a total order over [`Publisher::ALL`] backed by a position table, so each
//! comparison is a pair of array reads.
//!
//! ## Completion
//!
//! Orderings are always built from a *completed* list: publishers given
//! explicitly keep their relative order (duplicates after the first are
//! dropped), and every publisher not mentioned is appended in declaration
//! order. Callers never observe a partial ordering.

use crate::publisher::Publisher;
use std::cmp::Ordering;
use tracing::trace;

/// Completes a precedence list to cover every publisher exactly once.
pub fn complete_precedence<I>(selected: I) -> Vec<Publisher>
where
    I: IntoIterator<Item = Publisher>,
{
    let mut seen = [false; Publisher::COUNT];
    let mut publishers = Vec::with_capacity(Publisher::COUNT);

    for publisher in selected {
        if !seen[publisher.index()] {
            seen[publisher.index()] = true;
            publishers.push(publisher);
        }
    }

    let given = publishers.len();
    for publisher in Publisher::ALL {
        if !seen[publisher.index()] {
            publishers.push(publisher);
        }
    }

    trace!(
        given,
        appended = publishers.len() - given,
        "completed publisher precedence"
    );
    publishers
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublisherOrdering {
    order: Vec<Publisher>,
    positions: [usize; Publisher::COUNT],
}

impl PublisherOrdering {
    /// An ordering led by `selected`, completed with the remaining publishers.
    pub fn explicit<I>(selected: I) -> Self
    where
        I: IntoIterator<Item = Publisher>,
    {
        let order = complete_precedence(selected);
        let mut positions = [0; Publisher::COUNT];
        for (position, publisher) in order.iter().enumerate() {
            positions[publisher.index()] = position;
        }
        Self { order, positions }
    }

    /// Declaration order.
    pub fn natural() -> Self {
        Self::explicit(std::iter::empty())
    }

    pub fn position(&self, publisher: Publisher) -> usize {
        self.positions[publisher.index()]
    }

    pub fn compare(&self, a: Publisher, b: Publisher) -> Ordering {
        self.position(a).cmp(&self.position(b))
    }

    pub fn publishers(&self) -> &[Publisher] {
        &self.order
    }

    /// Stable sort of `items` by the precedence of their publisher.
    pub fn sort_by_key<T, F>(&self, items: &mut [T], key: F)
    where
        F: Fn(&T) -> Publisher,
    {
        items.sort_by_key(|item| self.position(key(item)));
    }

    /// The item whose publisher ranks highest. Ties go to the earliest item.
    pub fn min_by_key<'a, T, I, F>(&self, items: I, key: F) -> Option<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> Publisher,
    {
        items
            .into_iter()
            .min_by_key(|item| self.position(key(*item)))
    }
}

impl Default for PublisherOrdering {
    fn default() -> Self {
        Self::natural()
    }
}
