//! Quality filter
//!
//! [`Qualified`] can only be built here, which is what keeps unrated and
//! below-threshold examples out of the partition engine.

use foundry_types::{Example, QualityThreshold, Rating};

/// An example that passed the quality filter
#[derive(Debug, Clone, Copy)]
pub struct Qualified<'a> {
    index: usize,
    rating: Rating,
    example: &'a Example,
}

impl<'a> Qualified<'a> {
    /// Position of the example in the snapshot it was selected from
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn example(&self) -> &'a Example {
        self.example
    }
}

/// Result of running the quality filter over a snapshot
#[derive(Debug, Clone, Default)]
pub struct QualitySelection<'a> {
    pub qualified: Vec<Qualified<'a>>,
    pub below_threshold: usize,
    pub unrated: usize,
}

impl<'a> QualitySelection<'a> {
    pub fn is_empty(&self) -> bool {
        self.qualified.is_empty()
    }

    pub fn len(&self) -> usize {
        self.qualified.len()
    }

    /// Examples left out by the filter
    pub fn excluded(&self) -> usize {
        self.below_threshold + self.unrated
    }
}

/// Select rated examples whose rating is at or above `threshold`.
pub fn select_qualified(examples: &[Example], threshold: QualityThreshold) -> QualitySelection<'_> {
    let mut selection = QualitySelection::default();

    for (index, example) in examples.iter().enumerate() {
        match example.rating {
            None => selection.unrated += 1,
            Some(rating) if threshold.admits(rating) => selection.qualified.push(Qualified {
                index,
                rating,
                example,
            }),
            Some(_) => selection.below_threshold += 1,
        }
    }

    selection
}
