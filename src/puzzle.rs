//! A crossword fill problem: geometry, entries, crossings and the ranked
//! candidate list of every entry.

use crate::{
    crossing::{Crossing, CrossingGraph, EntryId},
    geometry::{Entry, Geometry, GeometryError},
    grid_state::GridState,
};
use bumpalo::Bump;
use std::collections::HashMap;

/// A supplier of ranked candidate answers for each entry.
///
/// Candidates are returned most likely first. An empty list is a legitimate
/// answer for an entry the source knows nothing about.
pub trait CandidateSource {
    /// Return the ranked candidates for the given entry.
    fn candidates(&self, entry: &Entry) -> Vec<String>;
}

impl CandidateSource for HashMap<Entry, Vec<String>> {
    fn candidates(&self, entry: &Entry) -> Vec<String> {
        self.get(entry).cloned().unwrap_or_default()
    }
}

impl<F> CandidateSource for F
where
    F: Fn(&Entry) -> Vec<String>,
{
    fn candidates(&self, entry: &Entry) -> Vec<String> {
        self(entry)
    }
}

/// An instance of the crossword fill problem.
///
/// Everything in a `Puzzle` is fixed once it is built; search states borrow
/// from it.
#[derive(Debug, Clone)]
pub struct Puzzle {
    geometry: Geometry,
    entries: Vec<Entry>,
    graph: CrossingGraph,
    candidates: Vec<Vec<Vec<char>>>,
}

impl Puzzle {
    /// Create a new puzzle from explicit entries and their ranked candidates.
    ///
    /// Candidates whose length differs from their entry are dropped; the
    /// relative order of the remaining candidates is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the entries are inconsistent with the
    /// geometry.
    pub fn new(
        geometry: Geometry,
        entries: impl IntoIterator<Item = (Entry, Vec<String>)>,
    ) -> Result<Self, GeometryError> {
        let (entries, candidates): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .map(|(entry, words)| {
                let words = words
                    .into_iter()
                    .filter_map(|word| {
                        let letters: Vec<char> = word.chars().collect();
                        if letters.len() == entry.length {
                            Some(letters)
                        } else {
                            log::warn!(
                                "Dropping candidate [{}] for entry [{}]: expected length [{}].",
                                word,
                                entry,
                                entry.length
                            );
                            None
                        }
                    })
                    .collect::<Vec<_>>();

                (entry, words)
            })
            .unzip();

        let graph = CrossingGraph::build(&geometry, &entries)?;

        log::debug!(
            "Built puzzle with [{}] entries on a [{}x{}] grid.",
            entries.len(),
            geometry.width(),
            geometry.height()
        );

        Ok(Puzzle {
            geometry,
            entries,
            graph,
            candidates,
        })
    }

    /// Create a new puzzle with entries derived from the geometry and
    /// candidates looked up from the given source.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the derived entries are inconsistent
    /// with the geometry.
    pub fn from_source(
        geometry: Geometry,
        source: &impl CandidateSource,
    ) -> Result<Self, GeometryError> {
        let entries: Vec<_> = geometry
            .entries()
            .into_iter()
            .map(|entry| (entry, source.candidates(&entry)))
            .collect();

        Self::new(geometry, entries)
    }

    /// The grid geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All entries, indexed by [`EntryId`].
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up the id of an entry.
    pub fn entry_id(&self, entry: &Entry) -> Option<EntryId> {
        self.entries.iter().position(|e| e == entry)
    }

    /// Ranked candidates of an entry, most likely first.
    pub fn candidates(&self, entry: EntryId) -> &[Vec<char>] {
        &self.candidates[entry]
    }

    /// Row-major cell indices covered by an entry.
    pub fn cells(&self, entry: EntryId) -> &[usize] {
        self.graph.cells(entry)
    }

    /// Crossings of an entry.
    pub fn crossings(&self, entry: EntryId) -> &[Crossing] {
        self.graph.crossings(entry)
    }

    /// Build the initial search state in the given arena.
    ///
    /// The state starts with every open cell empty and every candidate of
    /// every entry viable.
    pub fn initial_state<'a>(&'a self, arena: &'a Bump) -> GridState<'a> {
        GridState::initial(self, arena)
    }
}
