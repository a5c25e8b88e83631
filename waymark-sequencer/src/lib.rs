//! Greedy nearest-neighbour sequencing for Waymark.
//!
//! This crate provides [`NearestNeighbourSequencer`], the default
//! implementation of the [`Sequencer`](waymark_core::Sequencer) trait. From a
//! start point it repeatedly visits the closest waypoint not yet visited.
//!
//! The heuristic is local: it makes no promise of a shortest tour. Its value
//! is that the ordering is reproducible, with ties going to the waypoint that
//! appears first in the input.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod nearest;

pub use nearest::{NearestNeighbourSequencer, optimize, optimize_from_base};
