//! Core library for photoslot.
//!
//! Photo-album templates contain placeholder layers that each receive one
//! photo. This crate names those placeholders by orientation
//! (`ammu_landscape_1`, `ammu_portrait_1`, ...), matches input photos to them
//! in supply order, computes how each photo must be scaled to cover its slot,
//! and drives a batch through the [`placement::PlacementHost`] trait.
//!
//! It also sorts a folder of photos into `Vertical/` and `Horizontal/`
//! subfolders ([`sorter`]).
//!
//! This crate is host-agnostic. A JSON-manifest host lives in
//! [`photoslot_manifest`](https://docs.rs/photoslot-manifest).

pub mod bounds;
pub mod config;
pub mod error;
pub mod matcher;
pub mod naming;
pub mod orientation;
pub mod placement;
pub mod probe;
pub mod report;
pub mod sorter;
pub mod tree;
