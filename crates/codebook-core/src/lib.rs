//! Codebook Core Types and Algorithms
//!
//! This crate provides the foundational types and algorithms for turning
//! parsed protocol nets into codebook items. It includes:
//!
//! - **Nodes**: typed workflow nodes with output edges ([`node`] module)
//! - **Concept parts**: per-field collection metadata ([`part`] module)
//! - **Nets**: the node arena, connectivity walk, rule derivation, and item
//!   aggregation ([`net`] module)
//! - **Items**: deduplicatable codebook entries with normalized identity
//!   paths ([`item`] module)
//! - **Merging**: the pairwise merge engine and its policies ([`merge`]
//!   module)
//! - **Text**: cell-limit chunking and quote stripping ([`text`] module)

pub mod item;
pub mod merge;
pub mod net;
pub mod node;
pub mod part;
mod rule;
pub mod text;
