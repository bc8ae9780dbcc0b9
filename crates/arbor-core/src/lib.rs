//! Arbor Core Types and Definitions
//!
//! This crate provides the data model for Arbor tree diagrams. It includes:
//!
//! - **Identifiers**: Stable node ids and their allocator ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Style**: Shapes, fonts and orientation ([`style`] module)
//! - **Nodes**: Diagram elements and their attributes ([`node::Node`])
//! - **Tree**: The rooted node arena and its structural edits ([`tree::Tree`])
//! - **Errors**: The edit error type ([`error::EditError`])

pub mod color;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod node;
pub mod style;
pub mod tree;
