//! cloudsketch core types
//!
//! This crate provides the foundational types for describing cloud
//! architecture diagrams. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing with Graphviz-friendly output ([`color::Color`])
//! - **Catalog**: The fixed set of node kinds and their icons ([`catalog`] module)
//! - **Semantic**: The diagram model and the scoped [`semantic::Canvas`] builder
//! - **Errors**: Errors raised when parsing model enums from strings ([`error`] module)

pub mod catalog;
pub mod color;
pub mod error;
pub mod identifier;
pub mod semantic;
