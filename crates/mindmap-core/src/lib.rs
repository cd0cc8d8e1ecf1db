//! Mind Map Core Types
//!
//! This crate provides the foundational types shared by the mind map
//! conversion crates. It includes:
//!
//! - **Identifiers**: Owned, cheaply cloned node identifiers ([`identifier::Id`])
//! - **Geometry**: Points and sizes ([`geometry`] module)
//! - **Document**: The input document model ([`document`] module)
//! - **Archive**: The flat, text-keyed output shape ([`archive`] module)
//! - **Graph**: The identifier-keyed node/link output shape ([`graph`] module)
//! - **Categories**: Resource categories derived from emoji ([`category::Category`])
//! - **Measure**: The dimension-measurement seam ([`measure::Measure`])

pub mod archive;
pub mod category;
pub mod document;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod measure;
