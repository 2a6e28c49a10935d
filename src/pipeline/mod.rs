//! Node descriptor pipeline.
//!
//! Catalog members flow through a fixed chain of stages and land in three
//! bucket documents.
//!
//! # Architecture
//!
//! ```text
//! [TypeCatalogWalker] ──► [MemberNormalizer] ──► [Classifier] ──► [DescriptorSink]
//!                               │                                     ├──► <prefix>_Full.json
//!                         [NodeFactory]                               ├──► <prefix>_Essentials.json
//!                         [PinResolver]                               └──► <prefix>_Debug.json
//! ```
//!
//! # Design
//!
//! - **Scoped scratch nodes**: every node built for pin discovery is wrapped in
//!   a [`ScratchNode`] and disposed on drop.
//! - **Degrade, don't abort**: a malformed member is skipped or emitted with
//!   placeholder pins; only a run where no document could be written fails.
//! - **Deterministic output**: bucket order is catalog order, primitives last.

pub mod classifier;
pub mod dumper;
pub mod node_factory;
pub mod normalizer;
pub mod pins;
pub mod signature;
pub mod sink;

pub use classifier::Classifier;
pub use dumper::{dump_all_nodes, DumpReport, NodeDumper};
pub use node_factory::{
    ControlFlowPrimitive, NodeFactory, NodeHandle, NodeTemplate, RawPin, ScratchNode,
};
pub use normalizer::{MemberNormalizer, NormalizeStats};
pub use pins::{PinLists, PinResolver};
pub use signature::{display_string, SignatureNodeFactory};
pub use sink::{
    document_name, output_dir, DescriptorSink, DocumentWriter, FlushReport, JsonFileWriter,
};
