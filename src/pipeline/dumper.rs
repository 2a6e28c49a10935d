//! Dump orchestration.
//!
//! Walk, normalize, classify, then inject the control-flow primitives and
//! flush. The run only fails when no bucket document could be written.

use super::classifier::Classifier;
use super::node_factory::{ControlFlowPrimitive, NodeFactory};
use super::normalizer::MemberNormalizer;
use super::signature::SignatureNodeFactory;
use super::sink::{DescriptorSink, DocumentWriter, JsonFileWriter};
use crate::catalog::{ReflectionCatalog, TypeCatalogWalker};
use crate::config::DumpConfig;
use crate::error::{DumpError, Result};
use crate::types::{Bucket, NodeDescriptor};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Summary of one dump run
#[derive(Debug, Clone, Default)]
pub struct DumpReport {
    pub full: usize,
    pub essentials: usize,
    pub debug: usize,
    /// Members dropped because no scratch node could be built
    pub skipped: usize,
    /// Members emitted with placeholder pin data
    pub degraded: usize,
    pub written: Vec<(Bucket, PathBuf)>,
    pub failed: Vec<(Bucket, String)>,
}

impl DumpReport {
    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Full => self.full,
            Bucket::Essentials => self.essentials,
            Bucket::Debug => self.debug,
        }
    }
}

/// Drives a full dump against a catalog
pub struct NodeDumper<'a, C: ReflectionCatalog + ?Sized, F: NodeFactory, W: DocumentWriter> {
    catalog: &'a C,
    factory: F,
    writer: W,
    config: DumpConfig,
}

impl<'a, C, F, W> NodeDumper<'a, C, F, W>
where
    C: ReflectionCatalog + ?Sized,
    F: NodeFactory,
    W: DocumentWriter,
{
    pub fn new(catalog: &'a C, factory: F, writer: W, config: DumpConfig) -> Self {
        Self {
            catalog,
            factory,
            writer,
            config,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Collect every descriptor into bucket lists without writing them
    pub fn collect(&mut self) -> (DescriptorSink, DumpReport) {
        let catalog = self.catalog;
        let config = &self.config;
        let classifier = Classifier::new(&config.rules);
        let walker = TypeCatalogWalker::new(catalog, &config.walker);
        let mut normalizer = MemberNormalizer::new(catalog, &mut self.factory, &config.module_root);
        let mut sink = DescriptorSink::new();

        let route = |sink: &mut DescriptorSink, desc: NodeDescriptor| {
            let buckets = classifier.classify(&desc);
            tracing::trace!("{} -> {:?}", desc.name, buckets);
            sink.push(desc, buckets);
        };

        for member in walker.members() {
            for desc in normalizer.normalize(member) {
                route(&mut sink, desc);
            }
        }

        for &primitive in ControlFlowPrimitive::all() {
            if let Some(desc) = normalizer.normalize_primitive(primitive) {
                route(&mut sink, desc);
            }
        }

        let stats = normalizer.stats();
        let report = DumpReport {
            full: sink.len(Bucket::Full),
            essentials: sink.len(Bucket::Essentials),
            debug: sink.len(Bucket::Debug),
            skipped: stats.skipped,
            degraded: stats.degraded,
            ..Default::default()
        };

        (sink, report)
    }

    /// Produce the three bucket documents next to `base_path`
    pub fn dump_all_nodes(&mut self, base_path: impl AsRef<Path>) -> Result<DumpReport> {
        let base_path = base_path.as_ref();
        let start = Instant::now();
        tracing::info!("Dumping nodes for {} types", self.catalog.list_types().len());

        let (sink, mut report) = self.collect();
        tracing::info!(
            "Collected {} descriptors ({} essentials, {} debug, {} skipped, {} degraded)",
            report.full,
            report.essentials,
            report.debug,
            report.skipped,
            report.degraded
        );

        let flush = sink.flush(&mut self.writer, base_path, &self.config.output);
        let all_failed = flush.all_failed();
        report.written = flush.written;
        report.failed = flush.failed;

        if all_failed {
            return Err(DumpError::AllWritesFailed(report.failed.len()));
        }

        tracing::info!(
            "Dump finished in {:?}: {} documents written, {} failed",
            start.elapsed(),
            report.written.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

/// Dump with the signature factory and JSON file output
pub fn dump_all_nodes<C: ReflectionCatalog + ?Sized>(
    catalog: &C,
    base_path: impl AsRef<Path>,
    config: &DumpConfig,
) -> Result<DumpReport> {
    let writer = JsonFileWriter::new(config.output.pretty);
    NodeDumper::new(catalog, SignatureNodeFactory::new(), writer, config.clone())
        .dump_all_nodes(base_path)
}
