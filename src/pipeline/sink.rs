//! Bucketed descriptor storage and document output.
//!
//! Descriptors are appended to every bucket they belong to and written as one
//! JSON array per bucket: `<prefix>_Full.json`, `<prefix>_Essentials.json`,
//! `<prefix>_Debug.json`. A failed bucket write is recorded and the remaining
//! buckets are still attempted.

use crate::config::OutputConfig;
use crate::error::{DumpError, Result, ResultExt};
use crate::types::{Bucket, BucketSet, NodeDescriptor};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists a bucket's descriptors as one document
pub trait DocumentWriter {
    fn write_document(&mut self, descriptors: &[NodeDescriptor], path: &Path) -> Result<()>;
}

/// Writes descriptors as a JSON array
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    pretty: bool,
}

impl JsonFileWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonFileWriter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DocumentWriter for JsonFileWriter {
    fn write_document(&mut self, descriptors: &[NodeDescriptor], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(descriptors)?
        } else {
            serde_json::to_string(descriptors)?
        };

        fs::write(path, content).map_err(DumpError::from)
    }
}

/// Directory the documents are written to.
///
/// The base path itself when it is an existing directory or ends in a
/// separator, otherwise the directory containing it.
pub fn output_dir(base_path: &Path) -> PathBuf {
    let names_dir = base_path
        .as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator);

    if names_dir || base_path.is_dir() {
        return base_path.to_path_buf();
    }

    match base_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Document file name for a bucket
pub fn document_name(prefix: &str, bucket: Bucket) -> String {
    format!("{}_{}.json", prefix, bucket.name())
}

/// Outcome of writing all bucket documents
#[derive(Debug, Clone, Default)]
pub struct FlushReport {
    pub written: Vec<(Bucket, PathBuf)>,
    pub failed: Vec<(Bucket, String)>,
}

impl FlushReport {
    pub fn all_failed(&self) -> bool {
        self.written.is_empty() && !self.failed.is_empty()
    }
}

/// In-memory bucket lists, in insertion order
#[derive(Debug, Default)]
pub struct DescriptorSink {
    full: Vec<NodeDescriptor>,
    essentials: Vec<NodeDescriptor>,
    debug: Vec<NodeDescriptor>,
}

impl DescriptorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor to Full and to each other bucket it belongs to
    pub fn push(&mut self, descriptor: NodeDescriptor, buckets: BucketSet) {
        if buckets.essentials {
            self.essentials.push(descriptor.clone());
        }
        if buckets.debug {
            self.debug.push(descriptor.clone());
        }
        self.full.push(descriptor);
    }

    pub fn bucket(&self, bucket: Bucket) -> &[NodeDescriptor] {
        match bucket {
            Bucket::Full => &self.full,
            Bucket::Essentials => &self.essentials,
            Bucket::Debug => &self.debug,
        }
    }

    pub fn len(&self, bucket: Bucket) -> usize {
        self.bucket(bucket).len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Write every bucket, Full first. Failures are collected, not raised.
    pub fn flush<W: DocumentWriter + ?Sized>(
        &self,
        writer: &mut W,
        base_path: &Path,
        output: &OutputConfig,
    ) -> FlushReport {
        let dir = output_dir(base_path);
        let mut report = FlushReport::default();

        for &bucket in Bucket::all() {
            let path = dir.join(document_name(&output.file_prefix, bucket));
            let descriptors = self.bucket(bucket);

            match writer.write_document(descriptors, &path) {
                Ok(()) => {
                    tracing::info!(
                        "Wrote {} {} descriptors to {}",
                        descriptors.len(),
                        bucket,
                        path.display()
                    );
                    report.written.push((bucket, path));
                }
                Err(e) => {
                    let err = DumpError::Write {
                        bucket,
                        path,
                        message: e.to_string(),
                    };
                    tracing::warn!("{}", err);
                    report.failed.push((bucket, err.to_string()));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn desc(name: &str) -> NodeDescriptor {
        NodeDescriptor::new(name, NodeKind::CallFunction)
    }

    #[test]
    fn test_push_respects_bucket_set() {
        let mut sink = DescriptorSink::new();
        sink.push(desc("Delay"), BucketSet { essentials: true, debug: false });
        sink.push(desc("Print String"), BucketSet { essentials: false, debug: true });
        sink.push(desc("Get Score"), BucketSet::full_only());

        assert_eq!(sink.len(Bucket::Full), 3);
        assert_eq!(sink.len(Bucket::Essentials), 1);
        assert_eq!(sink.len(Bucket::Debug), 1);
        assert_eq!(sink.bucket(Bucket::Full)[1].name, "Print String");
    }

    #[test]
    fn test_output_dir() {
        let temp = TempDir::new().unwrap();
        assert_eq!(output_dir(temp.path()), temp.path());
        assert_eq!(
            output_dir(&temp.path().join("dump.json")),
            temp.path().to_path_buf()
        );
        assert_eq!(output_dir(Path::new("dump.json")), PathBuf::from("."));
    }

    #[test]
    fn test_output_dir_with_trailing_separator() {
        assert_eq!(
            output_dir(Path::new("not_yet_created_out/")),
            PathBuf::from("not_yet_created_out")
        );
        assert_eq!(output_dir(Path::new("a/b/")), PathBuf::from("a/b"));
    }

    #[test]
    fn test_flush_writes_three_documents() {
        let temp = TempDir::new().unwrap();
        let mut sink = DescriptorSink::new();
        sink.push(desc("Branch"), BucketSet { essentials: true, debug: false });

        let mut writer = JsonFileWriter::new(false);
        let report = sink.flush(&mut writer, temp.path(), &OutputConfig::default());

        assert!(report.failed.is_empty());
        assert_eq!(report.written.len(), 3);

        let debug = fs::read_to_string(temp.path().join("UEBlueprintLibrary_Debug.json")).unwrap();
        assert_eq!(debug, "[]");

        let essentials: Vec<NodeDescriptor> = serde_json::from_str(
            &fs::read_to_string(temp.path().join("UEBlueprintLibrary_Essentials.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(essentials.len(), 1);
        assert_eq!(essentials[0].name, "Branch");
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out/Lib_Full.json");
        JsonFileWriter::default()
            .write_document(&[desc("Delay")], &path)
            .unwrap();
        assert!(path.exists());
    }

    proptest! {
        #[test]
        fn test_buckets_are_subsets_of_full(
            memberships in prop::collection::vec((any::<bool>(), any::<bool>()), 0..40),
        ) {
            let mut sink = DescriptorSink::new();
            for (i, (essentials, debug)) in memberships.iter().enumerate() {
                sink.push(desc(&format!("Node{}", i)), BucketSet { essentials: *essentials, debug: *debug });
            }

            // Property: every bucket is an ordered subsequence of Full
            let full = sink.bucket(Bucket::Full);
            prop_assert_eq!(full.len(), memberships.len());
            for bucket in [Bucket::Essentials, Bucket::Debug] {
                let mut rest = full.iter();
                for d in sink.bucket(bucket) {
                    prop_assert!(rest.any(|f| f == d));
                }
            }
        }
    }
}
