/*! Loader-facing contracts.

A `MappingBundle` is everything the core needs to project one source transcript:
the alignment bundle, the source and target gene models, and the descriptive
metadata. How bundles are produced (chain files, annotation databases, metadata
tables) is a collaborator concern hidden behind the `MappingLoader` trait.
*/
use linked_hash_map::LinkedHashMap;

use crate::align::AlignmentBundle;
use crate::annot::{TranscriptAnnot, TranscriptInfo};


/// The per-transcript input bundle consumed by the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingBundle {
    src_assembly: String,
    mapped_assembly: String,
    align: AlignmentBundle,
    src_annot: TranscriptAnnot,
    mapped_annot: TranscriptAnnot,
    info: TranscriptInfo,
}

impl MappingBundle {

    pub fn new<T, U>(
        src_assembly: T,
        mapped_assembly: U,
        align: AlignmentBundle,
        src_annot: TranscriptAnnot,
        mapped_annot: TranscriptAnnot,
        info: TranscriptInfo) -> Self
        where T: Into<String>, U: Into<String>
    {
        MappingBundle {
            src_assembly: src_assembly.into(),
            mapped_assembly: mapped_assembly.into(),
            align,
            src_annot,
            mapped_annot,
            info,
        }
    }

    pub fn src_assembly(&self) -> &str {
        self.src_assembly.as_str()
    }

    pub fn mapped_assembly(&self) -> &str {
        self.mapped_assembly.as_str()
    }

    pub fn align(&self) -> &AlignmentBundle {
        &self.align
    }

    pub fn src_annot(&self) -> &TranscriptAnnot {
        &self.src_annot
    }

    /// Gene model of the transcript on the target assembly.
    pub fn mapped_annot(&self) -> &TranscriptAnnot {
        &self.mapped_annot
    }

    pub fn info(&self) -> &TranscriptInfo {
        &self.info
    }
}

/// Supplier of mapping bundles, one call per source transcript.
pub trait MappingLoader {

    /// Returns all bundles for the given source transcript in mapping order; an
    /// empty vector means the transcript is unknown to this loader.
    fn load(&mut self, src_trans_id: &str) -> crate::Result<Vec<MappingBundle>>;
}

/// In-memory loader, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemLoader {
    inner: LinkedHashMap<String, Vec<MappingBundle>>,
}

impl MemLoader {

    pub fn new() -> Self {
        MemLoader { inner: LinkedHashMap::new() }
    }

    pub fn insert<T>(&mut self, src_trans_id: T, bundle: MappingBundle)
        where T: Into<String>
    {
        self.inner
            .entry(src_trans_id.into())
            .or_insert_with(Vec::new)
            .push(bundle);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl MappingLoader for MemLoader {

    fn load(&mut self, src_trans_id: &str) -> crate::Result<Vec<MappingBundle>> {
        Ok(self.inner.get(src_trans_id).cloned().unwrap_or_default())
    }
}
