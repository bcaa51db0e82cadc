/*! Gene-model input contracts.

These types carry the per-transcript annotation the projection consumes: ordered exon
spans with optional reading frames, an optional coding region, and the descriptive
metadata table keyed by transcript identifier. Parsing annotation files into these
types is a collaborator concern; construction here only enforces the structural
assumptions the core relies on.
*/
use bio_types::strand::Strand;
use linked_hash_map::LinkedHashMap;

use crate::model::{resolve_strand_input, ModelError, Region};


/// One exon of a gene model: its genomic span, an optional exon identifier, and an
/// optional reading frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ExonAnnot {
    id: Option<String>,
    region: Region,
    frame: Option<u8>,
}

impl ExonAnnot {

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Reading frame offset (0-2), absent for non-coding exons.
    pub fn frame(&self) -> Option<u8> {
        self.frame
    }
}

/// A transcript gene model on one assembly.
///
/// Exons are held in genomic order; transcript 5'-to-3' order is the reverse of that
/// on the minus strand.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptAnnot {
    id: String,
    chrom: String,
    strand: Strand,
    region: Region,
    coding: Option<Region>,
    exons: Vec<ExonAnnot>,
}

impl TranscriptAnnot {

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn chrom(&self) -> &str {
        self.chrom.as_str()
    }

    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Coding region of the transcript, absent for non-coding transcripts.
    pub fn coding(&self) -> Option<&Region> {
        self.coding.as_ref()
    }

    pub fn exons(&self) -> &[ExonAnnot] {
        self.exons.as_slice()
    }
}

/// Builder for `TranscriptAnnot`.
pub struct ABuilder {
    id: String,
    chrom: String,
    start: u64,
    end: u64,
    strand: Option<Strand>,
    strand_char: Option<char>,
    coding_coord: Option<(u64, u64)>,
    exon_coords: Vec<(u64, u64)>,
    exon_frames: Option<Vec<i64>>,
    exon_ids: Option<Vec<String>>,
}

impl ABuilder {

    pub fn new<T, U>(id: T, chrom: U, start: u64, end: u64) -> Self
        where T: Into<String>, U: Into<String>
    {
        ABuilder {
            id: id.into(),
            chrom: chrom.into(),
            start,
            end,
            strand: None,
            strand_char: None,
            coding_coord: None,
            exon_coords: Vec::new(),
            exon_frames: None,
            exon_ids: None,
        }
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn strand_char(mut self, strand_char: char) -> Self {
        self.strand_char = Some(strand_char);
        self
    }

    /// Sets the coding region coordinate. A zero-length coordinate means the
    /// transcript is non-coding.
    pub fn coding_coord(mut self, start: u64, end: u64) -> Self {
        self.coding_coord = Some((start, end));
        self
    }

    pub fn exon_coords<E>(mut self, exon_coords: E) -> Self
        where E: IntoIterator<Item = (u64, u64)>
    {
        self.exon_coords = exon_coords.into_iter().collect();
        self
    }

    /// Sets the per-exon frame values, in genomic exon order, with `-1` meaning "not
    /// applicable".
    pub fn exon_frames<E>(mut self, exon_frames: E) -> Self
        where E: IntoIterator<Item = i64>
    {
        self.exon_frames = Some(exon_frames.into_iter().collect());
        self
    }

    pub fn exon_ids<E, T>(mut self, exon_ids: E) -> Self
        where E: IntoIterator<Item = T>, T: Into<String>
    {
        self.exon_ids = Some(exon_ids.into_iter().map(|v| v.into()).collect());
        self
    }

    pub fn build(self) -> crate::Result<TranscriptAnnot> {
        let region = Region::new(self.start, self.end)
            .map_err(crate::Error::Model)?;
        let strand = resolve_strand_input(self.strand, self.strand_char)
            .map_err(crate::Error::Model)?;

        let tid = || Some(self.id.clone());

        if self.exon_coords.is_empty() {
            return Err(crate::Error::from(ModelError::UnspecifiedExons(tid())));
        }
        if let Some(ref frames) = self.exon_frames {
            if frames.len() != self.exon_coords.len() {
                return Err(crate::Error::from(ModelError::ExonCountMismatch(tid())));
            }
        }
        if let Some(ref ids) = self.exon_ids {
            if ids.len() != self.exon_coords.len() {
                return Err(crate::Error::from(ModelError::ExonCountMismatch(tid())));
            }
        }

        let mut exons = Vec::with_capacity(self.exon_coords.len());
        for (idx, &(start, end)) in self.exon_coords.iter().enumerate() {
            let exon_region = Region::new(start, end)
                .map_err(|_| crate::Error::from(ModelError::InvalidExonInterval(tid())))?;
            let frame = match self.exon_frames.as_ref().map(|frames| frames[idx]) {
                None | Some(-1) => None,
                Some(value @ 0..=2) => Some(value as u8),
                Some(value) => {
                    let fid = self.exon_ids.as_ref()
                        .map(|ids| ids[idx].clone())
                        .or_else(tid);
                    return Err(crate::Error::from(ModelError::InvalidFrame(value, fid)));
                }
            };
            let id = self.exon_ids.as_ref().map(|ids| ids[idx].clone());
            exons.push(ExonAnnot { id, region: exon_region, frame });
        }
        exons.sort_by_key(|exon| (exon.region.start(), exon.region.end()));

        // Emptiness checked above.
        let exon_r = (exons.first().unwrap().region.start(),
                      exons.last().unwrap().region.end());
        if exon_r != (region.start(), region.end()) {
            return Err(crate::Error::from(ModelError::UnmatchedExons(tid())));
        }

        let coding = match self.coding_coord {
            None => None,
            Some((start, end)) => {
                if start > end {
                    return Err(crate::Error::from(ModelError::InvalidCodingInterval(tid())));
                }
                match Region::new(start, end).map_err(crate::Error::Model)?.none_if_empty() {
                    None => None,
                    Some(coding_region) => {
                        if !region.contains(&coding_region) {
                            let err = ModelError::CodingNotFullyEnveloped(tid());
                            return Err(crate::Error::from(err));
                        }
                        Some(coding_region)
                    }
                }
            }
        };

        Ok(TranscriptAnnot {
            id: self.id,
            chrom: self.chrom,
            strand,
            region,
            coding,
            exons,
        })
    }
}

/// Descriptive metadata for one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptInfo {
    gene_id: String,
    gene_name: String,
    gene_type: String,
    trans_name: String,
    trans_type: String,
}

impl TranscriptInfo {

    pub fn new<T, U, V, W, X>(
        gene_id: T,
        gene_name: U,
        gene_type: V,
        trans_name: W,
        trans_type: X) -> Self
        where T: Into<String>, U: Into<String>, V: Into<String>,
              W: Into<String>, X: Into<String>
    {
        TranscriptInfo {
            gene_id: gene_id.into(),
            gene_name: gene_name.into(),
            gene_type: gene_type.into(),
            trans_name: trans_name.into(),
            trans_type: trans_type.into(),
        }
    }

    pub fn gene_id(&self) -> &str {
        self.gene_id.as_str()
    }

    pub fn gene_name(&self) -> &str {
        self.gene_name.as_str()
    }

    pub fn gene_type(&self) -> &str {
        self.gene_type.as_str()
    }

    pub fn trans_name(&self) -> &str {
        self.trans_name.as_str()
    }

    pub fn trans_type(&self) -> &str {
        self.trans_type.as_str()
    }
}

/// Transcript metadata keyed by transcript identifier, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct TranscriptInfoTable {
    inner: LinkedHashMap<String, TranscriptInfo>,
}

impl TranscriptInfoTable {

    pub fn new() -> Self {
        TranscriptInfoTable { inner: LinkedHashMap::new() }
    }

    pub fn insert<T>(&mut self, trans_id: T, info: TranscriptInfo) -> Option<TranscriptInfo>
        where T: Into<String>
    {
        self.inner.insert(trans_id.into(), info)
    }

    pub fn get(&self, trans_id: &str) -> Option<&TranscriptInfo> {
        self.inner.get(trans_id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> linked_hash_map::Iter<String, TranscriptInfo> {
        self.inner.iter()
    }
}
