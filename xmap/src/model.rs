/*! Core data model for cross-assembly transcript mappings.

The model is built around half-open integer intervals. A bare interval is a
`Region`; a `Coords` value anchors a region to a chromosome, a strand, and
optionally a genome assembly. On top of these sit the two mapped-feature
records: `MappedExon` (one source exon projected onto the target assembly)
and `MappedTranscript` (the ordered collection of mapped exons plus
transcript-level coordinates and metadata).

`MappedTranscript` values are constructed exactly once, through `MTBuilder`,
which validates that no two mapped exons claim overlapping target genome
space and that every mapped exon lies within the overall mapped span. There
is no mutation API afterwards.
*/
use std::cmp::{max, min};

use bio_types::strand::{Strand, StrandError};
use itertools::Itertools;
use quick_error::quick_error;

use crate::consts::DEF_ID;


quick_error! {
    /// Errors that occur when constructing or validating mapped features.
    #[derive(Debug)]
    pub enum ModelError {
        /// Occurs when an interval is constructed with a start coordinate larger than its
        /// end coordinate.
        InvalidInterval(start: u64, end: u64) {
            display("interval start coordinate {} larger than its end coordinate {}",
                    start, end)
        }
        /// Occurs when a strand character other than `+`, `-`, or `.` is given.
        InvalidStrandChar(err: StrandError) {
            display("{}", err)
            from()
        }
        ConflictingStrand {
            display("conflicting strand inputs specified")
        }
        UnspecifiedStrand {
            display("strand not specified")
        }
        InvalidExonInterval(tid: Option<String>) {
            display("exon has larger start than end coordinate, transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        InvalidCodingInterval(tid: Option<String>) {
            display("coding region has larger start than end coordinate, transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        CodingNotFullyEnveloped(tid: Option<String>) {
            display("coding region not fully enveloped by the transcript, transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        UnspecifiedExons(tid: Option<String>) {
            display("transcript is defined without exons, transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        UnmatchedExons(tid: Option<String>) {
            display("first and/or last exon coordinates do not match transcript \
                     start and/or end coordinates, transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        /// Occurs when the number of per-exon values (frames or identifiers) differs from
        /// the number of exon coordinates.
        ExonCountMismatch(tid: Option<String>) {
            display("number of exons and number of per-exon values are not equal, \
                     transcript ID: {}",
                    tid.as_deref().unwrap_or(DEF_ID))
        }
        /// Occurs when an exon frame value is outside `-1..=2`.
        InvalidFrame(value: i64, fid: Option<String>) {
            display("exon frame {} is not -1, 0, 1, or 2, feature ID: {}",
                    value, fid.as_deref().unwrap_or(DEF_ID))
        }
        /// Occurs when two mapped exons of one transcript claim overlapping target
        /// genome space.
        OverlappingMappedExons(tid: String, first: (u64, u64), second: (u64, u64)) {
            display("mapped exons [{}, {}) and [{}, {}) overlap in target coordinates, \
                     transcript ID: {}",
                    first.0, first.1, second.0, second.1, tid)
        }
        /// Occurs when a mapped exon span extends beyond the transcript's overall
        /// mapped coordinates.
        MappedExonOutsideTranscript(tid: String, exon: (u64, u64), mapped: (u64, u64)) {
            display("mapped exon [{}, {}) lies outside the overall mapped span \
                     [{}, {}), transcript ID: {}",
                    exon.0, exon.1, mapped.0, mapped.1, tid)
        }
    }
}

/// Half-open interval `[start, end)` over unsigned genomic coordinates.
///
/// Zero-length regions are valid and mean "nothing here"; `none_if_empty` turns them
/// into an explicit absent value so downstream code never has to probe lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Region {
    start: u64,
    end: u64,
}

impl Region {

    /// Creates a region, requiring `start <= end`.
    pub fn new(start: u64, end: u64) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvalidInterval(start, end));
        }
        Ok(Region { start, end })
    }

    // Permissive constructor used by interval arithmetic: a reversed input clamps to a
    // zero-length region instead of erroring.
    pub(crate) fn clamped(start: u64, end: u64) -> Self {
        Region { start, end: max(start, end) }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the two regions share at least one base.
    ///
    /// Touching endpoints do not count as overlap.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns whether `other` lies fully within this region.
    pub fn contains(&self, other: &Region) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Returns the intersection of the two regions.
    ///
    /// A disjoint input yields an empty region pinned at the larger start, never an
    /// error.
    pub fn intersect(&self, other: &Region) -> Region {
        Region::clamped(max(self.start, other.start), min(self.end, other.end))
    }

    /// Returns the smallest region enveloping both inputs.
    pub fn hull(&self, other: &Region) -> Region {
        Region {
            start: min(self.start, other.start),
            end: max(self.end, other.end),
        }
    }

    /// Maps an empty region to an explicit absent value.
    pub fn none_if_empty(self) -> Option<Region> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// A region anchored to a coordinate system: chromosome, strand, and optionally a
/// genome assembly identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Coords {
    chrom: String,
    region: Region,
    strand: Strand,
    assembly: Option<String>,
}

impl Coords {

    pub fn new<T>(chrom: T, start: u64, end: u64, strand: Strand) -> Result<Self, ModelError>
        where T: Into<String>
    {
        let region = Region::new(start, end)?;
        Ok(Coords {
            chrom: chrom.into(),
            region,
            strand,
            assembly: None,
        })
    }

    pub fn with_assembly<T>(mut self, assembly: T) -> Self
        where T: Into<String>
    {
        self.assembly = Some(assembly.into());
        self
    }

    pub fn chrom(&self) -> &str {
        self.chrom.as_str()
    }

    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    pub fn assembly(&self) -> Option<&str> {
        self.assembly.as_deref()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn start(&self) -> u64 {
        self.region.start
    }

    pub fn end(&self) -> u64 {
        self.region.end
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Intersects with a bare region, keeping this object's chromosome, strand, and
    /// assembly.
    ///
    /// The receiver is always the authoritative coordinate frame, so the operation is
    /// asymmetric by design.
    pub fn intersect(&self, other: &Region) -> Coords {
        Coords {
            chrom: self.chrom.clone(),
            region: self.region.intersect(other),
            strand: self.strand,
            assembly: self.assembly.clone(),
        }
    }

    /// Maps an empty set of coordinates to an explicit absent value.
    pub fn none_if_empty(self) -> Option<Coords> {
        if self.region.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// One source exon projected onto the target assembly.
///
/// An absent mapped span means the exon did not map at all; such exons still appear in
/// their transcript so exon numbering stays intact.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedExon {
    src_exon_id: String,
    exon_num: u32,
    src: Coords,
    src_bases: u64,
    mapped: Option<Coords>,
    mapped_bases: u64,
    src_cds: Option<Region>,
    mapped_cds: Option<Region>,
    frame: Option<u8>,
    dna_align: Option<String>,
    pep_align: Option<String>,
}

impl MappedExon {

    pub fn src_exon_id(&self) -> &str {
        self.src_exon_id.as_str()
    }

    /// Ordinal exon number in transcript 5'-to-3' order, starting at 1.
    pub fn exon_num(&self) -> u32 {
        self.exon_num
    }

    pub fn src(&self) -> &Coords {
        &self.src
    }

    pub fn src_bases(&self) -> u64 {
        self.src_bases
    }

    pub fn mapped(&self) -> Option<&Coords> {
        self.mapped.as_ref()
    }

    pub fn mapped_bases(&self) -> u64 {
        self.mapped_bases
    }

    pub fn src_cds(&self) -> Option<&Region> {
        self.src_cds.as_ref()
    }

    pub fn mapped_cds(&self) -> Option<&Region> {
        self.mapped_cds.as_ref()
    }

    pub fn frame(&self) -> Option<u8> {
        self.frame
    }

    pub fn dna_align(&self) -> Option<&str> {
        self.dna_align.as_deref()
    }

    pub fn pep_align(&self) -> Option<&str> {
        self.pep_align.as_deref()
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some()
    }
}

/// Builder for `MappedExon`.
pub struct MEBuilder {
    src_exon_id: String,
    exon_num: u32,
    src: Coords,
    src_bases: u64,
    mapped: Option<Coords>,
    mapped_bases: u64,
    src_cds: Option<Region>,
    mapped_cds: Option<Region>,
    frame: Option<u8>,
    dna_align: Option<String>,
    pep_align: Option<String>,
}

impl MEBuilder {

    pub fn new<T>(src_exon_id: T, exon_num: u32, src: Coords) -> Self
        where T: Into<String>
    {
        let src_bases = src.len();
        MEBuilder {
            src_exon_id: src_exon_id.into(),
            exon_num,
            src,
            src_bases,
            mapped: None,
            mapped_bases: 0,
            src_cds: None,
            mapped_cds: None,
            frame: None,
            dna_align: None,
            pep_align: None,
        }
    }

    pub fn src_bases(mut self, src_bases: u64) -> Self {
        self.src_bases = src_bases;
        self
    }

    pub fn mapped(mut self, mapped: Coords, mapped_bases: u64) -> Self {
        self.mapped = Some(mapped);
        self.mapped_bases = mapped_bases;
        self
    }

    pub fn src_cds(mut self, src_cds: Region) -> Self {
        self.src_cds = Some(src_cds);
        self
    }

    pub fn mapped_cds(mut self, mapped_cds: Region) -> Self {
        self.mapped_cds = Some(mapped_cds);
        self
    }

    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn dna_align<T>(mut self, dna_align: T) -> Self
        where T: Into<String>
    {
        self.dna_align = Some(dna_align.into());
        self
    }

    pub fn pep_align<T>(mut self, pep_align: T) -> Self
        where T: Into<String>
    {
        self.pep_align = Some(pep_align.into());
        self
    }

    pub fn build(self) -> MappedExon {
        MappedExon {
            src_exon_id: self.src_exon_id,
            exon_num: self.exon_num,
            src: self.src,
            src_bases: self.src_bases,
            mapped: self.mapped,
            mapped_bases: self.mapped_bases,
            src_cds: self.src_cds,
            mapped_cds: self.mapped_cds,
            frame: self.frame,
            dna_align: self.dna_align,
            pep_align: self.pep_align,
        }
    }
}

/// Mapping of one source transcript onto the target assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedTranscript {
    src_assembly: String,
    mapped_assembly: String,
    src_trans_id: String,
    mapped_trans_id: String,
    gene_id: String,
    gene_name: String,
    gene_type: String,
    trans_name: String,
    trans_type: String,
    src: Option<Coords>,
    mapped: Option<Coords>,
    src_cds: Option<Region>,
    mapped_cds: Option<Region>,
    exons: Vec<MappedExon>,
}

impl MappedTranscript {

    pub fn src_assembly(&self) -> &str {
        self.src_assembly.as_str()
    }

    pub fn mapped_assembly(&self) -> &str {
        self.mapped_assembly.as_str()
    }

    pub fn src_trans_id(&self) -> &str {
        self.src_trans_id.as_str()
    }

    /// Target-side transcript identifier, e.g. `ENST00000327381.7-1`, where `-N`
    /// distinguishes multiple mappings of one source transcript.
    pub fn mapped_trans_id(&self) -> &str {
        self.mapped_trans_id.as_str()
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

    pub fn src(&self) -> Option<&Coords> {
        self.src.as_ref()
    }

    /// Overall mapped coordinates, absent when the transcript did not map at all.
    pub fn mapped(&self) -> Option<&Coords> {
        self.mapped.as_ref()
    }

    pub fn src_cds(&self) -> Option<&Region> {
        self.src_cds.as_ref()
    }

    pub fn mapped_cds(&self) -> Option<&Region> {
        self.mapped_cds.as_ref()
    }

    /// Exons ordered by source exon number, independent of strand.
    pub fn exons(&self) -> &[MappedExon] {
        self.exons.as_slice()
    }

    pub fn mapped_exon_count(&self) -> usize {
        self.exons.iter().filter(|exon| exon.is_mapped()).count()
    }

    pub fn mapped_bases(&self) -> u64 {
        self.exons.iter().map(|exon| exon.mapped_bases()).sum()
    }
}

/// Builder for `MappedTranscript`.
///
/// `build` is the single validation gate of the model: it checks that no two exons
/// with defined mapped spans overlap in target coordinates, and that every mapped
/// exon span lies within the overall mapped coordinates when those are set. A
/// violation always indicates an upstream alignment or exon-numbering defect and
/// is never repaired.
pub struct MTBuilder {
    src_assembly: String,
    mapped_assembly: String,
    src_trans_id: String,
    mapping_num: u32,
    mapped_trans_id: Option<String>,
    gene_id: String,
    gene_name: String,
    gene_type: String,
    trans_name: String,
    trans_type: String,
    src: Option<Coords>,
    mapped: Option<Coords>,
    src_cds: Option<Region>,
    mapped_cds: Option<Region>,
    exons: Vec<MappedExon>,
}

impl MTBuilder {

    pub fn new<T, U, V>(src_assembly: T, mapped_assembly: U, src_trans_id: V) -> Self
        where T: Into<String>, U: Into<String>, V: Into<String>
    {
        MTBuilder {
            src_assembly: src_assembly.into(),
            mapped_assembly: mapped_assembly.into(),
            src_trans_id: src_trans_id.into(),
            mapping_num: 1,
            mapped_trans_id: None,
            gene_id: String::new(),
            gene_name: String::new(),
            gene_type: String::new(),
            trans_name: String::new(),
            trans_type: String::new(),
            src: None,
            mapped: None,
            src_cds: None,
            mapped_cds: None,
            exons: Vec::new(),
        }
    }

    /// Sets the ordinal used for the `-N` suffix of the mapped transcript identifier.
    pub fn mapping_num(mut self, mapping_num: u32) -> Self {
        self.mapping_num = mapping_num;
        self
    }

    /// Sets the mapped transcript identifier explicitly, overriding the suffix scheme.
    pub fn mapped_trans_id<T>(mut self, mapped_trans_id: T) -> Self
        where T: Into<String>
    {
        self.mapped_trans_id = Some(mapped_trans_id.into());
        self
    }

    pub fn gene_id<T>(mut self, gene_id: T) -> Self
        where T: Into<String>
    {
        self.gene_id = gene_id.into();
        self
    }

    pub fn gene_name<T>(mut self, gene_name: T) -> Self
        where T: Into<String>
    {
        self.gene_name = gene_name.into();
        self
    }

    pub fn gene_type<T>(mut self, gene_type: T) -> Self
        where T: Into<String>
    {
        self.gene_type = gene_type.into();
        self
    }

    pub fn trans_name<T>(mut self, trans_name: T) -> Self
        where T: Into<String>
    {
        self.trans_name = trans_name.into();
        self
    }

    pub fn trans_type<T>(mut self, trans_type: T) -> Self
        where T: Into<String>
    {
        self.trans_type = trans_type.into();
        self
    }

    pub fn src(mut self, src: Coords) -> Self {
        self.src = Some(src);
        self
    }

    pub fn mapped(mut self, mapped: Coords) -> Self {
        self.mapped = Some(mapped);
        self
    }

    pub fn src_cds(mut self, src_cds: Region) -> Self {
        self.src_cds = Some(src_cds);
        self
    }

    pub fn mapped_cds(mut self, mapped_cds: Region) -> Self {
        self.mapped_cds = Some(mapped_cds);
        self
    }

    pub fn exon(mut self, exon: MappedExon) -> Self {
        self.exons.push(exon);
        self
    }

    pub fn exons(mut self, exons: Vec<MappedExon>) -> Self {
        self.exons = exons;
        self
    }

    pub fn build(self) -> crate::Result<MappedTranscript> {
        let mut exons = self.exons;
        exons.sort_by_key(|exon| exon.exon_num());

        let overlapping = exons.iter()
            .filter_map(|exon| exon.mapped().map(|coords| *coords.region()))
            .tuple_combinations::<(Region, Region)>()
            .find(|(first, second)| first.overlaps(second));
        if let Some((first, second)) = overlapping {
            let err = ModelError::OverlappingMappedExons(
                self.src_trans_id.clone(),
                (first.start(), first.end()),
                (second.start(), second.end()));
            return Err(crate::Error::from(err));
        }

        if let Some(ref mapped) = self.mapped {
            let outlier = exons.iter()
                .filter_map(|exon| exon.mapped().map(|coords| *coords.region()))
                .find(|region| !mapped.region().contains(region));
            if let Some(region) = outlier {
                let err = ModelError::MappedExonOutsideTranscript(
                    self.src_trans_id.clone(),
                    (region.start(), region.end()),
                    (mapped.start(), mapped.end()));
                return Err(crate::Error::from(err));
            }
        }

        let mapped_trans_id = match self.mapped_trans_id {
            Some(mapped_trans_id) => mapped_trans_id,
            None => format!("{}-{}", self.src_trans_id, self.mapping_num),
        };

        Ok(MappedTranscript {
            src_assembly: self.src_assembly,
            mapped_assembly: self.mapped_assembly,
            src_trans_id: self.src_trans_id,
            mapped_trans_id,
            gene_id: self.gene_id,
            gene_name: self.gene_name,
            gene_type: self.gene_type,
            trans_name: self.trans_name,
            trans_type: self.trans_type,
            src: self.src,
            mapped: self.mapped,
            src_cds: self.src_cds,
            mapped_cds: self.mapped_cds,
            exons,
        })
    }
}

pub(crate) fn resolve_strand_input(
    strand: Option<Strand>,
    strand_char: Option<char>)
-> Result<Strand, ModelError>
{
    match (strand, strand_char) {
        (None, None) => Err(ModelError::UnspecifiedStrand),
        (Some(sv), None) => Ok(sv),
        (None, Some(ref scv)) => Strand::from_char(scv).map_err(ModelError::from),
        (Some(sv), Some(ref scv)) => {
            let sv_from_char = Strand::from_char(scv).map_err(ModelError::from)?;
            if sv == sv_from_char {
                Ok(sv)
            } else {
                Err(ModelError::ConflictingStrand)
            }
        }
    }
}
