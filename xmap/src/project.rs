/*! Projection of a source transcript onto the target assembly.

`map_transcript` consumes one `MappingBundle` and assembles a validated
`MappedTranscript`: each source exon is pushed through the alignment blocks, its
coding sub-region and reading frame are resolved against the target gene model, and
the whole collection goes through the `MTBuilder` overlap gate. The two helper
operations, `mapped_exon_frame` and `mapped_coding_region`, are exposed on their own
since they are useful for re-deriving coding annotation from stored mappings.
*/
use bio_types::strand::Strand;
use itertools::Itertools;
use log::{debug, warn};
use quick_error::quick_error;

use crate::annot::TranscriptAnnot;
use crate::loader::MappingBundle;
use crate::model::{Coords, MEBuilder, MTBuilder, MappedTranscript, Region};


quick_error! {
    /// Errors that occur when projecting a transcript.
    #[derive(Debug)]
    pub enum ProjectError {
        /// Occurs when a candidate region overlaps the coding region but no
        /// frame-bearing exon covers it. The gene model guarantees that every coding
        /// stretch is covered by at least one exon with a defined frame, so this is a
        /// data inconsistency, not a normal outcome.
        NoCodingFrame(tid: String, region: (u64, u64), exons: String) {
            display("no frame-bearing exon overlaps coding candidate region [{}, {}), \
                     overlapping exons: [{}], transcript ID: {}",
                    region.0, region.1, exons, tid)
        }
        /// Occurs when the source transcript span does not fit the alignment query.
        QuerySizeMismatch(tid: String, end: u64, query_size: u64) {
            display("source transcript span ends at {} beyond the alignment query \
                     size {}, transcript ID: {}",
                    end, query_size, tid)
        }
    }
}

/// Resolves the coding sub-region and reading frame of a candidate mapped region
/// against a transcript gene model.
///
/// A candidate that does not overlap the model's coding region yields
/// `(None, None)`: the exon lies entirely in untranslated sequence, which is a
/// normal outcome, not an error. Otherwise the coding sub-region is the
/// intersection with the coding span, and the frame is taken from the first
/// frame-bearing exon that overlaps the candidate, scanning in transcript
/// 5'-to-3' order (reverse genomic order on the minus strand).
pub fn mapped_exon_frame(
    annot: &TranscriptAnnot,
    candidate: &Region)
-> Result<(Option<Region>, Option<u8>), ProjectError>
{
    let coding = match annot.coding() {
        Some(coding) if candidate.overlaps(coding) => coding,
        _ => return Ok((None, None)),
    };
    let exon_cds = candidate.intersect(coding).none_if_empty();

    let mut overlapping = annot.exons().iter()
        .filter(|exon| exon.region().overlaps(candidate));
    let frame = if let Strand::Reverse = *annot.strand() {
        overlapping.rev().find_map(|exon| exon.frame())
    } else {
        overlapping.find_map(|exon| exon.frame())
    };

    match frame {
        Some(frame) => Ok((exon_cds, Some(frame))),
        None => {
            let spans = annot.exons().iter()
                .filter(|exon| exon.region().overlaps(candidate))
                .map(|exon| format!("[{}, {})",
                                    exon.region().start(), exon.region().end()))
                .join(", ");
            Err(ProjectError::NoCodingFrame(
                annot.id().to_owned(),
                (candidate.start(), candidate.end()),
                spans))
        }
    }
}

/// Projects a transcript-level coding region into a mapped span.
///
/// An empty intersection normalizes to an explicit `None`, never to a degenerate
/// zero-length region, so consumers can test presence directly.
pub fn mapped_coding_region(mapped: &Region, coding: Option<&Region>) -> Option<Region> {
    coding
        .map(|coding_region| mapped.intersect(coding_region))
        .and_then(Region::none_if_empty)
}

/// Projects one source transcript onto the target assembly and returns the
/// validated mapping.
///
/// `mapping_num` is the ordinal used to suffix the mapped transcript identifier
/// when one source transcript yields multiple mappings.
pub fn map_transcript(
    bundle: &MappingBundle,
    mapping_num: u32)
-> crate::Result<MappedTranscript>
{
    let align = bundle.align();
    let src_annot = bundle.src_annot();
    let mapped_annot = bundle.mapped_annot();
    let tid = src_annot.id();

    if src_annot.region().end() > align.query_size() {
        let err = ProjectError::QuerySizeMismatch(
            tid.to_owned(), src_annot.region().end(), align.query_size());
        return Err(crate::Error::from(err));
    }

    let genomic = src_annot.exons();
    let mut exons = Vec::with_capacity(genomic.len());
    let mut mapped_hull: Option<Region> = None;
    for (idx, exon) in genomic.iter().enumerate() {
        // Exon 1 is the 5'-most exon in transcript order.
        let exon_num = match *src_annot.strand() {
            Strand::Reverse => (genomic.len() - idx) as u32,
            _ => (idx + 1) as u32,
        };
        let exon_id = exon.id()
            .map(|id| id.to_owned())
            .unwrap_or_else(|| format!("{}.{}", tid, exon_num));
        let src = Coords::new(src_annot.chrom(),
                              exon.region().start(), exon.region().end(),
                              *src_annot.strand())
            .map_err(crate::Error::Model)?
            .with_assembly(bundle.src_assembly());

        let mut builder = MEBuilder::new(exon_id, exon_num, src);
        if let Some(src_cds) = mapped_coding_region(exon.region(), src_annot.coding()) {
            builder = builder.src_cds(src_cds);
        }

        let (mapped_region, mapped_bases) = align.project(exon.region());
        if let Some(mregion) = mapped_region {
            let (mapped_cds, frame) = mapped_exon_frame(mapped_annot, &mregion)
                .map_err(crate::Error::Project)?;
            let mapped = Coords::new(mapped_annot.chrom(),
                                     mregion.start(), mregion.end(),
                                     *mapped_annot.strand())
                .map_err(crate::Error::Model)?
                .with_assembly(bundle.mapped_assembly());
            builder = builder.mapped(mapped, mapped_bases);
            if let Some(mapped_cds) = mapped_cds {
                builder = builder.mapped_cds(mapped_cds);
            }
            if let Some(frame) = frame {
                builder = builder.frame(frame);
            }
            mapped_hull = Some(match mapped_hull {
                Some(current) => current.hull(&mregion),
                None => mregion,
            });
        }
        exons.push(builder.build());
    }

    let src = Coords::new(src_annot.chrom(),
                          src_annot.region().start(), src_annot.region().end(),
                          *src_annot.strand())
        .map_err(crate::Error::Model)?
        .with_assembly(bundle.src_assembly());

    let info = bundle.info();
    let mut builder = MTBuilder::new(bundle.src_assembly(), bundle.mapped_assembly(), tid)
        .mapping_num(mapping_num)
        .gene_id(info.gene_id())
        .gene_name(info.gene_name())
        .gene_type(info.gene_type())
        .trans_name(info.trans_name())
        .trans_type(info.trans_type())
        .src(src)
        .exons(exons);
    if let Some(src_cds) = src_annot.coding() {
        builder = builder.src_cds(*src_cds);
    }
    if let Some(hull) = mapped_hull {
        let mapped = Coords::new(mapped_annot.chrom(),
                                 hull.start(), hull.end(),
                                 *mapped_annot.strand())
            .map_err(crate::Error::Model)?
            .with_assembly(bundle.mapped_assembly());
        builder = builder.mapped(mapped);
        if let Some(mapped_cds) = mapped_coding_region(&hull, mapped_annot.coding()) {
            builder = builder.mapped_cds(mapped_cds);
        }
    }

    let transcript = builder.build()?;
    if transcript.mapped().is_none() {
        warn!("transcript {} did not map to {}", tid, bundle.mapped_assembly());
    } else {
        debug!("projected transcript {}: {} of {} exons mapped",
               transcript.mapped_trans_id(),
               transcript.mapped_exon_count(),
               transcript.exons().len());
    }
    Ok(transcript)
}
