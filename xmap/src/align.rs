/*! Alignment bundle consumed when projecting a transcript.

A bundle is the ordered list of ungapped aligned blocks connecting a span of the
source assembly to the target assembly, as produced upstream by the aligner and
already normalized to a forward target strand. Parsing alignment files is a
collaborator concern; construction here enforces the structural assumptions the
projection relies on, since a malformed bundle would otherwise corrupt every region
derived from it.
*/
use bio_types::strand::Strand;
use quick_error::quick_error;

use crate::model::Region;


quick_error! {
    /// Errors that occur when constructing an alignment bundle.
    #[derive(Debug)]
    pub enum AlignError {
        /// Occurs when a block's source and target spans differ in length.
        BlockLengthMismatch(src: (u64, u64), tgt: (u64, u64)) {
            display("alignment block source span [{}, {}) and target span [{}, {}) \
                     differ in length",
                    src.0, src.1, tgt.0, tgt.1)
        }
        /// Occurs when blocks are not sorted and disjoint on both the source and the
        /// target side.
        UnsortedBlocks(index: usize) {
            display("alignment blocks are not sorted and disjoint at block {}", index)
        }
        /// Occurs when a block extends beyond the declared query size.
        BlockOutsideQuery(index: usize, query_size: u64) {
            display("alignment block {} extends beyond the query size {}",
                    index, query_size)
        }
        /// Occurs when a bundle is constructed with a non-forward target strand.
        UnnormalizedTargetStrand(symbol: String) {
            display("alignment target strand is '{}' but bundles must be normalized \
                     to the forward strand",
                    symbol)
        }
    }
}

/// One ungapped aligned block: equal-length source and target spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedBlock {
    src: Region,
    tgt: Region,
}

impl AlignedBlock {

    pub fn new(src: Region, tgt: Region) -> Result<Self, AlignError> {
        if src.len() != tgt.len() {
            return Err(AlignError::BlockLengthMismatch(
                (src.start(), src.end()), (tgt.start(), tgt.end())));
        }
        Ok(AlignedBlock { src, tgt })
    }

    pub fn src(&self) -> &Region {
        &self.src
    }

    pub fn tgt(&self) -> &Region {
        &self.tgt
    }
}

/// The alignment of one source region onto the target assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentBundle {
    blocks: Vec<AlignedBlock>,
    query_size: u64,
    tgt_strand: Strand,
}

impl AlignmentBundle {

    pub fn new(
        blocks: Vec<AlignedBlock>,
        query_size: u64,
        tgt_strand: Strand)
    -> Result<Self, AlignError>
    {
        if let Strand::Reverse | Strand::Unknown = tgt_strand {
            return Err(AlignError::UnnormalizedTargetStrand(
                tgt_strand.strand_symbol().to_owned()));
        }
        for (idx, pair) in blocks.windows(2).enumerate() {
            if pair[1].src.start() < pair[0].src.end()
                || pair[1].tgt.start() < pair[0].tgt.end()
            {
                return Err(AlignError::UnsortedBlocks(idx + 1));
            }
        }
        for (idx, block) in blocks.iter().enumerate() {
            if block.src.end() > query_size {
                return Err(AlignError::BlockOutsideQuery(idx, query_size));
            }
        }
        Ok(AlignmentBundle { blocks, query_size, tgt_strand })
    }

    pub fn blocks(&self) -> &[AlignedBlock] {
        self.blocks.as_slice()
    }

    /// Size of the source sequence the block coordinates refer to.
    pub fn query_size(&self) -> u64 {
        self.query_size
    }

    pub fn tgt_strand(&self) -> &Strand {
        &self.tgt_strand
    }

    /// Projects a source-side span onto the target assembly.
    ///
    /// Returns the enveloping target region of all aligned pieces, or `None` when no
    /// block overlaps the span, along with the number of aligned bases. Gaps between
    /// blocks contribute to the envelope but not to the base count.
    pub fn project(&self, span: &Region) -> (Option<Region>, u64) {
        let mut mapped: Option<Region> = None;
        let mut bases = 0;
        for block in self.blocks.iter() {
            let isect = span.intersect(&block.src);
            if isect.is_empty() {
                continue;
            }
            let offset = isect.start() - block.src.start();
            let piece = Region::clamped(
                block.tgt.start() + offset,
                block.tgt.start() + offset + isect.len());
            bases += isect.len();
            mapped = Some(match mapped {
                Some(current) => current.hull(&piece),
                None => piece,
            });
        }
        (mapped, bases)
    }
}
