/*! Conversion of mapped transcripts to BED12 records and a writer for them.

The record type keeps every coordinate absolute, including block coordinates;
converting blocks to the BED convention of sizes plus record-relative starts is done
only at serialization time by the writer.
*/
use std::fs;
use std::io;
use std::path::Path;

use bio_types::strand::Strand;
use csv::{QuoteStyle, WriterBuilder};
use itertools::Itertools;

use crate::consts::{DEF_ITEM_RGB, DEF_SCORE};
use crate::model::{MappedTranscript, Region};


/// A block-annotation record: an outer span, a coding ("thick") sub-span, and the
/// exon-like sub-blocks within it.
#[derive(Debug, Clone, PartialEq)]
pub struct BedRecord {
    chrom: String,
    start: u64,
    end: u64,
    name: String,
    score: u32,
    strand: Strand,
    thick_start: u64,
    thick_end: u64,
    item_rgb: String,
    blocks: Vec<Region>,
}

impl BedRecord {

    pub fn chrom(&self) -> &str {
        self.chrom.as_str()
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn strand(&self) -> &Strand {
        &self.strand
    }

    /// Start of the coding span; equals `thick_end` for non-coding records.
    pub fn thick_start(&self) -> u64 {
        self.thick_start
    }

    pub fn thick_end(&self) -> u64 {
        self.thick_end
    }

    pub fn item_rgb(&self) -> &str {
        self.item_rgb.as_str()
    }

    pub fn set_item_rgb<T>(&mut self, item_rgb: T)
        where T: Into<String>
    {
        self.item_rgb = item_rgb.into();
    }

    /// Blocks in ascending genomic order, with absolute coordinates.
    pub fn blocks(&self) -> &[Region] {
        self.blocks.as_slice()
    }
}

/// Converts a validated mapped transcript into a block-annotation record.
///
/// Returns `None` when the transcript has no overall mapped coordinates, which is a
/// legitimate terminal state, not an error. Exons that individually failed to map
/// are omitted and become gaps between blocks. A missing mapped coding region is
/// rendered as a zero-length thick span pinned at the outer end, the BED convention
/// for non-coding records.
pub fn mapped_transcript_to_bed(transcript: &MappedTranscript) -> Option<BedRecord> {
    let mapped = transcript.mapped()?;
    let (thick_start, thick_end) = match transcript.mapped_cds() {
        Some(cds) => (cds.start(), cds.end()),
        None => (mapped.end(), mapped.end()),
    };
    // Exons are in transcript order; BED wants blocks in genomic order.
    let mut blocks = transcript.exons().iter()
        .filter_map(|exon| exon.mapped().map(|coords| *coords.region()))
        .collect::<Vec<Region>>();
    blocks.sort();

    Some(BedRecord {
        chrom: mapped.chrom().to_owned(),
        start: mapped.start(),
        end: mapped.end(),
        name: transcript.mapped_trans_id().to_owned(),
        score: DEF_SCORE,
        strand: *mapped.strand(),
        thick_start,
        thick_end,
        item_rgb: DEF_ITEM_RGB.to_owned(),
        blocks,
    })
}

/// BED12 writer.
pub struct Writer<W: io::Write> {
    inner: csv::Writer<W>,
}

impl<W: io::Write> Writer<W> {

    /// Creates a BED writer from another writer.
    pub fn from_writer(in_writer: W) -> Writer<W> {
        Writer {
            inner: WriterBuilder::new()
                .delimiter(b'\t')
                .quote_style(QuoteStyle::Never)
                .from_writer(in_writer),
        }
    }

    /// Writes the given record as a single row, converting block coordinates to
    /// sizes and record-relative starts.
    pub fn write_record(&mut self, record: &BedRecord) -> crate::Result<()> {
        let block_sizes = record.blocks().iter().map(|block| block.len()).join(",");
        let block_starts = record.blocks().iter()
            .map(|block| block.start() - record.start())
            .join(",");
        self.inner
            .serialize((record.chrom(), record.start(), record.end(), record.name(),
                        record.score(), record.strand().strand_symbol(),
                        record.thick_start(), record.thick_end(), record.item_rgb(),
                        record.blocks().len(), block_sizes, block_starts))
            .map_err(crate::Error::from)
    }

    /// Writes the given mapped transcript, returning whether a row was produced.
    ///
    /// Transcripts without overall mapped coordinates produce no output.
    pub fn write_transcript(&mut self, transcript: &MappedTranscript) -> crate::Result<bool> {
        match mapped_transcript_to_bed(transcript) {
            Some(record) => {
                self.write_record(&record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Writer<fs::File> {

    /// Creates a BED writer that writes to the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let f = fs::File::create(path)?;
        Ok(Writer::from_writer(f))
    }
}

impl Writer<Vec<u8>> {

    /// Creates a BED writer that writes to an in-memory buffer.
    pub fn from_memory() -> Writer<Vec<u8>> {
        Writer::from_writer(Vec::with_capacity(1024 * 64))
    }

    /// Returns the contents of the in-memory buffer as a string.
    pub fn into_string(self) -> crate::Result<String> {
        let buf = self.inner.into_inner()
            .map_err(|err| crate::Error::Io(err.into_error()))?;
        String::from_utf8(buf)
            .map_err(|err| crate::Error::Io(
                io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}
