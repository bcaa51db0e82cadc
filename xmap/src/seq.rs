/*! Sequence retrieval boundary.

Fetching nucleotide sequence from an assembly (e.g. a 2-bit file) is a collaborator
concern behind the `SequenceReader` trait; the contract is that reverse-strand
requests come back already reverse-complemented. `SeqWindow` wraps a reader with a
cache of the last fetched window. The window is private to one transcript's
processing and must not be shared across transcripts or across concurrent workers.
*/
use std::collections::HashMap;

use bio_types::strand::Strand;
use quick_error::quick_error;

use crate::model::Region;


quick_error! {
    /// Errors that occur when retrieving sequence.
    #[derive(Debug)]
    pub enum SeqError {
        /// Occurs when the requested assembly/chromosome pair is unknown.
        UnknownSequence(assembly: String, chrom: String) {
            display("no sequence for chromosome {} of assembly {}", chrom, assembly)
        }
        /// Occurs when the requested region extends beyond the stored sequence.
        RegionOutOfBounds(chrom: String, region: (u64, u64), len: u64) {
            display("region [{}, {}) extends beyond chromosome {} of length {}",
                    region.0, region.1, chrom, len)
        }
    }
}

/// Supplier of nucleotide sequence for genomic spans.
pub trait SequenceReader {

    /// Fetches the sequence of the given span, reverse-complemented when `strand` is
    /// the reverse strand.
    fn fetch(
        &mut self,
        assembly: &str,
        chrom: &str,
        region: &Region,
        strand: Strand) -> crate::Result<String>;
}

struct Window {
    assembly: String,
    chrom: String,
    region: Region,
    strand: Strand,
    seq: String,
}

/// A sequence reader with a one-window cache.
///
/// Repeated fetches within the last retrieved window (same assembly, chromosome, and
/// strand) are sliced from memory instead of going back to the underlying reader.
pub struct SeqWindow<R: SequenceReader> {
    reader: R,
    window: Option<Window>,
}

impl<R: SequenceReader> SeqWindow<R> {

    pub fn new(reader: R) -> Self {
        SeqWindow { reader, window: None }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn fetch(
        &mut self,
        assembly: &str,
        chrom: &str,
        region: &Region,
        strand: Strand) -> crate::Result<String>
    {
        if let Some(ref window) = self.window {
            if window.assembly == assembly && window.chrom == chrom
                && window.strand == strand && window.region.contains(region)
            {
                return Ok(Self::slice(window, region));
            }
        }
        let seq = self.reader.fetch(assembly, chrom, region, strand)?;
        self.window = Some(Window {
            assembly: assembly.to_owned(),
            chrom: chrom.to_owned(),
            region: *region,
            strand,
            seq: seq.clone(),
        });
        Ok(seq)
    }

    fn slice(window: &Window, region: &Region) -> String {
        // A reverse-strand window is stored reverse-complemented, so its first base
        // corresponds to the window's genomic end.
        let offset = match window.strand {
            Strand::Reverse => (window.region.end() - region.end()) as usize,
            _ => (region.start() - window.region.start()) as usize,
        };
        window.seq[offset..offset + region.len() as usize].to_owned()
    }
}

/// In-memory sequence reader, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemSequenceReader {
    seqs: HashMap<(String, String), String>,
}

impl MemSequenceReader {

    pub fn new() -> Self {
        MemSequenceReader { seqs: HashMap::new() }
    }

    pub fn insert<T, U, V>(&mut self, assembly: T, chrom: U, seq: V)
        where T: Into<String>, U: Into<String>, V: Into<String>
    {
        let _ = self.seqs.insert((assembly.into(), chrom.into()), seq.into());
    }
}

impl SequenceReader for MemSequenceReader {

    fn fetch(
        &mut self,
        assembly: &str,
        chrom: &str,
        region: &Region,
        strand: Strand) -> crate::Result<String>
    {
        let seq = self.seqs.get(&(assembly.to_owned(), chrom.to_owned()))
            .ok_or_else(|| crate::Error::from(
                SeqError::UnknownSequence(assembly.to_owned(), chrom.to_owned())))?;
        if region.end() > seq.len() as u64 {
            return Err(crate::Error::from(SeqError::RegionOutOfBounds(
                chrom.to_owned(),
                (region.start(), region.end()),
                seq.len() as u64)));
        }
        let sub = &seq[region.start() as usize..region.end() as usize];
        Ok(match strand {
            Strand::Reverse => revcomp(sub),
            _ => sub.to_owned(),
        })
    }
}

fn revcomp(seq: &str) -> String {
    seq.bytes().rev()
        .map(|base| match base {
            b'A' => 'T',
            b'C' => 'G',
            b'G' => 'C',
            b'T' => 'A',
            b'a' => 't',
            b'c' => 'g',
            b'g' => 'c',
            b't' => 'a',
            _ => 'N',
        })
        .collect()
}
