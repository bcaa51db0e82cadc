/*! Reader and writer for the mapped-transcript JSON interchange format.

One file holds an array of mapped-transcript objects with camelCase field names,
matching the files the batch pipeline exchanges between its stages. Reading funnels
every record through the model builders, so a stored file with overlapping mapped
exons fails validation exactly as a freshly computed mapping would.
*/
use std::fs;
use std::io;
use std::path::Path;

use bio_types::strand::Strand;
use serde::{Deserialize, Serialize};

use crate::model::{Coords, MEBuilder, MTBuilder, MappedExon, MappedTranscript,
                   ModelError, Region};


#[derive(Debug, Serialize, Deserialize)]
struct RawRegion {
    start: u64,
    end: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawCoords {
    chrom: String,
    start: u64,
    end: u64,
    strand: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assembly: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMappedExon {
    src_exon_id: String,
    exon_num: u32,
    src: RawCoords,
    src_bases: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mapped: Option<RawCoords>,
    #[serde(default)]
    mapped_bases: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src_cds: Option<RawRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mapped_cds: Option<RawRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frame: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dna_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pep_align: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMappedTranscript {
    src_assembly: String,
    mapped_assembly: String,
    src_trans_id: String,
    mapped_trans_id: String,
    #[serde(default)]
    gene_id: String,
    #[serde(default)]
    gene_name: String,
    #[serde(default)]
    gene_type: String,
    #[serde(default)]
    trans_name: String,
    #[serde(default)]
    trans_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src: Option<RawCoords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mapped: Option<RawCoords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    src_cds: Option<RawRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mapped_cds: Option<RawRegion>,
    exons: Vec<RawMappedExon>,
}

fn strand_char(strand: &Strand) -> char {
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
        Strand::Unknown => '.',
    }
}

fn raw_to_region(raw: RawRegion) -> crate::Result<Region> {
    Region::new(raw.start, raw.end).map_err(crate::Error::Model)
}

fn raw_to_coords(raw: RawCoords) -> crate::Result<Coords> {
    let strand = Strand::from_char(&raw.strand)
        .map_err(|err| crate::Error::Model(ModelError::from(err)))?;
    let mut coords = Coords::new(raw.chrom, raw.start, raw.end, strand)
        .map_err(crate::Error::Model)?;
    if let Some(assembly) = raw.assembly {
        coords = coords.with_assembly(assembly);
    }
    Ok(coords)
}

fn region_to_raw(region: &Region) -> RawRegion {
    RawRegion { start: region.start(), end: region.end() }
}

fn coords_to_raw(coords: &Coords) -> RawCoords {
    RawCoords {
        chrom: coords.chrom().to_owned(),
        start: coords.start(),
        end: coords.end(),
        strand: strand_char(coords.strand()),
        assembly: coords.assembly().map(|v| v.to_owned()),
    }
}

fn raw_to_exon(raw: RawMappedExon) -> crate::Result<MappedExon> {
    if let Some(frame) = raw.frame {
        if frame > 2 {
            let err = ModelError::InvalidFrame(
                i64::from(frame), Some(raw.src_exon_id.clone()));
            return Err(crate::Error::from(err));
        }
    }
    let src = raw_to_coords(raw.src)?;
    let mut builder = MEBuilder::new(raw.src_exon_id, raw.exon_num, src)
        .src_bases(raw.src_bases);
    if let Some(mapped) = raw.mapped {
        builder = builder.mapped(raw_to_coords(mapped)?, raw.mapped_bases);
    }
    if let Some(src_cds) = raw.src_cds {
        builder = builder.src_cds(raw_to_region(src_cds)?);
    }
    if let Some(mapped_cds) = raw.mapped_cds {
        builder = builder.mapped_cds(raw_to_region(mapped_cds)?);
    }
    if let Some(frame) = raw.frame {
        builder = builder.frame(frame);
    }
    if let Some(dna_align) = raw.dna_align {
        builder = builder.dna_align(dna_align);
    }
    if let Some(pep_align) = raw.pep_align {
        builder = builder.pep_align(pep_align);
    }
    Ok(builder.build())
}

fn raw_to_transcript(raw: RawMappedTranscript) -> crate::Result<MappedTranscript> {
    let exons = raw.exons.into_iter()
        .map(raw_to_exon)
        .collect::<crate::Result<Vec<MappedExon>>>()?;
    let mut builder = MTBuilder::new(raw.src_assembly, raw.mapped_assembly,
                                     raw.src_trans_id)
        .mapped_trans_id(raw.mapped_trans_id)
        .gene_id(raw.gene_id)
        .gene_name(raw.gene_name)
        .gene_type(raw.gene_type)
        .trans_name(raw.trans_name)
        .trans_type(raw.trans_type)
        .exons(exons);
    if let Some(src) = raw.src {
        builder = builder.src(raw_to_coords(src)?);
    }
    if let Some(mapped) = raw.mapped {
        builder = builder.mapped(raw_to_coords(mapped)?);
    }
    if let Some(src_cds) = raw.src_cds {
        builder = builder.src_cds(raw_to_region(src_cds)?);
    }
    if let Some(mapped_cds) = raw.mapped_cds {
        builder = builder.mapped_cds(raw_to_region(mapped_cds)?);
    }
    builder.build()
}

fn exon_to_raw(exon: &MappedExon) -> RawMappedExon {
    RawMappedExon {
        src_exon_id: exon.src_exon_id().to_owned(),
        exon_num: exon.exon_num(),
        src: coords_to_raw(exon.src()),
        src_bases: exon.src_bases(),
        mapped: exon.mapped().map(coords_to_raw),
        mapped_bases: exon.mapped_bases(),
        src_cds: exon.src_cds().map(region_to_raw),
        mapped_cds: exon.mapped_cds().map(region_to_raw),
        frame: exon.frame(),
        dna_align: exon.dna_align().map(|v| v.to_owned()),
        pep_align: exon.pep_align().map(|v| v.to_owned()),
    }
}

fn transcript_to_raw(transcript: &MappedTranscript) -> RawMappedTranscript {
    RawMappedTranscript {
        src_assembly: transcript.src_assembly().to_owned(),
        mapped_assembly: transcript.mapped_assembly().to_owned(),
        src_trans_id: transcript.src_trans_id().to_owned(),
        mapped_trans_id: transcript.mapped_trans_id().to_owned(),
        gene_id: transcript.gene_id().to_owned(),
        gene_name: transcript.gene_name().to_owned(),
        gene_type: transcript.gene_type().to_owned(),
        trans_name: transcript.trans_name().to_owned(),
        trans_type: transcript.trans_type().to_owned(),
        src: transcript.src().map(coords_to_raw),
        mapped: transcript.mapped().map(coords_to_raw),
        src_cds: transcript.src_cds().map(region_to_raw),
        mapped_cds: transcript.mapped_cds().map(region_to_raw),
        exons: transcript.exons().iter().map(exon_to_raw).collect(),
    }
}

/// Mapped-transcript JSON reader.
pub struct Reader<R: io::Read> {
    inner: R,
}

impl<R: io::Read> Reader<R> {

    /// Creates a JSON reader from another reader.
    pub fn from_reader(in_reader: R) -> Reader<R> {
        Reader { inner: in_reader }
    }

    /// Reads and validates all mapped transcripts.
    pub fn read_transcripts(&mut self) -> crate::Result<Vec<MappedTranscript>> {
        let raws: Vec<RawMappedTranscript> = serde_json::from_reader(&mut self.inner)?;
        raws.into_iter().map(raw_to_transcript).collect()
    }
}

impl Reader<fs::File> {

    /// Creates a JSON reader that reads from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        fs::File::open(path).map(Reader::from_reader)
    }
}

/// Mapped-transcript JSON writer.
pub struct Writer<W: io::Write> {
    inner: W,
}

impl<W: io::Write> Writer<W> {

    /// Creates a JSON writer from another writer.
    pub fn from_writer(in_writer: W) -> Writer<W> {
        Writer { inner: in_writer }
    }

    /// Writes the given mapped transcripts as one JSON array.
    pub fn write_transcripts(&mut self, transcripts: &[MappedTranscript]) -> crate::Result<()> {
        let raws = transcripts.iter()
            .map(transcript_to_raw)
            .collect::<Vec<RawMappedTranscript>>();
        serde_json::to_writer_pretty(&mut self.inner, &raws)
            .map_err(crate::Error::from)
    }
}

impl Writer<fs::File> {

    /// Creates a JSON writer that writes to the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        fs::File::create(path).map(Writer::from_writer)
    }
}
