use xmap::{mapped_transcript_to_bed, BedWriter, Coords, Error, JsonReader,
           JsonWriter, MEBuilder, MTBuilder, MappedTranscript, ModelError, Region};
use xmap::Strand::Forward;


fn region(start: u64, end: u64) -> Region {
    Region::new(start, end).unwrap()
}

fn coords(chrom: &str, start: u64, end: u64) -> Coords {
    Coords::new(chrom, start, end, Forward).unwrap()
}

fn coding_transcript() -> MappedTranscript {
    let exons = vec![
        MEBuilder::new("ENSE01.1", 1, coords("chr1", 100, 200).with_assembly("hg38"))
            .mapped(coords("chr2", 1000, 1100).with_assembly("mm39"), 100)
            .src_cds(region(150, 200))
            .mapped_cds(region(1050, 1100))
            .frame(0)
            .dna_align("100M")
            .build(),
        MEBuilder::new("ENSE02.1", 2, coords("chr1", 300, 400).with_assembly("hg38"))
            .build(),
        MEBuilder::new("ENSE03.1", 3, coords("chr1", 500, 700).with_assembly("hg38"))
            .mapped(coords("chr2", 1300, 1500).with_assembly("mm39"), 200)
            .build(),
    ];
    MTBuilder::new("hg38", "mm39", "ENST01.1")
        .gene_id("ENSG01.1")
        .gene_name("GENE1")
        .gene_type("protein_coding")
        .trans_name("GENE1-201")
        .trans_type("protein_coding")
        .src(coords("chr1", 100, 700).with_assembly("hg38"))
        .mapped(coords("chr2", 1000, 1500).with_assembly("mm39"))
        .src_cds(region(150, 650))
        .mapped_cds(region(1050, 1400))
        .exons(exons)
        .build()
        .unwrap()
}

fn unmapped_transcript() -> MappedTranscript {
    let exon = MEBuilder::new("ENSE04.1", 1, coords("chr1", 100, 200)).build();
    MTBuilder::new("hg38", "mm39", "ENST02.1")
        .src(coords("chr1", 100, 200))
        .exon(exon)
        .build()
        .unwrap()
}

#[test]
fn bed_conversion_skips_unmapped_exons() {
    let record = mapped_transcript_to_bed(&coding_transcript()).unwrap();
    assert_eq!(record.chrom(), "chr2");
    assert_eq!(record.start(), 1000);
    assert_eq!(record.end(), 1500);
    assert_eq!(record.name(), "ENST01.1-1");
    assert_eq!(record.thick_start(), 1050);
    assert_eq!(record.thick_end(), 1400);
    assert_eq!(record.blocks(), &[region(1000, 1100), region(1300, 1500)]);
}

#[test]
fn bed_conversion_of_unmapped_transcript_is_absent() {
    assert!(mapped_transcript_to_bed(&unmapped_transcript()).is_none());
}

#[test]
fn bed_noncoding_thick_span_pins_at_end() {
    let exon = MEBuilder::new("e1", 1, coords("chr1", 100, 200))
        .mapped(coords("chr2", 1000, 1100), 100)
        .build();
    let trx = MTBuilder::new("hg38", "mm39", "ENST03.1")
        .mapped(coords("chr2", 1000, 1100))
        .exon(exon)
        .build()
        .unwrap();
    let record = mapped_transcript_to_bed(&trx).unwrap();
    assert_eq!(record.thick_start(), 1100);
    assert_eq!(record.thick_end(), 1100);
}

#[test]
fn bed_writer_row_layout() {
    let mut writer = BedWriter::from_memory();
    let written = writer.write_transcript(&coding_transcript()).unwrap();
    assert!(written);
    assert!(!writer.write_transcript(&unmapped_transcript()).unwrap());

    let contents = writer.into_string().unwrap();
    assert_eq!(contents,
               "chr2\t1000\t1500\tENST01.1-1\t0\t+\t1050\t1400\t0,0,0\t2\t\
                100,200\t0,300\n");
}

#[test]
fn bed_record_item_rgb_override() {
    let mut record = mapped_transcript_to_bed(&coding_transcript()).unwrap();
    assert_eq!(record.item_rgb(), "0,0,0");
    record.set_item_rgb("230,10,10");
    assert_eq!(record.item_rgb(), "230,10,10");

    let mut writer = BedWriter::from_memory();
    writer.write_record(&record).unwrap();
    let contents = writer.into_string().unwrap();
    assert!(contents.contains("\t230,10,10\t"), "{}", contents);
}

#[test]
fn json_round_trip() {
    let transcripts = vec![coding_transcript(), unmapped_transcript()];

    let mut buf = Vec::new();
    JsonWriter::from_writer(&mut buf).write_transcripts(&transcripts).unwrap();
    let parsed = JsonReader::from_reader(buf.as_slice()).read_transcripts().unwrap();

    assert_eq!(parsed, transcripts);
}

#[test]
fn json_field_names_are_camel_case() {
    let mut buf = Vec::new();
    JsonWriter::from_writer(&mut buf)
        .write_transcripts(&[coding_transcript()])
        .unwrap();
    let contents = String::from_utf8(buf).unwrap();
    assert!(contents.contains("\"srcTransId\""), "{}", contents);
    assert!(contents.contains("\"mappedTransId\""), "{}", contents);
    assert!(contents.contains("\"srcExonId\""), "{}", contents);
    assert!(contents.contains("\"mappedBases\""), "{}", contents);
}

#[test]
fn json_read_rejects_overlapping_mapped_exons() {
    let payload = r#"[{
        "srcAssembly": "hg38",
        "mappedAssembly": "mm39",
        "srcTransId": "ENST05.1",
        "mappedTransId": "ENST05.1-1",
        "exons": [
            {"srcExonId": "e1", "exonNum": 1,
             "src": {"chrom": "chr1", "start": 100, "end": 200, "strand": "+"},
             "srcBases": 100,
             "mapped": {"chrom": "chr2", "start": 1000, "end": 1100, "strand": "+"},
             "mappedBases": 100},
            {"srcExonId": "e2", "exonNum": 2,
             "src": {"chrom": "chr1", "start": 300, "end": 400, "strand": "+"},
             "srcBases": 100,
             "mapped": {"chrom": "chr2", "start": 1050, "end": 1150, "strand": "+"},
             "mappedBases": 100}
        ]
    }]"#;
    let res = JsonReader::from_reader(payload.as_bytes()).read_transcripts();
    assert!(matches!(res,
                     Err(Error::Model(ModelError::OverlappingMappedExons(..)))));
}

#[test]
fn json_read_rejects_mapped_exon_outside_mapped_span() {
    // A stored file whose exon span leaks past the overall mapped span must
    // fail validation instead of reaching the BED writer.
    let payload = r#"[{
        "srcAssembly": "hg38",
        "mappedAssembly": "mm39",
        "srcTransId": "ENST08.1",
        "mappedTransId": "ENST08.1-1",
        "mapped": {"chrom": "chr2", "start": 1000, "end": 1500, "strand": "+"},
        "exons": [
            {"srcExonId": "e1", "exonNum": 1,
             "src": {"chrom": "chr1", "start": 100, "end": 200, "strand": "+"},
             "srcBases": 100,
             "mapped": {"chrom": "chr2", "start": 950, "end": 1050, "strand": "+"},
             "mappedBases": 100}
        ]
    }]"#;
    let res = JsonReader::from_reader(payload.as_bytes()).read_transcripts();
    assert!(matches!(
        res,
        Err(Error::Model(ModelError::MappedExonOutsideTranscript(..)))));
}

#[test]
fn json_read_rejects_invalid_frame() {
    let payload = r#"[{
        "srcAssembly": "hg38",
        "mappedAssembly": "mm39",
        "srcTransId": "ENST06.1",
        "mappedTransId": "ENST06.1-1",
        "exons": [
            {"srcExonId": "e1", "exonNum": 1,
             "src": {"chrom": "chr1", "start": 100, "end": 200, "strand": "+"},
             "srcBases": 100, "frame": 7}
        ]
    }]"#;
    let res = JsonReader::from_reader(payload.as_bytes()).read_transcripts();
    match res {
        Err(Error::Model(ModelError::InvalidFrame(value, fid))) => {
            assert_eq!(value, 7);
            assert_eq!(fid.as_deref(), Some("e1"));
        }
        otherwise => panic!("expected frame error, got {:?}", otherwise),
    }
}

#[test]
fn json_read_rejects_reversed_interval() {
    let payload = r#"[{
        "srcAssembly": "hg38",
        "mappedAssembly": "mm39",
        "srcTransId": "ENST07.1",
        "mappedTransId": "ENST07.1-1",
        "exons": [
            {"srcExonId": "e1", "exonNum": 1,
             "src": {"chrom": "chr1", "start": 200, "end": 100, "strand": "+"},
             "srcBases": 100}
        ]
    }]"#;
    let res = JsonReader::from_reader(payload.as_bytes()).read_transcripts();
    assert!(matches!(res, Err(Error::Model(ModelError::InvalidInterval(200, 100)))));
}
