use xmap::{human_cell_type_color, mouse_cell_type_color, Error, MemSequenceReader,
           Region, SeqError, SeqWindow, SequenceReader, Strand};
use xmap::Strand::{Forward, Reverse};


fn region(start: u64, end: u64) -> Region {
    Region::new(start, end).unwrap()
}

fn reader() -> MemSequenceReader {
    let mut reader = MemSequenceReader::new();
    //                          0         1
    //                          0123456789012345
    reader.insert("hg38", "chr1", "ACGTACGTACGTACGT");
    reader
}

// Counts how often the underlying reader is actually hit.
struct CountingReader {
    inner: MemSequenceReader,
    fetches: usize,
}

impl SequenceReader for CountingReader {

    fn fetch(
        &mut self,
        assembly: &str,
        chrom: &str,
        region: &Region,
        strand: Strand) -> xmap::Result<String>
    {
        self.fetches += 1;
        self.inner.fetch(assembly, chrom, region, strand)
    }
}

#[test]
fn mem_reader_forward_fetch() {
    let seq = reader().fetch("hg38", "chr1", &region(2, 6), Forward).unwrap();
    assert_eq!(seq, "GTAC");
}

#[test]
fn mem_reader_reverse_fetch_is_reverse_complemented() {
    // Genomic [1, 5) is CGTA.
    let seq = reader().fetch("hg38", "chr1", &region(1, 5), Reverse).unwrap();
    assert_eq!(seq, "TACG");
}

#[test]
fn mem_reader_unknown_sequence() {
    let res = reader().fetch("hg38", "chrX", &region(0, 4), Forward);
    assert!(matches!(res, Err(Error::Seq(SeqError::UnknownSequence(..)))));
}

#[test]
fn mem_reader_region_out_of_bounds() {
    let res = reader().fetch("hg38", "chr1", &region(10, 20), Forward);
    match res {
        Err(Error::Seq(SeqError::RegionOutOfBounds(chrom, span, len))) => {
            assert_eq!(chrom, "chr1");
            assert_eq!(span, (10, 20));
            assert_eq!(len, 16);
        }
        otherwise => panic!("expected bounds error, got {:?}", otherwise),
    }
}

#[test]
fn window_slices_contained_fetches_from_memory() {
    let mut window = SeqWindow::new(CountingReader { inner: reader(), fetches: 0 });

    let outer = window.fetch("hg38", "chr1", &region(0, 12), Forward).unwrap();
    assert_eq!(outer, "ACGTACGTACGT");
    let inner = window.fetch("hg38", "chr1", &region(4, 8), Forward).unwrap();
    assert_eq!(inner, "ACGT");
    assert_eq!(window.get_ref().fetches, 1);

    // A span outside the window goes back to the reader.
    let _ = window.fetch("hg38", "chr1", &region(10, 16), Forward).unwrap();
    assert_eq!(window.into_inner().fetches, 2);
}

#[test]
fn window_does_not_reuse_across_strands() {
    let mut window = SeqWindow::new(CountingReader { inner: reader(), fetches: 0 });
    let _ = window.fetch("hg38", "chr1", &region(0, 12), Forward).unwrap();
    let _ = window.fetch("hg38", "chr1", &region(4, 8), Reverse).unwrap();
    assert_eq!(window.get_ref().fetches, 2);
}

#[test]
fn window_reverse_slice_offsets_from_genomic_end() {
    let mut inner = MemSequenceReader::new();
    inner.insert("hg38", "chr1", "AACCGGTT");
    let mut window = SeqWindow::new(CountingReader { inner, fetches: 0 });

    // Whole sequence, reverse-complemented: AACCGGTT -> AACCGGTT.
    let outer = window.fetch("hg38", "chr1", &region(0, 8), Reverse).unwrap();
    assert_eq!(outer, "AACCGGTT");
    // Genomic [6, 8) is TT, which sits at the start of the stored window.
    let inner_seq = window.fetch("hg38", "chr1", &region(6, 8), Reverse).unwrap();
    assert_eq!(inner_seq, "AA");
    assert_eq!(window.get_ref().fetches, 1);
}

#[test]
fn cell_type_color_lookups() {
    let color = human_cell_type_color("Microglia").unwrap();
    assert_eq!(color.rgb, "0,0,250");
    assert_eq!(color.color, "DarkBlue");
    assert_eq!(color.mouse_ct, Some("Microglia"));

    // Several human interneuron types collapse onto one mouse type.
    let inhib = mouse_cell_type_color("InhibNeuron").unwrap();
    assert_eq!(inhib.color, "Red");

    assert!(human_cell_type_color("InhCajalRetzius").is_none());
    assert!(mouse_cell_type_color("InhCajalRetzius").is_some());
    assert!(human_cell_type_color("NotACellType").is_none());
}
