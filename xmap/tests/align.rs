use xmap::{AlignError, AlignedBlock, AlignmentBundle, Region};
use xmap::Strand::{Forward, Reverse};


fn region(start: u64, end: u64) -> Region {
    Region::new(start, end).unwrap()
}

fn block(src: (u64, u64), tgt: (u64, u64)) -> AlignedBlock {
    AlignedBlock::new(region(src.0, src.1), region(tgt.0, tgt.1)).unwrap()
}

fn bundle(blocks: Vec<AlignedBlock>, query_size: u64) -> AlignmentBundle {
    AlignmentBundle::new(blocks, query_size, Forward).unwrap()
}

#[test]
fn block_rejects_unequal_spans() {
    let res = AlignedBlock::new(region(0, 100), region(500, 550));
    assert!(matches!(res, Err(AlignError::BlockLengthMismatch(..))));
}

#[test]
fn bundle_rejects_reverse_target_strand() {
    let res = AlignmentBundle::new(vec![block((0, 100), (500, 600))], 1000, Reverse);
    match res {
        Err(AlignError::UnnormalizedTargetStrand(symbol)) => assert_eq!(symbol, "-"),
        otherwise => panic!("expected strand error, got {:?}", otherwise),
    }
}

#[test]
fn bundle_rejects_unsorted_source_blocks() {
    let blocks = vec![block((200, 300), (500, 600)),
                      block((0, 100), (700, 800))];
    let res = AlignmentBundle::new(blocks, 1000, Forward);
    assert!(matches!(res, Err(AlignError::UnsortedBlocks(1))));
}

#[test]
fn bundle_rejects_unsorted_target_blocks() {
    let blocks = vec![block((0, 100), (700, 800)),
                      block((200, 300), (500, 600))];
    let res = AlignmentBundle::new(blocks, 1000, Forward);
    assert!(matches!(res, Err(AlignError::UnsortedBlocks(1))));
}

#[test]
fn bundle_rejects_block_beyond_query() {
    let blocks = vec![block((0, 100), (500, 600)),
                      block((200, 320), (700, 820))];
    let res = AlignmentBundle::new(blocks, 300, Forward);
    assert!(matches!(res, Err(AlignError::BlockOutsideQuery(1, 300))));
}

#[test]
fn bundle_accepts_touching_blocks() {
    let blocks = vec![block((0, 100), (500, 600)),
                      block((100, 200), (600, 700))];
    let res = AlignmentBundle::new(blocks, 300, Forward);
    assert!(res.is_ok(), "{:?}", res.err());
}

#[test]
fn project_within_one_block() {
    let bnd = bundle(vec![block((0, 100), (500, 600))], 1000);
    let (mapped, bases) = bnd.project(&region(20, 50));
    assert_eq!(mapped, Some(region(520, 550)));
    assert_eq!(bases, 30);
}

#[test]
fn project_across_a_gap_envelopes_but_counts_aligned_only() {
    // 100 bases of source sequence between the blocks are deleted on the target.
    let blocks = vec![block((0, 100), (500, 600)),
                      block((200, 300), (650, 750))];
    let bnd = bundle(blocks, 1000);
    let (mapped, bases) = bnd.project(&region(50, 250));
    assert_eq!(mapped, Some(region(550, 700)));
    assert_eq!(bases, 100);
}

#[test]
fn project_outside_all_blocks() {
    let bnd = bundle(vec![block((0, 100), (500, 600))], 1000);
    let (mapped, bases) = bnd.project(&region(300, 400));
    assert_eq!(mapped, None);
    assert_eq!(bases, 0);
}

#[test]
fn project_never_exceeds_span_length() {
    let blocks = vec![block((0, 100), (500, 600)),
                      block((150, 250), (800, 900))];
    let bnd = bundle(blocks, 1000);
    let span = region(80, 180);
    let (_, bases) = bnd.project(&span);
    assert!(bases <= span.len());
    assert_eq!(bases, 50);
}
