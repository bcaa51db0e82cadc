#![deny(
        trivial_casts, trivial_numeric_casts,
        unsafe_code,
        unused_extern_crates, unused_import_braces, unused_qualifications)]

use std::io;

use quick_error::quick_error;

pub use bio_types::strand::Strand;

mod model;
pub use model::{Coords, MEBuilder, MTBuilder, MappedExon, MappedTranscript,
                ModelError, Region};

mod annot;
pub use annot::{ABuilder, ExonAnnot, TranscriptAnnot,
                TranscriptInfo, TranscriptInfoTable};

mod align;
pub use align::{AlignError, AlignedBlock, AlignmentBundle};

mod project;
pub use project::{map_transcript, mapped_coding_region, mapped_exon_frame,
                  ProjectError};

mod io_bed;
pub use io_bed::{mapped_transcript_to_bed, BedRecord, Writer as BedWriter};

mod io_json;
pub use io_json::{Reader as JsonReader, Writer as JsonWriter};

mod seq;
pub use seq::{MemSequenceReader, SeqError, SeqWindow, SequenceReader};

mod loader;
pub use loader::{MappingBundle, MappingLoader, MemLoader};

mod colors;
pub use colors::{human_cell_type_color, mouse_cell_type_color,
                 CellTypeColor, CELL_TYPE_COLORS};


quick_error! {
    #[derive(Debug)]
    pub enum Error {
        Model(err: ModelError) {
            display("{}", err)
            from()
        }
        Align(err: AlignError) {
            display("{}", err)
            from()
        }
        Project(err: ProjectError) {
            display("{}", err)
            from()
        }
        Seq(err: SeqError) {
            display("{}", err)
            from()
        }
        Csv(err: csv::Error) {
            display("{}", err)
            from()
        }
        Json(err: serde_json::Error) {
            display("{}", err)
            from()
        }
        Io(err: io::Error) {
            display("{}", err)
            from()
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// Crate-wide constants
mod consts {
    // Value for optionally known identifiers.
    pub(crate) const DEF_ID: &str = "<unknown>";

    // Placeholder values for BED columns without mapped semantics.
    pub(crate) const DEF_SCORE: u32 = 0;
    pub(crate) const DEF_ITEM_RGB: &str = "0,0,0";
}
