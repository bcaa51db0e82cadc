use clap::{App, Arg, ArgMatches, SubCommand};
use log::{debug, warn};
use xmap::{human_cell_type_color, mapped_transcript_to_bed, BedWriter, JsonReader};

use crate::tools::TEMPLATE_SUBCMD;
use crate::utils;

pub const NAME: &str = "json-to-bed";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Converts mapped-transcript JSON to a BED12 annotation track")
        .template(TEMPLATE_SUBCMD)
        .arg(Arg::with_name("input")
                .value_name("input")
                .help("Path to input mapped-transcript JSON file or '-' for stdin")
                .takes_value(true)
                .required(true))
        .arg(Arg::with_name("output")
                .value_name("output")
                .help("Path to output BED file or '-' for stdout")
                .takes_value(true)
                .required(true))
        .arg(Arg::with_name("cell-type")
                .long("cell-type")
                .value_name("name")
                .help("Human cell type whose color is applied to the output records")
                .takes_value(true))
}

pub fn run(args: &ArgMatches) -> xmap::Result<()> {
    let input = utils::resolve_reader(args.value_of("input").unwrap_or(utils::STREAM_ARG))?;
    let output = utils::resolve_writer(args.value_of("output").unwrap_or(utils::STREAM_ARG))?;

    let item_rgb = match args.value_of("cell-type") {
        None => None,
        Some(cell_type) => match human_cell_type_color(cell_type) {
            Some(color) => Some(color.rgb),
            None => {
                warn!("unknown cell type {}, using the default color", cell_type);
                None
            }
        },
    };

    let transcripts = JsonReader::from_reader(input).read_transcripts()?;
    let mut writer = BedWriter::from_writer(output);
    let mut written = 0;
    for transcript in transcripts.iter() {
        if let Some(mut record) = mapped_transcript_to_bed(transcript) {
            if let Some(rgb) = item_rgb {
                record.set_item_rgb(rgb);
            }
            writer.write_record(&record)?;
            written += 1;
        }
    }
    debug!("wrote {} of {} transcripts", written, transcripts.len());
    Ok(())
}
