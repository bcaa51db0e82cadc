use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};
use xmap::JsonReader;

use crate::tools::TEMPLATE_SUBCMD;
use crate::utils;

pub const NAME: &str = "stats";


pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(NAME)
        .about("Gathers mapping statistics from mapped-transcript JSON")
        .template(TEMPLATE_SUBCMD)
        .arg(Arg::with_name("input")
                .value_name("input")
                .help("Path to input mapped-transcript JSON file or '-' for stdin")
                .takes_value(true)
                .required(true))
        .arg(Arg::with_name("output")
                .value_name("output")
                .help("Path to output table file or '-' for stdout")
                .takes_value(true)
                .required(true))
}

pub fn run(args: &ArgMatches) -> xmap::Result<()> {
    let input = utils::resolve_reader(args.value_of("input").unwrap_or(utils::STREAM_ARG))?;
    let mut output = utils::resolve_writer(args.value_of("output").unwrap_or(utils::STREAM_ARG))?;

    let transcripts = JsonReader::from_reader(input).read_transcripts()?;
    writeln!(output, "mappedTransId\tsrcTransId\tgeneName\texons\tmappedExons\tmappedBases")?;
    for transcript in transcripts.iter() {
        writeln!(output, "{}\t{}\t{}\t{}\t{}\t{}",
                 transcript.mapped_trans_id(),
                 transcript.src_trans_id(),
                 transcript.gene_name(),
                 transcript.exons().len(),
                 transcript.mapped_exon_count(),
                 transcript.mapped_bases())?;
    }
    Ok(())
}
