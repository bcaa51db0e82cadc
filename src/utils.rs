use std::fs;
use std::io::{self, BufReader, BufWriter, Read, Write};


pub const STREAM_ARG: &str = "-";


pub fn resolve_reader(raw_arg: &str) -> xmap::Result<Box<dyn Read>> {
    match raw_arg {
        STREAM_ARG => Ok(Box::new(io::stdin())),
        path => fs::File::open(path)
            .map_err(xmap::Error::from)
            .map(|file| Box::new(BufReader::new(file)) as Box<dyn Read>),
    }
}

pub fn resolve_writer(raw_arg: &str) -> xmap::Result<Box<dyn Write>> {
    match raw_arg {
        STREAM_ARG => Ok(Box::new(io::stdout())),
        path => fs::File::create(path)
            .map_err(xmap::Error::from)
            .map(|file| Box::new(BufWriter::new(file)) as Box<dyn Write>),
    }
}
