//! The `classify` subcommand: does this path need converting at all?

use anyhow::Result;

use riverscope_convert::{Classification, classify};

use crate::cli::ClassifyArgs;

pub fn run(args: ClassifyArgs) -> Result<()> {
    let label = match classify(&args.path) {
        Classification::CsvFolder => "csv-folder",
        Classification::ProjectSource => "project-source",
        Classification::Unrecognized => "unrecognized",
    };
    println!("{label}");
    Ok(())
}
