use clap::Parser;
use std::path::PathBuf;

use crate::assembler::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "ebook-ingest",
    about = "Turn scraped book-page fields into a normalized metadata record and archive names",
    version = "0.1.0"
)]
pub struct Args {
    /// Scraped fields as JSON
    #[arg(
        value_name = "INPUT",
        default_value = "-",
        help = "JSON file with the scraped fields ('-' reads stdin)"
    )]
    pub input: PathBuf,

    /// Base URL for publisher links
    #[arg(
        long,
        value_name = "URL",
        env = "EBOOK_INGEST_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        help = "Product page base URL; the ISBN-10 or ASIN is appended"
    )]
    pub base_url: String,

    /// Folder holding the downloaded book files
    #[arg(
        long,
        value_name = "DIR",
        env = "EBOOK_INGEST_INPUT_BOOK",
        default_value = "in_book",
        help = "Folder with the downloaded book files to inspect for formats and size"
    )]
    pub input_book: PathBuf,

    /// Root for archives
    #[arg(
        long,
        value_name = "DIR",
        env = "EBOOK_INGEST_OUTPUT_ARCHIVE",
        default_value = "out_book",
        help = "Root folder for the per-publisher archive layout"
    )]
    pub output_archive: PathBuf,

    /// Root for covers
    #[arg(
        long,
        value_name = "DIR",
        env = "EBOOK_INGEST_OUTPUT_COVER",
        default_value = "out_cover",
        help = "Root folder for the per-publisher cover layout"
    )]
    pub output_cover: PathBuf,

    /// Previously stored record to merge with
    #[arg(
        long,
        value_name = "PATH",
        help = "JSON of an existing record; its values fill fields the new scrape left empty"
    )]
    pub existing: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(
        long,
        help = "Print the record and storage plan as JSON instead of a summary"
    )]
    pub json: bool,

    /// Print only the archive name
    #[arg(
        long,
        conflicts_with = "json",
        help = "Print only the archive file name without extension"
    )]
    pub file_name_only: bool,

    /// Verbose output
    #[arg(long, short = 'v', help = "Enable verbose logging")]
    pub verbose: bool,
}

impl Args {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Log filter used when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
