use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use ebook_ingest::assembler::MetadataAssembler;
use ebook_ingest::cli::Args;
use ebook_ingest::json_output::RecordReport;
use ebook_ingest::record::BookRecord;
use ebook_ingest::scanner::BookFiles;
use ebook_ingest::scraped::RawScrapedFields;
use ebook_ingest::storage::{BOOK_BUCKET, COVER_BUCKET, StoragePlan};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Read};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_filter()),
    )
    .format_timestamp_millis()
    .init();

    debug!("Starting ebook ingest with args: {:?}", args);

    let raw = read_scraped(&args)?;
    let assembler = MetadataAssembler::new(&args.base_url);
    let mut record = assembler
        .assemble(&raw)
        .with_context(|| format!("Failed to assemble metadata from {:?}", args.input))?;

    if let Some(ref path) = args.existing {
        let existing: BookRecord = serde_json::from_str(
            &fs::read_to_string(path)
                .with_context(|| format!("Failed to read existing record {:?}", path))?,
        )
        .with_context(|| format!("Failed to parse existing record {:?}", path))?;
        record.fill_missing_from(&existing);
        // Merged fields can change the derived names.
        record.cover_file_name = record.cover_file_name();
        record.book_file_name = record.archive_file_name();
        info!("Merged with existing record {:?}", path);
    }

    let files = BookFiles::scan(&args.input_book)
        .with_context(|| format!("Failed to scan {:?}", args.input_book))?;
    if files.is_empty() {
        debug!("No book files in {:?}", args.input_book);
    } else {
        info!(
            "Found {} book files ({} bytes)",
            files.files.len(),
            files.total_size
        );
        record.formats.extend(files.formats.iter().cloned());
        record.book_file_size = files.total_size;
    }
    record.dedup_lists();

    let plan = StoragePlan::new(&record, &args.output_archive, &args.output_cover);

    if args.file_name_only {
        println!("{}", record.archive_stem());
        return Ok(());
    }

    if args.json {
        println!("{}", RecordReport::new(&record, &plan).to_json()?);
        return Ok(());
    }

    print_summary(&record, &plan);
    Ok(())
}

fn read_scraped(args: &Args) -> Result<RawScrapedFields> {
    let text = if args.reads_stdin() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read scraped fields from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {:?}", args.input))?
    };

    serde_json::from_str(&text).context("Scraped fields are not valid JSON")
}

fn print_summary(record: &BookRecord, plan: &StoragePlan) {
    println!("\n{}", "═══ BOOK RECORD ═══".bold().bright_blue());
    println!("{}", record);

    println!("\n{}", "═══ STORAGE ═══".bold().bright_blue());
    println!(
        "  {} {}",
        "ARCHIVE:".green().bold(),
        plan.archive_path.display().to_string().bright_cyan()
    );
    println!(
        "  {} {}",
        "COVER:".green().bold(),
        plan.cover_path.display().to_string().bright_cyan()
    );
    println!(
        "  {} {}/{}",
        "OBJECT:".bright_blue().bold(),
        BOOK_BUCKET,
        plan.archive_object_key.bright_white()
    );
    println!(
        "  {} {}/{}",
        "OBJECT:".bright_blue().bold(),
        COVER_BUCKET,
        plan.cover_object_key.bright_white()
    );

    let missing = record.missing_fields();
    if missing.is_empty() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Record is complete".bright_green().bold()
        );
        return;
    }

    warn!("Record needs review: missing {}", missing.join(", "));
    println!("\n{}", "⚠️  NEEDS REVIEW:".yellow().bold());
    for field in missing {
        println!("  {} {}", "- [ ]".bright_yellow(), field.bright_white());
    }
}
