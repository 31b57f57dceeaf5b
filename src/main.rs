//! # chatchart CLI
//!
//! Command-line interface for the chatchart library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatchart::chart::aggregate;
use chatchart::cli::{Args, OutputFormat};
use chatchart::contacts::ContactRegistry;
use chatchart::output::{OutputConfig, write_csv, write_json};
use chatchart::parser::{ExportParser, ParseOutput};
use chatchart::ChatchartError;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatchartError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Print header
    println!("📈 chatchart v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:    {}", args.input);
    println!("👥 Contacts: {}", args.contacts);
    println!(
        "💾 Output:   {}.<granularity>.{}",
        args.output,
        args.format.extension()
    );
    println!("📄 Format:   {}", args.format);
    println!();

    // Step 1: Load the contact registry (missing file = empty registry)
    let contacts_path = Path::new(&args.contacts);
    let registry = ContactRegistry::load(contacts_path)?;
    if !registry.is_empty() {
        println!("👥 Loaded {} contact mapping(s)", registry.len());
    }

    // Step 2: Parse the export
    println!("⏳ Parsing export...");
    let parse_start = Instant::now();
    let parser = ExportParser::new();
    let ParseOutput {
        messages,
        unresolved,
    } = parser.parse_file(Path::new(&args.input), &registry)?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 3: Queue unresolved names for curation. Best-effort: a failure
    // here must not abort a run that already parsed successfully.
    if !unresolved.is_empty() {
        println!(
            "👤 {} unresolved contact name(s), writing placeholders to {}",
            unresolved.len(),
            args.contacts
        );
        if let Err(e) = ContactRegistry::save_replacements(contacts_path, unresolved.names()) {
            eprintln!("⚠️  Could not update contact registry: {}", e);
        }
    }

    // Step 4: Aggregate and write one file per requested granularity
    let output_config = if args.messages_only {
        OutputConfig::new().messages_only()
    } else {
        OutputConfig::new()
    };

    let mut written = 0usize;
    for granularity in args.granularity.granularities() {
        let pass_start = Instant::now();
        let data = aggregate(&messages, *granularity);

        let path = format!(
            "{}.{}.{}",
            args.output,
            granularity,
            args.format.extension()
        );
        match args.format {
            OutputFormat::Csv => write_csv(&data, Path::new(&path), &output_config)?,
            OutputFormat::Json => write_json(&data, Path::new(&path), &output_config)?,
        }

        println!(
            "📊 {} bucket(s) by {} → {} ({:.2}s)",
            data.buckets().len(),
            granularity,
            path,
            pass_start.elapsed().as_secs_f64()
        );
        written += 1;
    }

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! {} file(s) written", written);

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Messages:   {}", messages.len());
    println!("   Unresolved: {}", unresolved.len());

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = messages.len() as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}
