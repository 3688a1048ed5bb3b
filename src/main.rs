//! CLI entry point for `enronmail`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use enronmail::config::Config;
use enronmail::ingest::{self, FileProbe, IngestStats};
use enronmail::model::document::Document;
use enronmail::parser::EmailParser;

#[derive(Parser)]
#[command(
    name = "enronmail",
    version,
    about = "Parse Enron-corpus message files and batch them for search indexing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single message file and print the record
    Parse {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Parse a maildir tree and write batched JSON payloads, one per line
    Ingest {
        path: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Documents per payload (overrides config)
        #[arg(long)]
        batch_size: Option<usize>,
        /// Target index name (overrides config)
        #[arg(long, env = "ENRONMAIL_INDEX")]
        index: Option<String>,
    },
    /// Parse a maildir tree and report counts without writing payloads
    Stats {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration file
    InitConfig,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = enronmail::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Parse { path, json } => cmd_parse(&path, json, &config),
        Commands::Ingest {
            path,
            output,
            batch_size,
            index,
        } => {
            if let Some(size) = batch_size {
                config.ingest.batch_size = size;
            }
            if let Some(index) = index {
                config.ingest.index_name = index;
            }
            cmd_ingest(&path, output.as_deref(), &config)
        }
        Commands::Stats { path, json } => cmd_stats(&path, json, &config),
        Commands::InitConfig => cmd_init_config(&config),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = enronmail::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "enronmail.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "enronmail", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::stdout().write_all(&buf)?;
    Ok(())
}

fn cmd_init_config(config: &Config) -> anyhow::Result<()> {
    let path = enronmail::config::save_config(config)?;
    println!("  Wrote {}", path.display());
    Ok(())
}

/// Parse one file and print it as a table or as a JSON document.
fn cmd_parse(path: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let probe = FileProbe::stat(path)?;
    if probe.is_empty() {
        anyhow::bail!("File is empty: {}", path.display());
    }

    let email = EmailParser::new(&config.parser).parse_file(path)?;
    let doc = Document::new(path, email);

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_document_table(&doc, probe.len);
    }
    Ok(())
}

/// Walk a directory and write one JSON payload per batch.
fn cmd_ingest(path: &Path, output: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let (mut out, sink_name): (Box<dyn Write>, PathBuf) = match output {
        Some(p) => {
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)?;
            }
            (Box::new(BufWriter::new(File::create(p)?)), p.to_path_buf())
        }
        None => (
            Box::new(BufWriter::new(std::io::stdout().lock())),
            PathBuf::from("<stdout>"),
        ),
    };

    let pb = walk_spinner("Ingesting");
    let start = Instant::now();

    let stats = ingest::ingest_dir(
        path,
        config,
        &mut |payload| payload.write_json_line(&mut out, &sink_name),
        Some(&|files| pb.set_position(files)),
    )?;
    out.flush()?;

    pb.finish_and_clear();
    print_stats_table(path, &stats, start.elapsed());
    Ok(())
}

/// Walk a directory and report counts.
fn cmd_stats(path: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let pb = walk_spinner("Scanning");
    let start = Instant::now();

    let stats = ingest::ingest_dir(
        path,
        config,
        &mut |_| Ok(()),
        Some(&|files| pb.set_position(files)),
    )?;

    pb.finish_and_clear();
    let elapsed = start.elapsed();

    if json {
        let value = serde_json::json!({
            "path": path.to_string_lossy(),
            "stats": stats,
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_stats_table(path, &stats, elapsed);
    }
    Ok(())
}

fn walk_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{{spinner:.green}} {label} {{pos}} files ({{elapsed}})"))
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Print a parsed document in a human-readable table.
fn print_document_table(doc: &Document, file_size: u64) {
    use humansize::{format_size, BINARY};

    let email = &doc.email;
    let body_lines = email.body.lines().count().saturating_sub(1);

    println!();
    println!("  {:<14} {}", "File", doc.path().display());
    println!("  {:<14} {}", "Size", format_size(file_size, BINARY));
    println!("  {:<14} {}", "Message-ID", email.message_id);
    println!("  {:<14} {}", "Date", email.date);
    println!("  {:<14} {}", "From", email.from);
    println!("  {:<14} {}", "To", email.to.join(", "));
    if !email.cc.is_empty() {
        println!("  {:<14} {}", "Cc", email.cc.join(", "));
    }
    println!("  {:<14} {}", "Subject", email.subject.replace('\n', " "));
    println!("  {:<14} {}", "X-From", email.x_from);
    println!("  {:<14} {}", "X-To", email.x_to.join(", "));
    println!("  {:<14} {}", "X-Folder", email.x_folder);
    println!("  {:<14} {} line(s)", "Body", body_lines);
    if !email.is_email() {
        println!();
        println!("  No Message-ID: parsing stopped early, this is not an email.");
    }
    println!();
}

/// Print walk statistics in a human-readable table (stderr, so stdout stays
/// reserved for payloads).
fn print_stats_table(path: &Path, stats: &IngestStats, elapsed: Duration) {
    use humansize::{format_size, BINARY};

    eprintln!();
    eprintln!("  {:<20} {}", "Directory", path.display());
    eprintln!("  {:<20} {}", "Files", stats.files_seen);
    eprintln!("  {:<20} {}", "Parsed size", format_size(stats.bytes, BINARY));
    eprintln!("  {:<20} {}", "Documents", stats.documents);
    eprintln!("  {:<20} {}", "Batches", stats.batches);
    eprintln!("  {:<20} {}", "Empty skipped", stats.empty_skipped);
    eprintln!("  {:<20} {}", "Not an email", stats.non_email);
    eprintln!("  {:<20} {}", "Failed", stats.failed);
    eprintln!("  {:<20} {:.2?}", "Elapsed", elapsed);
    eprintln!();
}
