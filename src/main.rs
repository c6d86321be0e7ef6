use std::{collections::HashMap, io::Read, path::PathBuf};

use {
    anyhow::{bail, Context, Result},
    clap::Parser,
    tracing::info,
};

use dsv_public::{Parsed, Record, TabularReader, Visibility, VisibilityFilter, VISIBILITY_FIELD};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the export to filter, omit for stdin
    #[arg(short, long, value_name = "PATH")]
    path: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long, value_name = "DELIMITER", default_value_t = ',')]
    delimiter: char,

    /// Name of the disclosure-status column
    #[arg(short, long, value_name = "NAME", default_value = VISIBILITY_FIELD)]
    column: String,

    /// Log how many records fall in each disclosure status
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    dsv_public::init_logging();
    let cli = Cli::parse();

    if !cli.delimiter.is_ascii() {
        bail!("delimiter '{}' is not a single-byte character", cli.delimiter);
    }
    let reader = TabularReader::with_delimiter(cli.delimiter as u8);

    let parsed = match &cli.path {
        Some(path) => {
            if !path.is_file() {
                bail!("{} is not a file.", path.display());
            }
            reader.read_path(path)?
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            reader.read_str(&text)
        }
    };

    let filter = VisibilityFilter::for_column(cli.column);
    if cli.stats {
        log_stats(&parsed, filter.column());
    }

    let visible = filter.apply(&parsed.records);
    info!(
        total = parsed.records.len(),
        visible = visible.len(),
        "filtered export"
    );

    write_records(&parsed.headers, &visible, cli.delimiter as u8)
}

fn log_stats(parsed: &Parsed, column: &str) {
    let mut counts = HashMap::<String, usize>::new();

    for record in &parsed.records {
        let class = match record.get(column) {
            None => "missing".to_owned(),
            Some(None) => "null".to_owned(),
            Some(Some(value)) => match Visibility::classify(value) {
                Visibility::Other(other) if other.is_empty() => "empty".to_owned(),
                Visibility::Other(other) => format!("other({other})"),
                known => format!("{known:?}").to_lowercase(),
            },
        };
        counts.entry(class).and_modify(|v| *v += 1).or_insert(1);
    }

    let mut counts = counts.into_iter().collect::<Vec<(String, usize)>>();
    counts.sort();
    for (class, count) in counts {
        info!(column, class = %class, count, "disclosure status");
    }
}

/// Writes the header and each record in header order. Absent values are
/// written back as `null`.
fn write_records(headers: &[String], records: &[Record], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(std::io::stdout().lock());

    writer.write_record(headers).context("writing header")?;
    for record in records {
        writer
            .write_record(headers.iter().map(|name| match record.get(name) {
                Some(Some(value)) => value,
                Some(None) => "null",
                None => "",
            }))
            .context("writing record")?;
    }
    writer.flush().context("flushing output")?;

    Ok(())
}
