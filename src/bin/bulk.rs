use clap::Parser;
use defense_stress::{read_bulk, CategoryCatalog, CategoryProvider, Diagnostics, Error, ReactionTable};
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scores every respondent of a CSV, one row per respondent:
/// `respondent_id,question_id,question_id,...`
#[derive(Parser)]
struct Args {
    categories: String,
    path: String,
    #[arg(long)]
    table: Option<String>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let catalog = CategoryCatalog::from_reader(BufReader::new(File::open(&args.categories)?))?;
    let table = match args.table {
        Some(ref path) => ReactionTable::from_reader(BufReader::new(File::open(path)?))?,
        None => ReactionTable::embedded().clone(),
    };
    let categories = catalog.categories();

    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(reader) {
        match row {
            Ok((id, answers)) => {
                let engine = Diagnostics::new(&answers, &table);
                let summary = engine.summary(categories);
                println!(
                    "id = {}, reactions = {}, summary ratio = {}, general ratio = {}",
                    id, summary.total_reaction_count, summary.summary_ratio, summary.general_ratio
                );
            }
            Err(e) => {
                tracing::warn!("skipping row: {}", e);
            }
        }
    }
    Ok(())
}
