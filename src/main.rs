use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use defense_stress::{AnswerSet, CategoryCatalog, Diagnostics, Error, ReactionTable, Report};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scores the answers of one respondent.
#[derive(Parser)]
struct Args {
    /// JSON array of categories: {"id", "title", "questions"}
    categories: PathBuf,
    /// JSON array of answers: {"question_id"}
    answers: PathBuf,
    /// Reaction table to use instead of the embedded one
    #[arg(long)]
    table: Option<PathBuf>,
    /// Print the whole diagnosis as JSON
    #[arg(long)]
    json: bool,
    /// Write a CSV report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let catalog = CategoryCatalog::from_reader(BufReader::new(File::open(&args.categories)?))?;
    let answers = AnswerSet::from_reader(BufReader::new(File::open(&args.answers)?))?;
    let table = match args.table {
        Some(ref path) => ReactionTable::from_reader(BufReader::new(File::open(path)?))?,
        None => ReactionTable::embedded().clone(),
    };

    let diagnosis = Diagnostics::new(&answers, &table).evaluate(&catalog);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagnosis)?);
    } else {
        for category in &diagnosis.categories {
            println!(
                "{} {}: reactions = {}, effective = {}, stress factor = {}",
                category.id,
                category.title,
                category.metrics.reaction_count,
                category.metrics.effective_reaction_count,
                category.metrics.stress_factor,
            );
        }
        println!("summary ratio = {}", diagnosis.summary.summary_ratio);
        println!("general ratio = {}", diagnosis.summary.general_ratio);
        println!("{}", diagnosis.description);
    }

    if let Some(ref path) = args.report {
        let title = args
            .answers
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Report::from_diagnosis(&title, &diagnosis).write_csv(File::create(path)?)?;
    }
    Ok(())
}
