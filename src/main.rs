mod convert;
mod parse;
mod report;
mod sales;
mod stats;
mod words;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use env_logger::Env;
use report::{timed, Report, WriteMode};
use stats::StatisticsResult;

#[derive(FromArgs, Debug)]
/// Batch converters for number lists, word lists and sales records
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Stats(StatsArgs),
    Convert(ConvertArgs),
    Words(WordsArgs),
    Sales(SalesArgs),
}

#[derive(FromArgs, Debug)]
/// compute count, mean, median, mode, variance and standard deviation
#[argh(subcommand, name = "stats")]
struct StatsArgs {
    /// file with one number per line
    #[argh(positional)]
    file: PathBuf,

    /// report file, appended to across runs
    #[argh(
        option,
        short = 'r',
        default = "PathBuf::from(\"CombinedStatisticsResults.txt\")"
    )]
    report: PathBuf,

    /// replace the report file instead of appending to it
    #[argh(switch)]
    overwrite: bool,

    /// write the report file as JSON lines
    #[argh(switch)]
    json: bool,
}

#[derive(FromArgs, Debug)]
/// convert numbers to binary and hexadecimal
#[argh(subcommand, name = "convert")]
struct ConvertArgs {
    /// file with one number per line
    #[argh(positional)]
    file: PathBuf,

    /// report file
    #[argh(option, short = 'r', default = "PathBuf::from(\"ConvertionResults.txt\")")]
    report: PathBuf,

    /// append to the report file instead of replacing it
    #[argh(switch)]
    append: bool,
}

#[derive(FromArgs, Debug)]
/// count the frequency of distinct words
#[argh(subcommand, name = "words")]
struct WordsArgs {
    /// text file
    #[argh(positional)]
    file: PathBuf,

    /// report file
    #[argh(option, short = 'r', default = "PathBuf::from(\"WordCountResults.txt\")")]
    report: PathBuf,

    /// append to the report file instead of replacing it
    #[argh(switch)]
    append: bool,
}

#[derive(FromArgs, Debug)]
/// total sales per product category from JSON records
#[argh(subcommand, name = "sales")]
struct SalesArgs {
    /// JSON price catalogue
    #[argh(positional)]
    catalogue: PathBuf,

    /// JSON sales record
    #[argh(positional)]
    sales: PathBuf,

    /// report file
    #[argh(option, short = 'r', default = "PathBuf::from(\"SalesResults.txt\")")]
    report: PathBuf,

    /// append to the report file instead of replacing it
    #[argh(switch)]
    append: bool,
}

fn write_mode(append: bool) -> WriteMode {
    if append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    }
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let source_id = args.file.display().to_string();
    let (result, elapsed) = timed(|| {
        let samples = parse::read_samples(&args.file);
        StatisticsResult::compute(source_id, &samples)
    });

    println!("Total elapsed time: {} seconds\n", elapsed.as_secs_f64());
    print!("{}", result);

    let mut report = Report::new(args.report, write_mode(!args.overwrite));
    if args.json {
        report.push_json(&result)?;
    } else {
        report.push(format!("{}\n", result));
    }
    report.write()
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let (table, elapsed) = timed(|| -> Result<_> {
        let numbers = convert::read_numbers(&args.file)?;
        if numbers.is_empty() {
            bail!("No valid data in the file.");
        }
        Ok(convert::ConversionTable::convert(&numbers))
    });
    let table = table?;

    let mut report = Report::new(args.report, write_mode(args.append));
    report.emit(&table);
    report.emit(format!("\nElapsed time: {:.4} seconds\n", elapsed.as_secs_f64()));
    report.write()?;
    println!("Results saved in {}", report.path().display());
    Ok(())
}

fn run_words(args: WordsArgs) -> Result<()> {
    let (counts, elapsed) = timed(|| -> Result<_> {
        let bytes = fs::read(&args.file)
            .with_context(|| format!("unable to read {}", args.file.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let counts = words::WordCounts::count(&text);
        if counts.is_empty() {
            bail!("No valid data in the file.");
        }
        Ok(counts)
    });
    let counts = counts?;

    let mut report = Report::new(args.report, write_mode(args.append));
    print!("{}", words::console_heading(&args.file));
    report.push(words::report_heading(&args.file));
    report.emit(&counts);
    report.emit(format!("\nElapsed time: {:.4} seconds\n", elapsed.as_secs_f64()));
    report.write()?;
    println!("Results saved in {}", report.path().display());
    Ok(())
}

fn run_sales(args: SalesArgs) -> Result<()> {
    let (summary, elapsed) = timed(|| -> Result<_> {
        let products: Vec<sales::Product> = sales::load(&args.catalogue)?;
        let records: Vec<sales::Sale> = sales::load(&args.sales)?;
        Ok(sales::SalesSummary::compute(&products, &records))
    });
    let summary = summary?;

    println!("File: {}", args.sales.display());
    let mut report = Report::new(args.report, write_mode(args.append));
    report.emit(&summary);
    report.emit(format!("\nElapsed time: {:.4} seconds\n", elapsed.as_secs_f64()));
    report.write()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Stats(args) => run_stats(args),
        Command::Convert(args) => run_convert(args),
        Command::Words(args) => run_words(args),
        Command::Sales(args) => run_sales(args),
    }
}
