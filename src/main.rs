use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use water_level_restorer::batch::BatchRestorer;
use water_level_restorer::config::RestorerConfig;
use water_level_restorer::region::parse_region_list;
use water_level_restorer::restorer::WaterLevelRestorer;
use water_level_restorer::workbook::{
    list_sheets, output_path_for, preview_region, WorkbookSession,
};

#[derive(Parser)]
#[command(name = "water-level-restorer")]
#[command(about = "Restore truncated daily water level readings in Excel sheets", long_about = None)]
struct Cli {
    /// Mode: 'sheets' (list worksheets), 'preview' (print ranges), 'restore' (repair and save a copy)
    #[arg(long, default_value = "restore")]
    mode: String,

    /// Path to the Excel workbook
    #[arg(long)]
    file: PathBuf,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Data ranges, comma separated (e.g. "C6:N36,B46:M76")
    #[arg(long, default_value = "C6:N36")]
    range: String,

    /// Where to write the repaired workbook (default: <name>_restored.xlsx next to the input)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the restore report as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.file.exists() {
        error!("File not found: {:?}", cli.file);
        return Err(format!("File not found: {:?}", cli.file).into());
    }

    match cli.mode.as_str() {
        "sheets" => print_sheets(&cli.file)?,
        "preview" => preview(&cli.file, cli.sheet.as_deref(), &cli.range)?,
        "restore" => restore(&cli)?,
        _ => {
            return Err(format!(
                "Invalid mode '{}'. Valid modes: sheets, preview, restore",
                cli.mode
            )
            .into());
        }
    }

    Ok(())
}

fn print_sheets(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    for (i, name) in list_sheets(file)?.iter().enumerate() {
        println!("{:>3}  {name}", i + 1);
    }
    Ok(())
}

fn preview(
    file: &Path,
    sheet: Option<&str>,
    range: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let restorer = WaterLevelRestorer::new(RestorerConfig::from_env()?);
    let regions = parse_region_list(range)?;
    // Same guard as restore, before anything is read
    BatchRestorer::new(restorer.clone()).validate(&regions)?;

    let sheet = match sheet {
        Some(name) => name.to_string(),
        None => list_sheets(file)?
            .into_iter()
            .next()
            .ok_or("Workbook has no worksheets")?,
    };

    for region in &regions {
        let preview = preview_region(file, &sheet, region, &restorer)?;
        println!("\n{sheet}!{region}");
        print!("{}", preview.render());
    }
    Ok(())
}

fn restore(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let config = RestorerConfig::from_env()?;
    let error_display_limit = config.error_display_limit;
    let batch = BatchRestorer::new(WaterLevelRestorer::new(config));

    let regions = parse_region_list(&cli.range)?;
    // Reject bad regions before opening (and later saving) anything
    batch.validate(&regions)?;

    let mut session = WorkbookSession::open(&cli.file)?;
    let sheet = match &cli.sheet {
        Some(name) => name.clone(),
        None => session.first_sheet_name()?,
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&cli.file));

    let total_cells: u64 = regions.iter().map(|r| r.cell_count()).sum();
    info!(
        "Restoring {} regions ({} cells) on sheet {}",
        regions.len(),
        total_cells,
        sheet
    );

    if !cli.yes {
        println!("\nThis will restore truncated readings and write a new workbook.");
        println!("File:    {:?}", cli.file);
        println!("Sheet:   {sheet}");
        println!("Ranges:  {}", cli.range);
        println!("Output:  {output:?}");
        println!("\nContinue? [y/N]: ");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Restore cancelled.");
            return Ok(());
        }
    }

    let pb = ProgressBar::new(regions.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let report = {
        let mut grid = session.grid(&sheet)?;
        batch.run_with_progress(&mut grid, &regions, |region, outcome| {
            pb.set_message(format!("{region}: {} restored", outcome.processed));
            pb.inc(1);
        })?
    };
    pb.finish_with_message(format!("✓ Restored {} cells", report.total.processed));

    if report.total.processed == 0 {
        warn!("No cells were restored; the output is a copy of the input");
    }
    session.save_as(&output)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    println!("Restore Summary");
    println!("{}", "=".repeat(60));
    println!("Sheet:              {sheet}");
    println!("Regions:            {}", report.regions.len());
    println!("Restored:           {}", report.total.processed);
    println!("Skipped:            {}", report.total.skipped);
    for (reason, count) in &report.total.skip_reasons {
        println!("  {reason:<18}{count}");
    }
    println!("Output:             {output:?}");
    println!("Total Time:         {:.2}s", start_time.elapsed().as_secs_f64());
    println!("{}", "-".repeat(60));
    print!("{}", report.total.error_summary(error_display_limit));
    println!("\n{}", "=".repeat(60));

    Ok(())
}
