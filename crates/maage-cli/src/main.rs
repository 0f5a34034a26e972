//! MAAGE CLI - cheat-sheet editor for adjudication runs

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use maage_core::cheat_sheet::{
    find_section, find_section_mut, CheatSheetFile, Field, Section, DEFAULT_CHEAT_SHEET,
};
use maage_core::codec::{
    column_range_to_indices, display_row_to_offset, index_to_column_letters, DEFAULT_COLUMNS,
};
use maage_core::plan::tab_sections;
use maage_core::segment::load_segment_file;
use maage_core::view::{display_path, resolve_sheet};
use maage_core::{FileStatus, RunOptions, SectionStates, WorkspaceSnapshot};
use maage_sheets::sheet_names;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "maage")]
#[command(
    author,
    version,
    about = "Edit and check the cheat sheet that drives MAAGE adjudication runs"
)]
struct Cli {
    /// Cheat sheet file
    #[arg(
        short,
        long,
        global = true,
        env = "MAAGE_CHEAT_SHEET",
        default_value = DEFAULT_CHEAT_SHEET
    )]
    cheat_sheet: PathBuf,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sections with their workbook paths
    Sections {
        /// Show full paths instead of file names
        #[arg(long)]
        full_paths: bool,
    },

    /// Show a section's fields next to the sheets its workbook has
    Fields {
        /// Section name (case-insensitive)
        section: String,
    },

    /// Set the sheet of fields in a section.
    ///
    /// The section is rewritten in the short `display,sheet` form; start rows
    /// and columns set with `set-layout` are dropped (a warning names them).
    SetSheets {
        /// Section name (case-insensitive)
        section: String,

        /// Assignments as DISPLAY_NAME=SHEET
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },

    /// Set the starting row and column range of a field
    SetLayout {
        /// Section name (case-insensitive)
        section: String,

        /// Field display name
        field: String,

        /// Starting row (1-based)
        #[arg(long)]
        start_row: Option<String>,

        /// Column range, e.g. A:F
        #[arg(long)]
        columns: Option<String>,
    },

    /// Point a section at another workbook
    SetPath {
        /// Section name (case-insensitive)
        section: String,

        /// Workbook path
        path: String,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Workbook file (xlsx, csv)
        input: PathBuf,
    },

    /// Check that the cheat sheet and every referenced workbook exist
    Status {
        /// Show full paths instead of file names
        #[arg(long)]
        full_paths: bool,
    },

    /// Increment every "Move N" counter in the cheat sheet
    BumpMoves,

    /// Build the adjudication plan and print it as JSON
    Run {
        /// Leave the move counters alone
        #[arg(long)]
        no_increment: bool,

        /// Sections to leave out of the run
        #[arg(long = "skip", value_name = "SECTION")]
        skip: Vec<String>,

        /// Also print the workspace snapshot to stderr
        #[arg(long)]
        snapshot: bool,
    },

    /// Print every section's view state as JSON
    Snapshot {
        /// Sections marked as left out of the run
        #[arg(long = "skip", value_name = "SECTION")]
        skip: Vec<String>,
    },

    /// Convert a column range to 0-based indices
    Columns {
        /// Column range (A:Z) or single column (D)
        range: String,
    },

    /// Print selected columns of a comma-separated text file
    Segment {
        /// Input file
        input: PathBuf,

        /// Starting row (1-based)
        #[arg(long, default_value = "1")]
        start_row: String,

        /// Column range
        #[arg(long, default_value = DEFAULT_COLUMNS)]
        columns: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = CheatSheetFile::new(&cli.cheat_sheet);

    match cli.command {
        Commands::Sections { full_paths } => list_sections(&file, full_paths),
        Commands::Fields { section } => show_fields(&file, &section),
        Commands::SetSheets {
            section,
            assignments,
        } => set_sheets(&file, &section, &assignments),
        Commands::SetLayout {
            section,
            field,
            start_row,
            columns,
        } => set_layout(&file, &section, &field, start_row, columns),
        Commands::SetPath { section, path } => set_path(&file, &section, path),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Status { full_paths } => show_status(&file, full_paths),
        Commands::BumpMoves => {
            file.increment_move_counters()
                .with_context(|| format!("Failed to update '{}'", file.path().display()))?;
            tracing::info!("Incremented move counters in {}", file.path().display());
            Ok(())
        }
        Commands::Run {
            no_increment,
            skip,
            snapshot,
        } => run(&file, !no_increment, &skip, snapshot),
        Commands::Snapshot { skip } => {
            let sections = load(&file)?;
            let snapshot = WorkspaceSnapshot::capture(&sections, &states_skipping(&skip));
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        Commands::Columns { range } => show_columns(&range),
        Commands::Segment {
            input,
            start_row,
            columns,
        } => show_segment(&input, &start_row, &columns),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn,maage=info,maage_core=info,maage_sheets=info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((display, sheet)) if !display.trim().is_empty() => {
            Ok((display.trim().to_string(), sheet.trim().to_string()))
        }
        _ => Err(format!("expected DISPLAY_NAME=SHEET, got '{}'", s)),
    }
}

fn load(file: &CheatSheetFile) -> Result<Vec<Section>> {
    file.load()
        .with_context(|| format!("Failed to read cheat sheet '{}'", file.path().display()))
}

fn require_section<'a>(sections: &'a [Section], name: &str) -> Result<&'a Section> {
    find_section(sections, name).with_context(|| format!("Section '{}' not found", name))
}

fn states_skipping(skip: &[String]) -> SectionStates {
    let mut states = SectionStates::new();
    for name in skip {
        states.set_use_for_adjudication(name, false);
    }
    states
}

fn list_sections(file: &CheatSheetFile, full_paths: bool) -> Result<()> {
    let sections = load(file)?;

    for section in tab_sections(&sections) {
        println!(
            "{}\t{}\t{}",
            section.name,
            display_path(&section.filepath, full_paths),
            section.fields.len()
        );
    }

    Ok(())
}

fn show_fields(file: &CheatSheetFile, section_name: &str) -> Result<()> {
    let sections = load(file)?;
    let section = require_section(&sections, section_name)?;
    let available = sheet_names(&section.filepath);

    let lines = file
        .section_field_lines(section_name)
        .with_context(|| format!("Failed to read cheat sheet '{}'", file.path().display()))?;

    println!("Section: {}", section.name);
    println!("Workbook: {} {}", section.filepath, FileStatus::of(&section.filepath));
    println!("Sheets: {}", available.join(", "));

    for field in lines.iter().filter_map(|line| Field::parse_line(line)) {
        let selected = resolve_sheet(&field.sheet_name, &available);
        let marker = if selected == field.sheet_name { "" } else { " *" };

        println!();
        println!("  {}", field.display_name);
        println!("    Sheet: {}{}", selected, marker);
        println!("    Starting row: {}", field.effective_start_row());
        println!("    Columns: {}", field.effective_columns());
    }

    Ok(())
}

fn set_sheets(file: &CheatSheetFile, section_name: &str, assignments: &[(String, String)]) -> Result<()> {
    let sections = load(file)?;
    let section = require_section(&sections, section_name)?;
    let available = sheet_names(&section.filepath);

    let mut fields = section.fields.clone();
    for (display, sheet) in assignments {
        let field = fields
            .iter_mut()
            .find(|f| f.display_name == *display)
            .with_context(|| format!("Section '{}' has no field '{}'", section.name, display))?;

        if !available.is_empty() && !available.contains(sheet) {
            tracing::warn!(
                "Sheet '{}' is not in {} (has: {})",
                sheet,
                section.filepath,
                available.join(", ")
            );
        }
        field.sheet_name = sheet.clone();
    }

    let dropped = layout_fields(&fields);
    if !dropped.is_empty() {
        tracing::warn!(
            "Section '{}': start rows and columns of {} are not kept by this update; \
             re-apply them with set-layout",
            section.name,
            dropped.join(", ")
        );
    }

    file.replace_section_fields(&section.name, &fields)
        .with_context(|| format!("Failed to update section '{}'", section.name))?;
    tracing::info!("Cheat sheet updated for section '{}'", section.name);

    Ok(())
}

/// Display names of fields whose start row or columns a sheet-only update drops
fn layout_fields(fields: &[Field]) -> Vec<&str> {
    fields
        .iter()
        .filter(|f| f.has_layout())
        .map(|f| f.display_name.as_str())
        .collect()
}

fn set_layout(
    file: &CheatSheetFile,
    section_name: &str,
    field_name: &str,
    start_row: Option<String>,
    columns: Option<String>,
) -> Result<()> {
    if start_row.is_none() && columns.is_none() {
        bail!("Nothing to change: pass --start-row and/or --columns");
    }
    if let Some(columns) = &columns {
        column_range_to_indices(columns)
            .with_context(|| format!("Invalid column range '{}'", columns))?;
    }

    let mut sections = load(file)?;
    let section = find_section_mut(&mut sections, section_name)
        .with_context(|| format!("Section '{}' not found", section_name))?;
    let field = section
        .field_mut(field_name)
        .with_context(|| format!("Section '{}' has no field '{}'", section_name, field_name))?;

    if let Some(start_row) = start_row {
        field.start_row = start_row;
    }
    if let Some(columns) = columns {
        field.columns = columns;
    }

    file.save(&sections)
        .with_context(|| format!("Failed to write '{}'", file.path().display()))?;
    tracing::info!("Inputs saved to {}", file.path().display());

    Ok(())
}

fn set_path(file: &CheatSheetFile, section_name: &str, path: String) -> Result<()> {
    let mut sections = load(file)?;
    let section = find_section_mut(&mut sections, section_name)
        .with_context(|| format!("Section '{}' not found", section_name))?;

    if !FileStatus::of(&path).exists() {
        tracing::warn!("Workbook '{}' does not exist", path);
    }
    section.filepath = path;

    file.save(&sections)
        .with_context(|| format!("Failed to write '{}'", file.path().display()))?;
    tracing::info!("Inputs saved to {}", file.path().display());

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let names = maage_sheets::SheetNameReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in names.iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}

fn show_status(file: &CheatSheetFile, full_paths: bool) -> Result<()> {
    let cheat_sheet_path = file.path().to_string_lossy();
    println!(
        "Cheat sheet: {} {}",
        display_path(&cheat_sheet_path, full_paths),
        file.status()
    );

    if !file.status().exists() {
        return Ok(());
    }

    let sections = load(file)?;
    for section in tab_sections(&sections) {
        println!(
            "  {} resources: {} {}",
            section.name,
            display_path(&section.filepath, full_paths),
            FileStatus::of(&section.filepath)
        );
    }

    Ok(())
}

fn run(file: &CheatSheetFile, increment_moves: bool, skip: &[String], snapshot: bool) -> Result<()> {
    let sections = load(file)?;
    let states = states_skipping(skip);

    for name in skip {
        if find_section(&sections, name).is_none() {
            tracing::warn!("--skip '{}' matches no section", name);
        }
    }

    if snapshot {
        let snapshot = WorkspaceSnapshot::capture(&sections, &states);
        eprintln!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    let plan = file
        .run(&sections, &states, &RunOptions { increment_moves })
        .with_context(|| format!("Failed to update '{}'", file.path().display()))?;

    tracing::info!("Adjudication flags: {:?}", plan.adjudication_flags);
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

fn show_columns(range: &str) -> Result<()> {
    let indices = column_range_to_indices(range)
        .with_context(|| format!("Invalid column range '{}'", range))?;

    for idx in indices {
        println!("{}\t{}", index_to_column_letters(idx), idx);
    }

    Ok(())
}

fn show_segment(input: &Path, start_row: &str, columns: &str) -> Result<()> {
    let rows = load_segment_file(input, display_row_to_offset(start_row), columns)
        .with_context(|| format!("Failed to read segment of '{}'", input.display()))?;

    for row in rows {
        println!("{}", row.join(","));
    }

    Ok(())
}
