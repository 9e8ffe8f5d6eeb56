use std::io;

use clap::Parser;
use tracing::{debug, error, info};

use regex_renamer::cli::Args;
use regex_renamer::logging;
use regex_renamer::output::{display_execution_result, display_preview, display_undo_result};
use regex_renamer::progress::{should_use_colors, Progress};
use regex_renamer::{
    compute_preview, config_from_env, ensure_directory, list_files, AppError, FileFilter,
    Transactor, UndoStore,
};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = config_from_env().with_undo_log(args.undo_log.as_deref());
    debug!(config = ?config, "Resolved configuration");

    let transactor = Transactor::new(UndoStore::new(&config.undo_log));
    let mut progress = Progress::new_with_ui(args.verbose > 0, should_use_colors());
    let mut stdout = io::stdout();

    if args.undo {
        info!("Undo mode: {:?}", config.undo_log);
        ensure_directory(&args.target_dir)?;

        progress.undo_start(transactor.store().path());
        let reversed = transactor.undo(&args.target_dir)?;
        progress.undo_complete(reversed);

        display_undo_result(reversed, &mut stdout).map_err(output_error)?;
        return Ok(());
    }

    let pattern = args
        .pattern
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::InvalidArguments("Please enter a regex pattern.".to_string()))?;

    // Step 1: List files
    progress.scan_start(&args.target_dir);
    let filter = FileFilter::new()
        .with_extension(args.ext.as_deref())
        .excluding(Some(config.undo_log.clone()));
    let files = list_files(&args.target_dir, &filter)?;
    progress.scan_complete(files.len());

    info!("Found {} files", files.len());

    // Step 2: Preview
    let preview = compute_preview(&files, pattern, &args.replacement)?;
    progress.preview_complete(preview.plan.change_count(), preview.plan.len());
    if !preview.warnings.is_empty() {
        progress.warn(&format!("{} warning(s) while computing new names", preview.warnings.len()));
    }

    display_preview(&preview, args.dry, &mut stdout).map_err(output_error)?;

    if !preview.has_changes() {
        info!("Nothing to rename");
        return Ok(());
    }

    if args.dry {
        info!("Dry run: no files renamed");
        return Ok(());
    }

    // Step 3: Rename
    progress.rename_start(preview.plan.change_count());
    let applied = transactor.execute(&args.target_dir, &preview.plan)?;
    progress.rename_complete(applied);
    progress.undo_written(transactor.store().path());

    display_execution_result(&preview.plan, applied, &mut stdout).map_err(output_error)?;

    Ok(())
}

fn output_error(e: io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}
