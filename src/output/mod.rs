use crate::preview::Preview;
use crate::rename::RenamePlan;
use std::io::{self, Write};

/// Display a preview: the changed entries, the unchanged count and warnings
pub fn display_preview(preview: &Preview, dry_run: bool, writer: &mut impl Write) -> io::Result<()> {
    let plan = &preview.plan;
    let changes = plan.change_count();

    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    if dry_run {
        writeln!(writer, "              DRY RUN")?;
    } else {
        writeln!(writer, "            RENAME PLAN")?;
    }
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Files:   {}", plan.len())?;
    writeln!(writer, "Changes: {}", changes)?;
    writeln!(writer)?;

    if changes == 0 {
        writeln!(writer, "No files to rename.")?;
    } else {
        writeln!(writer, "Planned changes:")?;
        writeln!(writer)?;

        for (i, entry) in plan.changes().enumerate() {
            writeln!(writer, "  {}. From: {}", i + 1, entry.old_name)?;
            writeln!(writer, "     To:   {}", entry.new_name)?;
        }

        let unchanged = plan.len() - changes;
        if unchanged > 0 {
            writeln!(writer)?;
            writeln!(writer, "  ({} files unchanged)", unchanged)?;
        }
    }

    if !preview.warnings.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Warnings:")?;
        for warning in &preview.warnings {
            writeln!(writer, "  [!] {}", warning)?;
        }
    }

    if dry_run && changes > 0 {
        writeln!(writer)?;
        writeln!(writer, "----------------------------------------")?;
        writeln!(writer, "Summary:")?;
        writeln!(writer, "  {} files would be renamed", changes)?;
        writeln!(writer)?;
        writeln!(writer, "Run without --dry to apply these changes.")?;
    }

    Ok(())
}

/// Display the result of an executed plan
pub fn display_execution_result(plan: &RenamePlan, applied: usize, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Successfully renamed {} files.", applied)?;

    let unchanged = plan.len() - plan.change_count();
    if unchanged > 0 {
        writeln!(writer, "  {} files were left unchanged.", unchanged)?;
    }

    writeln!(writer, "Run with --undo to revert this rename.")?;

    Ok(())
}

/// Display the result of an undo
pub fn display_undo_result(reversed: usize, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Undo completed: {} files restored.", reversed)?;
    Ok(())
}
