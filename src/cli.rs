use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "regex-renamer")]
#[command(author, version, about, long_about = None)]
#[command(about = "Batch-rename files in a directory with a regex search/replace")]
pub struct Args {
    /// Directory containing the files to rename
    pub target_dir: PathBuf,

    /// Regular expression matched against each file name (extension included)
    #[arg(short, long, required_unless_present = "undo")]
    pub pattern: Option<String>,

    /// Replacement text; \1 or \g<name> insert captured groups
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub replacement: String,

    /// Only rename files with this extension (e.g. .txt, jpg)
    #[arg(short, long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Preview the renames without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Undo the last rename
    #[arg(short, long, conflicts_with_all = ["pattern", "replacement", "ext", "dry"])]
    pub undo: bool,

    /// Location of the undo record
    #[arg(long, value_name = "FILE")]
    pub undo_log: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_args() {
        let args = Args::try_parse_from([
            "regex-renamer",
            "-p",
            r"(\d+)",
            "-r",
            r"img_\1",
            "--ext",
            "jpg",
            "--dry",
            "/photos",
        ])
        .unwrap();

        assert_eq!(args.pattern.as_deref(), Some(r"(\d+)"));
        assert_eq!(args.replacement, r"img_\1");
        assert_eq!(args.ext.as_deref(), Some("jpg"));
        assert!(args.dry);
        assert!(!args.undo);
        assert_eq!(args.target_dir, PathBuf::from("/photos"));
    }

    #[test]
    fn test_replacement_defaults_to_empty() {
        let args = Args::try_parse_from(["regex-renamer", "-p", "x", "."]).unwrap();
        assert_eq!(args.replacement, "");
    }

    #[test]
    fn test_pattern_required_without_undo() {
        assert!(Args::try_parse_from(["regex-renamer", "."]).is_err());
        assert!(Args::try_parse_from(["regex-renamer", "--undo", "."]).is_ok());
    }

    #[test]
    fn test_undo_conflicts_with_pattern() {
        assert!(Args::try_parse_from(["regex-renamer", "--undo", "-p", "x", "."]).is_err());
    }

    #[test]
    fn test_undo_rejects_rename_options() {
        assert!(Args::try_parse_from(["regex-renamer", "--undo", "-r", "x", "."]).is_err());
        assert!(Args::try_parse_from(["regex-renamer", "--undo", "-e", "txt", "."]).is_err());
        assert!(Args::try_parse_from(["regex-renamer", "--undo", "--dry", "."]).is_err());
    }
}
