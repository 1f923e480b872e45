//! CLI argument parsing module for zondep

use clap::Parser;
use std::path::PathBuf;

/// build.zig.zon dependency freshness checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zondep",
    version,
    about = "Checks build.zig.zon URL dependencies against their upstream"
)]
pub struct CliArgs {
    /// Root directory of the project (where build.zig.zon lives)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Scan subdirectories for other build.zig.zon files
    #[arg(short, long)]
    pub recursive: bool,

    /// Print the URL pinning each outdated dependency to its latest revision
    #[arg(short, long)]
    pub update: bool,

    /// Enable quiet mode - only report outdated dependencies and failures
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["zondep"]);
        assert_eq!(args.root, PathBuf::from("."));
        assert!(!args.recursive);
        assert!(!args.update);
        assert!(!args.quiet);
        assert!(!args.verbose);
        assert!(!args.json);
    }

    #[test]
    fn test_root_argument() {
        let args = CliArgs::parse_from(["zondep", "/some/project"]);
        assert_eq!(args.root, PathBuf::from("/some/project"));
    }

    #[test]
    fn test_recursive_flags() {
        let args = CliArgs::parse_from(["zondep", "-r"]);
        assert!(args.recursive);

        let args = CliArgs::parse_from(["zondep", "--recursive"]);
        assert!(args.recursive);
    }

    #[test]
    fn test_update_flags() {
        let args = CliArgs::parse_from(["zondep", "-u"]);
        assert!(args.update);

        let args = CliArgs::parse_from(["zondep", "--update"]);
        assert!(args.update);
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["zondep", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["zondep", "--quiet"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_json_flag() {
        let args = CliArgs::parse_from(["zondep", "--json"]);
        assert!(args.json);
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from(["zondep", "/path/to/project", "-r", "-u", "--verbose"]);
        assert_eq!(args.root, PathBuf::from("/path/to/project"));
        assert!(args.recursive);
        assert!(args.update);
        assert!(args.verbose);
        assert!(!args.quiet);
    }
}
