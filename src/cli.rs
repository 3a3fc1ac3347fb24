use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the control center.
#[derive(Debug, Parser)]
#[command(author, version, about = "Shipyard production control center TUI", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to ./control-center.toml if present).
    #[arg(long, value_name = "FILE")]
    pub config_path: Option<PathBuf>,
    /// Section to open on startup (e.g. dashboard, engineering, civil-works).
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,
    /// Tab to open inside the starting department section (projects, gantt, documentation, team).
    #[arg(long, value_name = "TAB")]
    pub tab: Option<String>,
    /// Seed for the mock data generator, for reproducible sessions.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_section_and_seed() {
        let cli = Cli::parse_from([
            "control-center",
            "--section",
            "naval",
            "--tab",
            "gantt",
            "--seed",
            "42",
        ]);
        assert_eq!(cli.section.as_deref(), Some("naval"));
        assert_eq!(cli.tab.as_deref(), Some("gantt"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.config_path.is_none());
    }
}
