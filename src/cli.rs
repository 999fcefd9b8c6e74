use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "depscan",
    about = "Detect a project's language and list its declared and imported dependencies",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.depscan/config.toml, fallback ~/.config/depscan/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Skip directories with this name anywhere in the tree (repeatable)
    #[arg(long, value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Only read manifests; do not scan source files for imports
    #[arg(long)]
    pub no_code: bool,

    /// Also list the manifests that were parsed
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
