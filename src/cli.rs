use crate::domain::constants::DEFAULT_HASH_LIST;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hashscope",
    version,
    about = "Enrich file hashes with VirusTotal verdicts and Markdown reports"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Settings file (TOML); ./hashscope.toml is used when present"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up every hash in the hash list and write raw responses and reports.
    Run(RunArgs),
    /// Build a hash list workbook from the files in a folder.
    Hashlist {
        folder: PathBuf,
        #[arg(long, default_value = DEFAULT_HASH_LIST)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = HashAlgorithm::Md5)]
        algorithm: HashAlgorithm,
    },
    /// Render a report from a saved raw response without contacting the service.
    Render {
        raw: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        template_dir: Option<PathBuf>,
        #[arg(long)]
        template: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[arg(long)]
    pub api_key_file: Option<PathBuf>,
    #[arg(long, help = "Hash list workbook (.xlsx); hashes are read from column 2")]
    pub hashes: Option<PathBuf>,
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
    #[arg(long)]
    pub template: Option<String>,
    #[arg(long)]
    pub responses_dir: Option<PathBuf>,
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
    #[arg(long, help = "Service base URL, e.g. https://www.virustotal.com/api/v3")]
    pub api_url: Option<String>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    #[arg(long, default_value_t = false, help = "Do not create missing output directories")]
    pub no_create_dirs: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
