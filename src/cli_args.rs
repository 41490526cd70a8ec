use clap::Parser;
use log::debug;

use utm_checker::settings::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(help = "Campaign URL to check")]
    pub url: Option<String>,

    #[arg(long, help = "Validate against this channel id instead of auto-detecting")]
    pub channel: Option<String>,

    #[arg(long, help = "Print the URL with every blocking fix applied")]
    pub fix: bool,

    #[arg(long, help = "Print a rebuilt URL with normalized tracking values")]
    pub clean: bool,

    #[arg(long, value_enum, help = "Output format (overrides settings)")]
    pub format: Option<FormatArg>,

    #[arg(long, help = "Path to a rules JSON file")]
    pub rules: Option<String>,

    #[arg(long, help = "Path to a settings JSON file")]
    pub settings: Option<String>,

    #[arg(long = "list-channels", help = "List configured channels and exit")]
    pub list_channels: bool,

    #[arg(long, help = "Normalize a single value and exit")]
    pub normalize: Option<String>,

    #[arg(long = "keep-macro", help = "Keep the macro token when normalizing")]
    pub keep_macro: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        CommandLineArgs::parse()
    }

    /// Logged after the logger is up, since `--verbose` decides its level.
    pub fn log_summary(&self) {
        debug!(
            "Parsed arguments: url={:?} channel={:?} fix={} clean={}",
            self.url, self.channel, self.fix, self.clean
        );
    }
}
