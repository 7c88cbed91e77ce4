use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kconsole-filters",
    version,
    about = "Evaluate cluster console display filters from the command line."
)]
pub struct CliArgs {
    /// Filter name (see --list)
    #[arg(required_unless_present = "list")]
    pub filter: Option<String>,

    /// Input value, parsed as JSON when possible, otherwise taken verbatim
    pub value: Option<String>,

    /// Fallback for the cluster and namespace filters
    #[arg(long)]
    pub fallback: Option<String>,

    /// Console URL used as the current route
    #[arg(long)]
    pub route: Option<String>,

    /// Namespace selection state file
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Use the kubeconfig current-context cluster when the route has none
    #[arg(long)]
    pub kubeconfig: bool,

    /// Display locale (zh-CN, en-US)
    #[arg(long)]
    pub locale: Option<String>,

    /// Config file (defaults to KCONSOLE_CONFIG or discovered locations)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List available filters and exit
    #[arg(long)]
    pub list: bool,

    /// tracing filter (for example: info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}
