//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// gaenv - link installed Python packages for sandboxed deployment
///
/// Run `pip install -r requirements.txt` first; gaenv only links what is
/// already installed.
#[derive(Parser, Debug)]
#[command(
    name = "gaenv",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Create package symlinks for deployment to restricted Python runtimes",
    long_about = "gaenv reads a requirements file, finds the matching installed packages and \
                  links their top-level modules into a local directory that the runtime can \
                  import from. Packages must already be installed with pip.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  gaenv\n    \
                  gaenv -r requirements/prod.txt\n    \
                  gaenv --lib vendor --no-import\n    \
                  gaenv --site-packages .venv/lib/python3.11/site-packages"
)]
pub struct Cli {
    /// Requirements file [default: requirements.txt]
    #[arg(long, short = 'r', value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// Output directory name, also the imported module name [default: gaenv_lib]
    #[arg(long, short = 'l', value_name = "DIR")]
    pub lib: Option<String>,

    /// Do not add the import statement to the bootstrap file
    #[arg(long, short = 'n')]
    pub no_import: bool,

    /// Bootstrap file receiving the import [default: appengine_config.py]
    #[arg(long, short = 'b', value_name = "FILE")]
    pub bootstrap: Option<PathBuf>,

    /// Package directory to link from (defaults to the interpreter's purelib path)
    #[arg(long, value_name = "DIR", env = "GAENV_SITE_PACKAGES")]
    pub site_packages: Option<PathBuf>,

    /// Working directory (defaults to current directory)
    #[arg(long, short = 'w', value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
