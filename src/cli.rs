use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-page-filter",
    version,
    about = "Extract pages from a PDF, following the page numbers printed on the pages"
)]
pub struct Cli {
    /// Input PDF
    pub input: PathBuf,

    /// Pages to keep, e.g. "2-5, 17-20, 25". Printed page numbers unless
    /// --physical is given.
    pub pages: String,

    /// Output PDF
    pub output: PathBuf,

    /// Select by physical page position instead of printed page number
    #[arg(long, default_value_t = false)]
    pub physical: bool,

    /// Password for encrypted input
    #[arg(long)]
    pub password: Option<String>,

    /// Print the physical-to-printed page-number map as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub show_map: bool,
}
