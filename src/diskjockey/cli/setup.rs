use clap::{Args, Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "dj", bin_name = "dj", version = get_version())]
#[command(about = "Catalog removable media and find which disk holds a file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the testing catalog instead of the real one
    #[arg(short, long, global = true)]
    pub testing: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a medium and add it to the catalog
    #[command(alias = "a", display_order = 1)]
    Add(AddArgs),

    /// Scan a cataloged medium again
    #[command(display_order = 2)]
    Rescan {
        /// Id of the medium (e.g. 7 or 007)
        id: String,

        /// Directory the medium is mounted at, or its name under the scan root
        target: Option<String>,

        /// Keep existing entries and append the new scan
        #[arg(long)]
        append: bool,
    },

    /// List media mounted under the scan root
    #[command(display_order = 3)]
    Media,

    /// List cataloged media
    #[command(alias = "ls", display_order = 10)]
    List,

    /// Show cataloged media in full
    #[command(alias = "v", display_order = 11)]
    Show {
        /// Ids of the media
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Replace the tags of a medium (no tags clears them)
    #[command(display_order = 12)]
    Tag {
        /// Id of the medium
        id: String,

        /// New tags
        #[arg(num_args = 0..)]
        tags: Vec<String>,
    },

    /// Find media by contained path, tag or label
    #[command(alias = "s", display_order = 13)]
    Search(SearchArgs),

    /// Catalog totals
    #[command(display_order = 20)]
    Stats,

    /// List or add media types
    #[command(display_order = 21)]
    Types {
        /// Media type to add
        add: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 22)]
    Config {
        /// Configuration key (e.g. scan_root)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Directory the medium is mounted at, or its name under the scan root.
    /// Defaults to the only mounted medium.
    pub target: Option<String>,

    /// Label for the medium (defaults to the directory name)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Tags for the medium
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Mark the medium as encrypted
    #[arg(long)]
    pub encrypted: bool,

    /// Where the medium is physically kept
    #[arg(long, value_name = "PLACE")]
    pub location: Option<String>,

    /// Capacity in bytes
    #[arg(long, value_name = "BYTES")]
    pub capacity: Option<u64>,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct SearchArgs {
    /// Path or file name to look for
    pub path: Option<String>,

    /// Media carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Media whose label contains this text
    #[arg(long)]
    pub label: Option<String>,
}
