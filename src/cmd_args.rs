use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Key-value store file holding history and theme.
    /// Defaults to $TERMFOLIO_STORE_PATH or ~/.termfolio/storage.json.
    #[clap(short = 's', long, help = "store file path")]
    store: Option<String>,

    /// Origin the portfolio is served from; same-origin fetches are always allowed
    #[clap(short = 'o', long, help = "site origin for links and fetch")]
    origin: Option<String>,

    /// JSON file overriding the built-in portfolio content
    #[clap(short = 'c', long, help = "portfolio content file")]
    content: Option<String>,

    #[clap(long, help = "skip the boot animation")]
    no_boot: bool,

    #[clap(short = 'm', long, help = "start with sound muted")]
    mute: bool,

    /// Milliseconds per typed character during boot
    #[clap(long, default_value_t = 16, help = "boot typing delay in ms")]
    boot_delay: u64,

    #[clap(long, help = "pre-cache the site assets before starting")]
    precache: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    store: Option<String>,
    origin: Option<String>,
    content: Option<String>,
    no_boot: bool,
    mute: bool,
    boot_delay: u64,
    precache: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            store: args.store,
            origin: args.origin,
            content: args.content,
            no_boot: args.no_boot,
            mute: args.mute,
            boot_delay: args.boot_delay,
            precache: args.precache,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn boot_enabled(&self) -> bool {
        !self.no_boot
    }

    pub fn muted(&self) -> bool {
        self.mute
    }

    pub fn boot_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.boot_delay)
    }

    pub fn precache(&self) -> bool {
        self.precache
    }
}
