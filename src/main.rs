use {
    anyhow::Context,
    clap::Parser,
    list_monitors::{DefaultBackend, InventorySnapshot, Report, ReportOptions, Selection, Session},
    std::process::ExitCode,
};

/// List attached monitors with their video modes, geometry and gamma ramp
#[derive(Debug, Parser)]
#[command(name = "list-monitors", version, about)]
struct Args {
    /// Index of the monitor to report on; anything that isn't a number selects monitor 0
    #[arg(value_name = "INDEX", allow_hyphen_values = true)]
    index: Option<String>,

    /// Extra arguments after the index are ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,

    /// Report every monitor instead of a single one
    #[arg(long, conflicts_with = "index")]
    all: bool,

    /// Don't print the gamma ramp
    #[arg(long)]
    no_gamma: bool,
}

impl Args {
    fn selection(&self) -> Selection {
        match self.all {
            true => Selection::All,
            false => Selection::Monitor(self.index.as_deref().map_or(0, parse_monitor_index)),
        }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions { gamma: !self.no_gamma }
    }
}

/// Parse a monitor index leniently, never failing
///
/// Leading ASCII whitespace and a `+` sign are skipped and the leading digits
/// are used. Input without leading digits (including any negative number) is
/// 0, and values too large for `usize` saturate.
fn parse_monitor_index(arg: &str) -> usize {
    let arg = arg.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let arg = arg.strip_prefix('+').unwrap_or(arg);
    let digits = &arg[..arg.find(|c: char| !c.is_ascii_digit()).unwrap_or(arg.len())];
    match digits.parse() {
        Ok(index) => index,
        Err(_) if digits.is_empty() => 0,
        Err(_) => usize::MAX,
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let session = Session::<DefaultBackend>::init().context("Failed to initialize the display backend")?;
    let inventory = InventorySnapshot::build(&*session).context("Failed to enumerate monitors")?;

    let report = Report::new(&inventory)
        .select(args.selection())
        .options(args.report_options());
    print!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    log::debug!("{args:?}");
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e:#}");
            ExitCode::FAILURE
        },
    }
}
