use fontscale::config::DEFAULT_REPORT_FILENAME;
use fontscale::{Pipeline, ReportTarget, RunConfig};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Pipeline(fontscale::Error),
    Unexpected(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Pipeline(err) => write!(f, "Error: {err}"),
            CliError::Unexpected(err) => write!(f, "Unexpected error: {err}"),
        }
    }
}

impl From<fontscale::Error> for CliError {
    fn from(value: fontscale::Error) -> Self {
        Self::Pipeline(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Unexpected(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    project_dir: Option<String>,
    resources_dir: Option<String>,
    fonts_subdir: Option<String>,
    manifest_filename: Option<String>,
    tool_path: Option<String>,
    padding: Option<u32>,
    report: Option<ReportTarget>,
}

fn usage() -> &'static str {
    "fontscale-cli\n\
\n\
USAGE:\n\
  fontscale-cli [--project-dir <dir>] [--resources-dir <dir>] [--fonts-subdir <dir>]\n\
                [--xml-file <name>] [--tool-path <path>] [--padding <n>]\n\
                [--report [<file>|-]]\n\
\n\
NOTES:\n\
  - The manifest is read from <project-dir>/<resources-dir>/<fonts-subdir>/<xml-file>\n\
    (defaults: ./resources/fonts/fonts.xml).\n\
  - Reference and target screen configurations come from the manifest's\n\
    ScreenResolutions block; they cannot be overridden on the command line.\n\
  - --report writes a markdown sizing report: bare --report uses fonts.md in the\n\
    project directory, a value names the file, and `-` prints to stdout.\n\
  - --padding is forwarded to the rasterizer's -p flag when given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--project-dir" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.project_dir = Some(value.clone());
            }
            "--resources-dir" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.resources_dir = Some(value.clone());
            }
            "--fonts-subdir" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.fonts_subdir = Some(value.clone());
            }
            "--xml-file" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.manifest_filename = Some(value.clone());
            }
            "--tool-path" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.tool_path = Some(value.clone());
            }
            "--padding" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let padding = value.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
                args.padding = Some(padding);
            }
            "--report" => {
                args.report = Some(match it.peek() {
                    Some(value) if value.as_str() == "-" => {
                        it.next();
                        ReportTarget::Stdout
                    }
                    Some(value) if !value.starts_with("--") => {
                        ReportTarget::File(it.next().expect("peeked").clone())
                    }
                    _ => ReportTarget::File(DEFAULT_REPORT_FILENAME.to_string()),
                });
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = RunConfig::new();
    if let Some(project_dir) = args.project_dir {
        config = config.with_project_dir(project_dir);
    }
    if let Some(resources_dir) = args.resources_dir {
        config = config.with_resources_dir(resources_dir);
    }
    if let Some(fonts_subdir) = args.fonts_subdir {
        config = config.with_fonts_subdir(fonts_subdir);
    }
    if let Some(manifest_filename) = args.manifest_filename {
        config = config.with_manifest_filename(manifest_filename);
    }
    if let Some(tool_path) = args.tool_path {
        config = config.with_tool_path(tool_path);
    }
    config = config.with_padding(args.padding).with_report(args.report);

    Pipeline::load(&config)?.run()?;
    Ok(())
}

fn init_logging() {
    let format = tracing_subscriber::fmt::format().compact();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .event_format(format)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
