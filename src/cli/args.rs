//! Command-line argument parsing for the sse-notify CLI.

/// Options for tailing a stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TailArgs {
    /// Endpoint to subscribe to
    pub url: String,
    /// Reconnect after the stream ends (disabled by `--no-reconnect`)
    pub reconnect: bool,
    /// Print one JSON object per event
    pub json: bool,
    /// Extra request headers from `-H 'Name: value'`
    pub headers: Vec<(String, String)>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Subscribe and print events
    Tail(TailArgs),
    /// Arguments could not be parsed
    Invalid(String),
}

pub const USAGE: &str = "\
usage: sse-notify [--no-reconnect] [--json] [-H 'Name: value']... <url>
       sse-notify --version | --help";

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use sse_notify::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sse-notify".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut tail = TailArgs {
        reconnect: true,
        ..Default::default()
    };
    let mut url = None;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--no-reconnect" => tail.reconnect = false,
            "--json" => tail.json = true,
            "-H" | "--header" => {
                let Some(raw) = args.next() else {
                    return CliCommand::Invalid(format!("{} requires a value", arg));
                };
                match parse_header(&raw) {
                    Some(header) => tail.headers.push(header),
                    None => return CliCommand::Invalid(format!("invalid header: {}", raw)),
                }
            }
            flag if flag.starts_with('-') => {
                return CliCommand::Invalid(format!("unknown option: {}", flag));
            }
            _ => {
                if url.replace(arg).is_some() {
                    return CliCommand::Invalid("more than one url given".to_string());
                }
            }
        }
    }

    match url {
        Some(url) => CliCommand::Tail(TailArgs { url, ..tail }),
        None => CliCommand::Invalid("missing url".to_string()),
    }
}

/// Split `Name: value` into a header pair.
fn parse_header(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
