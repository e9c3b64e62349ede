use anyhow::Context;
use calcard::card::Card;
use calcard::raster::{export_png, file_name, FontPaths, FontSet};
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;
use std::process::ExitCode;
use time::Month;

static USAGE: &str = "Usage: gen-calendar [OPTIONS] <year> <month>";

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    year: i32,
    month: u8,
    output: Option<PathBuf>,
    font: Option<PathBuf>,
    verbose: u8,
    quiet: u8,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut year = None;
        let mut month = None;
        let mut output = None;
        let mut font = None;
        let mut verbose = 0u8;
        let mut quiet = 0u8;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('o') | Arg::Long("output") => output = Some(parser.value()?.into()),
                Arg::Long("font") => font = Some(parser.value()?.into()),
                Arg::Short('v') | Arg::Long("verbose") => verbose = verbose.saturating_add(1),
                Arg::Short('q') | Arg::Long("quiet") => quiet = quiet.saturating_add(1),
                Arg::Value(value) if year.is_none() => year = Some(value.parse::<i32>()?),
                Arg::Value(value) if month.is_none() => {
                    let m = value.parse::<u8>()?;
                    if let Err(e) = Month::try_from(m) {
                        return Err(lexopt::Error::ParsingFailed {
                            value: m.to_string(),
                            error: Box::new(e),
                        });
                    }
                    month = Some(m);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let Some(year) = year else {
            return Err(lexopt::Error::MissingValue {
                option: Some(String::from("<year>")),
            });
        };
        let Some(month) = month else {
            return Err(lexopt::Error::MissingValue {
                option: Some(String::from("<month>")),
            });
        };
        Ok(Command::Run(Options {
            year,
            month,
            output,
            font,
            verbose,
            quiet,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                calcard::logging::init(opts.verbose, opts.quiet)?;
                let card = Card::batch_preset(opts.year, opts.month)?;
                let fonts = FontSet::load(&FontPaths {
                    default: opts.font,
                    ..FontPaths::default()
                })
                .context("failed to load fonts")?;
                let path = opts
                    .output
                    .unwrap_or_else(|| PathBuf::from(file_name(opts.year, opts.month)));
                // The card is already sized in output pixels
                export_png(&card, &fonts, &path, 1.0)?;
                println!("wrote {}", path.display());
                Ok(())
            }
            Command::Help => {
                println!("{USAGE}");
                println!();
                println!("Render a one-month calendar card to a PNG file");
                println!();
                println!("Options:");
                println!("  -o, --output FILE   Write to FILE [default: calendar-YYYY-MM.png]");
                println!("      --font FILE     Render text with the font in FILE");
                println!("  -v, --verbose       Log more; may be repeated");
                println!("  -q, --quiet         Log less; may be repeated");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("gen-calendar {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> ExitCode {
    let cmd = match Command::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("gen-calendar: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    match cmd.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gen-calendar: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("gen-calendar").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_year_and_month() {
        assert_eq!(
            parse(&["2026", "3"]).unwrap(),
            Command::Run(Options {
                year: 2026,
                month: 3,
                output: None,
                font: None,
                verbose: 0,
                quiet: 0,
            })
        );
    }

    #[test]
    fn test_options() {
        assert_eq!(
            parse(&["-vv", "--font", "/f.otf", "-o", "out.png", "2025", "12"]).unwrap(),
            Command::Run(Options {
                year: 2025,
                month: 12,
                output: Some(PathBuf::from("out.png")),
                font: Some(PathBuf::from("/f.otf")),
                verbose: 2,
                quiet: 0,
            })
        );
    }

    #[test]
    fn test_quiet() {
        let Command::Run(opts) = parse(&["-qq", "2026", "3"]).unwrap() else {
            panic!("expected a run command");
        };
        assert_eq!(opts.quiet, 2);
        assert_eq!(calcard::logging::default_level(opts.verbose, opts.quiet), "error");
        let Command::Run(opts) = parse(&["--quiet", "-v", "2026", "3"]).unwrap() else {
            panic!("expected a run command");
        };
        assert_eq!(calcard::logging::default_level(opts.verbose, opts.quiet), "warn");
    }

    #[test]
    fn test_bad_usage() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["2026"]).is_err());
        assert!(parse(&["2026", "0"]).is_err());
        assert!(parse(&["2026", "13"]).is_err());
        assert!(parse(&["2026", "March"]).is_err());
        assert!(parse(&["2026", "3", "1"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }
}
