mod app;
mod help;
mod preview;
mod prompt;
mod theme;
use crate::app::App;
use anyhow::Context;
use calcard::card::Card;
use calcard::config::Config;
use calcard::params::ParamStore;
use calcard::raster::FontSet;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    font: Option<PathBuf>,
    log: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    month: Option<(i32, u8)>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(parser.value()?.into());
                }
                Arg::Long("font") => opts.font = Some(parser.value()?.into()),
                Arg::Long("log") => opts.log = Some(parser.value()?.into()),
                Arg::Short('o') | Arg::Long("out-dir") => {
                    opts.out_dir = Some(parser.value()?.into());
                }
                Arg::Value(value) if opts.month.is_none() => {
                    let value = value.string()?;
                    // A month is parsed as its first day
                    match Date::parse(&format!("{value}-01"), &YMD_FMT) {
                        Ok(d) => opts.month = Some((d.year(), u8::from(d.month()))),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(ref path) = opts.log {
                    calcard::logging::init_file(path, 0)?;
                }
                let config =
                    Config::load(opts.config.as_deref()).context("failed to load configuration")?;
                let (year, month) = match (opts.month, config.year, config.month) {
                    (Some(ym), _, _) => ym,
                    (None, Some(y), Some(m)) => (y, m),
                    (None, y, m) => {
                        let today = OffsetDateTime::now_local()
                            .unwrap_or_else(|_| OffsetDateTime::now_utc())
                            .date();
                        (
                            y.unwrap_or_else(|| today.year()),
                            m.unwrap_or_else(|| u8::from(today.month())),
                        )
                    }
                };
                let mut params = ParamStore::default();
                config.apply_params(&mut params)?;
                let ranges = config.range_list()?;
                let card = Card::new(params, year, month, ranges)?;
                let mut font_paths = config.fonts;
                if opts.font.is_some() {
                    font_paths.default = opts.font;
                }
                let out_dir = opts.out_dir.unwrap_or_else(|| PathBuf::from("."));
                let mut app = App::new(card, font_paths.clone(), out_dir);
                if font_paths.default.is_some() {
                    // Report unusable font files before taking over the
                    // terminal
                    let fonts = FontSet::load(&font_paths).context("failed to load fonts")?;
                    app = app.fonts(fonts);
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: calcard [OPTIONS] [YYYY-MM]");
                println!();
                println!("Design a one-month calendar card and export it as a PNG");
                println!();
                println!("Options:");
                println!("  -c, --config FILE   Read settings from FILE");
                println!("      --font FILE     Render text with the font in FILE");
                println!("      --log FILE      Write a log to FILE");
                println!("  -o, --out-dir DIR   Export PNG files into DIR [default: .]");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
