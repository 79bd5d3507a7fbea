// MicroML: parse ML-style expressions into a syntax tree and show it

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use microml::config::{Config, Input, OutputFormat, LOG_ENV_VAR};
use microml::json::{self, Response};
use microml::parser::ast::Node;
use microml::render::outline;
use microml::ui::App;

const USAGE: &str = "\
Usage: microml [OPTIONS] [FILE]

Reads MicroML source from FILE, from -e, or from stdin (no FILE or '-').

Options:
  -e, --expr <SOURCE>    parse SOURCE instead of reading a file
  -f, --format <FORMAT>  json | pretty | tree | tui (default: pretty)
      --strict           reject tokens after the expression
  -v, --verbose          raise the log level (repeatable)
  -h, --help             print this help

Examples:
  microml -e 'let x = 5 in x + 3'
  microml -f tree -e 'let add = fun x -> fun y -> x + y in add 5 3'
  microml -f tui program.mml";

fn main() -> ExitCode {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let config = match Config::from_args(std::env::args().skip(1), env_level.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if config.show_help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    if let Err(e) = microml::logging::init(config.log_level) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn read_source(input: &Input) -> io::Result<String> {
    match input {
        Input::File(path) => fs::read_to_string(path),
        Input::Inline(source) => Ok(source.clone()),
        Input::Stdin => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn run(config: &Config) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let source = read_source(&config.input)?;
    log::info!("read {} byte(s) of source", source.len());

    match config.format {
        OutputFormat::Json | OutputFormat::Pretty => {
            let response = json::respond(&source, &config.options);
            let text = if config.format == OutputFormat::Json {
                serde_json::to_string(&response)?
            } else {
                serde_json::to_string_pretty(&response)?
            };
            println!("{}", text);
            Ok(match response {
                Response::Ast(_) => ExitCode::SUCCESS,
                Response::Failure { .. } => ExitCode::FAILURE,
            })
        }
        OutputFormat::Tree => match microml::parse_with(&source, &config.options) {
            Ok(tree) => {
                println!("{}", outline(&tree));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        },
        OutputFormat::Tui => match microml::parse_with(&source, &config.options) {
            Ok(tree) => {
                run_tui(source, tree)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn run_tui(source: String, tree: Node) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, tree);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
