// tracetable: step-by-step trace tables for pseudocode programs

use std::fs;
use std::io;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tracetable::interpreter::{trace_program, TraceConfig};
use tracetable::parser::ast::Program;
use tracetable::presets::{self, Preset};
use tracetable::snapshot::{TraceCursor, TraceTable};
use tracetable::ui::App;

enum Input {
    File(String),
    Preset(&'static Preset),
}

struct Options {
    input: Input,
    max_steps: Option<usize>,
    dump: bool,
}

enum Command {
    Run(Options),
    ListPresets,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut input = None;
    let mut max_steps = None;
    let mut dump = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--list-presets" => return Ok(Command::ListPresets),
            "--dump" => dump = true,
            "--preset" => {
                let name = iter.next().ok_or("--preset needs a name")?;
                let preset =
                    presets::find(name).ok_or_else(|| format!("Unknown preset '{}'", name))?;
                input = Some(Input::Preset(preset));
            }
            "--max-steps" => {
                let value = iter.next().ok_or("--max-steps needs a number")?;
                let steps = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid step limit '{}'", value))?;
                max_steps = Some(steps);
            }
            flag if flag.starts_with('-') => return Err(format!("Unknown option '{}'", flag)),
            path => input = Some(Input::File(path.to_string())),
        }
    }

    let input = input.ok_or("No input file or preset provided")?;
    Ok(Command::Run(Options {
        input,
        max_steps,
        dump,
    }))
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <file>", program_name);
    eprintln!("       {} [OPTIONS] --preset <name>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --preset <name>    Trace a built-in program instead of a file");
    eprintln!("  --max-steps <n>    Stop after visiting n lines (default 500)");
    eprintln!("  --dump             Print the trace table instead of opening the viewer");
    eprintln!("  --list-presets     List the built-in programs");
    eprintln!("  -h, --help         Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=tracetable=debug) to log execution to stderr.");
}

/// Logging is opt-in through `RUST_LOG`
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map_or("tracetable", String::as_str);

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(Command::Run(options)) => options,
        Ok(Command::ListPresets) => {
            for preset in presets::all() {
                println!("{:<18} {}", preset.name, preset.description);
            }
            return Ok(());
        }
        Ok(Command::Help) => {
            print_usage(program_name);
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            process::exit(1);
        }
    };

    let (title, source) = match &options.input {
        Input::File(path) => match fs::read_to_string(path) {
            Ok(source) => (path.clone(), source),
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        },
        Input::Preset(preset) => (preset.name.to_string(), preset.source.to_string()),
    };

    let mut config = TraceConfig::default();
    if let Some(steps) = options.max_steps {
        config = config.with_step_limit(steps);
    }

    let program = Program::parse(&source);
    let trace = trace_program(&program, &config);
    tracing::info!(
        snapshots = trace.len(),
        termination = %trace.termination(),
        "trace recorded"
    );

    if options.dump {
        print!("{}", TraceTable::from_trace(&trace).render_text());
        println!();
        println!("{}", trace.termination());
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        TraceCursor::new(trace),
        program.source_lines().to_vec(),
        title,
    );
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
