use std::fs;
use std::io::{ self, Write };
use std::path::{ Path, PathBuf };

use anyhow::{ bail, Context, Result };
use clap::{ Args, Parser, Subcommand };
use tracing::info;

use intcode::cache::DEFAULT_INPUT_DIR;
use intcode::console::DEFAULT_PROMPT;
use intcode::{ interact, Ascii, InputCache, Machine, Program, State, StdConsole };

#[derive(Parser, Debug)]
#[command(name = "intcode", version, about = "Run comma separated integer programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed numeric inputs and print each output value on its own line
    Run {
        #[command(flatten)]
        source: Source,

        /// Comma separated input values
        #[arg(short, long, default_value = "")]
        input: String,
    },
    /// Feed lines of text and print the decoded output
    Ascii {
        #[command(flatten)]
        source: Source,

        /// Line of input, may be repeated
        #[arg(short, long = "line")]
        lines: Vec<String>,
    },
    /// Talk to the program from the terminal
    Interactive {
        #[command(flatten)]
        source: Source,

        /// Trailing prompt removed from each chunk of output
        #[arg(long, default_value = DEFAULT_PROMPT)]
        prompt: String,
    },
    /// Copy a program file into the input cache
    Store {
        /// Program file
        file: PathBuf,

        #[arg(long)]
        year: u16,

        #[arg(long)]
        day: u8,

        /// Root of the input cache
        #[arg(long, env = "INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// Program file
    #[arg(required_unless_present_all = ["year", "day"])]
    file: Option<PathBuf>,

    /// Puzzle year to load from the input cache
    #[arg(long, requires = "day", conflicts_with = "file")]
    year: Option<u16>,

    /// Puzzle day to load from the input cache
    #[arg(long, requires = "year", conflicts_with = "file")]
    day: Option<u8>,

    /// Root of the input cache
    #[arg(long, env = "INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,
}

impl Source {
    fn load(&self) -> Result<String> {
        match (&self.file, self.year, self.day) {
            (Some(file), _, _) => fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display())),
            (None, Some(year), Some(day)) => {
                let cache = InputCache::new(&self.input_dir);
                cache.read(year, day)
                    .with_context(|| format!("reading {}", cache.path(year, day).display()))?
                    .with_context(|| format!("no cached input at {}", cache.path(year, day).display()))
            }
            _ => bail!("either a program file or --year and --day is required"),
        }
    }
}

fn run(text: &str, input: &str) -> Result<()> {
    let mut machine = Machine::with_program(text)?;
    for value in input.parse::<Program>().context("parsing input values")?.cells() {
        machine.enqueue_input(value.clone())?;
    }

    let state = machine.run()?;
    let mut stdout = io::stdout().lock();
    for value in machine.dequeue_all_output() {
        writeln!(stdout, "{}", value)?;
    }
    if state == State::Blocked {
        bail!("program is waiting for more input");
    }
    Ok(())
}

fn ascii(text: &str, lines: &[String]) -> Result<()> {
    let mut ascii = Ascii::with_program(text)?;
    for line in lines {
        ascii.send_line(line)?;
    }

    let transcript = ascii.run()?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", transcript.text())?;
    for answer in transcript.answers() {
        writeln!(stdout, "{}", answer)?;
    }
    if transcript.state == State::Blocked {
        bail!("program is waiting for more input");
    }
    Ok(())
}

fn interactive(text: &str, prompt: &str) -> Result<()> {
    let mut ascii = Ascii::with_program(text)?;
    let state = interact(&mut ascii, &mut StdConsole::stdio(), prompt)?;
    info!(%state, "session over");
    Ok(())
}

fn store(file: &Path, year: u16, day: u8, input_dir: &Path) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    text.parse::<Program>().with_context(|| format!("{} is not a program", file.display()))?;

    let cache = InputCache::new(input_dir);
    cache.write(year, day, &text)
        .with_context(|| format!("writing {}", cache.path(year, day).display()))?;
    info!(path = %cache.path(year, day).display(), "stored program");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run { source, input } => run(&source.load()?, &input),
        Command::Ascii { source, lines } => ascii(&source.load()?, lines.as_slice()),
        Command::Interactive { source, prompt } => interactive(&source.load()?, &prompt),
        Command::Store { file, year, day, input_dir } => store(&file, year, day, &input_dir),
    }
}
