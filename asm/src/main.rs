use std::io::{IsTerminal, Read, Write};
use std::process::ExitCode;

use log::{info, LevelFilter};
use masm::{CliError, Program};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    /// Address, word and mnemonic per line
    Listing,
    /// Address and word per line
    Hex,
    /// 4096-word big-endian memory image
    Bin,
    /// Words and symbols as YAML
    Yaml,
}

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (reads standard input when omitted)
    input: Option<String>,

    /// Output file (writes standard output when omitted)
    #[clap(short, long)]
    output: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Listing)]
    format: Format,

    /// Print the symbol table
    #[clap(short, long)]
    symbols: bool,

    /// Log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", err);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported with source context.
        Err(CliError::Asm(_)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", color_print::cformat!("<red,bold>error</>: {}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let name = args.input.as_deref().unwrap_or("<stdin>");
    let src = read_input(args.input.as_deref())?;
    info!("assembling {} ({} bytes)", name, src.len());

    let program = match masm::assemble(&src) {
        Ok(program) => program,
        Err(err) => {
            err.print_diag(name, &src);
            return Err(err.into());
        }
    };
    info!("{} words, {} symbols", program.len(), program.symbols().len());

    let color = args.output.is_none() && std::io::stdout().is_terminal();
    let bytes = render(&program, args, color)?;
    write_output(args.output.as_deref(), &bytes)
}

fn render(program: &Program, args: &Args, color: bool) -> Result<Vec<u8>, CliError> {
    let mut text = match args.format {
        Format::Listing => program.listing(color),
        Format::Hex => program.hex(),
        Format::Yaml => program.to_yaml()?,
        Format::Bin => return Ok(program.to_bytes()),
    };
    if args.symbols {
        text.push('\n');
        text.push_str(&program.symbol_listing());
    }
    Ok(text.into_bytes())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>, CliError> {
    let mut buf = vec![];
    match path {
        Some(path) => {
            let mut file =
                std::fs::File::open(path).map_err(|e| CliError::FileOpen(path.to_string(), e))?;
            file.read_to_end(&mut buf)
                .map_err(|e| CliError::FileRead(path.to_string(), e))?;
        }
        None => {
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| CliError::FileRead("<stdin>".to_string(), e))?;
        }
    }
    Ok(buf)
}

fn write_output(path: Option<&str>, bytes: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .map_err(|e| CliError::FileCreate(path.to_string(), e))?;
            file.write_all(bytes)
                .map_err(|e| CliError::FileWrite(path.to_string(), e))?;
            info!("wrote {}", path);
        }
        None => {
            std::io::stdout()
                .write_all(bytes)
                .map_err(|e| CliError::FileWrite("<stdout>".to_string(), e))?;
        }
    }
    Ok(())
}
