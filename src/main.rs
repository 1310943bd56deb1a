use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codegen::{Compiler, TiProgram};
use colored::Colorize;
use parser::FrontendError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use walkdir::WalkDir;

/// Exit code for I/O and usage failures
const EXIT_IO: i32 = 1;
/// Exit code for lexer and parser failures
const EXIT_SYNTAX: i32 = 2;

#[derive(Parser)]
#[command(name = "crunch", version, about = "Compile a Python subset to TI-84 BASIC programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a .py/.python file, or every such file under a directory
    Build {
        path: PathBuf,

        /// Write one NAME.txt per program into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to print or write
        #[arg(long, value_enum, default_value_t = Emit::Basic)]
        emit: Emit,
    },
    /// Write the crunch_lib.py declarations
    Stub {
        /// Destination file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Basic,
}

/// A failure with a known process exit code; source errors are already reported
#[derive(Debug)]
struct Failure {
    code: i32,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "compilation failed with exit code {}", self.code)
    }
}

impl std::error::Error for Failure {}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Command::Build { path, output, emit } => build(path, output.as_deref(), *emit),
        Command::Stub { output } => stub(output.as_deref()),
    };

    if let Err(err) = result {
        if let Some(failure) = err.downcast_ref::<Failure>() {
            process::exit(failure.code);
        }
        eprintln!("{} {:#}", "crunch error:".red().bold(), err);
        process::exit(EXIT_IO);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn stub(output: Option<&Path>) -> Result<()> {
    let source = codegen::python_stub();
    match output {
        Some(path) => {
            fs::write(path, source).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}

/// Extensions accepted as Python sources
const SOURCE_EXTENSIONS: [&str; 2] = ["py", "python"];

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Python files to compile: the file itself, or every one under a directory
fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("reading directory {}", path.display()))?;
            if entry.file_type().is_file() && is_source(entry.path()) {
                files.push(entry.into_path());
            }
        }
        if files.is_empty() {
            bail!("no .py or .python files under {}", path.display());
        }
        return Ok(files);
    }

    if !is_source(path) {
        bail!("{} is not a .py or .python file", path.display());
    }
    Ok(vec![path.to_path_buf()])
}

fn build(path: &Path, output: Option<&Path>, emit: Emit) -> Result<()> {
    let sources = collect_sources(path)?;

    // Calculator program names share one namespace across the whole build
    let mut taken: HashMap<String, String> = HashMap::new();
    let mut programs = Vec::new();
    for file in &sources {
        for program in compile_file(file, emit, &taken)? {
            taken.insert(
                program.name.clone(),
                format!("a program compiled from '{}'", file.display()),
            );
            programs.push(program);
        }
    }

    if let Some(dir) = output {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    for program in &programs {
        write_program(program, output)?;
    }
    Ok(())
}

/// Compile one file; with `--emit tokens|ast` the dump is printed and no program is returned
fn compile_file(path: &Path, emit: Emit, taken: &HashMap<String, String>) -> Result<Vec<TiProgram>> {
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path.display().to_string();
    log::info!("compiling {}", filename);

    if emit == Emit::Tokens {
        match lexer::tokenize(&source) {
            Ok(tokens) => {
                for (token, span) in tokens {
                    println!("{:?} @ {:?}", token, span);
                }
                return Ok(Vec::new());
            }
            Err(e) => {
                parser::report_frontend_error(&filename, &source, &FrontendError::Lex(e))?;
                return Err(Failure { code: EXIT_SYNTAX }.into());
            }
        }
    }

    let program = match parser::parse_source(&source) {
        Ok(program) => program,
        Err(e) => {
            parser::report_frontend_error(&filename, &source, &e)?;
            return Err(Failure { code: EXIT_SYNTAX }.into());
        }
    };

    if emit == Emit::Ast {
        println!("{:#?}", program);
        return Ok(Vec::new());
    }

    let mut compiler = Compiler::new(filename.clone(), source.clone()).with_taken_programs(taken.clone());
    match compiler.compile_program(&program) {
        Ok(programs) => Ok(programs),
        Err(e) => {
            codegen::report_codegen_error(&filename, &source, &e)?;
            Err(Failure { code: e.exit_code() }.into())
        }
    }
}

fn write_program(program: &TiProgram, output: Option<&Path>) -> Result<()> {
    match output {
        Some(dir) => {
            let path = dir.join(format!("{}.txt", program.name));
            fs::write(&path, program.to_source()).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote prgm{} to {}", program.name, path.display());
        }
        None => print!("{}", program),
    }
    Ok(())
}
