//! Minimal CLI driver (spec §6 "CLI surface").
//!
//! Grounded in the donor's own binary entry points for the overall shape
//! (parse args, build a shared context, iterate inputs, exit non-zero on
//! error) and in spec §6/§9 for the surface itself: only `lex` and `parse`
//! are implemented actions, everything else (`sema`, `compile`, any
//! non-Laye file kind) is rejected as out of scope rather than silently
//! mis-handled.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser as ClapParser, ValueEnum};

use choir::config::FileKind;
use choir::context::Context;
use choir::diagnostics::Engine;
use choir::module::Module;
use choir::parser::parse_module;
use choir::printer::Printer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAction {
    Lex,
    Parse,
    Sema,
    Compile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliLang {
    Laye,
    C,
    #[value(name = "c++")]
    Cpp,
}

/// Front-end driver for the Laye compiler core.
#[derive(Debug, ClapParser)]
#[command(name = "choir", version, about)]
struct Cli {
    /// Source files to process.
    files: Vec<PathBuf>,

    /// Overrides file-kind detection for every input.
    #[arg(short = 'x', value_enum)]
    lang: Option<CliLang>,

    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,

    /// 0 disables throttling.
    #[arg(long, default_value_t = 10)]
    error_limit: u32,

    /// Runs in verify-diagnostics mode (disables colors).
    #[arg(long)]
    verify: bool,

    #[arg(long, value_enum, default_value = "lex")]
    action: CliAction,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if matches!(cli.action, CliAction::Sema | CliAction::Compile) {
        eprintln!("choir: error: action is not yet implemented");
        return ExitCode::FAILURE;
    }

    let use_colors = !cli.verify
        && match cli.color {
            CliColor::Always => true,
            CliColor::Never => false,
            CliColor::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        };

    let context = Context::new();
    context.enable_colours(use_colors);
    context.set_diags(Engine::new(cli.error_limit, use_colors));

    let mut had_error = false;
    for path in &cli.files {
        if run_one(&context, path, &cli).is_err() {
            had_error = true;
        }
    }

    if had_error || context.diags().errored() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_one(context: &Context, path: &PathBuf, cli: &Cli) -> Result<(), ()> {
    let kind = resolve_file_kind(path, cli.lang)?;
    if kind != FileKind::Laye {
        eprintln!("choir: error: {}: C/C++ front end is not yet implemented", path.display());
        return Err(());
    }

    let file_id = match context.get_file(path) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("choir: error: {err}");
            return Err(());
        }
    };

    let text = context
        .with_file(file_id, |f| f.contents().to_string())
        .expect("just-loaded file id is always present");

    let arena = bumpalo::Bump::new();
    let mode = choir::lexer::TriviaMode::All;
    let mut module = Module::empty(&arena, file_id);
    let tokens = choir::lexer::Lexer::new(&text, file_id, mode).lex(module.interner_mut(), context.diags(), context);
    module.fill_tokens(tokens);

    let printer = Printer::new(context.use_colours());
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();

    match cli.action {
        CliAction::Lex => {
            printer.print_tokens(&module, &mut lock).ok();
        }
        CliAction::Parse => {
            parse_module(&mut module, context.diags(), context);
            printer.print_tree(&module, &mut lock).ok();
        }
        CliAction::Sema | CliAction::Compile => unreachable!("rejected before run_one"),
    }

    Ok(())
}

fn resolve_file_kind(path: &PathBuf, override_lang: Option<CliLang>) -> Result<FileKind, ()> {
    if let Some(lang) = override_lang {
        return Ok(match lang {
            CliLang::Laye => FileKind::Laye,
            CliLang::C => FileKind::C,
            CliLang::Cpp => FileKind::Cpp,
        });
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match FileKind::from_extension(extension) {
        Some(kind) => Ok(kind),
        None => {
            eprintln!("choir: error: {}: unrecognized file extension", path.display());
            Err(())
        }
    }
}
