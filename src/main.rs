use scout::flags::Flags;
use scout::fs::OsFileSystem;
use scout::highlight::SyntaxHighlighter;
use scout::shell::{list_once, Shell};
use std::env;
use std::io;
use std::process::ExitCode;

use env_logger::{Builder, Env};
use log::debug;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("{}", e);
        flags.print_help();
        return ExitCode::FAILURE;
    }

    let level = if flags.is_set("debug") { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("scout {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if flags.is_set("list") {
        let dir = flags.positional().unwrap_or(".");
        debug!("one-shot listing of {}", dir);
        let listed = list_once(
            &OsFileSystem::new(),
            dir,
            &SyntaxHighlighter::new(),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        );
        return match listed {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("scout: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match Shell::new(flags).and_then(|mut shell| shell.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scout: {}", e);
            ExitCode::FAILURE
        }
    }
}
