use std::fs;

use console::style;
use miette::{IntoDiagnostic, Result};

use cmdr::{Command, FlagSpec, Registry, RegistryError};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let mut registry = Registry::new();
    registry.register(cat_command()).into_diagnostic()?;
    registry.register(greet_command()).into_diagnostic()?;
    registry.register(version_command()).into_diagnostic()?;

    let raw_args: Vec<String> = std::env::args().collect();
    let Some(name) = raw_args.get(1).cloned() else {
        print!("{}", registry.usage());
        std::process::exit(2);
    };

    match registry.execute(&name, &raw_args) {
        Ok(()) => Ok(()),
        Err(err @ RegistryError::NotFound { .. }) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            eprintln!();
            eprint!("{}", registry.usage());
            std::process::exit(2);
        }
        Err(err) => Err(err).into_diagnostic(),
    }
}

/// `cat` - prints a file to the console, like the original but smaller
fn cat_command() -> Command {
    Command::new("cat", "Print a file to the console", |flags, _args| {
        let path = flags.get_string("file").unwrap_or_default();
        if path.is_empty() {
            eprintln!(
                "{} pass a file with --file/-f",
                style("error:").red().bold()
            );
            std::process::exit(1);
        }

        match fs::read_to_string(path) {
            Ok(contents) => print!("{}", contents),
            Err(err) => {
                eprintln!("{} {}: {}", style("error:").red().bold(), path, err);
                std::process::exit(1);
            }
        }
    })
    .flag(FlagSpec::string("file", "File to print").short('f'))
}

/// `greet` - greets the first positional argument
fn greet_command() -> Command {
    Command::new("greet", "Greet the first positional argument", |flags, args| {
        let Some(name) = args.first() else {
            eprintln!("{} pass a name to greet", style("error:").red().bold());
            std::process::exit(1);
        };

        let mut line = format!("Hello, {}", name);
        if flags.get_bool("yell") {
            line = format!("{}!", line.to_uppercase());
        }
        println!("{}", line);
    })
    .flag(FlagSpec::boolean("yell", "Makes it loud").short('y'))
}

/// `version` - prints the crate version
fn version_command() -> Command {
    Command::new("version", "Print the version", |_, _| {
        println!("cmdr {}", env!("CARGO_PKG_VERSION"));
    })
}
