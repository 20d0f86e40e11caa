//! cmdr: a small command dispatch library
//!
//! Callers declare commands with their own flag schemas, register them in a
//! [`Registry`], and hand the registry a raw process argument vector. The
//! registry resolves the invoked command, parses the flags scoped to it,
//! and calls the command's handler with the typed flag values and the
//! remaining positional arguments.
//!
//! ```
//! use cmdr::{Command, FlagSpec, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     Command::new("greet", "Say hello", |flags, args| {
//!         let mut line = format!("Hello, {}", args[0]);
//!         if flags.get_bool("yell") {
//!             line = format!("{}!", line.to_uppercase());
//!         }
//!         println!("{}", line);
//!     })
//!     .flag(FlagSpec::boolean("yell", "Makes it loud").short('y')),
//! )?;
//!
//! let args: Vec<String> = ["cli", "greet", "-y", "April"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! registry.execute("greet", &args)?;
//! # Ok::<(), cmdr::RegistryError>(())
//! ```

pub mod command;
pub mod flags;
pub mod registry;

pub use command::{Command, FlagSpec, Handler};
pub use flags::{FlagParseError, ParsedFlags};
pub use registry::{Registry, RegistryError};
