//! Command and flag declarations
//!
//! A [`Command`] bundles a name, a description, an ordered set of
//! [`FlagSpec`]s, and the handler to run on dispatch. Declarations are
//! built once by the caller and owned by the registry afterwards.

use crate::flags::ParsedFlags;

/// Handler invoked on successful dispatch, given the parsed flags and the
/// remaining positional arguments. Runs synchronously and returns nothing;
/// handlers report their own failures.
pub type Handler = Box<dyn Fn(&ParsedFlags, &[String])>;

/// Declaration of a single flag.
///
/// `name` is the long form (`--name`) and the key under which the flag
/// appears in [`ParsedFlags`], even when supplied via its short alias.
/// Names and short aliases must be unique within one command.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    /// Long name, without the leading `--`
    pub name: String,

    /// Optional single-character alias (`-x`)
    pub short: Option<char>,

    /// Value used when a string flag is not supplied; ignored for booleans
    pub default_value: String,

    /// Human-readable description, shown by the parsing primitive's help
    pub description: String,

    /// Boolean flags are standalone switches and consume no value token
    pub is_boolean: bool,
}

impl FlagSpec {
    /// Declare a string-valued flag (`--name value`), defaulting to ""
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            default_value: String::new(),
            description: description.into(),
            is_boolean: false,
        }
    }

    /// Declare a boolean switch (`--name`), defaulting to false
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            default_value: String::new(),
            description: description.into(),
            is_boolean: true,
        }
    }

    /// Set the single-character short alias
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Set the default value for a string flag
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }
}

/// A named, self-contained unit of CLI behavior.
pub struct Command {
    /// Unique identifier across the registry
    pub name: String,

    /// One-line description for the usage listing
    pub description: String,

    /// Declared flags, in declaration order
    pub flags: Vec<FlagSpec>,

    /// Called with the parsed flags and positionals on dispatch
    pub entry_point: Handler,
}

impl Command {
    /// Create a command with no flags
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        entry_point: impl Fn(&ParsedFlags, &[String]) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            flags: Vec::new(),
            entry_point: Box::new(entry_point),
        }
    }

    /// Add a flag declaration
    pub fn flag(mut self, spec: FlagSpec) -> Self {
        self.flags.push(spec);
        self
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
