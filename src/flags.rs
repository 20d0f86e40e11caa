//! Flag parsing engine
//!
//! Translates a command's declared [`FlagSpec`]s into a clap command built
//! on the fly, runs clap over the raw token tail, and collects the results
//! into a [`ParsedFlags`] bag plus the leftover positional arguments.
//! Each call is a pure transformation; no state survives between calls.

use std::collections::HashMap;

use clap::{Arg, ArgAction};
use thiserror::Error;

use crate::command::FlagSpec;

/// Resolved flag values for one invocation, split by type.
///
/// Keys are always the long names from the declaring [`FlagSpec`]s, even
/// when the flag was supplied via its short alias. Every declared flag has
/// an entry in its mapping whether or not it appeared in the input, so
/// callers may index without checking for absence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedFlags {
    /// String-valued flags, long name -> supplied value or declared default
    pub string: HashMap<String, String>,

    /// Boolean switches, long name -> true iff present in the input
    pub boolean: HashMap<String, bool>,
}

impl ParsedFlags {
    /// Look up a string flag by its long name
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.string.get(name).map(String::as_str)
    }

    /// Look up a boolean flag by its long name; undeclared names read false
    pub fn get_bool(&self, name: &str) -> bool {
        self.boolean.get(name).copied().unwrap_or(false)
    }
}

/// Malformed flag input, as reported by the underlying parsing primitive
/// (unknown flag, value flag with no following value, and so on).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct FlagParseError(#[from] clap::Error);

/// Parse `tokens` against the declared `specs`.
///
/// Returns the resolved flag values and the non-flag tokens in their
/// original relative order. Long and short forms bind the same value; the
/// last occurrence wins when a flag is repeated.
pub fn parse(
    specs: &[FlagSpec],
    tokens: &[String],
) -> Result<(ParsedFlags, Vec<String>), FlagParseError> {
    let matches = build_parser(specs).try_get_matches_from(tokens)?;

    let mut flags = ParsedFlags::default();
    for spec in specs {
        if spec.is_boolean {
            flags
                .boolean
                .insert(spec.name.clone(), matches.get_flag(&spec.name));
        } else {
            let value = matches
                .get_one::<String>(&spec.name)
                .cloned()
                .unwrap_or_else(|| spec.default_value.clone());
            flags.string.insert(spec.name.clone(), value);
        }
    }

    let positionals = matches
        .get_many::<String>(POSITIONALS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok((flags, positionals))
}

/// Internal id of the catch-all positional argument. The leading
/// underscores keep it from clashing with declared long flag names.
const POSITIONALS: &str = "__positionals";

fn build_parser(specs: &[FlagSpec]) -> clap::Command {
    // Built-in -h/-V would shadow short aliases like `-h` and are not part
    // of the contract, so they are disabled outright.
    let mut cmd = clap::Command::new("flags")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true);

    for spec in specs {
        // An argument overriding itself gives last-write-wins instead of a
        // "cannot be used multiple times" error.
        let mut arg = Arg::new(spec.name.clone())
            .long(spec.name.clone())
            .help(spec.description.clone())
            .overrides_with(spec.name.clone());

        if let Some(short) = spec.short {
            arg = arg.short(short);
        }

        arg = if spec.is_boolean {
            arg.action(ArgAction::SetTrue)
        } else {
            arg.action(ArgAction::Set)
                .default_value(spec.default_value.clone())
        };

        cmd = cmd.arg(arg);
    }

    cmd.arg(
        Arg::new(POSITIONALS)
            .action(ArgAction::Append)
            .num_args(0..)
            .value_name("ARGS")
            .help("Positional arguments"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn string_specs() -> Vec<FlagSpec> {
        vec![
            FlagSpec::string("flag", "a flag").short('f').default_value("test"),
            FlagSpec::string("another-flag", "another flag")
                .short('a')
                .default_value("test 2"),
        ]
    }

    #[test]
    fn test_string_flags_supplied() {
        let (flags, args) = parse(
            &string_specs(),
            &toks(&["--flag", "flag value", "--another-flag", "another value"]),
        )
        .unwrap();

        assert_eq!(flags.get_string("flag"), Some("flag value"));
        assert_eq!(flags.get_string("another-flag"), Some("another value"));
        assert_eq!(flags.string.len(), 2);
        assert!(args.is_empty());
    }

    #[test]
    fn test_string_flags_fall_back_to_defaults() {
        let (flags, _) = parse(&string_specs(), &toks(&["positional"])).unwrap();

        assert_eq!(flags.get_string("flag"), Some("test"));
        assert_eq!(flags.get_string("another-flag"), Some("test 2"));
        assert_eq!(flags.string.len(), 2);
    }

    #[test]
    fn test_boolean_flag_present() {
        let specs = vec![FlagSpec::boolean("is-cool", "cool mode").short('c')];
        let (flags, _) = parse(&specs, &toks(&["--is-cool"])).unwrap();

        assert!(flags.get_bool("is-cool"));
        assert_eq!(flags.boolean.len(), 1);
    }

    #[test]
    fn test_boolean_flag_absent_defaults_to_false() {
        let specs = vec![FlagSpec::boolean("is-cool", "cool mode").short('c')];
        let (flags, _) = parse(&specs, &toks(&["whatever"])).unwrap();

        assert!(!flags.get_bool("is-cool"));
        assert_eq!(flags.boolean.len(), 1);
    }

    #[test]
    fn test_short_form_binds_to_long_name() {
        let specs = vec![FlagSpec::string("flag", "a flag").short('f').default_value("test")];
        let (flags, _) = parse(&specs, &toks(&["-f", "flag value"])).unwrap();

        assert_eq!(flags.get_string("flag"), Some("flag value"));
        assert!(flags.string.get("f").is_none());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let specs = vec![FlagSpec::string("flag", "a flag").short('f').default_value("test")];
        let (flags, _) =
            parse(&specs, &toks(&["--flag", "first", "-f", "second"])).unwrap();

        assert_eq!(flags.get_string("flag"), Some("second"));
    }

    #[test]
    fn test_positionals_keep_relative_order() {
        let specs = vec![
            FlagSpec::boolean("yell", "loud").short('y'),
            FlagSpec::string("greeting", "word").default_value("Hello"),
        ];
        let (flags, args) = parse(
            &specs,
            &toks(&["one", "-y", "two", "--greeting", "Hi", "three"]),
        )
        .unwrap();

        assert!(flags.get_bool("yell"));
        assert_eq!(flags.get_string("greeting"), Some("Hi"));
        assert_eq!(args, toks(&["one", "two", "three"]));
    }

    #[test]
    fn test_flag_values_are_not_positionals() {
        let specs = vec![FlagSpec::string("file", "file name").short('f')];
        let (_, args) = parse(&specs, &toks(&["-f", "notes.txt", "extra"])).unwrap();

        assert_eq!(args, toks(&["extra"]));
    }

    #[test]
    fn test_mixed_types_populate_both_mappings() {
        let specs = vec![
            FlagSpec::string("file", "file name").short('f').default_value("out.txt"),
            FlagSpec::boolean("verbose", "chatty").short('v'),
        ];
        let (flags, _) = parse(&specs, &toks(&["-v"])).unwrap();

        assert_eq!(flags.get_string("file"), Some("out.txt"));
        assert!(flags.get_bool("verbose"));
        assert_eq!(flags.string.len(), 1);
        assert_eq!(flags.boolean.len(), 1);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let specs = vec![FlagSpec::boolean("yell", "loud").short('y')];
        let result = parse(&specs, &toks(&["--nope"]));

        assert!(result.is_err());
    }

    #[test]
    fn test_value_flag_at_end_of_input_is_an_error() {
        let specs = vec![FlagSpec::string("flag", "a flag").short('f')];
        let result = parse(&specs, &toks(&["--flag"]));

        assert!(result.is_err());
    }

    #[test]
    fn test_no_specs_means_everything_is_positional() {
        let (flags, args) = parse(&[], &toks(&["a", "b", "c"])).unwrap();

        assert!(flags.string.is_empty());
        assert!(flags.boolean.is_empty());
        assert_eq!(args, toks(&["a", "b", "c"]));
    }

    #[test]
    fn test_empty_tokens_yield_defaults_only() {
        let (flags, args) = parse(&string_specs(), &[]).unwrap();

        assert_eq!(flags.get_string("flag"), Some("test"));
        assert_eq!(flags.get_string("another-flag"), Some("test 2"));
        assert!(args.is_empty());
    }
}
