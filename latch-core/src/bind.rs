//! The argument binder.
//!
//! `bind` walks a token list left to right and writes matching values into an
//! options holder through its [`Options`] interface. Flag tokens (`-name`)
//! are matched against holder fields after upper-casing the first letter of
//! the name; positional tokens accumulate in the holder's rest field. The
//! scan keeps a single cursor and no other state.

use crate::error::{LatchError, Result};
use crate::options::{FieldKind, Options, Slot, REST_FIELD};

/// Bind a token list into an options holder, mutating it in place.
///
/// The holder keeps every field bound before the first failing token; errors
/// abort the scan immediately without rolling anything back. A flag at the
/// end of the list with no value token ends binding successfully.
pub fn bind(options: &mut dyn Options, tokens: &[String]) -> Result<()> {
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.len() < 2 {
            return Err(LatchError::InvalidOption(token.clone()));
        }

        // Positional token: route to the rest field, or drop it.
        if !token.starts_with('-') {
            match options.field(REST_FIELD) {
                Some(Slot::StrList(rest)) => rest.push(token.clone()),
                Some(_) => return Err(LatchError::InvalidRestArgsType),
                None => {}
            }
            i += 1;
            continue;
        }

        let name = capitalize(&token[1..]);
        match options.field(&name) {
            None => {
                // Undeclared flag: skip one value token, but never one that
                // itself looks like a flag. Running out of tokens here ends
                // binding successfully.
                i += 1;
                if i >= tokens.len() {
                    return Ok(());
                }
                let value = &tokens[i];
                if value.len() < 2 {
                    return Err(LatchError::InvalidOption(value.clone()));
                }
                if value.starts_with('-') {
                    continue;
                }
                i += 1;
            }
            Some(Slot::Bool(flag)) => {
                // Booleans are switches; no value token is consumed.
                *flag = true;
                i += 1;
            }
            Some(slot) => {
                i += 1;
                if i >= tokens.len() {
                    return Ok(());
                }
                let value = &tokens[i];
                if value.len() < 2 {
                    return Err(LatchError::InvalidOption(value.clone()));
                }
                assign(slot, value)?;
                i += 1;
            }
        }
    }
    Ok(())
}

/// Parse a value token per the slot's declared type and store it.
fn assign(slot: Slot<'_>, token: &str) -> Result<()> {
    let mismatch = |expected: FieldKind| LatchError::TypeMismatch {
        expected,
        token: token.to_string(),
    };
    match slot {
        // Booleans are set before a value token is ever consumed.
        Slot::Bool(field) => *field = true,
        Slot::Int(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::Int))?,
        Slot::I8(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::I8))?,
        Slot::I16(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::I16))?,
        Slot::I32(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::I32))?,
        Slot::I64(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::I64))?,
        Slot::Uint(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::Uint))?,
        Slot::U8(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::U8))?,
        Slot::U16(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::U16))?,
        Slot::U32(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::U32))?,
        Slot::U64(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::U64))?,
        Slot::F32(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::F32))?,
        Slot::F64(field) => *field = token.parse().map_err(|_| mismatch(FieldKind::F64))?,
        Slot::Str(field) => *field = token.to_string(),
        // List fields only collect positionals; a flag addressing one
        // consumes its value token without assigning it.
        Slot::StrList(_) => {}
    }
    Ok(())
}

/// Upper-case exactly the first character of a flag name.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct BuildOpts {
        verbose: bool,
        jobs: u8,
        offset: i8,
        port: u16,
        depth: i64,
        ratio: f32,
        scale: f64,
        target: String,
        rest: Vec<String>,
    }

    impl Options for BuildOpts {
        fn field(&mut self, name: &str) -> Option<Slot<'_>> {
            match name {
                "Verbose" => Some(Slot::Bool(&mut self.verbose)),
                "Jobs" => Some(Slot::U8(&mut self.jobs)),
                "Offset" => Some(Slot::I8(&mut self.offset)),
                "Port" => Some(Slot::U16(&mut self.port)),
                "Depth" => Some(Slot::I64(&mut self.depth)),
                "Ratio" => Some(Slot::F32(&mut self.ratio)),
                "Scale" => Some(Slot::F64(&mut self.scale)),
                "Target" => Some(Slot::Str(&mut self.target)),
                REST_FIELD => Some(Slot::StrList(&mut self.rest)),
                _ => None,
            }
        }
    }

    #[derive(Default)]
    struct NoRest {
        quiet: bool,
    }

    impl Options for NoRest {
        fn field(&mut self, name: &str) -> Option<Slot<'_>> {
            match name {
                "Quiet" => Some(Slot::Bool(&mut self.quiet)),
                _ => None,
            }
        }
    }

    #[derive(Default)]
    struct BadRest {
        rest: String,
    }

    impl Options for BadRest {
        fn field(&mut self, name: &str) -> Option<Slot<'_>> {
            match name {
                REST_FIELD => Some(Slot::Str(&mut self.rest)),
                _ => None,
            }
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn boolean_flag_is_a_switch() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-verbose"])).unwrap();
        assert!(opts.verbose);
        assert_eq!(opts.jobs, 0);
        assert!(opts.rest.is_empty());
    }

    #[test]
    fn values_parse_per_declared_type() {
        let mut opts = BuildOpts::default();
        bind(
            &mut opts,
            &tokens(&[
                "-jobs", "12", "-depth", "-42", "-ratio", "0.5", "-scale", "2.75", "-target",
                "out/dir",
            ]),
        )
        .unwrap();
        assert_eq!(opts.jobs, 12);
        assert_eq!(opts.depth, -42);
        assert_eq!(opts.ratio, 0.5);
        assert_eq!(opts.scale, 2.75);
        assert_eq!(opts.target, "out/dir");
    }

    #[test]
    fn flag_name_matches_on_capitalized_first_letter_only() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-Verbose"])).unwrap();
        assert!(opts.verbose);

        // "-vErbose" capitalizes to "VErbose", which matches nothing; as an
        // unknown trailing flag the scan just ends.
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-vErbose"])).unwrap();
        assert!(!opts.verbose);
    }

    #[test]
    fn short_tokens_are_invalid_in_every_position() {
        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-"])),
            Err(LatchError::InvalidOption("-".to_string()))
        );

        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-jobs", "5"])),
            Err(LatchError::InvalidOption("5".to_string()))
        );

        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["a"])),
            Err(LatchError::InvalidOption("a".to_string()))
        );

        // Too-short skip candidate after an unknown flag is rejected too.
        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-unknown", "x"])),
            Err(LatchError::InvalidOption("x".to_string()))
        );
    }

    #[test]
    fn rest_collects_positionals_in_order() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["alpha", "-verbose", "beta"])).unwrap();
        assert_eq!(opts.rest, vec!["alpha".to_string(), "beta".to_string()]);
        assert!(opts.verbose);
    }

    #[test]
    fn positionals_are_discarded_without_a_rest_field() {
        let mut opts = NoRest::default();
        bind(&mut opts, &tokens(&["alpha", "-quiet", "beta"])).unwrap();
        assert!(opts.quiet);
    }

    #[test]
    fn rest_field_of_wrong_type_is_rejected() {
        let mut opts = BadRest::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["alpha"])),
            Err(LatchError::InvalidRestArgsType)
        );
    }

    #[test]
    fn unknown_flag_skips_its_value_token() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-unknown", "value", "-jobs", "42"])).unwrap();
        assert_eq!(opts.jobs, 42);
        assert!(opts.rest.is_empty());
    }

    #[test]
    fn unknown_flag_never_consumes_a_flag_lookalike() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-unknown", "-verbose"])).unwrap();
        assert!(opts.verbose);

        // Two unknown flags in a row: both are skipped, nothing is consumed
        // as a value.
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-nope", "-alsonope", "-jobs", "42"])).unwrap();
        assert_eq!(opts.jobs, 42);
    }

    #[test]
    fn trailing_flag_without_value_ends_binding() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-jobs"])).unwrap();
        assert_eq!(opts.jobs, 0);

        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-unknown"])).unwrap();
        assert_eq!(opts, BuildOpts::default());
    }

    #[test]
    fn numeric_overflow_is_checked_per_declared_width() {
        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-offset", "200"])),
            Err(LatchError::TypeMismatch {
                expected: FieldKind::I8,
                token: "200".to_string()
            })
        );

        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-port", "70000"])),
            Err(LatchError::TypeMismatch {
                expected: FieldKind::U16,
                token: "70000".to_string()
            })
        );

        // A negative value token reaches the parser even though it starts
        // with '-'; it fails the unsigned fit check.
        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-jobs", "-12"])),
            Err(LatchError::TypeMismatch {
                expected: FieldKind::U8,
                token: "-12".to_string()
            })
        );
    }

    #[test]
    fn unparseable_float_is_a_type_mismatch() {
        let mut opts = BuildOpts::default();
        assert_eq!(
            bind(&mut opts, &tokens(&["-ratio", "fast"])),
            Err(LatchError::TypeMismatch {
                expected: FieldKind::F32,
                token: "fast".to_string()
            })
        );
    }

    #[test]
    fn fields_bound_before_a_failure_stay_bound() {
        let mut opts = BuildOpts::default();
        let result = bind(&mut opts, &tokens(&["-target", "file.txt", "-offset", "999"]));
        assert!(result.is_err());
        assert_eq!(opts.target, "file.txt");
        assert_eq!(opts.offset, 0);
    }

    #[test]
    fn binding_is_idempotent_across_fresh_holders() {
        let args = tokens(&["pos1", "-verbose", "-jobs", "17", "-target", "dist", "pos2"]);
        let mut first = BuildOpts::default();
        let mut second = BuildOpts::default();
        bind(&mut first, &args).unwrap();
        bind(&mut second, &args).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn flag_addressed_list_field_consumes_without_assigning() {
        let mut opts = BuildOpts::default();
        bind(&mut opts, &tokens(&["-restArgs", "alpha", "-verbose"])).unwrap();
        assert!(opts.rest.is_empty());
        assert!(opts.verbose);
    }

    #[test]
    fn capitalize_upper_cases_first_letter_only() {
        assert_eq!(capitalize("verbose"), "Verbose");
        assert_eq!(capitalize("vErbose"), "VErbose");
        assert_eq!(capitalize("V"), "V");
        assert_eq!(capitalize(""), "");
    }
}
