/// Command type dispatch and the public translation entry points.
///
/// The registry is a fixed table from the closed set of command types to
/// their translators, resolved at compile time; lookups are pure and the
/// table is never mutated, so translation is freely concurrent.
use crate::model::condition::Condition;
use crate::sieve::ast::{CommandType, TestCommand};
use crate::sieve::capability::{CapabilitySet, CommandCapabilities};
use crate::sieve::commands::{
    AddressCommand, BodyCommand, CombinatorCommand, CommandParser, CurrentdateCommand,
    ExistsCommand, FalseCommand, HasflagCommand, HeaderCommand, NotCommand, SizeCommand,
    StringCommand,
};
use crate::sieve::error::TranslateError;

static ADDRESS: AddressCommand = AddressCommand {
    command: CommandType::Address,
};
static ENVELOPE: AddressCommand = AddressCommand {
    command: CommandType::Envelope,
};
static HEADER: HeaderCommand = HeaderCommand;
static EXISTS: ExistsCommand = ExistsCommand;
static STRING: StringCommand = StringCommand;
static BODY: BodyCommand = BodyCommand;
static SIZE: SizeCommand = SizeCommand;
static HASFLAG: HasflagCommand = HasflagCommand;
static CURRENTDATE: CurrentdateCommand = CurrentdateCommand;
static FALSE: FalseCommand = FalseCommand;
static NOT: NotCommand = NotCommand;
static ANYOF: CombinatorCommand = CombinatorCommand {
    command: CommandType::Anyof,
};
static ALLOF: CombinatorCommand = CombinatorCommand {
    command: CommandType::Allof,
};

/// Resolve the translator responsible for a command type.
pub fn parser_for(command: CommandType) -> &'static dyn CommandParser {
    match command {
        CommandType::Address => &ADDRESS,
        CommandType::Envelope => &ENVELOPE,
        CommandType::Header => &HEADER,
        CommandType::Exists => &EXISTS,
        CommandType::String => &STRING,
        CommandType::Body => &BODY,
        CommandType::Size => &SIZE,
        CommandType::Hasflag => &HASFLAG,
        CommandType::Currentdate => &CURRENTDATE,
        CommandType::False => &FALSE,
        CommandType::Not => &NOT,
        CommandType::Anyof => &ANYOF,
        CommandType::Allof => &ALLOF,
    }
}

/// Translate a JSON condition into a test command tree.
pub fn parse_condition(condition: &Condition) -> Result<TestCommand, TranslateError> {
    let command = CommandType::from_id(&condition.id)
        .ok_or_else(|| TranslateError::UnknownCommand(condition.id.clone()))?;
    tracing::trace!(command = command.as_id(), "parsing condition");
    parser_for(command).parse(condition)
}

/// Translate a test command tree back into a JSON condition.
pub fn serialize_test(test: &TestCommand) -> Result<Condition, TranslateError> {
    tracing::trace!(command = test.command.as_id(), "serializing test command");
    parser_for(test.command).serialize(test, false)
}

/// Capability view over every command type the registry knows.
pub fn command_capabilities(capabilities: &CapabilitySet) -> Vec<CommandCapabilities> {
    CommandType::ALL
        .iter()
        .filter_map(|command| parser_for(*command).capabilities(capabilities))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sieve::ast::Argument;
    use serde_json::{json, Value};

    fn condition(value: Value) -> Condition {
        serde_json::from_value(value).unwrap()
    }

    fn to_json(condition: &Condition) -> Value {
        serde_json::to_value(condition).unwrap()
    }

    #[test]
    fn test_address_negated_domain_roundtrip() {
        let input = json!({
            "id": "address",
            "comparison": "not-contains",
            "addresspart": "domain",
            "headers": ["from"],
            "values": ["example.com"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.command, CommandType::Not);
        let inner = &tree.tests[0];
        assert_eq!(inner.command, CommandType::Address);
        assert_eq!(inner.tag_args, vec![":contains", ":domain"]);
        assert_eq!(
            inner.args,
            vec![
                Argument::Strings(vec!["from".to_string()]),
                Argument::Strings(vec!["example.com".to_string()]),
            ]
        );

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_envelope_roundtrip() {
        let input = json!({
            "id": "envelope",
            "comparison": "is",
            "addresspart": "localpart",
            "headers": ["from"],
            "values": ["mailer-daemon"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.command, CommandType::Envelope);
        assert_eq!(tree.tag_args, vec![":is", ":localpart"]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_comparison_must_belong_to_the_family() {
        // size comparators on string-matching families and vice versa
        let inputs = [
            json!({"id": "header", "comparison": "over", "headers": ["subject"], "values": ["x"]}),
            json!({"id": "address", "comparison": "under", "headers": ["from"], "values": ["x"]}),
            json!({"id": "envelope", "comparison": "over", "headers": ["from"], "values": ["x"]}),
            json!({"id": "string", "comparison": "not-over", "source": ["${s}"], "values": ["x"]}),
            json!({"id": "body", "comparison": "under", "values": ["x"]}),
            json!({"id": "hasflag", "comparison": "over", "values": ["\\Seen"]}),
            json!({"id": "currentdate", "comparison": "under", "datepart": "date", "values": ["1"]}),
            json!({"id": "currentdate", "comparison": "regex", "datepart": "date", "values": ["1"]}),
            json!({"id": "hasflag", "comparison": "exists", "values": ["\\Seen"]}),
        ];
        for input in inputs {
            let id = input["id"].clone();
            let comparison = input["comparison"].clone();
            let err = parse_condition(&condition(input)).unwrap_err();
            assert!(
                matches!(err, TranslateError::UnknownComparison { .. }),
                "{id} {comparison}"
            );
        }
    }

    #[test]
    fn test_negation_symmetry_per_family() {
        let tree = parse_condition(&condition(json!({
            "id": "header",
            "comparison": "not-contains",
            "headers": ["subject"],
            "values": ["spam"]
        })))
        .unwrap();

        assert_eq!(tree.command, CommandType::Not);
        let inner = &tree.tests[0];
        assert_eq!(inner.tag_args, vec![":contains"]);

        // the wrapped leaf serializes positive or negated on request
        let positive = parser_for(CommandType::Header)
            .serialize(inner, false)
            .unwrap();
        assert_eq!(positive.comparison.as_deref(), Some("contains"));
        let negated = parser_for(CommandType::Header)
            .serialize(inner, true)
            .unwrap();
        assert_eq!(negated.comparison.as_deref(), Some("not-contains"));

        // the entry point folds the NOT into the comparator
        let back = serialize_test(&tree).unwrap();
        assert_eq!(back.id, "header");
        assert_eq!(back.comparison.as_deref(), Some("not-contains"));
    }

    #[test]
    fn test_double_not_collapses() {
        let tree = parse_condition(&condition(json!({
            "id": "not",
            "test": {
                "id": "header",
                "comparison": "not-contains",
                "headers": ["subject"],
                "values": ["spam"]
            }
        })))
        .unwrap();

        assert_eq!(tree.command, CommandType::Not);
        assert_eq!(tree.tests[0].command, CommandType::Not);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(back.id, "header");
        assert_eq!(back.comparison.as_deref(), Some("contains"));
        assert!(back.test.is_none());
    }

    #[test]
    fn test_size_unit_normalization() {
        let tree = parse_condition(&condition(json!({
            "id": "size",
            "comparison": "over",
            "size": "10mb"
        })))
        .unwrap();

        assert_eq!(tree.command, CommandType::Size);
        assert_eq!(tree.tag_args, vec![":over"]);
        assert_eq!(tree.args, vec![Argument::Number(10_485_760)]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(
            to_json(&back),
            json!({"id": "size", "comparison": "over", "size": "10M"})
        );
    }

    #[test]
    fn test_size_negation_stays_in_tag() {
        let tree = parse_condition(&condition(json!({
            "id": "size",
            "comparison": "not-over",
            "size": "1k"
        })))
        .unwrap();

        // no NOT wrapper for this family
        assert_eq!(tree.command, CommandType::Size);
        assert_eq!(tree.tag_args, vec![":not-over"]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(back.comparison.as_deref(), Some("not-over"));
        assert_eq!(back.size.as_deref(), Some("1K"));
    }

    #[test]
    fn test_size_rejects_bad_comparison() {
        let err = parse_condition(&condition(json!({
            "id": "size",
            "comparison": "contains",
            "size": "1k"
        })))
        .unwrap_err();
        assert!(matches!(err, TranslateError::UnknownComparison { .. }));
    }

    #[test]
    fn test_simplification_idempotence() {
        let input = json!({
            "id": "header",
            "comparison": "startswith",
            "headers": ["subject"],
            "values": ["abc"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.tag_args, vec![":matches"]);
        assert_eq!(tree.args[1], Argument::Strings(vec!["abc*".to_string()]));

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_simplification_not_triggered_on_mixed_wildcards() {
        let input = json!({
            "id": "header",
            "comparison": "matches",
            "headers": ["subject"],
            "values": ["*ab", "cd*"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_header_exists_delegates_to_exists() {
        let input = json!({
            "id": "header",
            "comparison": "exists",
            "headers": ["x-spam"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.command, CommandType::Exists);
        assert_eq!(tree.tag_args, Vec::<String>::new());
        assert_eq!(tree.args, vec![Argument::Strings(vec!["x-spam".to_string()])]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_negated_exists_roundtrip() {
        let input = json!({
            "id": "header",
            "comparison": "not-exists",
            "headers": ["to", "cc"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        assert_eq!(tree.command, CommandType::Not);
        assert_eq!(tree.tests[0].command, CommandType::Exists);

        // negated sets never take the named shorthand
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_exists_named_convenience() {
        let named = serialize_test(&TestCommand::leaf(
            CommandType::Exists,
            Vec::new(),
            vec![Argument::Strings(vec!["Cc".to_string(), "to".to_string()])],
        ))
        .unwrap();
        assert_eq!(to_json(&named), json!({"id": "anyrecipient"}));

        let literal = serialize_test(&TestCommand::leaf(
            CommandType::Exists,
            Vec::new(),
            vec![Argument::Strings(vec![
                "to".to_string(),
                "cc".to_string(),
                "bcc".to_string(),
            ])],
        ))
        .unwrap();
        assert_eq!(
            to_json(&literal),
            json!({"id": "header", "comparison": "exists", "headers": ["to", "cc", "bcc"]})
        );
    }

    #[test]
    fn test_named_convenience_parses_to_fixed_set() {
        let tree = parse_condition(&condition(json!({"id": "anyrecipient"}))).unwrap();
        assert_eq!(tree.command, CommandType::Exists);
        assert_eq!(
            tree.args,
            vec![Argument::Strings(vec!["to".to_string(), "cc".to_string()])]
        );
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), json!({"id": "anyrecipient"}));
    }

    #[test]
    fn test_anyof_roundtrip() {
        let input = json!({
            "id": "anyof",
            "tests": [
                {"id": "header", "comparison": "contains", "headers": ["subject"], "values": ["urgent"]},
                {"id": "size", "comparison": "over", "size": "1500"}
            ]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.command, CommandType::Anyof);
        assert_eq!(tree.tests.len(), 2);
        assert_eq!(tree.tests[0].command, CommandType::Header);
        assert_eq!(tree.tests[1].command, CommandType::Size);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_not_wrapping_combinator() {
        let input = json!({
            "id": "not",
            "test": {
                "id": "allof",
                "tests": [
                    {"id": "header", "comparison": "is", "headers": ["from"], "values": ["a@b.c"]}
                ]
            }
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        assert_eq!(tree.command, CommandType::Not);
        assert_eq!(tree.tests[0].command, CommandType::Allof);

        // combinators have no comparator to fold the negation into
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_nested_failure_poisons_whole_translation() {
        let err = parse_condition(&condition(json!({
            "id": "anyof",
            "tests": [
                {"id": "header", "comparison": "is", "headers": ["from"], "values": ["x"]},
                {"id": "bogus"}
            ]
        })))
        .unwrap_err();
        assert!(matches!(err, TranslateError::UnknownCommand(id) if id == "bogus"));
    }

    #[test]
    fn test_unknown_command_type() {
        let err = parse_condition(&condition(json!({"id": "frobnicate"}))).unwrap_err();
        assert!(matches!(err, TranslateError::UnknownCommand(_)));
    }

    #[test]
    fn test_missing_field() {
        let err = parse_condition(&condition(json!({"id": "header"}))).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::MissingField { field: "comparison", .. }
        ));
    }

    #[test]
    fn test_body_content_extension_roundtrip() {
        let input = json!({
            "id": "body",
            "comparison": "contains",
            "extensionskey": "content",
            "extensionsvalue": "text/html",
            "values": ["urgent"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.tag_args, vec![":contains", ":content"]);
        assert_eq!(
            tree.args,
            vec![
                Argument::Strings(vec!["text/html".to_string()]),
                Argument::Strings(vec!["urgent".to_string()]),
            ]
        );

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_body_negated_tag_roundtrip() {
        let input = json!({
            "id": "body",
            "comparison": "not-contains",
            "extensionskey": "text",
            "values": ["unsubscribe"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.command, CommandType::Body);
        assert_eq!(tree.tag_args, vec![":not-contains", ":text"]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_body_unknown_extension_key() {
        let err = parse_condition(&condition(json!({
            "id": "body",
            "comparison": "contains",
            "extensionskey": "raw",
            "values": ["x"]
        })))
        .unwrap_err();
        assert!(matches!(err, TranslateError::UnknownExtension { key, .. } if key == "raw"));
    }

    #[test]
    fn test_hasflag_roundtrip() {
        let input = json!({
            "id": "hasflag",
            "comparison": "is",
            "values": ["\\Seen"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        assert_eq!(tree.tag_args, vec![":is"]);
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_string_roundtrip() {
        let input = json!({
            "id": "string",
            "comparison": "matches",
            "source": ["${subject}"],
            "values": ["*urgent*"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        assert_eq!(tree.command, CommandType::String);
        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_currentdate_zone_roundtrip() {
        let input = json!({
            "id": "currentdate",
            "comparison": "is",
            "zone": "+0100",
            "datepart": "date",
            "values": ["2026-01-01"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();

        assert_eq!(tree.tag_args, vec![":zone", ":is"]);
        assert_eq!(
            tree.args,
            vec![
                Argument::Strings(vec!["+0100".to_string()]),
                Argument::Strings(vec!["date".to_string()]),
                Argument::Strings(vec!["2026-01-01".to_string()]),
            ]
        );

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_currentdate_negation_wraps() {
        let input = json!({
            "id": "currentdate",
            "comparison": "not-is",
            "datepart": "weekday",
            "values": ["0"]
        });
        let tree = parse_condition(&condition(input.clone())).unwrap();
        assert_eq!(tree.command, CommandType::Not);
        assert_eq!(tree.tests[0].tag_args, vec![":is"]);

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), input);
    }

    #[test]
    fn test_currentdate_rejects_bad_datepart() {
        let err = parse_condition(&condition(json!({
            "id": "currentdate",
            "comparison": "is",
            "datepart": "fortnight",
            "values": ["1"]
        })))
        .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::InvalidField { field: "datepart", .. }
        ));
    }

    #[test]
    fn test_address_all_part_is_dropped() {
        let tree = parse_condition(&condition(json!({
            "id": "address",
            "comparison": "is",
            "addresspart": "all",
            "headers": ["to"],
            "values": ["me@example.com"]
        })))
        .unwrap();
        assert_eq!(tree.tag_args, vec![":is"]);

        let back = serialize_test(&tree).unwrap();
        assert!(back.addresspart.is_none());
    }

    #[test]
    fn test_false_roundtrip() {
        let tree = parse_condition(&condition(json!({"id": "false"}))).unwrap();
        assert_eq!(tree.command, CommandType::False);
        assert!(tree.args.is_empty() && tree.tag_args.is_empty());

        let back = serialize_test(&tree).unwrap();
        assert_eq!(to_json(&back), json!({"id": "false"}));
    }

    #[test]
    fn test_capability_gating() {
        let bare = command_capabilities(&CapabilitySet::default());
        assert!(bare.iter().all(|c| {
            !matches!(
                c.command,
                CommandType::Envelope
                    | CommandType::Body
                    | CommandType::String
                    | CommandType::Hasflag
                    | CommandType::Currentdate
            )
        }));
        assert_eq!(bare.len(), 8);

        let full = command_capabilities(&CapabilitySet::new([
            "envelope",
            "body",
            "variables",
            "imap4flags",
            "date",
            "regex",
            "subaddress",
        ]));
        assert_eq!(full.len(), 13);

        let address = full
            .iter()
            .find(|c| c.command == CommandType::Address)
            .unwrap();
        assert!(address.comparisons.contains(&"regex"));
        assert!(address.address_parts.contains(&"detail"));
    }
}
