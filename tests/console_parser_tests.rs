//! Command line parser tests

use acm_console::console::commands::{ArgumentDescriptor, Args, CommandDescriptor, Context};
use acm_console::console::parser::{bind_args, parse_line};
use acm_console::console::{ArgType, ArgValue, ConsoleError};

fn nop(_: &mut Context<'_>, _: &Args<'_>) {}

const ECHO_ARGS: &[ArgumentDescriptor] = &[
    ArgumentDescriptor::int("arg1", "integer argument"),
    ArgumentDescriptor::str("str", "optional string argument").optional(),
];
const ECHO: CommandDescriptor = CommandDescriptor::with_args("echo", ECHO_ARGS, nop);

const PAIR_ARGS: &[ArgumentDescriptor] = &[
    ArgumentDescriptor::str("key", "name"),
    ArgumentDescriptor::int("value", "value"),
];
const PAIR: CommandDescriptor = CommandDescriptor::with_args("set", PAIR_ARGS, nop);

#[test]
fn test_parse_simple_command() {
    let line = parse_line("help").unwrap().unwrap();
    assert_eq!(line.command, "help");
    assert_eq!(line.arg_count(), 0);
}

#[test]
fn test_parse_command_with_args() {
    let line = parse_line("set key 20").unwrap().unwrap();
    assert_eq!(line.command, "set");
    let args: Vec<&str> = line.args().collect();
    assert_eq!(args, ["key", "20"]);
}

#[test]
fn test_parse_empty_line_is_ignored() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   "), Ok(None));
}

#[test]
fn test_parse_leading_whitespace() {
    assert_eq!(parse_line(" cmd arg"), Err(ConsoleError::LeadingWhitespace));
}

#[test]
fn test_parse_extra_whitespace() {
    assert_eq!(parse_line("cmd  arg"), Err(ConsoleError::ExtraWhitespace));
    assert_eq!(parse_line("cmd arg "), Err(ConsoleError::ExtraWhitespace));
    assert_eq!(parse_line("cmd "), Err(ConsoleError::ExtraWhitespace));
}

#[test]
fn test_bind_defaults_optional_str() {
    let line = parse_line("echo 5").unwrap().unwrap();
    let slots = bind_args(&ECHO, &line).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0], ArgValue::Int(5));
    assert_eq!(slots[1], ArgValue::STR_DEFAULT);
    assert_eq!(slots[1], ArgValue::Default(ArgType::Str));
}

#[test]
fn test_bind_all_args() {
    let line = parse_line("echo 0x10 hello").unwrap().unwrap();
    let slots = bind_args(&ECHO, &line).unwrap();

    assert_eq!(slots[0], ArgValue::Int(16));
    assert_eq!(slots[1], ArgValue::Str("hello"));
}

#[test]
fn test_bind_too_many_arguments() {
    let line = parse_line("echo 1 two three").unwrap().unwrap();
    assert_eq!(bind_args(&ECHO, &line), Err(ConsoleError::TooManyArguments));
}

#[test]
fn test_bind_too_few_arguments() {
    let line = parse_line("echo").unwrap().unwrap();
    assert_eq!(bind_args(&ECHO, &line), Err(ConsoleError::TooFewArguments));

    let line = parse_line("set key").unwrap().unwrap();
    assert_eq!(bind_args(&PAIR, &line), Err(ConsoleError::TooFewArguments));
}

#[test]
fn test_bind_invalid_value() {
    let line = parse_line("echo 12x").unwrap().unwrap();
    assert_eq!(
        bind_args(&ECHO, &line),
        Err(ConsoleError::InvalidArgument {
            name: "arg1",
            value: "12x"
        })
    );
}

#[test]
fn test_bind_checks_values_before_count() {
    // The bad value is reported even though "value" is also missing
    const NUMS_ARGS: &[ArgumentDescriptor] = &[
        ArgumentDescriptor::int("count", "count"),
        ArgumentDescriptor::int("value", "value"),
    ];
    const NUMS: CommandDescriptor = CommandDescriptor::with_args("fill", NUMS_ARGS, nop);

    let line = parse_line("fill many").unwrap().unwrap();
    assert_eq!(
        bind_args(&NUMS, &line),
        Err(ConsoleError::InvalidArgument {
            name: "count",
            value: "many"
        })
    );
}

#[test]
fn test_bind_no_args_command() {
    fn none(_: &mut Context<'_>) {}
    let cmd = CommandDescriptor::new("ver", none);

    let line = parse_line("ver").unwrap().unwrap();
    assert!(bind_args(&cmd, &line).unwrap().is_empty());

    let line = parse_line("ver now").unwrap().unwrap();
    assert_eq!(bind_args(&cmd, &line), Err(ConsoleError::TooManyArguments));
}

#[test]
fn test_error_display() {
    assert_eq!(
        ConsoleError::UnknownCommand("foo").to_string(),
        "ERROR E03: unknown command (foo)"
    );
    assert_eq!(
        ConsoleError::InvalidArgument {
            name: "arg1",
            value: "x"
        }
        .to_string(),
        "ERROR E06: invalid value for 'arg1' (x)"
    );
    assert_eq!(
        ConsoleError::ExtraWhitespace.to_string(),
        "ERROR E02: extra whitespace between arguments"
    );
}
