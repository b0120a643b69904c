//! Command registry and help tests

use acm_console::config::ConsoleConfig;
use acm_console::console::commands::{
    ArgumentDescriptor, Args, CommandDescriptor, Completion, Context, Handler,
};
use acm_console::console::registry::Registry;
use acm_console::console::{Console, RegisterError};
use acm_console::logging::{LogLevel, LogStream};

fn nop(_: &mut Context<'_>) {}
fn nop_args(_: &mut Context<'_>, _: &Args<'_>) {}

const ECHO_ARGS: &[ArgumentDescriptor] = &[
    ArgumentDescriptor::int("arg1", "integer argument"),
    ArgumentDescriptor::str("str", "optional string argument").optional(),
];
const ECHO: CommandDescriptor = CommandDescriptor::with_args("echo", ECHO_ARGS, nop_args)
    .description("example command - takes one integer and an optional string argument");
const VER: CommandDescriptor = CommandDescriptor::new("ver", nop).description("show version");

#[test]
fn test_registry_register_and_lookup() {
    let mut registry: Registry<4> = Registry::new(64);

    assert_eq!(registry.register(&VER), Ok(()));
    assert_eq!(registry.register(&ECHO), Ok(()));

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup("echo").map(|c| c.name), Some("echo"));
    assert!(registry.lookup("ECHO").is_none());
    assert!(registry.lookup("ech").is_none());

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, ["ver", "echo"]);
}

#[test]
fn test_registry_rejects_duplicate() {
    let mut registry: Registry<4> = Registry::new(64);

    registry.register(&VER).unwrap();
    let other = CommandDescriptor::new("ver", nop).description("another");

    assert_eq!(registry.register(&other), Err(RegisterError::DuplicateName));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("ver").unwrap().description, Some("show version"));
}

#[test]
fn test_registry_full() {
    let mut registry: Registry<1> = Registry::new(64);

    registry.register(&VER).unwrap();
    assert_eq!(registry.register(&ECHO), Err(RegisterError::RegistryFull));
    assert_eq!(registry.len(), registry.capacity());
}

#[test]
fn test_registry_rejects_bad_names() {
    let mut registry: Registry<4> = Registry::new(8);

    for name in ["", "two words", "tab\tname", "12345678"] {
        let cmd = CommandDescriptor::new(name, nop);
        assert_eq!(
            registry.register(&cmd),
            Err(RegisterError::InvalidName),
            "'{}' should be rejected",
            name
        );
    }

    // One shorter than the line buffer is fine
    assert_eq!(registry.register(&CommandDescriptor::new("1234567", nop)), Ok(()));
    assert_eq!(registry.register(&CommandDescriptor::new("set-a_b", nop)), Ok(()));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_registry_rejects_bad_arguments() {
    let mut registry: Registry<4> = Registry::new(64);

    const OPTIONAL_FIRST: &[ArgumentDescriptor] = &[
        ArgumentDescriptor::int("a", "first").optional(),
        ArgumentDescriptor::int("b", "second"),
    ];
    const UNNAMED: &[ArgumentDescriptor] = &[ArgumentDescriptor::str("", "nameless")];

    let cmd = CommandDescriptor::with_args("bad", OPTIONAL_FIRST, nop_args);
    assert_eq!(registry.register(&cmd), Err(RegisterError::InvalidArgument));

    let cmd = CommandDescriptor::with_args("bad", UNNAMED, nop_args);
    assert_eq!(registry.register(&cmd), Err(RegisterError::InvalidArgument));

    assert!(registry.is_empty());
}

#[test]
fn test_registry_rejects_too_many_arguments() {
    let mut registry: Registry<4> = Registry::new(64);

    const ELEVEN: &[ArgumentDescriptor] = &[ArgumentDescriptor::int("n", "number"); 11];
    let cmd = CommandDescriptor::with_args("many", ELEVEN, nop_args);

    assert_eq!(registry.register(&cmd), Err(RegisterError::TooManyArguments));
}

#[test]
fn test_registry_rejects_handler_mismatch() {
    let mut registry: Registry<4> = Registry::new(64);

    let cmd = CommandDescriptor::with_args("noargs", &[], nop_args);
    assert_eq!(registry.register(&cmd), Err(RegisterError::HandlerMismatch));

    let cmd = CommandDescriptor {
        handler: Handler::NoArgs(nop),
        ..ECHO
    };
    assert_eq!(registry.register(&cmd), Err(RegisterError::HandlerMismatch));
}

#[test]
fn test_register_error_display() {
    assert_eq!(
        RegisterError::DuplicateName.to_string(),
        "R03: command already registered"
    );
}

#[test]
fn test_console_registers_help_first() {
    let mut console: Console<TestOutput> = Console::new(TestOutput::new(), ConsoleConfig::DEFAULT);
    console.register(&VER).unwrap();

    let names: Vec<&str> = console.registry().names().collect();
    assert_eq!(names, ["help", "ver"]);

    let config = ConsoleConfig::DEFAULT.help_command(false);
    let console: Console<TestOutput> = Console::new(TestOutput::new(), config);
    assert!(console.registry().is_empty());
}

#[test]
fn test_console_logs_rejected_registration() {
    static LOG: LogStream = LogStream::new();

    let mut console: Console<TestOutput> =
        Console::new(TestOutput::new(), ConsoleConfig::DEFAULT.help_command(false)).with_log(&LOG);
    console.register(&VER).unwrap();
    while LOG.drain().is_some() {}

    assert_eq!(console.register(&VER), Err(RegisterError::DuplicateName));

    let entry = LOG.drain().unwrap();
    assert_eq!(entry.level, LogLevel::Warn);
    assert!(entry.message().contains("'ver'"));
    assert!(entry.message().contains("R03"));
}

#[test]
fn test_help_lists_commands() {
    let mut console = help_console();

    console.process(b"help\r");

    let expected = "help\r\n\
        Available commands:\r\n  \
        help - List all commands, or give details about a specific command\r\n  \
        echo - example command - takes one integer and an optional string argument\r\n  \
        ver  - show version\r\n  \
        bare\r\n\
        > ";
    assert_eq!(console.output().as_str(), expected);
}

#[test]
fn test_help_describes_command() {
    let mut console = help_console();

    console.process(b"help echo\r");

    let expected = "help echo\r\n\
        example command - takes one integer and an optional string argument\r\n\
        Usage: echo arg1 [str]\r\n  \
        arg1 - integer argument\r\n  \
        str  - optional string argument\r\n\
        > ";
    assert_eq!(console.output().as_str(), expected);
}

#[test]
fn test_help_command_without_description() {
    let mut console = help_console();

    console.process(b"help bare\r");

    assert_eq!(console.output().as_str(), "help bare\r\nUsage: bare\r\n> ");
}

#[test]
fn test_help_unknown_command() {
    let mut console = help_console();

    console.process(b"help nope\r");

    assert!(console.output().contains("ERROR E03: unknown command (nope)\r\n"));
}

#[test]
fn test_help_completes_command_names() {
    let mut console = help_console();

    console.process(b"help ec\t");
    assert_eq!(console.line(), "help echo");
}

#[test]
fn test_argument_list_completion() {
    const MODES: &[&str] = &["fast_a", "fast_b", "slow"];
    const MODE_ARGS: &[ArgumentDescriptor] = &[ArgumentDescriptor::str("mode", "operating mode")];
    const MODE: CommandDescriptor =
        CommandDescriptor::with_args("mode", MODE_ARGS, nop_args).completion(Completion::List(MODES));

    let mut console = help_console();
    console.register(&MODE).unwrap();

    console.process(b"mode s\t");
    assert_eq!(console.line(), "mode slow");

    console.process(b"\x03mode f\t");
    assert_eq!(console.line(), "mode fast_");
}

fn help_console() -> Console<TestOutput> {
    let mut console: Console<TestOutput> = Console::new(TestOutput::new(), ConsoleConfig::DEFAULT);
    console.register(&ECHO).unwrap();
    console.register(&VER).unwrap();
    console.register(&CommandDescriptor::new("bare", nop)).unwrap();
    console
}

// Test output buffer
struct TestOutput {
    buf: [u8; 1024],
    len: usize,
}

impl TestOutput {
    fn new() -> Self {
        Self { buf: [0u8; 1024], len: 0 }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    fn contains(&self, s: &str) -> bool {
        self.as_str().contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let available = self.buf.len() - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}
