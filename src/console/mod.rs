//! Line-oriented command console
//!
//! Raw bytes in, typed command invocations out. Line editing, history,
//! tab completion and `help` on top.
//! Zero heap allocation - all static buffers.

pub mod codec;
pub mod commands;
pub mod completion;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod help;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod registry;

pub use codec::{parse_arg, parse_int, ArgType, ArgValue, CodecError, Int};
pub use commands::{
    Args, ArgsHandler, ArgumentDescriptor, CommandDescriptor, Completion, Context, Handler,
    NoArgsHandler,
};
pub use completion::{complete, Candidates, Completed};
pub use console::{Console, WriteFn};
pub use error::{ConsoleError, RegisterError};
pub use help::HELP;
pub use history::History;
pub use line_buffer::{LineBuffer, LineFault};
pub use parser::{bind_args, parse_line, ArgSlots, ParsedLine};
pub use registry::Registry;
