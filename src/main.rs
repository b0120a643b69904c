//! AcmConsole - demo firmware
//!
//! On ESP-IDF the console runs on UART0 and diagnostics go to UART1.
//! On a host the console runs on stdin/stdout and diagnostics go to stderr,
//! which is handy for trying commands without hardware.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

use core::fmt::Write;

use acm_console::console::{Args, ArgumentDescriptor, CommandDescriptor, Context};
use acm_console::signal::WaitOutcome;

/// Version string (set by build.rs, includes git hash)
const VERSION: &str = env!("VERSION_STRING");

/// Animation frame period
const FRAME_MS: u64 = 100;

static VER: CommandDescriptor =
    CommandDescriptor::new("ver", ver_handler).description("show firmware info/version");

const ECHO_ARGS: &[ArgumentDescriptor] = &[
    ArgumentDescriptor::int("arg1", "integer argument"),
    ArgumentDescriptor::str("str", "optional string argument").optional(),
];

static ECHO: CommandDescriptor = CommandDescriptor::with_args("echo", ECHO_ARGS, echo_handler)
    .description("example command - takes one integer and an optional string argument");

const ANIM_ARGS: &[ArgumentDescriptor] =
    &[ArgumentDescriptor::int("frames", "stop after this many frames (default: until Ctrl+C)")
        .optional()];

static ANIM: CommandDescriptor = CommandDescriptor::with_args("anim", ANIM_ARGS, anim_handler)
    .description("nonsense command to demonstrate Ctrl+C & cooperative sleeping");

static COMMANDS: [&CommandDescriptor; 3] = [&VER, &ECHO, &ANIM];

fn ver_handler(ctx: &mut Context<'_>) {
    ctx.line(VERSION);
}

fn echo_handler(ctx: &mut Context<'_>, args: &Args<'_>) {
    let arg1 = args.int(0).unwrap_or_default();
    let _ = write!(ctx, "arg1: {}, arg2: {}", arg1, args.str(1).unwrap_or("(NULL)"));
    ctx.newline();
}

fn anim_handler(ctx: &mut Context<'_>, args: &Args<'_>) {
    const SEQ: [&str; 4] = ["\r.", "\ro", "\rO", "\ro"];

    let frames = args.int(0).filter(|&n| n > 0);
    ctx.line("demo loop - abort with Ctrl+C");

    let mut shown = 0;
    while frames.map_or(true, |n| shown < n) {
        let _ = ctx.write_str(SEQ[shown as usize % SEQ.len()]);
        shown += 1;

        let deadline = platform::now_ms() + FRAME_MS;
        if ctx.wait_until(|| platform::now_ms() >= deadline, platform::idle) == WaitOutcome::Cancelled
        {
            break;
        }
    }

    ctx.newline();
    if ctx.is_cancelled() {
        ctx.line("user abort");
    }
}

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::sys as esp_idf_sys;

    pub fn now_ms() -> u64 {
        // SAFETY: esp_timer is started by ESP-IDF before main.
        (unsafe { esp_idf_sys::esp_timer_get_time() } / 1000) as u64
    }

    /// Keep the console UART drained into `INPUT` while a handler waits.
    pub fn idle() {
        super::firmware::poll_rx(esp_idf_svc::hal::delay::NON_BLOCK);
        // SAFETY: plain FreeRTOS delay from task context.
        unsafe { esp_idf_sys::vTaskDelay(1) };
    }
}

#[cfg(not(target_os = "espidf"))]
mod platform {
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    pub fn now_ms() -> u64 {
        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_millis() as u64
    }

    pub fn idle() {
        std::thread::sleep(Duration::from_millis(1));
    }
}

#[cfg(target_os = "espidf")]
mod firmware {
    use core::cell::UnsafeCell;
    use core::fmt::{self, Write};

    use acm_console::config::ConsoleConfig;
    use acm_console::console::Console;
    use acm_console::input::INPUT;
    use acm_console::log_globals::CONSOLE_LOG;
    use acm_console::uart_logger::{drain_to_uart, init_uart_logger, UartLoggerConfig};
    use acm_console::{log_info, log_warn};
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys as esp_idf_sys;

    /// Console UART, installed once by `run` before the console starts.
    struct ConsoleUart(UnsafeCell<Option<UartDriver<'static>>>);

    // SAFETY: Written once in `run` before any reader exists. Afterwards only
    // shared references are handed out, all on the main task.
    unsafe impl Sync for ConsoleUart {}

    static CONSOLE_UART: ConsoleUart = ConsoleUart(UnsafeCell::new(None));

    impl ConsoleUart {
        /// # Safety
        ///
        /// Call once, before any call to [`ConsoleUart::get`].
        unsafe fn install(&self, driver: UartDriver<'static>) -> &UartDriver<'static> {
            let slot = &mut *self.0.get();
            slot.insert(driver)
        }

        fn get(&self) -> Option<&UartDriver<'static>> {
            // SAFETY: No mutable access after `install`.
            unsafe { (*self.0.get()).as_ref() }
        }
    }

    /// Console sink over the console UART
    struct UartSink(&'static UartDriver<'static>);

    impl Write for UartSink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| fmt::Error)
        }
    }

    /// Move received bytes into `INPUT`, waiting at most `ticks` for the
    /// first one. Ctrl-C raises the interrupt here, before the console sees
    /// the byte.
    pub fn poll_rx(ticks: u32) {
        let Some(uart) = CONSOLE_UART.get() else {
            return;
        };
        let mut rx = [0u8; 64];
        if let Ok(n) = uart.read(&mut rx, ticks) {
            let queued = INPUT.feed(&rx[..n]);
            if queued < n {
                log_warn!(CONSOLE_LOG, "input queue full, {} bytes lost", n - queued);
            }
        }
    }

    pub fn run() -> Result<(), esp_idf_sys::EspError> {
        let peripherals = Peripherals::take()?;

        let mut log_uart = init_uart_logger(
            peripherals.uart1,
            peripherals.pins.gpio6,
            &UartLoggerConfig::default(),
        )?;

        let driver = UartDriver::new(
            peripherals.uart0,
            peripherals.pins.gpio43,
            peripherals.pins.gpio44,
            Option::<gpio::AnyIOPin>::None,
            Option::<gpio::AnyIOPin>::None,
            &uart::config::Config::default().baudrate(Hertz(115_200)),
        )?;
        // SAFETY: Single call, nothing has read CONSOLE_UART yet.
        let console_uart = unsafe { CONSOLE_UART.install(driver) };

        let mut console: Console<UartSink> =
            Console::new(UartSink(console_uart), ConsoleConfig::DEFAULT);
        for cmd in super::COMMANDS {
            let _ = console.register(cmd);
        }
        log_info!(CONSOLE_LOG, "{} commands registered", console.registry().len());
        console.start();

        let mut rx = [0u8; 64];
        loop {
            poll_rx(10);
            let n = INPUT.read(&mut rx);
            if n > 0 {
                console.process(&rx[..n]);
            }
            drain_to_uart(&mut log_uart);
        }
    }
}

#[cfg(target_os = "espidf")]
#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();

    if let Err(e) = firmware::run() {
        acm_console::log_error!(acm_console::CONSOLE_LOG, "console stopped: {:?}", e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use std::io::Read;

    use acm_console::config::ConsoleConfig;
    use acm_console::console::Console;
    use acm_console::input::INPUT;
    use acm_console::log_error;
    use acm_console::log_globals::CONSOLE_LOG;

    /// Console sink over stdout, flushed after every write
    struct Stdout(std::io::Stdout);

    impl Write for Stdout {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            use std::io::Write as _;
            self.0
                .write_all(s.as_bytes())
                .and_then(|()| self.0.flush())
                .map_err(|_| core::fmt::Error)
        }
    }

    /// Log drain over stderr
    struct Stderr;

    impl Write for Stderr {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            eprint!("{}", s);
            Ok(())
        }
    }

    // Reads stdin even while a command runs, so Ctrl-C reaches the handler.
    std::thread::spawn(|| {
        let mut stdin = std::io::stdin();
        let mut rx = [0u8; 64];
        loop {
            let n = match stdin.read(&mut rx) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    log_error!(CONSOLE_LOG, "stdin: {}", e);
                    break;
                }
            };
            let mut rest = &rx[..n];
            while !rest.is_empty() {
                rest = &rest[INPUT.feed(rest)..];
                if !rest.is_empty() {
                    platform::idle();
                }
            }
        }
        INPUT.close();
    });

    // The terminal echoes and edits lines itself and delivers '\n'.
    let config = ConsoleConfig::REDUCED.return_key(b'\n');
    let mut console: Console<Stdout> = Console::new(Stdout(std::io::stdout()), config);
    for cmd in COMMANDS {
        let _ = console.register(cmd);
    }
    console.start();

    let mut rx = [0u8; 64];
    loop {
        let n = INPUT.read(&mut rx);
        if n > 0 {
            console.process(&rx[..n]);
        } else if INPUT.is_finished() {
            break;
        } else {
            platform::idle();
        }
        CONSOLE_LOG.drain_to(&mut Stderr);
    }
    CONSOLE_LOG.drain_to(&mut Stderr);
}
