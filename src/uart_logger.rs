//! UART log output.
//!
//! Drains [`CONSOLE_LOG`] to a TX-only UART so diagnostics never mix with
//! the interactive console.
//! Requires external USB-UART adapter (CH340, CP2102, etc).
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 GPIO (TX) ──────▶ USB-UART RX
//!                          └─▶ PC Serial Monitor
//! ```

use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartTxDriver};

use crate::log_globals::CONSOLE_LOG;
use crate::logging::{format_entry, format_to_buffer, LogEntry, MAX_MSG_LEN};

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self { baud_rate: 115200 }
    }
}

/// Initialize UART1 TX-only for logging output.
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config =
        uart::config::Config::default().baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Write a log entry to UART.
pub fn write_log_to_uart(uart: &mut UartTxDriver<'_>, entry: &LogEntry) {
    let mut format_buf = [0u8; MAX_MSG_LEN + 32];
    let len = format_entry(entry, &mut format_buf);
    let _ = uart.write(&format_buf[..len]);
}

/// Drain everything queued so far. Returns the number of entries written.
///
/// Called from the console loop between input polls; also reports
/// entries lost to a full ring since the last call.
pub fn drain_to_uart(uart: &mut UartTxDriver<'_>) -> usize {
    let mut written = 0;
    while let Some(entry) = CONSOLE_LOG.drain() {
        write_log_to_uart(uart, &entry);
        written += 1;
    }

    let dropped = CONSOLE_LOG.dropped();
    if dropped > 0 {
        let mut msg = [0u8; 64];
        let len = format_to_buffer(&mut msg, format_args!("[WARN] Dropped: {}\n", dropped));
        let _ = uart.write(&msg[..len]);
        CONSOLE_LOG.reset_dropped();
    }

    written
}
