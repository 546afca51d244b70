//! Log records printed on the console.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Level used when `LOG` was not set at build time.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Install the console logger.
///
/// The max level is taken from the `LOG` environment variable at build time,
/// e.g. `LOG=debug`. Installing it more than once only resets the level.
pub fn init() {
    static LOGGER: SimpleLogger = SimpleLogger;
    if log::set_logger(&LOGGER).is_err() {
        debug!("logging: logger already installed");
    }
    set_max_level(option_env!("LOG").unwrap_or(""));
}

/// Reset max log level, falling back to `WARN` for unknown names.
pub fn set_max_level(level: &str) {
    log::set_max_level(level.parse().unwrap_or(DEFAULT_LEVEL));
}

#[allow(dead_code)]
#[repr(u8)]
enum ColorCode {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    BrightYellow = 93,
    BrightBlue = 94,
    BrightMagenta = 95,
    BrightCyan = 96,
    BrightWhite = 97,
}

/// Add escape sequence to print with color in Linux console
macro_rules! with_color {
    ($color_code:expr, $($arg:tt)*) => {{
        #[cfg(feature = "colorless-log")]
        { let _ = $color_code; format_args!($($arg)*) }
        #[cfg(not(feature = "colorless-log"))]
        { format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*)) }
    }};
}

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let level_color = match level {
            Level::Error => ColorCode::BrightRed,
            Level::Warn => ColorCode::BrightYellow,
            Level::Info => ColorCode::BrightGreen,
            Level::Debug => ColorCode::BrightCyan,
            Level::Trace => ColorCode::BrightBlack,
        };
        let args_color = match level {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        };
        crate::console::write_fmt(with_color!(
            ColorCode::White,
            "[{level} {target}] {data}\n",
            level = with_color!(level_color, "{level:<5}"),
            target = record.target(),
            data = with_color!(args_color, "{args}", args = record.args()),
        ));
    }

    fn flush(&self) {}
}
