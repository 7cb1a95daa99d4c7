use crate::config::DisplayConfig;
use crate::data::{Reading, SensorTarget};
use crate::error::Result;
use crate::utils::locale::detect_decimal_separator;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Shown instead of a number when a reading is unavailable
pub const PLACEHOLDER: &str = "--";

const NBSP: char = '\u{a0}';
const RESET: &str = "\x1b[0m";

/// One digit after the decimal separator, or the placeholder
pub fn format_temperature(reading: Reading, separator: char) -> String {
    match reading.celsius() {
        Some(value) => {
            let text = format!("{:.1}", value);
            if separator == '.' {
                text
            } else {
                text.replacen('.', &separator.to_string(), 1)
            }
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// `<label> : <value> °C` with non-breaking spaces
pub fn format_line(label: &str, reading: Reading, separator: char) -> String {
    format!(
        "{label}{NBSP}:{NBSP}{value}{NBSP}°C",
        label = label,
        value = format_temperature(reading, separator)
    )
}

#[derive(Debug, Clone)]
pub struct TemperatureFormatter {
    pub cpu_label: String,
    pub battery_label: String,
    pub separator: char,
}

impl TemperatureFormatter {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            cpu_label: config.cpu_label.clone(),
            battery_label: config.battery_label.clone(),
            separator: config.decimal_separator.unwrap_or_else(detect_decimal_separator),
        }
    }

    pub fn format(&self, target: SensorTarget, reading: Reading) -> String {
        let label = match target {
            SensorTarget::Cpu => &self.cpu_label,
            SensorTarget::Battery => &self.battery_label,
        };
        format_line(label, reading, self.separator)
    }
}

impl Default for TemperatureFormatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

/// The two text outputs, as last written by a poll cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSlots {
    pub cpu: String,
    pub battery: String,
}

impl OutputSlots {
    pub fn set(&mut self, target: SensorTarget, text: String) {
        match target {
            SensorTarget::Cpu => self.cpu = text,
            SensorTarget::Battery => self.battery = text,
        }
    }
}

/// Where formatted slots end up after each cycle
pub trait DisplaySurface {
    fn render(&mut self, slots: &OutputSlots) -> Result<()>;
}

pub fn hex_to_ansi(color: &str) -> Option<String> {
    // First try ANSI color names
    if let Some(ansi_code) = get_ansi_color_code(color) {
        return Some(ansi_code.to_string());
    }

    if color.starts_with('#') && color.len() == 7 {
        // get() rather than indexing: a multibyte value must not split a char
        let channel = |range: std::ops::Range<usize>| {
            color.get(range).and_then(|hex| u8::from_str_radix(hex, 16).ok())
        };
        if let (Some(r), Some(g), Some(b)) = (channel(1..3), channel(3..5), channel(5..7)) {
            return Some(format!("\x1b[38;2;{};{};{}m", r, g, b));
        }
    }

    log::warn!("Unknown color '{}', use a color name or #RRGGBB", color);
    None
}

fn get_ansi_color_code(color_name: &str) -> Option<&'static str> {
    match color_name.to_lowercase().as_str() {
        // Standard 8 colors (30-37)
        "black" => Some("\x1b[30m"),
        "red" => Some("\x1b[31m"),
        "green" => Some("\x1b[32m"),
        "yellow" => Some("\x1b[33m"),
        "blue" => Some("\x1b[34m"),
        "magenta" => Some("\x1b[35m"),
        "cyan" => Some("\x1b[36m"),
        "white" => Some("\x1b[37m"),

        // Bright colors (90-97)
        "bright_black" | "gray" | "grey" => Some("\x1b[90m"),
        "bright_red" | "orange" => Some("\x1b[91m"),
        "bright_green" => Some("\x1b[92m"),
        "bright_yellow" => Some("\x1b[93m"),
        "bright_blue" => Some("\x1b[94m"),
        "bright_magenta" | "violet" => Some("\x1b[95m"),
        "bright_cyan" => Some("\x1b[96m"),
        "bright_white" => Some("\x1b[97m"),

        "purple" => Some("\x1b[35m"),
        "reset" | "default" => Some(RESET),
        _ => None,
    }
}

/// Two lines on a terminal, redrawn in place
pub struct TerminalSurface<W: Write> {
    out: W,
    label_color: Option<String>,
    value_color: Option<String>,
    widths: Option<[usize; 2]>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label_color: None,
            value_color: None,
            widths: None,
        }
    }

    /// Apply the configured colors; `None` entries stay uncolored
    pub fn with_colors(mut self, config: &DisplayConfig) -> Self {
        self.label_color = config.label_color.as_deref().and_then(hex_to_ansi);
        self.value_color = config.value_color.as_deref().and_then(hex_to_ansi);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn colorize(&self, line: &str) -> String {
        if self.label_color.is_none() && self.value_color.is_none() {
            return line.to_string();
        }
        let (label, rest) = match line.split_once(NBSP) {
            Some((label, rest)) => (label, rest),
            None => (line, ""),
        };
        let label_color = self.label_color.as_deref().unwrap_or(RESET);
        let value_color = self.value_color.as_deref().unwrap_or(RESET);
        if rest.is_empty() {
            format!("{}{}{}", label_color, label, RESET)
        } else {
            format!("{}{}{}{}{}{}", label_color, label, value_color, NBSP, rest, RESET)
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn render(&mut self, slots: &OutputSlots) -> Result<()> {
        let lines = [slots.cpu.as_str(), slots.battery.as_str()];
        let widths = [lines[0].width(), lines[1].width()];

        if let Some(previous) = self.widths {
            // Back to the start of the first line
            write!(self.out, "\x1b[{}A\r", lines.len())?;
            for (i, line) in lines.iter().enumerate() {
                let padding = " ".repeat(previous[i].saturating_sub(widths[i]));
                let text = self.colorize(line);
                writeln!(self.out, "{}{}", text, padding)?;
            }
        } else {
            for line in lines {
                let text = self.colorize(line);
                writeln!(self.out, "{}", text)?;
            }
        }

        self.out.flush()?;
        self.widths = Some(widths);
        Ok(())
    }
}
