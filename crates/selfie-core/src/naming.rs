//! Save-file naming from a date pattern.
//!
//! Patterns use the Unicode (LDML) date field letters familiar from desktop
//! date formatters, e.g. the default `yyyyMMdd-HHmmss`:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `yyyy`, `y` | year (`yy` = two digits) |
//! | `MM`, `M` | month number; `MMM` short name, `MMMM` full name |
//! | `dd`, `d` | day of month |
//! | `HH`, `H` | hour 0-23; `hh`, `h` hour 1-12 |
//! | `mm`, `ss` | minute, second |
//! | `S…` | fractional seconds, one digit per letter |
//! | `a` | AM/PM |
//! | `E…` | weekday (`EEEE` full name) |
//!
//! Text inside single quotes is literal and `''` is a single quote. Other
//! letters pass through unchanged.

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::path::expand_tilde;
use crate::prefs::Preferences;

/// Render `pattern` for the given local date and time.
pub fn format_file_name(pattern: &str, at: &NaiveDateTime) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                out.push('\'');
                continue;
            }
            while let Some(q) = chars.next() {
                if q == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        out.push('\'');
                    } else {
                        break;
                    }
                } else {
                    out.push(q);
                }
            }
        } else if c.is_ascii_alphabetic() {
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            push_field(&mut out, c, count, at);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_field(out: &mut String, letter: char, count: usize, at: &NaiveDateTime) {
    let padded = |value: u32| format!("{:0width$}", value, width = count);
    let field = match letter {
        'y' if count == 2 => format!("{:02}", at.year().rem_euclid(100)),
        'y' => format!("{:0width$}", at.year(), width = count),
        'M' => match count {
            1 | 2 => padded(at.month()),
            3 => at.format("%b").to_string(),
            _ => at.format("%B").to_string(),
        },
        'd' => padded(at.day()),
        'H' => padded(at.hour()),
        'h' => padded(at.hour12().1),
        'm' => padded(at.minute()),
        's' => padded(at.second()),
        'S' => fraction_digits(at.nanosecond(), count),
        'a' => at.format("%p").to_string(),
        'E' => match count {
            1..=3 => at.format("%a").to_string(),
            4 => at.format("%A").to_string(),
            _ => at.format("%a").to_string().chars().take(1).collect(),
        },
        _ => std::iter::repeat(letter).take(count).collect(),
    };
    out.push_str(&field);
}

/// Leading `count` digits of the fractional second, truncated.
fn fraction_digits(nanos: u32, count: usize) -> String {
    // Leap-second nanos run past 1e9; keep the sub-second part only
    let mut digits = format!("{:09}", nanos % 1_000_000_000);
    if count <= digits.len() {
        digits.truncate(count);
    } else {
        digits.extend(std::iter::repeat('0').take(count - digits.len()));
    }
    digits
}

/// Current local time, as used for naming new captures.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Preferences {
    /// File name for a capture taken at `at`: pattern plus extension.
    pub fn file_name_for(&self, at: &NaiveDateTime) -> String {
        format!(
            "{}.{}",
            format_file_name(self.file_name(), at),
            self.file_type().extension()
        )
    }

    /// Save folder with `~` expanded.
    pub fn save_folder_path(&self) -> PathBuf {
        expand_tilde(self.save_folder())
    }

    /// Full path for a capture taken at `at`.
    pub fn save_file_path(&self, at: &NaiveDateTime) -> PathBuf {
        self.save_folder_path().join(self.file_name_for(at))
    }
}
