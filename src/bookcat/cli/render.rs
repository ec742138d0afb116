use bookcat::api::{CmdMessage, MessageLevel};
use bookcat::model::Record;
use colored::Colorize;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 8;
const TITLE_WIDTH: usize = 32;
const AUTHOR_WIDTH: usize = 22;
const PUBLISHER_WIDTH: usize = 22;

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, err: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", format!("Error: {}", err).red())
}

pub(super) fn print_records<W: Write>(out: &mut W, records: &[Record]) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        format!(
            "{}{}{}{}",
            pad("Code", ID_WIDTH),
            pad("Title", TITLE_WIDTH),
            pad("Author", AUTHOR_WIDTH),
            "Publisher"
        )
        .bold()
    )?;

    for record in records {
        writeln!(
            out,
            "{}{}{}{}",
            pad(&record.id, ID_WIDTH).yellow(),
            pad(&record.title, TITLE_WIDTH),
            pad(&record.author, AUTHOR_WIDTH),
            truncate_to_width(&record.publisher, PUBLISHER_WIDTH)
        )?;
    }
    Ok(())
}

/// Truncates to `width` columns and pads with spaces to exactly `width`.
fn pad(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width.saturating_sub(1));
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
