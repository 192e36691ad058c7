use cadastra::messages::{CmdMessage, MessageLevel};
use cadastra::model::Record;
use cadastra::validation::Validation;
use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const EMAIL_WIDTH: usize = 34;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        print_message(message);
    }
}

pub fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Error => println!("{}", message.content.red()),
    }
}

pub fn print_validation(validation: &Validation) {
    for (_, message) in validation.messages() {
        eprintln!("{}", message.red());
    }
}

pub fn print_records(records: &[Record], sort_label: &str) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    println!("{}", format!("Sorted by {}", sort_label).dimmed());
    for (i, record) in records.iter().enumerate() {
        println!("{}", format_row(i + 1, record));
    }
}

fn format_row(position: usize, record: &Record) -> String {
    let idx = format!("{:>3}. ", position);
    let name = pad_to_width(&truncate_to_width(&record.name, NAME_WIDTH), NAME_WIDTH);
    let email = pad_to_width(&truncate_to_width(&record.email, EMAIL_WIDTH), EMAIL_WIDTH);
    format!("{}{} {} {}", idx, name.bold(), email, record.id.dimmed())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
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
