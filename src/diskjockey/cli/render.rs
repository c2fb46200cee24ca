use chrono::Local;
use colored::Colorize;
use diskjockey::api::{CmdMessage, MessageLevel};
use diskjockey::config::CatalogConfig;
use diskjockey::model::{CatalogDate, MediumRecord};
use diskjockey::query::CatalogStats;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const AGE_WIDTH: usize = 14;
const COUNT_WIDTH: usize = 10;
const ENCRYPTED_MARKER: &str = "⚿";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per record: id, label and tags, entry count, age.
pub(super) fn print_record_list(records: &[MediumRecord]) {
    for record in records {
        println!("{}", render_record_line(record));
    }
}

fn render_record_line(record: &MediumRecord) -> String {
    let id = format!("{}. ", record.id);
    let marker = if record.details.is_encrypted {
        format!("{} ", ENCRYPTED_MARKER)
    } else {
        "  ".to_string()
    };

    let text = if record.tags.is_empty() {
        record.label.clone()
    } else {
        let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
        format!("{} [{}]", record.label, tags.join(", "))
    };

    let fixed = marker.width() + id.width() + COUNT_WIDTH + AGE_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(&text, available);
    let padding = available.saturating_sub(text.width());

    let count = format!("{:>width$}", record.entries.len(), width = COUNT_WIDTH);
    let age = format_age(record.created_at);

    format!(
        "{}{}{}{}{}{}",
        marker,
        id.yellow(),
        text,
        " ".repeat(padding),
        count.dimmed(),
        age.dimmed()
    )
}

pub(super) fn print_full_records(records: &[MediumRecord]) {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", record.id.to_string().yellow(), record.label.bold());
        println!("--------------------------------");
        println!("cataloged:  {}", record.created_at);
        if !record.tags.is_empty() {
            let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
            println!("tags:       {}", tags.join(", "));
        }
        if record.details.is_encrypted {
            println!("encrypted:  yes");
        }
        if let Some(location) = &record.details.storage_location {
            println!("location:   {}", location);
        }
        if let Some(capacity) = record.details.capacity {
            println!("capacity:   {} bytes", capacity);
        }
        println!("entries:    {}", record.entries.len());
        for entry in &record.entries {
            println!("  {}", entry);
        }
    }
}

pub(super) fn print_text_list(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

pub(super) fn print_stats(stats: &CatalogStats) {
    println!("media:        {}", stats.record_count);
    println!("entries:      {}", stats.entry_count);
    println!("last id:      {}", stats.last_used_id);
    if !stats.tag_frequency.is_empty() {
        println!("tags:");
        for (tag, count) in &stats.tag_frequency {
            println!("  {:<20} {}", tag, count);
        }
    }
}

pub(super) fn print_config(config: &CatalogConfig) {
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
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
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Age of a catalog date, right-aligned. Dates carry no time, so the same day is "today".
fn format_age(created_at: CatalogDate) -> String {
    let today = Local::now().date_naive();
    let elapsed = today.signed_duration_since(created_at.date());

    let text = if elapsed.num_days() <= 0 {
        "today".to_string()
    } else {
        Formatter::new().convert(elapsed.to_std().unwrap_or_default())
    };

    format!("{:>width$}", text, width = AGE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use diskjockey::model::MediumId;
    use std::collections::BTreeSet;

    fn record(label: &str) -> MediumRecord {
        MediumRecord::new(
            MediumId::new(4),
            label,
            CatalogDate::today(),
            BTreeSet::new(),
            vec!["/a".into(), "/b".into()],
        )
        .unwrap()
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate_to_width("disk", 10), "disk");
    }

    #[test]
    fn long_text_ends_with_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.width(), 5);
    }

    #[test]
    fn wide_characters_count_double() {
        let out = truncate_to_width("日本語のディスク", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn age_of_today_and_past_dates() {
        assert_eq!(format_age(CatalogDate::today()).trim(), "today");
        let past = CatalogDate::new(Local::now().date_naive() - Duration::days(3));
        assert!(format_age(past).contains("3 days"));
    }

    #[test]
    fn record_line_fits_the_line_width() {
        colored::control::set_override(false);
        let line = render_record_line(&record(&"x".repeat(200)));
        assert_eq!(line.width(), LINE_WIDTH);
        assert!(line.contains("004. "));
    }
}
