use std::io::IsTerminal;

use chrono::DateTime;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use okcomputer_client::{ChannelStats, Message, StoredString, TransactionDescriptor};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    #[serde(flatten)]
    message: &'a Message,
    time: String,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// `Mon DD YYYY HH:MM UTC`, or the raw seconds when out of chrono's range.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%b %d %Y %H:%M UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn render_message(message: &Message) -> String {
    format!(
        "OKCPU #{}  |  {}\n> {}",
        message.token_id,
        format_timestamp(message.timestamp),
        message.text
    )
}

pub fn print_messages(title: &str, messages: &[Message], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<MessageOutput<'_>> = messages
                .iter()
                .map(|message| MessageOutput {
                    message,
                    time: format_timestamp(message.timestamp),
                })
                .collect();
            println!("{}", to_json(&out));
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["INDEX", "TOKEN", "TIME", "TEXT"]);
            for message in messages {
                table.add_row(vec![
                    message.index.to_string(),
                    format!("#{}", message.token_id),
                    format_timestamp(message.timestamp),
                    message.text.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("=== {title} ({} messages) ===", messages.len());
            if messages.is_empty() {
                println!("  (empty)");
            }
            for message in messages {
                println!();
                for line in render_message(message).lines() {
                    println!("  {line}");
                }
            }
        }
        OutputFormat::Raw => {
            for message in messages {
                println!("{}", message.text);
            }
        }
    }
}

pub fn print_descriptor(tx: &TransactionDescriptor, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(tx)),
        OutputFormat::Pretty => println!(
            "{}",
            serde_json::to_string_pretty(tx).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            table
                .add_row(vec!["to".to_string(), tx.to.to_string()])
                .add_row(vec!["data".to_string(), tx.data_hex()])
                .add_row(vec!["value".to_string(), tx.value.to_string()])
                .add_row(vec!["chainId".to_string(), tx.chain_id.to_string()]);
            println!("{table}");
        }
        OutputFormat::Raw => println!("{}", tx.data_hex()),
    }
}

pub fn print_stored(record: &StoredString, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(record)),
        OutputFormat::Table => {
            let mut table = new_table(vec!["TOKEN", "KEY", "VALUE"]);
            table.add_row(vec![
                format!("#{}", record.token_id),
                record.key_name.clone(),
                record.value.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("OKCPU #{} {}:", record.token_id, record.key_name);
            println!("{}", record.value);
        }
        OutputFormat::Raw => println!("{}", record.value),
    }
}

pub fn print_stats(stats: &[ChannelStats], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(stats)),
        OutputFormat::Table => {
            let mut table = new_table(vec!["CHANNEL", "MESSAGES"]);
            for entry in stats {
                table.add_row(vec![entry.channel.clone(), entry.messages.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for entry in stats {
                println!("  #{:<14} {} messages", entry.channel, entry.messages);
            }
        }
    }
}

/// Single key/value facts such as owner lookups and presence checks.
pub fn print_fields(fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), serde_json::Value::String(v.clone())))
                .collect();
            println!("{}", to_json(&map));
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            for (k, v) in fields {
                table.add_row(vec![(*k).to_string(), v.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (k, v) in fields {
                println!("{k}: {v}");
            }
        }
        OutputFormat::Raw => {
            for (_, v) in fields {
                println!("{v}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use okcomputer_abi::{derive_key, Address, U256};

    use super::*;

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_timestamp(0), "Jan 01 1970 00:00 UTC");
        assert_eq!(format_timestamp(1_738_000_000), "Jan 27 2025 17:46 UTC");
    }

    #[test]
    fn message_renders_two_lines() {
        let message = Message {
            index: 0,
            channel_key: derive_key("board"),
            token_id: 1399,
            timestamp: 0,
            sender: Address::ZERO,
            metadata: U256::ZERO,
            text: "hello mfers!".to_string(),
        };
        assert_eq!(
            render_message(&message),
            "OKCPU #1399  |  Jan 01 1970 00:00 UTC\n> hello mfers!"
        );
    }

    #[test]
    fn unrepresentable_timestamp_falls_back_to_seconds() {
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }
}
