use okcomputer_abi::{derive_key, describe_channel, WELL_KNOWN_CHANNELS};
use serde::Serialize;

use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ChannelOutput {
    name: &'static str,
    key: String,
    description: &'static str,
}

fn rows() -> Vec<ChannelOutput> {
    WELL_KNOWN_CHANNELS
        .iter()
        .map(|&name| ChannelOutput {
            name,
            key: derive_key(name).to_string(),
            description: describe_channel(name).unwrap_or(""),
        })
        .collect()
}

pub fn run(format: OutputFormat) -> CliResult<i32> {
    let rows = rows();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
        ),
        OutputFormat::Table => {
            let mut table = comfy_table::Table::new();
            table
                .load_preset(comfy_table::presets::UTF8_FULL)
                .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "DESCRIPTION", "KEY"]);
            for row in &rows {
                table.add_row(vec![row.name, row.description, row.key.as_str()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!("  #{:<14} {}", row.name, row.description);
            }
            println!("  #{:<14} {}", "email_<id>", "Direct messages to a token");
        }
        OutputFormat::Raw => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
    }
    Ok(SUCCESS)
}
