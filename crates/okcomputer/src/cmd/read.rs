use okcomputer_abi::BOARD;
use okcomputer_client::{ReadOrder, StoredKind};
use serde::Serialize;

use crate::cmd::{DataArgs, EmailsArgs, KeyArgs, ReadArgs, RpcArgs, TokenArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{print_fields, print_messages, print_stats, print_stored, OutputFormat};

const SUMMARY_BOARD_MESSAGES: usize = 5;

pub fn owner(args: TokenArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let reader = rpc.reader(1)?;
    let owner = reader
        .owner_of(args.token)
        .map_err(|err| client_error("owner lookup failed", err))?;
    print_fields(
        &[("token", args.token.to_string()), ("owner", owner.to_string())],
        format,
    );
    Ok(SUCCESS)
}

pub fn channel(args: ReadArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let reader = rpc.reader(usize::from(args.concurrency))?;
    let order = if args.oldest_first {
        ReadOrder::OldestFirst
    } else {
        ReadOrder::NewestFirst
    };
    let messages = reader
        .read_channel(&args.channel, args.count, order)
        .map_err(|err| client_error("channel read failed", err))?;

    let title = format!("#{} (last {})", args.channel.to_uppercase(), args.count);
    print_messages(&title, &messages, format);
    Ok(SUCCESS)
}

pub fn emails(args: EmailsArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let reader = rpc.reader(1)?;
    let messages = reader
        .read_emails(args.token.token, args.count, ReadOrder::NewestFirst)
        .map_err(|err| client_error("inbox read failed", err))?;
    print_messages(&format!("INBOX OKCPU #{}", args.token.token), &messages, format);
    Ok(SUCCESS)
}

pub fn page(args: TokenArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    stored(args.token, &StoredKind::Page, "", rpc, format)
}

pub fn username(args: TokenArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    stored(args.token, &StoredKind::Username, "", rpc, format)
}

pub fn data(args: DataArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let kind = StoredKind::from_key_name(&args.key);
    stored(args.token.token, &kind, &args.default, rpc, format)
}

fn stored(
    token_id: u64,
    kind: &StoredKind,
    default: &str,
    rpc: &RpcArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    let record = rpc
        .reader(1)?
        .read_stored(token_id, kind, default)
        .map_err(|err| client_error("storage read failed", err))?;
    print_stored(&record, format);
    Ok(SUCCESS)
}

pub fn has_data(args: KeyArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let present = rpc
        .reader(1)?
        .has_stored_value(args.token.token, &args.key)
        .map_err(|err| client_error("storage read failed", err))?;
    print_fields(
        &[
            ("token", args.token.token.to_string()),
            ("key", args.key),
            ("present", present.to_string()),
        ],
        format,
    );
    Ok(SUCCESS)
}

pub fn stats(rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let stats = rpc
        .reader(1)?
        .network_stats()
        .map_err(|err| client_error("stats read failed", err))?;
    print_stats(&stats, format);
    Ok(SUCCESS)
}

#[derive(Serialize)]
struct SummaryOutput {
    token_id: u64,
    owner: String,
    username: String,
    stats: Vec<okcomputer_client::ChannelStats>,
    board: Vec<okcomputer_client::Message>,
}

pub fn summary(args: TokenArgs, rpc: &RpcArgs, format: OutputFormat) -> CliResult<i32> {
    let reader = rpc.reader(1)?;
    let token_id = args.token;

    let owner = reader
        .owner_of(token_id)
        .map_err(|err| client_error("owner lookup failed", err))?;
    let username = reader
        .read_username(token_id)
        .map_err(|err| client_error("username read failed", err))?;
    let stats = reader
        .network_stats()
        .map_err(|err| client_error("stats read failed", err))?;
    let board = reader
        .read_channel(BOARD, SUMMARY_BOARD_MESSAGES, ReadOrder::NewestFirst)
        .map_err(|err| client_error("board read failed", err))?;

    if let OutputFormat::Json = format {
        let out = SummaryOutput {
            token_id,
            owner: owner.to_string(),
            username,
            stats,
            board,
        };
        println!(
            "{}",
            serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(SUCCESS);
    }

    let name = if username.is_empty() {
        "(not set)".to_string()
    } else {
        username
    };
    print_fields(
        &[
            ("token", format!("#{token_id}")),
            ("owner", owner.to_string()),
            ("username", name),
        ],
        format,
    );
    print_stats(&stats, format);
    print_messages("#BOARD (latest)", &board, format);
    Ok(SUCCESS)
}
