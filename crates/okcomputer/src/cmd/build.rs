//! Transaction builders. None of these touch the network.

use std::path::Path;

use okcomputer_client::{TransactionDescriptor, TxBuilder};

use crate::cmd::{EmailArgs, KeyArgs, PostArgs, SetPageArgs, SetUsernameArgs, StoreDataArgs};
use crate::exit::{client_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_descriptor, OutputFormat};

pub fn post(args: PostArgs, format: OutputFormat) -> CliResult<i32> {
    emit(
        TxBuilder::default().build_post_message(args.token.token, &args.channel, &args.text),
        format,
    )
}

pub fn email(args: EmailArgs, format: OutputFormat) -> CliResult<i32> {
    emit(
        TxBuilder::default().build_send_email(args.token.token, args.target, &args.text),
        format,
    )
}

pub fn set_username(args: SetUsernameArgs, format: OutputFormat) -> CliResult<i32> {
    emit(
        TxBuilder::default().build_set_username(args.token.token, &args.name),
        format,
    )
}

pub fn set_page(args: SetPageArgs, format: OutputFormat) -> CliResult<i32> {
    let html = inline_or_file(args.html, args.file.as_deref())?;
    emit(
        TxBuilder::default().build_set_page(args.token.token, &html),
        format,
    )
}

pub fn store_data(args: StoreDataArgs, format: OutputFormat) -> CliResult<i32> {
    let value = inline_or_file(args.data, args.file.as_deref())?;
    emit(
        TxBuilder::default().build_store_data(args.token.token, &args.key, &value),
        format,
    )
}

pub fn remove_data(args: KeyArgs, format: OutputFormat) -> CliResult<i32> {
    emit(
        TxBuilder::default().build_remove_data(args.token.token, &args.key),
        format,
    )
}

fn emit(
    built: okcomputer_client::Result<TransactionDescriptor>,
    format: OutputFormat,
) -> CliResult<i32> {
    let tx = built.map_err(|err| client_error("failed to build transaction", err))?;
    tracing::debug!(to = %tx.to, bytes = tx.data.len(), "transaction built");
    print_descriptor(&tx, format);
    Ok(SUCCESS)
}

fn inline_or_file(inline: Option<String>, file: Option<&Path>) -> CliResult<String> {
    match (inline, file) {
        (Some(value), _) => Ok(value),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed to read {}", path.display()), err)),
        (None, None) => Err(CliError::new(USAGE, "no payload provided")),
    }
}
