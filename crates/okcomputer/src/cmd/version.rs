use okcomputer_client::BASE_MAINNET;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("okcomputer {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: okcomputer");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("chain_id: {}", BASE_MAINNET.chain_id);
    println!("nft_contract: {}", BASE_MAINNET.nft);
    println!("storage_contract: {}", BASE_MAINNET.storage);

    Ok(SUCCESS)
}
