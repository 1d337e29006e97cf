use std::error::Error;

use clap::Args;
use serde::Serialize;
use spot_exp::to_canonical_json_bytes;

use super::boxed;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended build metadata as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    model_extension: String,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        model_extension: spot_fem::MODEL_EXTENSION.into(),
    };
    let json = to_canonical_json_bytes(&info).map_err(boxed)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
