use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let qr_key = matches
        .get_one::<String>("qr-key")
        .map(|s| SecretString::from(s.clone()))
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --qr-key"))?;

    let qr_iv = matches
        .get_one::<String>("qr-iv")
        .map(|s| SecretString::from(s.clone()))
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --qr-iv"))?;

    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        centers: matches.get_one::<PathBuf>("centers").cloned(),
    };

    Ok((action, GlobalArgs::new(qr_key, qr_iv)))
}
