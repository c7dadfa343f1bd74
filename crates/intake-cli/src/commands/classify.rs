//! classify command - report the message family of a payload

use super::CommandContext;
use crate::input::read_payload;
use anyhow::Result;
use intake_dispatch::SubmissionDispatcher;
use serde::Serialize;

#[derive(Serialize)]
struct ClassifyResult<'a> {
    family: Option<&'a str>,
}

pub fn execute(ctx: &CommandContext, input: &str) -> Result<()> {
    let payload = read_payload(input)?;
    let dispatcher = SubmissionDispatcher::new(&ctx.config.storage);
    let family = dispatcher.classify(&payload);

    if ctx.is_json() {
        println!("{}", serde_json::to_string(&ClassifyResult { family })?);
    } else {
        println!("{}", family.unwrap_or("unrecognized"));
    }

    Ok(())
}
