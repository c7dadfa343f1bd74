//! submit command - build a URL submission message

use super::CommandContext;
use anyhow::{bail, Result};
use intake_core::types::{ContentTypeRegistry, StaticContentTypeRegistry, URLSubmission};
use tracing::info;

pub fn execute(
    ctx: &CommandContext,
    content_type: Option<&str>,
    content_id: &str,
    url: &str,
) -> Result<()> {
    let registry = StaticContentTypeRegistry::new();
    let message = build(&registry, content_type, content_id, url)?;

    info!(
        "Built {} submission for {}",
        message.content_type, message.content_id
    );

    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(&message.to_raw())?);
    } else {
        println!("{}", message.to_json());
    }

    Ok(())
}

fn build(
    registry: &dyn ContentTypeRegistry,
    content_type: Option<&str>,
    content_id: &str,
    url: &str,
) -> Result<URLSubmission> {
    if content_id.is_empty() {
        bail!("Content id must not be empty");
    }

    let descriptor = match content_type {
        Some(name) => registry.require(name)?,
        None => match registry.guess_from_path(url) {
            Some(descriptor) => descriptor,
            None => bail!(
                "Cannot guess content type from {}; pass --content-type ({})",
                url,
                registry.names().join(", ")
            ),
        },
    };

    Ok(URLSubmission::new(descriptor.name, content_id, url))
}
