use crate::cli::request::RequestArgs;
use anyhow::{Result, anyhow};
use sherpa_core::{RequestTransformer, RouteDescriptor};

/// Runs the request through both runtimes. Returns whether the canonical requests are equal.
pub fn run(transformer: &RequestTransformer, args: &RequestArgs) -> Result<bool> {
    let route = RouteDescriptor::parse(&args.route);
    let rt = tokio::runtime::Builder::new_current_thread().build()?;

    let streaming = rt
        .block_on(transformer.from_streaming(args.streaming_request()?, &route))
        .map_err(|e| anyhow!("streaming runtime rejected the request: {e}"))?;
    let standard = rt
        .block_on(transformer.from_standard(args.standard_request()?, &route))
        .map_err(|e| anyhow!("standard runtime rejected the request: {e}"))?;

    if streaming == standard {
        println!("equivalent");
        return Ok(true);
    }

    tracing::warn!(route = %route, "runtimes disagree");
    println!("streaming:\n{}", serde_json::to_string_pretty(&streaming)?);
    println!("standard:\n{}", serde_json::to_string_pretty(&standard)?);
    Ok(false)
}
