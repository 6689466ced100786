use crate::cli::request::{RequestArgs, Runtime};
use anyhow::{Result, anyhow};
use sherpa_core::{RequestTransformer, RouteDescriptor};

pub fn run(transformer: &RequestTransformer, args: &RequestArgs, runtime: Runtime) -> Result<()> {
    let route = RouteDescriptor::parse(&args.route);
    let rt = tokio::runtime::Builder::new_current_thread().build()?;

    let result = match runtime {
        Runtime::Streaming => {
            let request = args.streaming_request()?;
            rt.block_on(transformer.from_streaming(request, &route))
        }
        Runtime::Standard => {
            let request = args.standard_request()?;
            rt.block_on(transformer.from_standard(request, &route))
        }
    };

    let canonical = result.map_err(|e| anyhow!("{} [{}]: {e}", e.status_code(), e.code()))?;
    println!("{}", serde_json::to_string_pretty(&canonical)?);

    Ok(())
}
