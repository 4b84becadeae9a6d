use serde::Serialize;
use swlink_frame::Frame;
use swlink_router::{RouteDecision, RouteEntry, Router, RouterConfig};

use crate::cmd::RouteArgs;
use crate::exit::{router_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

#[derive(Serialize)]
struct RouteOutput {
    device_addr: u8,
    target_addr: u8,
    decision: &'static str,
    port: Option<u8>,
    link_state: Option<&'static str>,
}

fn config_from_args(args: &RouteArgs) -> RouterConfig {
    RouterConfig {
        device_addr: args.device,
        num_ports: args.ports,
        routes: args
            .routes
            .iter()
            .map(|&(dest_addr, output_port)| RouteEntry {
                dest_addr,
                output_port,
            })
            .collect(),
        connected_ports: args.connected.clone(),
        channels: args.channels.clone(),
    }
}

pub fn run(args: RouteArgs, format: OutputFormat) -> CliResult<i32> {
    let config = match &args.config {
        Some(path) => RouterConfig::load(path).map_err(|err| router_error("config", err))?,
        None => config_from_args(&args),
    };
    let mut router = Router::from_config(&config).map_err(|err| router_error("config", err))?;

    let frame = Frame::new(args.target, swlink_frame::PROTOCOL_PACKET, &[]);
    let decision = router
        .route_frame(&frame)
        .map_err(|err| router_error("route", err))?;

    let out = match decision {
        RouteDecision::Local => RouteOutput {
            device_addr: router.device_addr(),
            target_addr: args.target,
            decision: "local",
            port: None,
            link_state: None,
        },
        RouteDecision::Forward(port) => RouteOutput {
            device_addr: router.device_addr(),
            target_addr: args.target,
            decision: "forward",
            port: Some(port),
            link_state: router.link(port).map(|link| link.state.as_str()),
        },
    };
    print_record(&out, format);
    Ok(SUCCESS)
}
