//! Router example: two connected ports, one unconfigured destination and a
//! link that drops.
//!
//! Run with:
//!   cargo run --example router-demo

use swlink::frame::{Frame, PROTOCOL_PACKET};
use swlink::router::{LinkState, RouteDecision, Router};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut router = Router::new(0x01, 3);
    router.add_route(0x02, 0);
    router.add_route(0x03, 1);
    router.set_link_state(0, LinkState::Connected)?;
    router.set_link_state(1, LinkState::Connected)?;
    router.open_channel(0)?;

    for target in [0x01, 0x02, 0x03, 0x05] {
        let frame = Frame::new(target, PROTOCOL_PACKET, b"payload");
        match router.route_frame(&frame) {
            Ok(RouteDecision::Local) => println!("{target:#04x}: local"),
            Ok(RouteDecision::Forward(port)) => println!("{target:#04x}: port {port}"),
            Err(err) => println!("{target:#04x}: {err}"),
        }
    }

    router.set_link_state(1, LinkState::Error)?;
    if let Err(err) = router.route_frame(&Frame::new(0x03, PROTOCOL_PACKET, &[])) {
        println!("after link 1 failed: {err}");
    }

    for link in router.links() {
        println!(
            "port {} {} tx={} errors={}",
            link.port_id, link.state, link.tx_packets, link.errors
        );
    }
    Ok(())
}
