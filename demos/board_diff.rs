//! Diff the front copper of two revisions of a small board.
//!
//! Run with `RUST_LOG=debug cargo run --example board_diff` to see the per net logging.
use log::info;
use pcb_polyset::prelude::*;

fn revision_a(front: Layer) -> Board {
    let mut board = Board::new();
    let gnd = board.add_net("GND");
    let sig = board.add_net("SIG");
    board
        .add_zone(Zone::new(
            vec![
                vec2(0.0, 0.0),
                vec2(20.0, 0.0),
                vec2(20.0, 5.0),
                vec2(0.0, 5.0),
            ],
            front,
            gnd,
        ))
        .add_track(Track::new(vec2(2.0, 10.0), vec2(18.0, 10.0), 0.25, front, sig))
        .add_via(Via::through(vec2(18.0, 10.0), 0.6, 0.3, sig))
        .add_module(
            Module::new("R1", vec2(2.0, 10.0)).with_pad(Pad::new(
                "1",
                PadShape::RoundRect {
                    corner_radius: 0.25,
                },
                vec2(2.0, 10.0),
                vec2(1.2, 1.0),
                LayerSet::single(front),
                sig,
            )),
        );
    board
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let layers = LayerTable::standard();
    let front = layers.layer_by_name("F.Cu")?;

    let old = revision_a(front);
    let mut new = old.clone();
    // reroute the signal track with a dogleg and add a new power net
    new.tracks.clear();
    let sig = new.add_net("SIG");
    new.add_track(Track::new(vec2(2.0, 10.0), vec2(10.0, 12.0), 0.25, front, sig))
        .add_track(Track::new(vec2(10.0, 12.0), vec2(18.0, 10.0), 0.25, front, sig));
    let vcc = new.add_net("VCC");
    new.add_track(Track::new(vec2(0.0, 15.0), vec2(20.0, 15.0), 0.5, front, vcc));

    let options = TessellationOptions::new().with_clearance(0.1);
    let diff = diff_boards(&old, &new, front, &options)?;

    for (net, net_diff) in diff.per_net.iter() {
        info!(
            "{}: {:?}, +{:.4} mm^2 -{:.4} mm^2",
            net,
            net_diff.kind,
            net_diff.added.area(),
            net_diff.removed.area()
        );
    }

    println!(
        "added {} polygons ({:.4} mm^2), removed {} polygons ({:.4} mm^2), background {} polygons",
        diff.added.polygon_count(),
        diff.added.area(),
        diff.removed.polygon_count(),
        diff.removed.area(),
        diff.unchanged.polygon_count()
    );

    Ok(())
}
