//! Boolean operations and fracturing on hand built polygon sets.
//!
//! Run with `RUST_LOG=debug cargo run --example polygon_set_ops` to see the engine logging.
use log::info;
use pcb_polyset::prelude::*;

fn square(x: f64, y: f64, size: f64) -> Result<PolygonSet, GeometryError> {
    let mut set = PolygonSet::new();
    set.add_outline([
        vec2(x, y),
        vec2(x + size, y),
        vec2(x + size, y + size),
        vec2(x, y + size),
    ])?;
    Ok(set)
}

fn main() -> Result<(), GeometryError> {
    env_logger::init();

    let a = square(0.0, 0.0, 10.0)?;
    let b = square(5.0, 5.0, 10.0)?;

    let mut union = a.clone();
    union.union(&b)?;
    info!("a | b: area {:.3} mm^2, {} vertices", union.area(), union.vertex_count());

    let mut difference = a.clone();
    difference.difference(&b)?;
    info!("a - b: area {:.3} mm^2", difference.area());

    let mut intersection = a.clone();
    intersection.intersection(&b)?;
    info!("a & b: area {:.3} mm^2", intersection.area());

    let mut frame = square(0.0, 0.0, 20.0)?;
    frame.difference(&square(5.0, 5.0, 10.0)?)?;
    info!("frame: {} holes", frame.hole_count());

    frame.fracture()?;
    info!("fractured frame: {} holes", frame.hole_count());
    println!("{frame}");

    frame.unfracture()?;
    info!("unfractured frame: {} holes", frame.hole_count());

    Ok(())
}
