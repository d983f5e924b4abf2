use pcb_polyset::prelude::*;

pub fn square_zone(x: f64, y: f64, size: f64, layer: Layer, net: NetCode) -> Zone {
    Zone::new(
        vec![
            vec2(x, y),
            vec2(x + size, y),
            vec2(x + size, y + size),
            vec2(x, y + size),
        ],
        layer,
        net,
    )
}

/// Board with a single ground zone covering `(0, 0)` to `(10, 10)` on the front copper.
pub fn ground_plane_board() -> Board {
    let mut board = Board::new();
    let gnd = board.add_net("GND");
    board.add_zone(square_zone(0.0, 0.0, 10.0, Layer::F_CU, gnd));
    board
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
