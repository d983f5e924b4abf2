use super::{Layer, LayerSet, NetCode};
use crate::core::math::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Straight copper track segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Track {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    /// Track width in millimetres.
    pub width: f64,
    pub layer: Layer,
    pub net: NetCode,
}

impl Track {
    pub fn new(start: Vector2<f64>, end: Vector2<f64>, width: f64, layer: Layer, net: NetCode) -> Self {
        Track {
            start,
            end,
            width,
            layer,
            net,
        }
    }
}

/// Via connecting a span of copper layers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Via {
    pub position: Vector2<f64>,
    /// Outer copper diameter in millimetres.
    pub diameter: f64,
    /// Drill diameter in millimetres.
    pub drill: f64,
    pub top_layer: Layer,
    pub bottom_layer: Layer,
    pub net: NetCode,
}

impl Via {
    /// Via going through all copper layers.
    pub fn through(position: Vector2<f64>, diameter: f64, drill: f64, net: NetCode) -> Self {
        Self::blind(position, diameter, drill, Layer::F_CU, Layer::B_CU, net)
    }

    /// Via spanning the copper layers from `top_layer` to `bottom_layer`.
    pub fn blind(
        position: Vector2<f64>,
        diameter: f64,
        drill: f64,
        top_layer: Layer,
        bottom_layer: Layer,
        net: NetCode,
    ) -> Self {
        Via {
            position,
            diameter,
            drill,
            top_layer,
            bottom_layer,
            net,
        }
    }

    pub fn layers(&self) -> LayerSet {
        LayerSet::copper_through(self.top_layer, self.bottom_layer)
    }
}

/// Copper zone given by its outline and keep out holes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Zone {
    pub outline: Vec<Vector2<f64>>,
    pub holes: Vec<Vec<Vector2<f64>>>,
    pub layers: LayerSet,
    pub net: NetCode,
}

impl Zone {
    pub fn new(outline: Vec<Vector2<f64>>, layer: Layer, net: NetCode) -> Self {
        Zone {
            outline,
            holes: Vec::new(),
            layers: LayerSet::single(layer),
            net,
        }
    }

    pub fn with_hole(mut self, hole: Vec<Vector2<f64>>) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Copper shape of a pad.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum PadShape {
    /// Circle with diameter `size.x`.
    Circle,
    Rect,
    /// Stadium shape along the longer side of the pad size.
    Oval,
    /// Rectangle with corners rounded by `corner_radius` millimetres.
    RoundRect { corner_radius: f64 },
    /// Polygon with points relative to the pad position (before rotation).
    Custom { outline: Vec<Vector2<f64>> },
}

/// Footprint pad.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Pad {
    pub name: String,
    pub shape: PadShape,
    /// Board position of the pad center.
    pub position: Vector2<f64>,
    /// Width and height in millimetres.
    pub size: Vector2<f64>,
    /// Counter clockwise rotation in degrees.
    pub orientation: f64,
    pub layers: LayerSet,
    pub net: NetCode,
}

impl Pad {
    pub fn new(
        name: impl Into<String>,
        shape: PadShape,
        position: Vector2<f64>,
        size: Vector2<f64>,
        layers: LayerSet,
        net: NetCode,
    ) -> Self {
        Pad {
            name: name.into(),
            shape,
            position,
            size,
            orientation: 0.0,
            layers,
            net,
        }
    }

    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }
}

/// Footprint instance holding pads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Module {
    pub reference: String,
    pub position: Vector2<f64>,
    pub pads: Vec<Pad>,
}

impl Module {
    pub fn new(reference: impl Into<String>, position: Vector2<f64>) -> Self {
        Module {
            reference: reference.into(),
            position,
            pads: Vec::new(),
        }
    }

    pub fn with_pad(mut self, pad: Pad) -> Self {
        self.pads.push(pad);
        self
    }
}

/// Graphic line segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrawSegment {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub width: f64,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Text {
    pub text: String,
    pub position: Vector2<f64>,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimension {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub layer: Layer,
}

/// Alignment target mark.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Target {
    pub position: Vector2<f64>,
    pub size: f64,
    pub layer: Layer,
}

/// Non copper board graphics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Drawing {
    Segment(DrawSegment),
    Text(Text),
    Dimension(Dimension),
    Target(Target),
}

impl Drawing {
    pub fn layer(&self) -> Layer {
        match self {
            Drawing::Segment(s) => s.layer,
            Drawing::Text(t) => t.layer,
            Drawing::Dimension(d) => d.layer,
            Drawing::Target(t) => t.layer,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Drawing::Segment(_) => "drawing segment",
            Drawing::Text(_) => "text",
            Drawing::Dimension(_) => "dimension",
            Drawing::Target(_) => "target",
        }
    }
}

/// Reference to any item on a board.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BoardItem<'a> {
    Track(&'a Track),
    Via(&'a Via),
    Zone(&'a Zone),
    Pad(&'a Pad),
    Drawing(&'a Drawing),
}

impl<'a> BoardItem<'a> {
    pub fn layers(&self) -> LayerSet {
        match self {
            BoardItem::Track(t) => LayerSet::single(t.layer),
            BoardItem::Via(v) => v.layers(),
            BoardItem::Zone(z) => z.layers,
            BoardItem::Pad(p) => p.layers,
            BoardItem::Drawing(d) => LayerSet::single(d.layer()),
        }
    }

    /// Net code of the item, `None` for items that cannot carry a net.
    pub fn net(&self) -> Option<NetCode> {
        match self {
            BoardItem::Track(t) => Some(t.net),
            BoardItem::Via(v) => Some(v.net),
            BoardItem::Zone(z) => Some(z.net),
            BoardItem::Pad(p) => Some(p.net),
            BoardItem::Drawing(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BoardItem::Track(_) => "track",
            BoardItem::Via(_) => "via",
            BoardItem::Zone(_) => "zone",
            BoardItem::Pad(_) => "pad",
            BoardItem::Drawing(d) => d.kind_name(),
        }
    }
}
