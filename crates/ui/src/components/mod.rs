mod progress_ring;

pub use progress_ring::{ProgressRing, SvgShape, arc_path, ring_shapes, svg_shapes};
