pub mod shapes;

pub use shapes::{read_shapes, read_shapes_file, ShapesColumns};
