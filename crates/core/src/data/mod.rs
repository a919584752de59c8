pub mod columnar;
pub mod mock;
pub mod palette;

pub use columnar::{ColumnarError, buffer_to_columnar};
pub use mock::{MockPreset, MockSpec, generate, generate_with};
