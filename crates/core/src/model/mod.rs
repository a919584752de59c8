pub mod eeg_data;
pub mod range;
pub mod selection;

pub use eeg_data::{Channel, EegData, ShapeError};
pub use range::{RangeError, SampleRange};
pub use selection::{ChannelSelection, SelectionError, clamp_second};
