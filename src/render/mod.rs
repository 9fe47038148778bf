pub mod binner;
pub mod braille;
pub mod dashboard;
pub mod frame;
pub mod plot;
pub mod preview;

pub use braille::{BraillePlot, preprocess_to_braille};
pub use dashboard::Dashboard;
pub use frame::Renderer;
pub use plot::ChartView;
