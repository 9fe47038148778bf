//! A collection of constants.

/// Dataset read when `--data` is not given, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "covid_19.csv";

/// Equal-width bins used by the histogram chart.
pub const HISTOGRAM_BINS: usize = 25;
/// Distinct values shown by the pie chart.
pub const PIE_TOP_N: usize = 5;

/// Summary statistics are rounded to two decimal places.
///
/// 21.666 becomes 21.67
pub const SUMMARY_DECIMALS: i32 = 2;

/// Rows shown in the dataset preview unless `--rows` says otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;
/// Preview cells longer than this are cut and end in `…`.
pub const MAX_CELL_WIDTH: usize = 18;

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Graph must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Graph must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Axis labels are rounded to the first decimal place.
///
/// 14.832 becomes 14.8
pub const DECIMAL_PRECISION: usize = 1;
