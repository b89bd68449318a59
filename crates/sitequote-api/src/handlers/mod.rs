mod concrete;
mod format;
mod health;
mod industries;
mod measure;
mod measurements;
mod quotes;
mod stall_ticks;

pub use concrete::quote_concrete;
pub use format::format_measurement;
pub use health::health_check;
pub use industries::{list_industries, list_templates};
pub use measure::measure_shape;
pub use measurements::{
    create_measurement, delete_measurement, get_measurement, list_job_measurements,
    quote_measurement,
};
pub use quotes::compute_quote;
pub use stall_ticks::build_stall_ticks;
