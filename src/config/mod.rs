mod settings;

pub use settings::{save_export_basename, Config, EXAMPLE_CONFIG};
