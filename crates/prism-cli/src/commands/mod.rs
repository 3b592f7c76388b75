pub mod products;
pub mod run;
pub mod sessions;
pub mod templates;
pub mod usage;
pub mod utils;
