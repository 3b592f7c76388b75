//! Built-in product strategies.

mod auto_rewrite;
mod bundle_builder;
mod content_spawner;
mod lead_generation;
mod novus;
mod seo_optimizer;

pub use auto_rewrite::{AutoRewrite, LengthControl, Purpose, RewriteOptions, Style, Tone};
pub use bundle_builder::{
    BundleBuilder, BundleOptions, DiscountStrategy, PricingStrategy, Projection, StorePlatform,
    project,
};
pub use content_spawner::{ContentFormat, ContentSpawner, SpawnOptions, hashtags};
pub use lead_generation::LeadGeneration;
pub use novus::NovusProtocol;
pub use seo_optimizer::SeoOptimizer;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Reproducible generator when `seed` is given, entropy-seeded otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
