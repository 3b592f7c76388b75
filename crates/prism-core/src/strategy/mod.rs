//! Product strategies.
//!
//! Every product is a [`Strategy`]: it takes input text plus parameters and
//! returns transformed text, a metrics bag, an optional diff and the list of
//! improvements it applied. Derived products reuse a base strategy through
//! [`with_labels`], which swaps captions and delegates everything else.

pub mod builtin;
pub mod model;
pub mod params;
pub mod registry;

pub use model::{LabelOverrides, Labels, MetricFormat, MetricSpec, RunOutput};
pub use params::{ParamReader, Params};
pub use registry::StrategyRegistry;

use std::sync::Arc;

use crate::error::Result;

/// The capability contract shared by every product.
pub trait Strategy: Send + Sync {
    /// Captions shown around the editor and result panes.
    fn labels(&self) -> &Labels;

    /// Ordered metric panel; keys refer to entries of [`RunOutput::metrics`].
    fn metrics_config(&self) -> &[MetricSpec];

    /// Whether identical `(input, params)` always produce identical output.
    ///
    /// Randomized strategies only guarantee the shape of their output unless a
    /// `seed` parameter is supplied.
    fn is_deterministic(&self) -> bool {
        true
    }

    /// Transforms `input` according to `params`.
    fn run(&self, input: &str, params: &Params) -> Result<RunOutput>;
}

/// A strategy that presents `base` under different labels.
struct Relabeled {
    base: Arc<dyn Strategy>,
    labels: Labels,
}

impl Strategy for Relabeled {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        self.base.metrics_config()
    }

    fn is_deterministic(&self) -> bool {
        self.base.is_deterministic()
    }

    fn run(&self, input: &str, params: &Params) -> Result<RunOutput> {
        self.base.run(input, params)
    }
}

/// Derives a product from `base`, overriding only the given labels.
pub fn with_labels(base: Arc<dyn Strategy>, overrides: LabelOverrides) -> Arc<dyn Strategy> {
    let labels = base.labels().merged(&overrides);
    Arc::new(Relabeled { base, labels })
}

/// Uppercases the first character, leaving the rest untouched.
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
