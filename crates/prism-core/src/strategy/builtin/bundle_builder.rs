//! Digital-product bundle builder with pricing and conversion projections.
//!
//! Product prices and perceived values are drawn at random; a `seed`
//! parameter makes the bundle reproducible.

use rand::Rng;
use strum::{Display, EnumString};

use super::seeded_rng;
use crate::error::Result;
use crate::metrics::{self, keys};
use crate::strategy::{Labels, MetricFormat, MetricSpec, ParamReader, Params, RunOutput, Strategy};

pub const MAX_BUNDLE_SIZE: u64 = 10;
const VISITORS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PricingStrategy {
    Value,
    Competitive,
    Premium,
    Economy,
}

impl PricingStrategy {
    fn multiplier(self) -> f64 {
        match self {
            PricingStrategy::Value => 0.85,
            PricingStrategy::Competitive => 0.78,
            PricingStrategy::Premium => 1.2,
            PricingStrategy::Economy => 0.65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DiscountStrategy {
    Tiered,
    Bulk,
    Early,
    Seasonal,
}

impl DiscountStrategy {
    fn multiplier(self, product_count: usize) -> f64 {
        match self {
            DiscountStrategy::Tiered if product_count >= 5 => 0.8,
            DiscountStrategy::Tiered if product_count >= 3 => 0.9,
            DiscountStrategy::Tiered => 1.0,
            DiscountStrategy::Bulk => f64::max(0.6, 1.0 - product_count as f64 * 0.05),
            DiscountStrategy::Early => 0.75,
            DiscountStrategy::Seasonal => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorePlatform {
    Gumroad,
    Shopify,
    Stripe,
    Woocommerce,
}

impl StorePlatform {
    fn base_conversion(self) -> f64 {
        match self {
            StorePlatform::Gumroad => 0.12,
            StorePlatform::Shopify => 0.15,
            StorePlatform::Stripe => 0.18,
            StorePlatform::Woocommerce => 0.14,
        }
    }

    fn checkout_lines(self) -> &'static [&'static str] {
        match self {
            StorePlatform::Gumroad => &[
                "🚀 **One-Click Purchase on Gumroad**",
                "🔐 Instant download after payment",
            ],
            StorePlatform::Shopify => &[
                "🛒 **Seamless Shopify Experience**",
                "📱 Mobile-optimized checkout",
            ],
            StorePlatform::Stripe => &[
                "💳 **Secure Stripe Payments**",
                "🌍 Worldwide payment methods accepted",
            ],
            StorePlatform::Woocommerce => &[],
        }
    }
}

/// Parsed parameters for [`BundleBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOptions {
    pub pricing: PricingStrategy,
    pub discount: DiscountStrategy,
    pub platform: StorePlatform,
    pub size: usize,
    pub target_revenue: f64,
    pub conversion_optimization: bool,
    pub revenue_maximization: bool,
    pub customer_satisfaction: bool,
    pub seed: Option<u64>,
}

impl BundleOptions {
    pub fn from_params(params: &Params) -> Result<Self> {
        let r = ParamReader::new(params);
        Ok(Self {
            pricing: r.parse_or("pricingStrategy", PricingStrategy::Value)?,
            discount: r.parse_or("discountStrategy", DiscountStrategy::Tiered)?,
            platform: r.parse_or("targetPlatform", StorePlatform::Gumroad)?,
            size: r.u64_in("bundleSize", 3, 1, MAX_BUNDLE_SIZE)? as usize,
            target_revenue: r.u64_or("targetRevenue", 10_000)? as f64,
            conversion_optimization: r.bool_or("conversionOptimization", false)?,
            revenue_maximization: r.bool_or("revenueMaximization", false)?,
            customer_satisfaction: r.bool_or("customerSatisfaction", false)?,
            seed: r.u64_opt("seed")?,
        })
    }
}

const PRODUCT_TYPES: &[&str] = &[
    "Course", "Guide", "Template", "Toolkit", "Checklist", "Workbook", "Masterclass", "Blueprint",
    "Framework", "System",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BundleProduct {
    pub name: String,
    pub kind: &'static str,
    pub price: u32,
    pub value: u32,
    pub description: String,
}

/// Pricing outcome for one candidate bundle price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub individual_total: f64,
    pub bundle_price: f64,
    pub savings_amount: f64,
    pub savings_pct: f64,
    pub conversion_pct: f64,
    pub projected_revenue: f64,
}

fn generate_products<R: Rng>(input: &str, size: usize, rng: &mut R) -> Vec<BundleProduct> {
    let topic = input.trim().to_lowercase();
    (0..size)
        .map(|i| {
            let kind = PRODUCT_TYPES[i % PRODUCT_TYPES.len()];
            BundleProduct {
                name: format!("{} {}", topic, kind),
                kind,
                price: rng.gen_range(25..75),
                value: rng.gen_range(100..200),
                description: format!(
                    "Comprehensive {} covering {} fundamentals and advanced strategies",
                    kind.to_lowercase(),
                    topic
                ),
            }
        })
        .collect()
}

fn bundle_price(products: &[BundleProduct], pricing: PricingStrategy, discount: DiscountStrategy) -> f64 {
    let base: f64 = products.iter().map(|p| f64::from(p.price)).sum();
    (base * pricing.multiplier() * discount.multiplier(products.len())).round()
}

/// Savings, conversion and revenue for `price` against the summed product values.
pub fn project(price: f64, individual_total: f64, platform: StorePlatform) -> Projection {
    let savings_amount = individual_total - price;
    let savings_pct = if individual_total > 0.0 {
        savings_amount / individual_total * 100.0
    } else {
        0.0
    };

    let boost = if savings_pct > 50.0 {
        1.4
    } else if savings_pct > 30.0 {
        1.2
    } else if savings_pct > 20.0 {
        1.1
    } else {
        1.0
    };
    let conversion = platform.base_conversion() * boost;

    Projection {
        individual_total,
        bundle_price: price,
        savings_amount,
        savings_pct: savings_pct.round(),
        conversion_pct: (conversion * 100.0).round(),
        projected_revenue: (price * conversion * VISITORS).round(),
    }
}

fn describe(products: &[BundleProduct], p: &Projection, platform: StorePlatform) -> String {
    let headline = products
        .first()
        .and_then(|first| first.name.split_whitespace().next())
        .unwrap_or("Digital");
    let total_value: u32 = products.iter().map(|p| p.value).sum();

    let mut out = format!("# Ultimate {} Bundle\n\n", headline);
    out.push_str(&format!(
        "🎯 **{} Premium Products Worth ${}**\n",
        products.len(),
        total_value
    ));
    out.push_str(&format!("💰 **Your Price: Only ${}**\n", p.bundle_price));
    out.push_str(&format!(
        "✨ **Save ${} ({}% OFF!)**\n\n",
        p.savings_amount, p.savings_pct
    ));

    out.push_str("## What You Get:\n\n");
    for (i, product) in products.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** (Value: ${})\n   {}\n\n",
            i + 1,
            product.name,
            product.value,
            product.description
        ));
    }

    out.push_str("## Why This Bundle?\n\n");
    out.push_str("✅ Complete system from beginner to expert\n");
    out.push_str("✅ Proven strategies used by professionals\n");
    out.push_str("✅ Immediate access to all materials\n");
    out.push_str("✅ Lifetime updates included\n");
    out.push_str("✅ 30-day money-back guarantee\n\n");

    for line in platform.checkout_lines() {
        out.push_str(line);
        out.push('\n');
    }

    out.push_str("\n⚡ **Limited Time Offer - Act Now!**\n\n");
    out.push_str(&format!(
        "*Individual products would cost ${} - get everything for just ${}!*",
        p.individual_total, p.bundle_price
    ));
    out
}

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("Bundle Value", "bundleValue", MetricFormat::Currency),
    MetricSpec::new("Bundle Price", "bundlePrice", MetricFormat::Currency),
    MetricSpec::new("Savings", "savingsPercentage", MetricFormat::WholePercent),
    MetricSpec::new("Conversion Rate", "conversionRate", MetricFormat::WholePercent),
    MetricSpec::new("Revenue Projection", "projectedRevenue", MetricFormat::Currency),
    MetricSpec::score("Customer Satisfaction", "customerSatisfaction"),
    MetricSpec::score("Competitive Edge", "competitiveAdvantage"),
];

pub struct BundleBuilder {
    labels: Labels,
}

impl BundleBuilder {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Build Bundle",
                "Save Bundle",
                "Copy Bundle",
                "Bundle Concept",
                "Bundle Structure",
                "Concept",
                "Bundle Optimizations",
            ),
        }
    }

    /// Builds the bundle description and its final projection.
    pub fn build<R: Rng>(
        &self,
        input: &str,
        opts: &BundleOptions,
        rng: &mut R,
    ) -> (String, Projection, Vec<String>) {
        let mut improvements = Vec::new();
        let products = generate_products(input, opts.size, rng);
        let individual_total: f64 = products.iter().map(|p| f64::from(p.value)).sum();

        let mut price = bundle_price(&products, opts.pricing, opts.discount);

        if opts.revenue_maximization {
            let candidates = [(price * 0.9).round(), price, (price * 1.1).round()];
            let mut best = price;
            let mut best_revenue = f64::MIN;
            for candidate in candidates {
                let revenue = project(candidate, individual_total, opts.platform).projected_revenue;
                if revenue > best_revenue {
                    best = candidate;
                    best_revenue = revenue;
                }
            }
            price = best;
            improvements.push(format!(
                "Revenue maximization: optimized price to ${} for maximum revenue",
                price
            ));
        }

        if opts.conversion_optimization {
            let savings_rate = (individual_total - price) / individual_total * 100.0;
            if savings_rate < 25.0 {
                price = (individual_total * 0.7).round();
                improvements
                    .push("Conversion optimization: increased savings to boost conversion rate".to_string());
            }
        }

        if opts.customer_satisfaction {
            price = (price * 0.95).round();
            improvements.push(
                "Customer satisfaction: adjusted pricing for maximum value perception".to_string(),
            );
        }

        let projection = project(price, individual_total, opts.platform);
        let output = describe(&products, &projection, opts.platform);

        improvements.push(format!(
            "Generated {}-product bundle with {} pricing strategy",
            opts.size, opts.pricing
        ));
        improvements.push(format!(
            "Applied {} discount structure for optimal appeal",
            opts.discount
        ));
        improvements.push(format!(
            "Optimized for {} platform conversion patterns",
            opts.platform
        ));
        improvements.push(format!(
            "Projected {}% savings drives {}% conversion",
            projection.savings_pct, projection.conversion_pct
        ));
        if projection.projected_revenue >= opts.target_revenue {
            improvements.push(format!(
                "Revenue target achieved: ${} vs ${} target",
                projection.projected_revenue, opts.target_revenue
            ));
        } else {
            improvements.push(format!(
                "Revenue projection: ${} (target: ${})",
                projection.projected_revenue, opts.target_revenue
            ));
        }

        (output, projection, improvements)
    }
}

impl Default for BundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BundleBuilder {
    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn metrics_config(&self) -> &[MetricSpec] {
        METRICS
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn run(&self, input: &str, params: &Params) -> Result<RunOutput> {
        let opts = BundleOptions::from_params(params)?;
        let mut rng = seeded_rng(opts.seed);
        let (output, projection, improvements) = self.build(input, &opts, &mut rng);

        let metrics = metrics::bag([
            ("bundleValue", projection.individual_total),
            ("bundlePrice", projection.bundle_price),
            ("savingsPercentage", projection.savings_pct),
            ("conversionRate", projection.conversion_pct),
            ("projectedRevenue", projection.projected_revenue),
            (
                "customerSatisfaction",
                if opts.customer_satisfaction { 95.0 } else { 85.0 },
            ),
            (
                "competitiveAdvantage",
                if projection.savings_pct > 30.0 { 90.0 } else { 75.0 },
            ),
            (keys::TOKEN_DELTA_PCT, metrics::token_delta_pct(input, &output)),
        ]);

        Ok(RunOutput {
            output,
            metrics,
            diff: None,
            improvements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[test]
    fn test_discount_multipliers() {
        assert_eq!(DiscountStrategy::Tiered.multiplier(2), 1.0);
        assert_eq!(DiscountStrategy::Tiered.multiplier(3), 0.9);
        assert_eq!(DiscountStrategy::Tiered.multiplier(5), 0.8);
        assert_eq!(DiscountStrategy::Bulk.multiplier(10), 0.6);
    }

    #[test]
    fn test_projection_boosts_conversion_with_savings() {
        // 60% savings on gumroad: 0.12 * 1.4
        let p = project(40.0, 100.0, StorePlatform::Gumroad);
        assert_eq!(p.savings_pct, 60.0);
        assert_eq!(p.conversion_pct, 17.0);
        assert_eq!(p.projected_revenue, (40.0_f64 * 0.12 * 1.4 * 1000.0).round());

        let p = project(95.0, 100.0, StorePlatform::Stripe);
        assert_eq!(p.conversion_pct, 18.0);
    }

    #[test]
    fn test_products_within_price_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let products = generate_products("Photography", 12, &mut rng);
        assert_eq!(products[0].name, "photography Course");
        assert_eq!(products[10].kind, "Course");
        for p in &products {
            assert!((25..75).contains(&p.price));
            assert!((100..200).contains(&p.value));
        }
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let params = json!({ "seed": 9, "bundleSize": 4, "revenueMaximization": true })
            .as_object()
            .cloned()
            .unwrap();
        let builder = BundleBuilder::new();
        let a = builder.run("watercolor painting", &params).unwrap();
        let b = builder.run("watercolor painting", &params).unwrap();
        assert_eq!(a, b);
        assert!(a.output.starts_with("# Ultimate watercolor Bundle"));
        assert_eq!(a.output.matches("(Value: $").count(), 4);
        assert!(a.improvements[0].starts_with("Revenue maximization"));
    }

    #[test]
    fn test_conversion_optimization_guarantees_savings() {
        let params = json!({ "seed": 1, "pricingStrategy": "premium", "conversionOptimization": true })
            .as_object()
            .cloned()
            .unwrap();
        let out = BundleBuilder::new().run("yoga", &params).unwrap();
        assert!(out.metrics["savingsPercentage"] >= 25.0);
    }
}
