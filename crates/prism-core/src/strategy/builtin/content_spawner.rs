//! Platform-specific content generation from a short brief.
//!
//! Hook, emoji and trending-topic choices are random. Pass a `seed` parameter
//! to make a run reproducible.

use rand::Rng;
use rand::seq::SliceRandom;
use strum::{Display, EnumString};

use super::seeded_rng;
use crate::error::Result;
use crate::metrics::{self, Platform, keys};
use crate::strategy::{
    Labels, MetricFormat, MetricSpec, ParamReader, Params, RunOutput, Strategy, capitalize_first,
};

pub const MAX_VARIANTS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentFormat {
    Article,
    Post,
    Story,
    Script,
    Thread,
}

/// Parsed parameters for [`ContentSpawner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnOptions {
    pub platform: Platform,
    pub format: ContentFormat,
    pub audience: String,
    pub variants: u64,
    pub trending_topics: Vec<String>,
    pub viral: bool,
    pub hashtags: bool,
    pub seed: Option<u64>,
}

impl SpawnOptions {
    pub fn from_params(params: &Params) -> Result<Self> {
        let r = ParamReader::new(params);
        Ok(Self {
            platform: r.parse_or("platform", Platform::General)?,
            format: r.parse_or("format", ContentFormat::Article)?,
            audience: r.str_or("targetAudience", "general")?,
            variants: r.u64_in("variants", 3, 1, MAX_VARIANTS)?,
            trending_topics: r.list("trendingTopics")?,
            viral: r.bool_or("viralOptimization", false)?,
            hashtags: r.bool_or("hashtagOptimization", false)?,
            seed: r.u64_opt("seed")?,
        })
    }
}

const METRICS: &[MetricSpec] = &[
    MetricSpec::score("Structure", keys::STRUCTURE),
    MetricSpec::score("Coverage", keys::COVERAGE),
    MetricSpec::score("Readability", keys::READABILITY),
    MetricSpec::score("Engagement", keys::ENGAGEMENT),
    MetricSpec::score("Viral Potential", keys::VIRAL_POTENTIAL),
    MetricSpec::score("Sentiment", keys::SENTIMENT),
    MetricSpec::new("Content Growth", keys::TOKEN_DELTA_PCT, MetricFormat::Growth),
];

const VIRAL_EMOJI: &[&str] = &["🔥", "⚡", "🚨", "💥", "🎯", "✨"];

pub struct ContentSpawner {
    labels: Labels,
}

impl ContentSpawner {
    pub fn new() -> Self {
        Self {
            labels: Labels::new(
                "Generate Content",
                "Save Generation",
                "Copy Generated",
                "Brief Editor",
                "Generated Content",
                "Brief",
                "Content Features",
            ),
        }
    }
}

impl Default for ContentSpawner {
    fn default() -> Self {
        Self::new()
    }
}

fn instagram(topic: &str, format: ContentFormat, viral: bool) -> String {
    match format {
        ContentFormat::Post => {
            let mut content = if viral {
                format!("🔥 VIRAL ALERT: {} is EVERYWHERE right now!\n\n", topic)
            } else {
                format!("✨ Let's talk about {}...\n\n", topic)
            };
            content.push_str("Here's what you need to know:\n\n");
            content.push_str("📌 Why this matters to YOU\n");
            content.push_str("🎯 The secret most people miss\n");
            content.push_str("💡 How to get started today\n");
            content.push_str("🚀 Transform your approach\n\n");
            content.push_str("Double-tap if you agree! 👇\n\n");
            content.push_str("SAVE this post for later 💾");
            content
        }
        ContentFormat::Story => format!(
            "🔥 STORY TIME: {}\n\nSwipe up to learn more! →\n\nWhat's your experience with this?\nTell me in DMs! 💬",
            topic
        ),
        _ => format!(
            "📸 {} - Your complete guide\n\nEverything you need to know about {} in one post!",
            topic,
            topic.to_lowercase()
        ),
    }
}

fn tiktok(topic: &str, format: ContentFormat, viral: bool) -> String {
    let lower = topic.to_lowercase();
    if format != ContentFormat::Script {
        return format!(
            "🎵 {} trending now!\n\nThis {} hack will change everything! Follow for more life hacks ✨",
            topic, lower
        );
    }

    let mut content = if viral {
        format!("🎬 TikTok Script: \"{} Will SHOCK You!\"\n\n", topic)
    } else {
        format!("🎬 TikTok Script: \"{} Explained\"\n\n", topic)
    };
    content.push_str("[HOOK - First 3 seconds]\n");
    content.push_str(&if viral {
        format!("\"You won't believe what I just discovered about {}...\"\n\n", lower)
    } else {
        format!("\"Let me explain {} in 60 seconds\"\n\n", lower)
    });
    content.push_str("[MAIN CONTENT - 15-45 seconds]\n");
    content.push_str("• Point 1: The surprising truth\n");
    content.push_str("• Point 2: Why everyone gets this wrong\n");
    content.push_str("• Point 3: The game-changing tip\n\n");
    content.push_str("[CALL TO ACTION - Last 15 seconds]\n");
    content.push_str(&format!("\"Follow for more {} tips!\"\n", lower));
    content.push_str("\"Comment 'YES' if this helped!\"\n");
    content.push_str("\"Share with someone who needs this!\"");
    content
}

fn twitter<R: Rng>(topic: &str, format: ContentFormat, viral: bool, rng: &mut R) -> String {
    let lower = topic.to_lowercase();
    if format == ContentFormat::Thread {
        let mut content = if viral {
            format!("🧵 THREAD: {} is about to explode (and here's why) 1/7\n\n", topic)
        } else {
            format!("🧵 THREAD: Everything about {} 1/5\n\n", topic)
        };
        content.push_str(&format!("Why {} matters:\n\n", lower));
        content.push_str("→ Point 1: The foundation\n");
        content.push_str("→ Point 2: The strategy\n");
        content.push_str("→ Point 3: The execution\n\n");
        content.push_str("Retweet if helpful 🔄");
        return content;
    }

    let hooks: &[&str] = if viral {
        &["🔥 BREAKING:", "⚡ VIRAL:", "🚨 ALERT:"]
    } else {
        &["💡 TIP:", "🎯 FACT:", "📚 LEARN:"]
    };
    let hook = hooks.choose(rng).copied().unwrap_or(hooks[0]);

    format!(
        "{} {} is the key to unlocking your potential.\n\nHere's what 99% of people get wrong about {}:\n\n[Thread below] 👇",
        hook, topic, lower
    )
}

fn linkedin(topic: &str, viral: bool) -> String {
    let lower = topic.to_lowercase();
    let mut content = if viral {
        format!("🔥 {} is transforming industries - here's what you need to know:\n\n", topic)
    } else {
        format!("💼 Professional insights on {}:\n\n", topic)
    };
    content.push_str(&format!(
        "After 10+ years in the industry, I've learned that {} is more than just a buzzword.\n\n",
        lower
    ));
    content.push_str("Key insights:\n\n");
    content.push_str("✅ Strategic implementation matters\n");
    content.push_str("✅ Data-driven decisions are crucial\n");
    content.push_str("✅ Team alignment accelerates success\n");
    content.push_str("✅ Continuous learning drives innovation\n\n");
    content.push_str(&format!("What's your experience with {}?\n\n", lower));
    content.push_str("Share your thoughts in the comments 👇\n\n");
    content.push_str("Found this valuable? Repost to help your network ♻️");
    content
}

fn youtube(topic: &str, format: ContentFormat, viral: bool) -> String {
    let lower = topic.to_lowercase();
    if format == ContentFormat::Script {
        let mut content = if viral {
            format!("🎥 YouTube Video Script: \"{} - The VIRAL Truth!\"\n\n", topic)
        } else {
            format!("🎥 YouTube Video Script: \"{} - Complete Guide\"\n\n", topic)
        };
        content.push_str("[INTRO - 0:00-0:30]\n");
        content.push_str(&format!(
            "\"What's up everyone! Today we're diving deep into {}. If you've ever wondered about this topic, this video is for you. Make sure to subscribe and hit the bell for more content like this!\"\n\n",
            lower
        ));
        content.push_str("[MAIN CONTENT - 0:30-8:00]\n");
        content.push_str(&format!("• Section 1: Understanding {}\n", topic));
        content.push_str("• Section 2: Why it matters\n");
        content.push_str("• Section 3: Practical applications\n");
        content.push_str("• Section 4: Common mistakes\n");
        content.push_str("• Section 5: Pro tips\n\n");
        content.push_str("[OUTRO - 8:00-8:30]\n");
        content.push_str(&format!(
            "\"That's a wrap on {}! What did you think? Drop a comment below and let me know. Don't forget to like this video and subscribe for more content. See you in the next one!\"",
            lower
        ));
        return content;
    }

    let mut content = format!("🎬 {} - Everything You Need to Know\n\n", topic);
    content.push_str(&format!(
        "In this comprehensive guide, we explore {} from every angle.\n\n",
        lower
    ));
    content.push_str("📺 What you'll learn:\n");
    content.push_str("• The fundamentals\n");
    content.push_str("• Advanced strategies\n");
    content.push_str("• Real-world examples\n");
    content.push_str("• Expert insights\n\n");
    content.push_str("🔔 Subscribe for more educational content!");
    content
}

fn general(topic: &str, format: ContentFormat, viral: bool) -> String {
    if format != ContentFormat::Article {
        return format!(
            "{}: Essential insights and practical strategies for success in today's competitive landscape.",
            topic
        );
    }

    let lower = topic.to_lowercase();
    let subtitle = if viral {
        "The Viral Guide Everyone's Talking About"
    } else {
        "A Comprehensive Guide"
    };
    let mut content = format!("# {}: {}\n\n", topic, subtitle);
    content.push_str("## Introduction\n\n");
    content.push_str(&format!(
        "{} has become increasingly important in today's landscape. This guide explores everything you need to know about {}.\n\n",
        topic, lower
    ));
    content.push_str("## Key Points\n\n");
    content.push_str(&format!("1. Understanding the fundamentals of {}\n", lower));
    content.push_str("2. Best practices and proven strategies\n");
    content.push_str("3. Common challenges and solutions\n");
    content.push_str("4. Future trends and opportunities\n\n");
    content.push_str("## Conclusion\n\n");
    content.push_str(&format!(
        "{} offers tremendous potential for those who understand how to leverage it effectively. By following these guidelines, you'll be well-positioned for success.",
        topic
    ));
    content
}

/// Topic tags, platform tags and up to two trending tags.
pub fn hashtags(input: &str, platform: Platform, trending: &[String]) -> Vec<String> {
    let topic: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let platform_tags: &[&str] = match platform {
        Platform::Instagram => &["#instagood", "#photooftheday", "#love"],
        Platform::Tiktok => &["#fyp", "#viral", "#trending"],
        Platform::Twitter => &["#thread", "#tips", "#learn"],
        Platform::Linkedin => &["#professional", "#business", "#career"],
        Platform::Youtube => &["#youtube", "#subscribe", "#tutorial"],
        Platform::General => &["#content", "#tips", "#guide"],
    };

    let mut tags = vec![
        format!("#{}", topic),
        format!("#{}tips", topic),
        format!("#{}guide", topic),
    ];
    tags.extend(platform_tags.iter().map(|t| t.to_string()));
    tags.extend(trending.iter().take(2).map(|t| {
        let compact: String = t.chars().filter(|c| !c.is_whitespace()).collect();
        format!("#{}", compact)
    }));
    tags
}

fn apply_viral<R: Rng>(content: String, platform: Platform, rng: &mut R) -> String {
    match platform {
        Platform::Tiktok | Platform::Instagram => {
            let trigger = VIRAL_EMOJI.choose(rng).copied().unwrap_or(VIRAL_EMOJI[0]);
            format!(
                "{} VIRAL: {}\n\nTag 3 friends who need to see this! 👥",
                trigger, content
            )
        }
        Platform::Twitter => format!("{}\n\nRT if you agree! This is going viral 🔥", content),
        _ => format!(
            "{}\n\n🔥 This is trending everywhere - don't miss out!",
            content
        ),
    }
}

fn audience_opener(audience: &str) -> Option<&'static str> {
    match audience.to_lowercase().as_str() {
        "millennials" => Some("This hits different when you realize..."),
        "genz" => Some("No cap, this is actually fire..."),
        "professionals" => Some("From a strategic perspective..."),
        "entrepreneurs" => Some("This could be a game-changer for your business..."),
        _ => None,
    }
}

/// Word swaps used to derive alternate variants from the base content.
const VARIANT_SWAPS: [&[(&str, &str)]; 5] = [
    &[("🔥", "⚡"), ("amazing", "incredible")],
    &[("great", "fantastic"), ("good", "excellent")],
    &[("important", "crucial"), ("help", "transform")],
    &[("learn", "discover"), ("know", "understand")],
    &[("tips", "secrets"), ("guide", "blueprint")],
];

fn variant(base: &str, index: usize) -> String {
    VARIANT_SWAPS[index % VARIANT_SWAPS.len()]
        .iter()
        .fold(base.to_string(), |acc, (from, to)| replace_ignore_case(&acc, from, to))
}

fn replace_ignore_case(text: &str, from: &str, to: &str) -> String {
    match regex::RegexBuilder::new(&regex::escape(from))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(text, to).into_owned(),
        Err(_) => text.replace(from, to),
    }
}

impl ContentSpawner {
    /// Builds the content for `input` with an explicit random source.
    pub fn generate<R: Rng>(
        &self,
        input: &str,
        opts: &SpawnOptions,
        rng: &mut R,
    ) -> (String, Vec<String>) {
        let topic = capitalize_first(input.trim());
        let trending = &opts.trending_topics;
        let mut improvements = Vec::new();

        let (mut output, tag_count, note) = match opts.platform {
            Platform::Instagram => (
                instagram(&topic, opts.format, opts.viral),
                None,
                "Optimized for Instagram engagement and visual storytelling",
            ),
            Platform::Tiktok => (
                tiktok(&topic, opts.format, opts.viral),
                None,
                "Optimized for TikTok viral potential and short-form engagement",
            ),
            Platform::Twitter => (
                twitter(&topic, opts.format, opts.viral, rng),
                Some(3),
                "Optimized for Twitter character limits and engagement",
            ),
            Platform::Linkedin => (
                linkedin(&topic, opts.viral),
                Some(5),
                "Optimized for LinkedIn professional network engagement",
            ),
            Platform::Youtube => (
                youtube(&topic, opts.format, opts.viral),
                None,
                "Optimized for YouTube search and discovery",
            ),
            Platform::General => (
                general(&topic, opts.format, opts.viral),
                None,
                "Generated versatile content suitable for multiple platforms",
            ),
        };

        if opts.hashtags && opts.platform != Platform::General {
            let mut tags = hashtags(input.trim(), opts.platform, trending);
            if let Some(limit) = tag_count {
                tags.truncate(limit);
            }
            match opts.platform {
                Platform::Twitter => output.push_str(&format!(" {}", tags.join(" "))),
                Platform::Youtube => output.push_str(&format!("\n\nTags: {}", tags.join(", "))),
                _ => output.push_str(&format!("\n\n{}", tags.join(" "))),
            }
            improvements.push(format!("Generated {} optimized {} hashtags", tags.len(), opts.platform));
        }
        improvements.push(note.to_string());

        if opts.viral {
            output = apply_viral(output, opts.platform, rng);
            improvements.push("Applied viral optimization techniques for maximum shareability".to_string());
        }

        if let Some(topic) = trending.choose(rng) {
            output = match opts.platform {
                Platform::Twitter | Platform::Instagram => {
                    format!("{}\n\nAlso trending: {} 📈", output, topic)
                }
                _ => format!(
                    "{}\n\nRelated trending topic: {} - stay ahead of the curve!",
                    output, topic
                ),
            };
            improvements.push(format!(
                "Integrated {} trending topics for relevance",
                trending.len()
            ));
        }

        if let Some(opener) = audience_opener(&opts.audience) {
            output = format!("{} {}", opener, output);
            improvements.push(format!("Customized content for {} audience", opts.audience));
        }

        if opts.variants > 1 {
            let count = opts.variants as usize;
            output = (0..count)
                .map(|i| {
                    let body = if i == 0 { output.clone() } else { variant(&output, i) };
                    format!("### Variant {}\n\n{}", i + 1, body)
                })
                .collect::<Vec<_>>()
                .join("\n\n---\n\n");
            improvements.push(format!("Generated {} unique content variants", count));
        }

        (output, improvements)
    }
}

impl Strategy for ContentSpawner {
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
        let opts = SpawnOptions::from_params(params)?;
        let mut rng = seeded_rng(opts.seed);
        let (output, improvements) = self.generate(input, &opts, &mut rng);

        let brief_words: Vec<&str> = input.split_whitespace().collect();
        let metrics = metrics::bag([
            (keys::STRUCTURE, metrics::structure(&output)),
            (keys::COVERAGE, metrics::coverage(&output, &brief_words)),
            (keys::READABILITY, metrics::readability(&output)),
            (keys::ENGAGEMENT, metrics::engagement(&output, opts.platform)),
            (keys::VIRAL_POTENTIAL, metrics::viral_potential(&output)),
            (keys::SENTIMENT, metrics::sentiment(&output)),
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
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_general_article_shape() {
        let out = ContentSpawner::new()
            .run("home composting", &params(json!({ "variants": 1 })))
            .unwrap();
        assert!(out.output.starts_with("# Home composting: A Comprehensive Guide"));
        assert!(out.output.contains("## Key Points"));
        assert_eq!(
            out.improvements,
            vec!["Generated versatile content suitable for multiple platforms"]
        );
        assert_eq!(out.metrics[keys::COVERAGE], 100.0);
    }

    #[test]
    fn test_variants_are_delimited() {
        let out = ContentSpawner::new()
            .run("home composting", &params(json!({})))
            .unwrap();
        assert_eq!(out.output.matches("### Variant ").count(), 3);
        assert_eq!(out.output.matches("\n\n---\n\n").count(), 2);
        // third variant swaps "important" for "crucial"
        assert!(out.output.contains("crucial"));
    }

    #[test]
    fn test_seed_makes_output_reproducible() {
        let spawner = ContentSpawner::new();
        let p = params(json!({
            "platform": "twitter",
            "format": "post",
            "viralOptimization": true,
            "trendingTopics": "ai, rust, wasm",
            "seed": 42
        }));
        let first = spawner.run("edge computing", &p).unwrap();
        let second = spawner.run("edge computing", &p).unwrap();
        assert_eq!(first, second);
        assert!(!spawner.is_deterministic());
    }

    #[test]
    fn test_twitter_hashtags_are_capped() {
        let out = ContentSpawner::new()
            .run(
                "edge computing",
                &params(json!({
                    "platform": "twitter",
                    "format": "thread",
                    "hashtagOptimization": true,
                    "variants": 1
                })),
            )
            .unwrap();
        assert!(out.output.ends_with(" #edgecomputing #edgecomputingtips #edgecomputingguide"));
        assert_eq!(out.improvements[0], "Generated 3 optimized twitter hashtags");
    }

    #[test]
    fn test_audience_opener() {
        let out = ContentSpawner::new()
            .run(
                "remote work",
                &params(json!({ "targetAudience": "genz", "format": "post", "variants": 1 })),
            )
            .unwrap();
        assert!(out.output.starts_with("No cap, this is actually fire... Remote work:"));
    }

    #[test]
    fn test_hashtags_include_trending() {
        let tags = hashtags(
            "Meal Prep",
            Platform::Instagram,
            &["fall recipes".to_string(), "budget".to_string(), "extra".to_string()],
        );
        assert_eq!(tags[0], "#mealprep");
        assert_eq!(tags.len(), 8);
        assert_eq!(tags[6], "#fallrecipes");
    }

    #[test]
    fn test_rejects_out_of_range_variants() {
        let err = ContentSpawner::new()
            .run("anything at all", &params(json!({ "variants": 0 })))
            .unwrap_err();
        assert!(matches!(err, crate::PrismError::InvalidParams { .. }));
    }
}
