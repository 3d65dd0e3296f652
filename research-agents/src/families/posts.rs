use crate::sentiment::{AggregateResult, FamilyPolicy, NoMetrics, ScoredItem, TextItem};
use serde::{Deserialize, Serialize};

const POSITIVE_POSTS: &[&str] = &[
    "Bitcoin just hit a new support level, looking bullish! 🚀",
    "Just bought the dip! Diamond hands 💎🙌",
    "Ethereum ETF approved! This is HUGE for the market!",
    "Institutional adoption is increasing every day.",
    "HODL till 100k! The moon is close 🌙",
    "Best time to accumulate BTC. Thank me later.",
    "Crypto is the future of finance. Period.",
    "Mass adoption incoming! Banks are scared.",
    "DeFi is revolutionizing everything! 🔥",
    "Bitcoin dominance rising, altseason coming!",
];

const NEGATIVE_POSTS: &[&str] = &[
    "Why is the market crashing today? I'm scared 😰",
    "Regulation news is bad for crypto...",
    "Is it too late to buy BTC? Already missed the boat.",
    "Lost all my money on meme coins, crypto is a scam.",
    "Sell everything before it drops to zero!",
    "Another exchange hack. When will this stop?",
    "Whales manipulating the market again 🐋",
    "Government crackdown incoming. Be careful.",
    "BTC is dead, long live gold.",
    "Rugpull season. Trust no one.",
];

const NEUTRAL_POSTS: &[&str] = &[
    "What's the best wallet for beginners?",
    "Can someone explain staking to me?",
    "BTC vs ETH, which one to buy?",
    "When is the next halving event?",
    "How to calculate crypto taxes?",
    "What's your portfolio allocation?",
    "Best exchange for low fees?",
    "Hardware wallet recommendations?",
];

/// Social post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
}

impl TextItem for Post {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Social posts only carry the overall label
pub struct PostPolicy;

pub type PostSentiment = AggregateResult<Post, NoMetrics, NoMetrics>;

impl FamilyPolicy for PostPolicy {
    type Item = Post;
    type ItemMetrics = NoMetrics;
    type Metrics = NoMetrics;

    fn family(&self) -> &'static str {
        "post"
    }

    fn item_metrics(&self, _item: &Post, _raw_score: f64) -> NoMetrics {
        NoMetrics {}
    }

    fn metrics(&self, _items: &[ScoredItem<Post, NoMetrics>], _overall_score: f64) -> NoMetrics {
        NoMetrics {}
    }
}

fn pick(rng: &mut fastrand::Rng, pool: &[&str], amount: usize) -> Vec<String> {
    let mut pool: Vec<&str> = pool.to_vec();
    rng.shuffle(&mut pool);
    pool.into_iter().take(amount).map(str::to_string).collect()
}

/// Draw a mixed batch of posts: 4 positive, 3 negative and 3 neutral,
/// shuffled, truncated to `count`
pub fn sample_posts(rng: &mut fastrand::Rng, count: usize) -> Vec<Post> {
    let mut texts = pick(rng, POSITIVE_POSTS, 4);
    texts.extend(pick(rng, NEGATIVE_POSTS, 3));
    texts.extend(pick(rng, NEUTRAL_POSTS, 3));
    rng.shuffle(&mut texts);

    texts
        .into_iter()
        .take(count)
        .map(|text| Post { text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_mix() {
        let mut rng = fastrand::Rng::with_seed(7);
        let posts = sample_posts(&mut rng, 10);

        assert_eq!(posts.len(), 10);

        let positive = posts.iter().filter(|p| POSITIVE_POSTS.contains(&p.text.as_str())).count();
        let negative = posts.iter().filter(|p| NEGATIVE_POSTS.contains(&p.text.as_str())).count();
        let neutral = posts.iter().filter(|p| NEUTRAL_POSTS.contains(&p.text.as_str())).count();
        assert_eq!((positive, negative, neutral), (4, 3, 3));

        let unique: HashSet<&str> = posts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_sample_truncates() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(sample_posts(&mut rng, 5).len(), 5);
        assert_eq!(sample_posts(&mut rng, 50).len(), 10);
        assert!(sample_posts(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let a = sample_posts(&mut fastrand::Rng::with_seed(99), 10);
        let b = sample_posts(&mut fastrand::Rng::with_seed(99), 10);
        assert_eq!(a, b);
    }
}
