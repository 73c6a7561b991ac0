//! Message rendering.

use news_core::Article;
use rand::seq::SliceRandom;
use rand::Rng;

/// Headlines prepended to every post, one picked at random.
pub const HEADERS: [&str; 5] = [
    "🚨 *BREAKING NEWS*",
    "🌍 *WORLD UPDATES*",
    "📡 *GLOBAL FLASH*",
    "⚡ *QUICK FEED*",
    "🔥 *NEWS UPDATE*",
];

/// Diagnostic message sent by the control surface.
pub const TEST_MESSAGE: &str = "🧪 *Watchdog Connection Test*: Successful!";

/// Pick a header uniformly at random.
pub fn pick_header<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HEADERS.choose(rng).copied().unwrap_or(HEADERS[0])
}

/// Render an article under the given header.
///
/// The title is upper-cased. A missing description or source name renders
/// as empty text.
pub fn format_article(article: &Article, header: &str) -> String {
    format!(
        "{header}\n\n📰 *{title}*\n\n{description}\n\n🔗 {url}\n\n📡 _Source: {source}_",
        title = article.title.to_uppercase(),
        description = article.description.as_deref().unwrap_or_default(),
        url = article.url,
        source = article.source_name(),
    )
}

/// Render an article under a random header.
pub fn render_post(article: &Article) -> String {
    let mut rng = rand::thread_rng();
    format_article(article, pick_header(&mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_format_layout() {
        let article = Article::new("http://a", "Quake hits")
            .with_description("Details")
            .with_source("Wire");

        assert_eq!(
            format_article(&article, HEADERS[0]),
            "🚨 *BREAKING NEWS*\n\n📰 *QUAKE HITS*\n\nDetails\n\n🔗 http://a\n\n📡 _Source: Wire_"
        );
    }

    #[test]
    fn test_missing_description_is_blank() {
        let article = Article::new("http://a", "t").with_source("Wire");
        let text = format_article(&article, HEADERS[1]);

        assert!(text.contains("*T*\n\n\n\n🔗 http://a"));
    }

    #[test]
    fn test_pick_header_is_from_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(HEADERS.contains(&pick_header(&mut rng)));
        }
    }

    #[test]
    fn test_render_post_starts_with_header() {
        let text = render_post(&Article::new("http://a", "x"));
        assert!(HEADERS.iter().any(|h| text.starts_with(h)));
        assert!(text.ends_with("📡 _Source: _"));
    }
}
