//! Contact detail extraction: LinkedIn, portfolio and phone number lookups
//!
//! Each lookup is an ordered chain of independent strategies. A chain tries
//! its strategies in order and the first one that finds something wins.

use regex::Regex;

/// A single, pure way of finding a contact detail in free text.
pub trait ContactStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn find(&self, text: &str) -> Option<String>;
}

/// Ordered list of strategies; first success wins.
pub struct StrategyChain {
    strategies: Vec<Box<dyn ContactStrategy>>,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Box<dyn ContactStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn first_match(&self, text: &str) -> Option<(&'static str, String)> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.find(text).map(|found| (strategy.name(), found)))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// First regex match, taken verbatim.
pub struct PatternStrategy {
    name: &'static str,
    regex: Regex,
}

impl PatternStrategy {
    pub fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Invalid contact pattern"),
        }
    }
}

impl ContactStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn find(&self, text: &str) -> Option<String> {
        self.regex.find(text).map(|m| m.as_str().trim().to_string())
    }
}

/// A `linkedin.com/in/<handle>` profile URL anywhere in the text.
pub struct LinkedInProfileStrategy {
    regex: Regex,
}

impl LinkedInProfileStrategy {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[\w-]+(?:/[\w-]+)*")
                .expect("Invalid LinkedIn regex"),
        }
    }
}

impl Default for LinkedInProfileStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStrategy for LinkedInProfileStrategy {
    fn name(&self) -> &'static str {
        "linkedin-profile"
    }

    fn find(&self, text: &str) -> Option<String> {
        let url = strip_trailing_punctuation(self.regex.find(text)?.as_str());
        let lower = url.to_lowercase();
        let canonical = if lower.starts_with("http") {
            url.to_string()
        } else if lower.starts_with("www.") {
            format!("https://{}", url)
        } else {
            format!("https://www.{}", url)
        };
        Some(canonical)
    }
}

/// The token that follows the standalone word "linkedin", if it looks like a URL.
///
/// The word must not be part of a domain such as `www.linkedin.com`, and the
/// token must not start with a dot.
pub struct LinkedInMentionStrategy {
    regex: Regex,
}

impl LinkedInMentionStrategy {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"(?im)(?:^|[^\w.])linkedin\b[\s:]*([^\s.]\S*)")
                .expect("Invalid LinkedIn mention regex"),
        }
    }
}

impl Default for LinkedInMentionStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStrategy for LinkedInMentionStrategy {
    fn name(&self) -> &'static str {
        "linkedin-mention"
    }

    fn find(&self, text: &str) -> Option<String> {
        let token = self.regex.captures(text)?.get(1)?.as_str();
        if !(token.contains('.') && token.contains('/')) {
            return None;
        }
        let url = strip_trailing_punctuation(token);
        if url.to_lowercase().starts_with("http") {
            Some(url.to_string())
        } else if url.to_lowercase().starts_with("www.") {
            Some(format!("https://{}", url))
        } else {
            Some(format!("https://www.{}", url))
        }
    }
}

/// A portfolio link on a known code/design host or a generic site path.
pub struct PortfolioStrategy {
    regex: Regex,
}

impl PortfolioStrategy {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(
                r"(?i)https?://(?:www\.)?(?:github\.com|gitlab\.com|bitbucket\.org|behance\.net|dribbble\.com|(?:[\w-]+\.)*[\w-]+\.(?:com|io|org|net))/\S+",
            )
            .expect("Invalid portfolio regex"),
        }
    }
}

impl Default for PortfolioStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStrategy for PortfolioStrategy {
    fn name(&self) -> &'static str {
        "portfolio-url"
    }

    fn find(&self, text: &str) -> Option<String> {
        self.regex
            .find_iter(text)
            .map(|m| strip_trailing_punctuation(m.as_str()))
            .find(|url| !url.to_lowercase().contains("linkedin.com"))
            .map(str::to_string)
    }
}

/// All contact lookups used by the normalizer.
pub struct ContactExtractor {
    linkedin_profile: StrategyChain,
    linkedin_mention: StrategyChain,
    portfolio: StrategyChain,
    phone: StrategyChain,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            linkedin_profile: StrategyChain::new(vec![Box::new(LinkedInProfileStrategy::new())]),
            linkedin_mention: StrategyChain::new(vec![Box::new(LinkedInMentionStrategy::new())]),
            portfolio: StrategyChain::new(vec![Box::new(PortfolioStrategy::new())]),
            phone: Self::phone_chain(),
        }
    }

    fn phone_chain() -> StrategyChain {
        StrategyChain::new(vec![
            Box::new(PatternStrategy::new(
                "parenthesized-area-code",
                r"(?:\+\d{1,3}[-.\s]?)?\(\d{3}\)[-.\s]?\d{3}[-.\s]?\d{4}\b",
            )),
            Box::new(PatternStrategy::new("ten-digit-run", r"\b\d{10}\b")),
            Box::new(PatternStrategy::new(
                "separated-triplets",
                r"(?:\+\d{1,3}[-.\s]?)?\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b",
            )),
            Box::new(PatternStrategy::new("international", r"\+\d{1,3}[-\s]?\d{6,14}\b")),
        ])
    }

    /// LinkedIn profile from the extracted value, falling back to the résumé.
    ///
    /// Returns an empty string when nothing is found anywhere.
    pub fn linkedin_url(&self, value: Option<&str>, resume: Option<&str>) -> String {
        let sources = [value, resume];
        for chain in [&self.linkedin_profile, &self.linkedin_mention] {
            for text in sources.iter().flatten() {
                if let Some((strategy, url)) = chain.first_match(text) {
                    log::debug!("LinkedIn URL found by {}", strategy);
                    return url;
                }
            }
        }
        String::new()
    }

    /// Portfolio link from the extracted value, or an empty string.
    pub fn portfolio_url(&self, value: Option<&str>) -> String {
        value
            .and_then(|text| self.portfolio.first_match(text))
            .map(|(_, url)| url)
            .unwrap_or_default()
    }

    /// Phone number from the résumé, falling back to the extracted value.
    pub fn phone_number(&self, resume: Option<&str>, value: Option<&str>) -> Option<String> {
        [resume, value].iter().flatten().find_map(|text| {
            self.phone.first_match(text).map(|(strategy, phone)| {
                log::debug!("Phone number found by {}", strategy);
                phone
            })
        })
    }
}

fn strip_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | ')') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkedin_from_value() {
        let contacts = ContactExtractor::new();
        let url = contacts.linkedin_url(Some("Profile: https://www.linkedin.com/in/jane-doe."), None);
        assert_eq!(url, "https://www.linkedin.com/in/jane-doe");
    }

    #[test]
    fn test_linkedin_scheme_is_added() {
        let contacts = ContactExtractor::new();
        assert_eq!(
            contacts.linkedin_url(Some("linkedin.com/in/jdoe"), None),
            "https://www.linkedin.com/in/jdoe"
        );
        assert_eq!(
            contacts.linkedin_url(Some("www.linkedin.com/in/jdoe,"), None),
            "https://www.linkedin.com/in/jdoe"
        );
    }

    #[test]
    fn test_linkedin_falls_back_to_resume() {
        let contacts = ContactExtractor::new();
        let resume = "Jane Doe | jane@example.com | linkedin.com/in/jane-doe-123 | Pune";
        let url = contacts.linkedin_url(Some("Not mentioned"), Some(resume));
        assert_eq!(url, "https://www.linkedin.com/in/jane-doe-123");
    }

    #[test]
    fn test_linkedin_mention_is_last_resort() {
        let contacts = ContactExtractor::new();
        let resume = "LinkedIn: lnkd.in/janedoe";
        assert_eq!(contacts.linkedin_url(None, Some(resume)), "https://www.lnkd.in/janedoe");
    }

    #[test]
    fn test_linkedin_mention_ignores_bare_domains() {
        let contacts = ContactExtractor::new();
        assert_eq!(contacts.linkedin_url(Some("www.linkedin.com/company/acme"), None), "");
        assert_eq!(contacts.linkedin_url(None, Some("Profile at linkedin.com/pub/x")), "");
        assert_eq!(
            contacts.linkedin_url(None, Some("Links\nlinkedin: lnkd.in/janedoe")),
            "https://www.lnkd.in/janedoe"
        );
    }

    #[test]
    fn test_linkedin_missing_is_empty() {
        let contacts = ContactExtractor::new();
        assert_eq!(contacts.linkedin_url(Some("Not available"), Some("No links here")), "");
        assert_eq!(contacts.linkedin_url(None, None), "");
    }

    #[test]
    fn test_portfolio_url() {
        let contacts = ContactExtractor::new();
        assert_eq!(
            contacts.portfolio_url(Some("GitHub: https://github.com/janedoe).")),
            "https://github.com/janedoe"
        );
        assert_eq!(
            contacts.portfolio_url(Some("https://jane.github.io/projects")),
            "https://jane.github.io/projects"
        );
        assert_eq!(contacts.portfolio_url(Some("Not mentioned in resume")), "");
        assert_eq!(contacts.portfolio_url(Some("https://www.linkedin.com/in/jane")), "");
        assert_eq!(contacts.portfolio_url(None), "");
    }

    #[test]
    fn test_phone_strategies_in_order() {
        let contacts = ContactExtractor::new();
        assert_eq!(
            contacts.phone_number(Some("Call (555) 123-4567 anytime"), None),
            Some("(555) 123-4567".to_string())
        );
        assert_eq!(
            contacts.phone_number(Some("Mobile 9876543210"), None),
            Some("9876543210".to_string())
        );
        assert_eq!(
            contacts.phone_number(Some("Phone: +1 555.123.4567"), None),
            Some("+1 555.123.4567".to_string())
        );
        assert_eq!(
            contacts.phone_number(Some("Reach me at +44 79111234567"), None),
            Some("+44 79111234567".to_string())
        );
    }

    #[test]
    fn test_phone_falls_back_to_value() {
        let contacts = ContactExtractor::new();
        assert_eq!(
            contacts.phone_number(Some("no digits"), Some("555-222-3333")),
            Some("555-222-3333".to_string())
        );
        assert_eq!(contacts.phone_number(Some("no digits"), None), None);
    }

    #[test]
    fn test_chain_reports_strategy() {
        let chain = ContactExtractor::phone_chain();
        assert_eq!(chain.len(), 4);
        let (name, _) = chain.first_match("555-123-4567").unwrap();
        assert_eq!(name, "separated-triplets");
    }
}
