//! Classification of legacy budgets that carry no category fields.

use crate::taxonomy::{CategoryKey, MainCategory};

/// Decides the category of a budget that has neither a main nor a
/// sub-category, from its project name alone.
pub trait ClassificationPolicy: Send + Sync {
    /// Returns the category for `project_name`, or `None` for the unknown
    /// bucket.
    fn classify(&self, project_name: &str) -> Option<CategoryKey>;
}

/// One ordered keyword rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    keywords: Vec<String>,
    category: CategoryKey,
}

impl KeywordRule {
    /// Creates a rule matching any of `keywords` as a substring.
    ///
    /// Matching ignores ASCII case.
    #[must_use]
    pub fn new<I, S>(keywords: I, category: CategoryKey) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            category,
        }
    }

    /// Category assigned on a match.
    #[must_use]
    pub fn category(&self) -> &CategoryKey {
        &self.category
    }

    fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

/// Keyword matching against the project name; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct KeywordFallback {
    rules: Vec<KeywordRule>,
}

impl KeywordFallback {
    /// Creates a policy from an ordered rule list.
    #[must_use]
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// The rules historically applied to records entered before
    /// categories existed.
    ///
    /// Order matters: income rules are tried before expense rules, and
    /// "event income" before the bare "event".
    #[must_use]
    pub fn standard() -> Self {
        use MainCategory::{Expense, Income};

        Self::new(vec![
            KeywordRule::new(
                ["会员", "会费", "membership"],
                CategoryKey::new(Income, "membership_subscription"),
            ),
            KeywordRule::new(
                ["赞助", "sponsor"],
                CategoryKey::new(Income, "sponsorship"),
            ),
            KeywordRule::new(
                ["捐赠", "捐款", "donation"],
                CategoryKey::new(Income, "donation"),
            ),
            KeywordRule::new(
                ["活动收入", "门票", "event income", "ticket"],
                CategoryKey::new(Income, "event_income"),
            ),
            KeywordRule::new(
                ["行政", "办公", "administrative", "office"],
                CategoryKey::new(Expense, "administrative_management"),
            ),
            KeywordRule::new(
                ["福利", "welfare"],
                CategoryKey::new(Expense, "member_welfare"),
            ),
            KeywordRule::new(
                ["宣传", "推广", "marketing", "promotion"],
                CategoryKey::new(Expense, "marketing_promotion"),
            ),
            KeywordRule::new(
                ["活动", "event"],
                CategoryKey::new(Expense, "event_expense"),
            ),
        ])
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordFallback {
    fn default() -> Self {
        Self::standard()
    }
}

impl ClassificationPolicy for KeywordFallback {
    fn classify(&self, project_name: &str) -> Option<CategoryKey> {
        let haystack = project_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&haystack))
            .map(|rule| rule.category.clone())
    }
}

/// Puts every budget without explicit categories in the unknown bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireExplicit;

impl ClassificationPolicy for RequireExplicit {
    fn classify(&self, _project_name: &str) -> Option<CategoryKey> {
        None
    }
}
