use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use covid_core::{CountryOption, Selection, WORLDWIDE};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A row of the country picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorEntry<'a> {
    pub label: &'a str,
    pub code: &'a str,
}

impl SelectorEntry<'_> {
    pub fn selection(&self) -> Selection {
        Selection::parse(self.code)
    }
}

/// Country picker popup: a fuzzy filter over the fetched country list with
/// "Worldwide" always offered first.
#[derive(Debug, Default, Clone)]
pub struct SelectorState {
    pub open: bool,
    pub query: String,
    pub index: usize,
}

impl SelectorState {
    pub fn open_at(&mut self, index: usize) {
        self.open = true;
        self.query.clear();
        self.index = index;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.index = 0;
    }

    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.index = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.index = 0;
    }

    pub fn next(&mut self, len: usize) {
        self.index = wrap_increment(self.index, len);
    }

    pub fn prev(&mut self, len: usize) {
        self.index = wrap_decrement(self.index, len);
    }

    /// Entries matching the query, best match first. Without a query the
    /// list keeps the fetched order.
    pub fn entries<'a>(&self, options: &'a [CountryOption]) -> Vec<SelectorEntry<'a>> {
        let all = std::iter::once(SelectorEntry {
            label: "Worldwide",
            code: WORLDWIDE,
        })
        .chain(options.iter().map(|option| SelectorEntry {
            label: &option.name,
            code: &option.code,
        }));

        let query = self.query.trim();
        if query.is_empty() {
            return all.collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, SelectorEntry<'a>)> = all
            .filter_map(|entry| {
                let by_name = matcher.fuzzy_match(entry.label, query);
                let by_code = matcher.fuzzy_match(entry.code, query);
                by_name.max(by_code).map(|score| (score, entry))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }

    pub fn selected(&self, options: &[CountryOption]) -> Option<Selection> {
        self.entries(options)
            .get(self.index)
            .map(SelectorEntry::selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<CountryOption> {
        [("Peru", "PE"), ("Portugal", "PT"), ("Germany", "DE")]
            .iter()
            .map(|(name, code)| CountryOption {
                name: (*name).to_string(),
                code: (*code).to_string(),
            })
            .collect()
    }

    #[test]
    fn worldwide_comes_first_without_a_query() {
        let selector = SelectorState::default();
        let options = options();
        let entries = selector.entries(&options);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].label, "Worldwide");
        assert_eq!(selector.selected(&options), Some(Selection::Worldwide));
    }

    #[test]
    fn query_filters_by_name() {
        let mut selector = SelectorState::default();
        let options = options();
        for ch in "germ".chars() {
            selector.push(ch);
        }

        let entries = selector.entries(&options);

        assert_eq!(entries[0].label, "Germany");
        assert_eq!(
            selector.selected(&options),
            Some(Selection::Country("DE".to_string()))
        );
    }

    #[test]
    fn unmatched_query_selects_nothing() {
        let mut selector = SelectorState::default();
        for ch in "zzzz".chars() {
            selector.push(ch);
        }
        assert!(selector.entries(&options()).is_empty());
        assert_eq!(selector.selected(&options()), None);
    }

    #[test]
    fn navigation_wraps_and_typing_resets() {
        let mut selector = SelectorState::default();
        selector.prev(4);
        assert_eq!(selector.index, 3);
        selector.next(4);
        assert_eq!(selector.index, 0);

        selector.open_at(2);
        assert!(selector.open);
        selector.push('p');
        assert_eq!(selector.index, 0);
        selector.close();
        assert!(!selector.open);
        assert!(selector.query.is_empty());
    }
}
