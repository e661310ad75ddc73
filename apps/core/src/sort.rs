use crate::api::CountryStat;

/// Countries ordered by case count, highest first.
///
/// The sort is stable, so countries with equal counts keep their fetched
/// order. A missing case count ranks as zero.
pub fn sort_by_cases(countries: &[CountryStat]) -> Vec<CountryStat> {
    let mut sorted = countries.to_vec();
    sorted.sort_by(|a, b| {
        b.counts
            .cases
            .unwrap_or(0)
            .cmp(&a.counts.cases.unwrap_or(0))
    });
    sorted
}
