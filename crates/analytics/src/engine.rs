use crate::error::AnalyticsError;
use crate::report::{
    CategoryRanking, CategorySales, CityCustomerCount, CitySummary, DailyRevenue,
    DashboardReport, PaymentMethodCount, PaymentSummary, ReviewSummary, ScoreCount,
};
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{DateRange, OrderRecord};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// How many categories the ranked category view keeps.
pub const DEFAULT_TOP_N: usize = 10;
/// How many bars each of the best/worst category charts shows.
pub const DEFAULT_CHART_SIZE: usize = 5;

/// A stateless calculator bound to one order table.
///
/// It never mutates or caches anything: every call rescans the rows it is
/// given, so results depend only on the input.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    records: &'a [OrderRecord],
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [OrderRecord]) -> Self {
        Self { records }
    }

    /// The `[min, max]` of `order_approved_at`, the default filter on first load.
    pub fn full_range(&self) -> Option<DateRange> {
        let mut approvals = self.records.iter().filter_map(|r| r.order_approved_at);
        let first = approvals.next()?;
        let (min, max) = approvals.fold((first, first), |(min, max), ts| (min.min(ts), max.max(ts)));
        DateRange::new(min, max).ok()
    }

    /// Rows approved within `range`, bounds included. Unapproved rows never match.
    pub fn filter_by_date_range(&self, range: &DateRange) -> Subset<'a> {
        self.records
            .iter()
            .filter(|r| r.order_approved_at.is_some_and(|ts| range.contains(ts)))
            .collect()
    }

    /// Filters by `range` and computes every summary view over the result.
    pub fn summarize(&self, range: &DateRange, top_n: usize, chart_size: usize) -> DashboardReport {
        let subset = self.filter_by_date_range(range);
        tracing::debug!(
            start = %range.start(),
            end = %range.end(),
            rows = subset.len(),
            "Summarizing filtered orders."
        );

        DashboardReport {
            range: *range,
            rows: subset.len(),
            categories: subset.category_ranking(top_n, chart_size),
            reviews: subset.review_score_summary(),
            daily_revenue: subset.daily_revenue(),
            cities: subset.city_customer_counts(),
            payments: subset.payment_method_counts(),
        }
    }
}

/// Filters `records` to `start ..= end`, rejecting a reversed range.
pub fn filter_by_date_range(
    records: &[OrderRecord],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Subset<'_>, AnalyticsError> {
    let range = DateRange::new(start, end)?;
    Ok(Aggregator::new(records).filter_by_date_range(&range))
}

/// The rows selected by a date filter.
///
/// Every view on an empty subset yields empty sequences and `None` modes.
#[derive(Debug, Clone, Default)]
pub struct Subset<'a> {
    rows: Vec<&'a OrderRecord>,
}

impl<'a> FromIterator<&'a OrderRecord> for Subset<'a> {
    fn from_iter<I: IntoIterator<Item = &'a OrderRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> Subset<'a> {
    pub fn rows(&self) -> &[&'a OrderRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Line items per category, descending, at most `n` entries.
    ///
    /// Groups are formed in ascending category order and then stable-sorted,
    /// so equal counts stay in category-name order. Rows without a category
    /// are not counted.
    pub fn top_categories(&self, n: usize) -> Vec<CategorySales> {
        let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.rows {
            if let Some(category) = row.product_category_name_english.as_deref() {
                *groups.entry(category).or_default() += 1;
            }
        }

        let mut sales: Vec<CategorySales> = groups
            .into_iter()
            .map(|(category, products)| CategorySales {
                category: category.to_string(),
                products,
            })
            .collect();
        sales.sort_by(|a, b| b.products.cmp(&a.products));
        sales.truncate(n);
        sales
    }

    /// The top `n` categories plus the `k` best and `k` worst of them.
    pub fn category_ranking(&self, n: usize, k: usize) -> CategoryRanking {
        let top = self.top_categories(n);
        let best = top.iter().take(k).cloned().collect();

        let mut ascending = top.clone();
        ascending.sort_by_key(|c| c.products);
        ascending.truncate(k);

        CategoryRanking {
            top,
            best,
            worst: ascending,
        }
    }

    /// Review score counts ascending by score, plus the mode.
    ///
    /// The mode is the first maximum met while scanning in ascending score
    /// order, i.e. the smallest score among those tied for the highest count.
    pub fn review_score_summary(&self) -> ReviewSummary {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for score in self.rows.iter().filter_map(|r| r.review_score) {
            *counts.entry(score).or_default() += 1;
        }

        let distribution: Vec<ScoreCount> = counts
            .into_iter()
            .map(|(score, count)| ScoreCount { score, count })
            .collect();
        let most_common = first_max(distribution.iter().map(|s| (s.score, s.count)));

        ReviewSummary {
            distribution,
            most_common,
        }
    }

    /// Distinct orders and summed payments per approval day, ascending.
    ///
    /// Every day between the first and last approval is present; days with
    /// no rows carry zero orders and zero revenue.
    pub fn daily_revenue(&self) -> Vec<DailyRevenue> {
        let mut buckets: BTreeMap<NaiveDate, (HashSet<&str>, Decimal)> = BTreeMap::new();
        for row in &self.rows {
            let Some(day) = row.approved_on() else {
                continue;
            };
            let (orders, revenue) = buckets.entry(day).or_default();
            orders.insert(row.order_id.as_str());
            *revenue += row.payment_value.unwrap_or(Decimal::ZERO);
        }

        let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|day| match buckets.get(&day) {
                Some((orders, revenue)) => DailyRevenue {
                    day,
                    order_count: orders.len(),
                    revenue: *revenue,
                },
                None => DailyRevenue {
                    day,
                    order_count: 0,
                    revenue: Decimal::ZERO,
                },
            })
            .collect()
    }

    /// Distinct customers per city, descending, plus the city with the most.
    ///
    /// The top city is the first maximum in ascending city order; the list is
    /// then stable-sorted, so it is also the first entry.
    pub fn city_customer_counts(&self) -> CitySummary {
        let mut groups: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for row in &self.rows {
            groups
                .entry(row.customer_city.as_str())
                .or_default()
                .insert(row.customer_id.as_str());
        }

        let mut cities: Vec<CityCustomerCount> = groups
            .into_iter()
            .map(|(city, customers)| CityCustomerCount {
                city: city.to_string(),
                customer_count: customers.len(),
            })
            .collect();
        let most_common = first_max(cities.iter().map(|c| (c.city.clone(), c.customer_count)));
        cities.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));

        CitySummary {
            cities,
            most_common,
        }
    }

    /// Transactions per payment type, descending, plus the most used type.
    ///
    /// Equal counts keep the order in which the types first appear in the
    /// subset. Rows without a payment type are not counted.
    pub fn payment_method_counts(&self) -> PaymentSummary {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for method in self.rows.iter().filter_map(|r| r.payment_type.as_deref()) {
            match position.get(method) {
                Some(&idx) => counts[idx].1 += 1,
                None => {
                    position.insert(method, counts.len());
                    counts.push((method, 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let methods: Vec<PaymentMethodCount> = counts
            .into_iter()
            .map(|(method, count)| PaymentMethodCount {
                method: method.to_string(),
                count,
            })
            .collect();
        let most_common = methods.first().map(|m| m.method.clone());

        PaymentSummary {
            methods,
            most_common,
        }
    }
}

/// The key of the first entry holding the strictly largest count.
fn first_max<K>(entries: impl Iterator<Item = (K, usize)>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in entries {
        let is_new_max = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if is_new_max {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}
