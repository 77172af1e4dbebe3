use chrono::NaiveDate;
use core_types::DateRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of product line items sold in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub products: usize,
}

/// The top-N categories, plus the best and worst few among them.
///
/// `worst` is drawn from `top` only, never from the categories that fell
/// outside the top N.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRanking {
    pub top: Vec<CategorySales>,
    pub best: Vec<CategorySales>,
    pub worst: Vec<CategorySales>,
}

impl CategoryRanking {
    /// Line items across the top-N categories.
    pub fn total_products(&self) -> usize {
        self.top.iter().map(|c| c.products).sum()
    }

    /// Mean line items per top-N category, `None` without categories.
    pub fn average_products(&self) -> Option<Decimal> {
        if self.top.is_empty() {
            return None;
        }
        Some(Decimal::from(self.total_products()) / Decimal::from(self.top.len()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCount {
    pub score: u8,
    pub count: usize,
}

/// Review scores ascending by score, with the most frequent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub distribution: Vec<ScoreCount>,
    /// Smallest score among those sharing the highest count; `None` without reviews.
    pub most_common: Option<u8>,
}

impl ReviewSummary {
    pub fn total_reviews(&self) -> usize {
        self.distribution.iter().map(|s| s.count).sum()
    }

    /// Mean rating over every scored row.
    pub fn average_score(&self) -> Option<Decimal> {
        let total = self.total_reviews();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self
            .distribution
            .iter()
            .map(|s| u64::from(s.score) * s.count as u64)
            .sum();
        Some(Decimal::from(weighted) / Decimal::from(total))
    }
}

/// Orders and revenue approved on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    /// Distinct `order_id`s.
    pub order_count: usize,
    /// Sum of `payment_value` over every line item, so multi-item orders count once per item.
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCustomerCount {
    pub city: String,
    pub customer_count: usize,
}

/// Distinct customers per city, descending, with the city holding the most.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    pub cities: Vec<CityCustomerCount>,
    pub most_common: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodCount {
    pub method: String,
    pub count: usize,
}

/// Transactions per payment type, descending, with the most used type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub methods: Vec<PaymentMethodCount>,
    pub most_common: Option<String>,
}

/// Every summary view for one filtered subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub range: DateRange,
    /// Rows that survived the date filter.
    pub rows: usize,
    pub categories: CategoryRanking,
    pub reviews: ReviewSummary,
    pub daily_revenue: Vec<DailyRevenue>,
    pub cities: CitySummary,
    pub payments: PaymentSummary,
}

impl DashboardReport {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn total_revenue(&self) -> Decimal {
        self.daily_revenue.iter().map(|d| d.revenue).sum()
    }

    /// Sum of the per-day distinct order counts.
    pub fn total_orders(&self) -> usize {
        self.daily_revenue.iter().map(|d| d.order_count).sum()
    }
}
