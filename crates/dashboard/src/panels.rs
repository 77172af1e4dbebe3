//! Turns summary views into the metrics and chart series of each tab.
//!
//! Every builder returns `None` when its view has nothing to show, which the
//! caller renders as the "no data" placeholder.

use crate::format::{format_currency, format_decimal};
use crate::view::{Chart, ChartKind, ChartPoint, Metric};
use analytics::{CategoryRanking, CategorySales, CitySummary, DailyRevenue, PaymentSummary, ReviewSummary};
use rust_decimal::Decimal;

pub type Panel = (Vec<Metric>, Vec<Chart>);

pub fn order_items(ranking: &CategoryRanking) -> Option<Panel> {
    let average = ranking.average_products()?;
    let metrics = vec![
        Metric::new("Total Items", ranking.total_products()),
        Metric::new("Average Items", format_decimal(average, 2)),
    ];
    let charts = vec![
        category_chart("Best selling categories", &ranking.best),
        category_chart("Worst selling categories", &ranking.worst),
    ];
    Some((metrics, charts))
}

/// The first bar of each category chart is the highlighted one.
fn category_chart(title: &str, sales: &[CategorySales]) -> Chart {
    Chart {
        title: title.to_string(),
        kind: ChartKind::Bar,
        x_label: "Category".to_string(),
        y_label: "Number of Sales".to_string(),
        points: sales
            .iter()
            .enumerate()
            .map(|(i, c)| ChartPoint {
                label: c.category.clone(),
                value: Decimal::from(c.products),
                highlight: i == 0,
            })
            .collect(),
    }
}

pub fn review_score(reviews: &ReviewSummary) -> Option<Panel> {
    let most_common = reviews.most_common?;
    let average = reviews.average_score()?;
    let metrics = vec![
        Metric::new("Average Review Score", format_decimal(average, 2)),
        Metric::new("Most Common Review Score", most_common),
    ];
    let chart = Chart {
        title: "Rating by customers".to_string(),
        kind: ChartKind::Bar,
        x_label: "Rating".to_string(),
        y_label: "Count".to_string(),
        points: reviews
            .distribution
            .iter()
            .map(|s| ChartPoint {
                label: s.score.to_string(),
                value: Decimal::from(s.count),
                highlight: s.score == most_common,
            })
            .collect(),
    };
    Some((metrics, vec![chart]))
}

pub fn total_revenue(daily: &[DailyRevenue], currency: &str) -> Option<Panel> {
    if daily.is_empty() {
        return None;
    }
    let revenue: Decimal = daily.iter().map(|d| d.revenue).sum();
    let orders: usize = daily.iter().map(|d| d.order_count).sum();
    let metrics = vec![
        Metric::new("Total Revenue", format_currency(revenue, currency)),
        Metric::new("Total Orders", orders),
    ];
    let chart = Chart {
        title: "Total Revenue per Day".to_string(),
        kind: ChartKind::Line,
        x_label: "Date".to_string(),
        y_label: format!("Total Revenue ({})", currency.to_ascii_uppercase()),
        points: daily
            .iter()
            .map(|d| ChartPoint {
                label: d.day.format("%Y-%m-%d").to_string(),
                value: d.revenue,
                highlight: false,
            })
            .collect(),
    };
    Some((metrics, vec![chart]))
}

/// Only the `top_n` largest cities are shown; totals cover the shown cities.
pub fn customer_by_city(cities: &CitySummary, top_n: usize) -> Option<Panel> {
    let most_common = cities.most_common.as_deref()?;
    let shown = &cities.cities[..cities.cities.len().min(top_n)];
    let top_count = shown
        .iter()
        .find(|c| c.city == most_common)
        .map(|c| c.customer_count)
        .unwrap_or_default();

    let metrics = vec![
        Metric::new("Total Customers", shown.iter().map(|c| c.customer_count).sum::<usize>()),
        Metric::new(format!("Customers in {most_common}"), top_count),
    ];
    let chart = Chart {
        title: "Customer by City".to_string(),
        kind: ChartKind::Bar,
        x_label: "City".to_string(),
        y_label: "Number of Customers".to_string(),
        points: shown
            .iter()
            .map(|c| ChartPoint {
                label: c.city.clone(),
                value: Decimal::from(c.customer_count),
                highlight: c.city == most_common,
            })
            .collect(),
    };
    Some((metrics, vec![chart]))
}

pub fn payment_methods(payments: &PaymentSummary) -> Option<Panel> {
    let most_common = payments.most_common.as_deref()?;
    let metrics = vec![
        Metric::new("Most Common Payment Method", most_common),
        Metric::new("Total Payment Methods", payments.methods.len()),
    ];
    let chart = Chart {
        title: "Most Frequently Used Payment Methods".to_string(),
        kind: ChartKind::Bar,
        x_label: "Payment Method".to_string(),
        y_label: "Number of Transactions".to_string(),
        points: payments
            .methods
            .iter()
            .map(|m| ChartPoint {
                label: m.method.clone(),
                value: Decimal::from(m.count),
                highlight: m.method == most_common,
            })
            .collect(),
    };
    Some((metrics, vec![chart]))
}
