use crate::error::DashboardError;
use analytics::{DashboardReport, Subset};
use chrono::NaiveDate;
use configuration::DashboardSettings;
use core_types::{end_of_day, start_of_day, DashboardTab, DateRange};
use dataset::OrderRepository;

pub mod error;
pub mod format;
pub mod panels;
pub mod view;

pub use format::{format_currency, format_decimal};
pub use view::{Chart, ChartKind, ChartPoint, Metric, TabView, NO_DATA_MESSAGE};

/// The presentation layer: renders dashboard tabs over a loaded dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    repository: OrderRepository,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(repository: OrderRepository, settings: DashboardSettings) -> Self {
        Self { repository, settings }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repository
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Turns picked calendar days into a filter range.
    ///
    /// `start` covers its day from midnight and `end` covers its day to the
    /// last instant. A missing bound falls back to the dataset's own bound.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DateRange, DashboardError> {
        if let (Some(start), Some(end)) = (start, end) {
            return Ok(DateRange::from_dates(start, end)?);
        }

        let bounds = self
            .repository
            .approval_bounds()
            .ok_or(DashboardError::NoApprovedOrders)?;
        let start = start.map(start_of_day).unwrap_or(bounds.start());
        let end = end.map(end_of_day).unwrap_or(bounds.end());
        Ok(DateRange::new(start, end)?)
    }

    /// Every summary view for `range`, unformatted.
    pub fn report(&self, range: &DateRange) -> DashboardReport {
        self.repository
            .aggregator()
            .summarize(range, self.settings.top_n, self.settings.chart_size)
    }

    /// Renders a single tab, computing only the view that tab needs.
    pub fn render(&self, tab: DashboardTab, range: &DateRange) -> TabView {
        let subset = self.repository.aggregator().filter_by_date_range(range);
        tracing::debug!(%tab, rows = subset.len(), "Rendering dashboard tab.");

        if subset.is_empty() {
            return TabView::no_data(tab, *range);
        }
        match self.panel(tab, &subset) {
            Some((metrics, charts)) => TabView::new(tab, *range, metrics, charts),
            None => TabView::no_data(tab, *range),
        }
    }

    /// Renders every tab in display order from a single filter pass.
    pub fn render_all(&self, range: &DateRange) -> Vec<TabView> {
        let subset = self.repository.aggregator().filter_by_date_range(range);
        DashboardTab::ALL
            .into_iter()
            .map(|tab| match self.panel(tab, &subset) {
                Some((metrics, charts)) => TabView::new(tab, *range, metrics, charts),
                None => TabView::no_data(tab, *range),
            })
            .collect()
    }

    fn panel(&self, tab: DashboardTab, subset: &Subset<'_>) -> Option<panels::Panel> {
        let settings = &self.settings;
        match tab {
            DashboardTab::OrderItems => {
                panels::order_items(&subset.category_ranking(settings.top_n, settings.chart_size))
            }
            DashboardTab::ReviewScore => panels::review_score(&subset.review_score_summary()),
            DashboardTab::TotalRevenue => {
                panels::total_revenue(&subset.daily_revenue(), &settings.currency)
            }
            DashboardTab::CustomerByCity => {
                panels::customer_by_city(&subset.city_customer_counts(), settings.top_n)
            }
            DashboardTab::PaymentMethods => panels::payment_methods(&subset.payment_method_counts()),
        }
    }
}
