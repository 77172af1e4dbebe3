use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sections an analyst can switch between on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    OrderItems,
    ReviewScore,
    TotalRevenue,
    CustomerByCity,
    PaymentMethods,
}

impl DashboardTab {
    /// Every tab, in the order the dashboard lists them.
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::OrderItems,
        DashboardTab::ReviewScore,
        DashboardTab::TotalRevenue,
        DashboardTab::CustomerByCity,
        DashboardTab::PaymentMethods,
    ];

    /// The stable identifier used in URLs and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            DashboardTab::OrderItems => "order-items",
            DashboardTab::ReviewScore => "review-score",
            DashboardTab::TotalRevenue => "total-revenue",
            DashboardTab::CustomerByCity => "customer-by-city",
            DashboardTab::PaymentMethods => "payment-methods",
        }
    }

    /// The human readable section heading.
    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::OrderItems => "Order Items",
            DashboardTab::ReviewScore => "Review Score",
            DashboardTab::TotalRevenue => "Total Revenue",
            DashboardTab::CustomerByCity => "Customer By City",
            DashboardTab::PaymentMethods => "Most Frequently Used Payment Methods",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DashboardTab {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardTab::ALL
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownTab(s.to_string()))
    }
}
