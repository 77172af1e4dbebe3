use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of the transaction dataset.
///
/// A single order with several products appears as several records sharing
/// the same `order_id`. Nullable columns in the source file are `Option`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub product_id: String,
    pub customer_id: String,
    pub customer_city: String,
    pub product_category_name_english: Option<String>,
    pub payment_type: Option<String>,
    pub payment_value: Option<Decimal>,
    pub review_score: Option<u8>,
    /// `None` for orders that were never approved.
    pub order_approved_at: Option<NaiveDateTime>,

    // Carried through from the source file, not used for aggregation.
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
    pub shipping_limit_date: Option<NaiveDateTime>,
}

impl OrderRecord {
    /// The calendar day the order was approved on, if it was approved at all.
    pub fn approved_on(&self) -> Option<NaiveDate> {
        self.order_approved_at.map(|ts| ts.date())
    }
}

/// An inclusive `[start, end]` window over `order_approved_at`.
///
/// Deserializing goes through [`DateRange::new`], so a reversed range is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Builds a range, rejecting one whose start lies after its end.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range covering every instant of the days `start` through `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        Self::new(start_of_day(start), end_of_day(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Midnight at the beginning of `day`.
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// The last representable instant of `day`.
///
/// Built from the time of day rather than by stepping back from the next
/// midnight, which does not exist for `NaiveDate::MAX`.
pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| start_of_day(day))
}
