use crate::error::DatasetError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use core_types::OrderRecord;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const REQUIRED_COLUMNS: [&str; 9] = [
    "order_id",
    "product_id",
    "customer_id",
    "customer_city",
    "product_category_name_english",
    "payment_type",
    "payment_value",
    "review_score",
    "order_approved_at",
];

/// One row of the merged orders file, as it appears on disk.
///
/// Empty cells deserialize to `None`. The delivery timestamps are optional
/// columns and default to `None` when the file omits them.
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    product_id: String,
    customer_id: String,
    customer_city: String,
    product_category_name_english: Option<String>,
    payment_type: Option<String>,
    #[serde(deserialize_with = "payment_value")]
    payment_value: Option<Decimal>,
    #[serde(deserialize_with = "review_score")]
    review_score: Option<u8>,
    #[serde(deserialize_with = "approved_at")]
    order_approved_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "purchased_at")]
    order_purchase_timestamp: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "delivered_carrier")]
    order_delivered_carrier_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "delivered_customer")]
    order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "estimated_delivery")]
    order_estimated_delivery_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "shipping_limit")]
    shipping_limit_date: Option<NaiveDateTime>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.order_id,
            product_id: row.product_id,
            customer_id: row.customer_id,
            customer_city: row.customer_city,
            product_category_name_english: row.product_category_name_english,
            payment_type: row.payment_type,
            payment_value: row.payment_value,
            review_score: row.review_score,
            order_approved_at: row.order_approved_at,
            order_purchase_timestamp: row.order_purchase_timestamp,
            order_delivered_carrier_date: row.order_delivered_carrier_date,
            order_delivered_customer_date: row.order_delivered_customer_date,
            order_estimated_delivery_date: row.order_estimated_delivery_date,
            shipping_limit_date: row.shipping_limit_date,
        }
    }
}

/// Loads order records from any CSV reader.
///
/// The header is checked first: a missing required column fails fast with
/// `DatasetError::MissingColumn` before a single row is parsed. The returned
/// rows are ordered by `order_approved_at`, with unapproved rows last and
/// ties kept in file order.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<OrderRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(DatasetError::MissingColumn { column });
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<OrderRow>() {
        let row = result.map_err(invalid_field)?;
        records.push(OrderRecord::from(row));
    }

    records.sort_by(by_approval_time);

    let unapproved = records.iter().filter(|r| r.order_approved_at.is_none()).count();
    tracing::info!(rows = records.len(), unapproved, "Loaded order records.");
    Ok(records)
}

/// Loads order records from a CSV file on disk.
pub fn load_orders_file(path: &Path) -> Result<Vec<OrderRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Reading dataset.");
    load_orders(file)
}

fn by_approval_time(a: &OrderRecord, b: &OrderRecord) -> Ordering {
    match (a.order_approved_at, b.order_approved_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Cell-level failures carry the line they were found on; everything else
/// (I/O, ragged rows) stays a plain CSV error.
fn invalid_field(err: csv::Error) -> DatasetError {
    match err.kind() {
        csv::ErrorKind::Deserialize { pos, err: cell } => DatasetError::InvalidField {
            line: pos.as_ref().map(|pos| pos.line()).unwrap_or_default(),
            reason: cell.to_string(),
        },
        _ => DatasetError::Csv(err),
    }
}

fn invalid_value<E: de::Error>(column: &str, value: &str) -> E {
    E::custom(format_args!("invalid value '{value}' for column '{column}'"))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(NaiveTime::MIN))
        })
}

/// Scores are small integers, but a column holding nulls is often written
/// out as floats (`"4.0"`), so integral floats are accepted too.
fn parse_score(value: &str) -> Option<u8> {
    if let Ok(score) = value.parse::<u8>() {
        return Some(score);
    }
    match value.parse::<f64>() {
        Ok(score) if score.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&score) => {
            Some(score as u8)
        }
        _ => None,
    }
}

fn timestamp<'de, D>(deserializer: D, column: &str) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_timestamp(&value)
            .map(Some)
            .ok_or_else(|| invalid_value(column, &value)),
        None => Ok(None),
    }
}

fn payment_value<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => Decimal::from_str(&value)
            .or_else(|_| Decimal::from_scientific(&value))
            .map(Some)
            .map_err(|_| invalid_value("payment_value", &value)),
        None => Ok(None),
    }
}

fn review_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_score(&value)
            .map(Some)
            .ok_or_else(|| invalid_value("review_score", &value)),
        None => Ok(None),
    }
}

fn approved_at<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "order_approved_at")
}

fn purchased_at<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "order_purchase_timestamp")
}

fn delivered_carrier<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "order_delivered_carrier_date")
}

fn delivered_customer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "order_delivered_customer_date")
}

fn estimated_delivery<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "order_estimated_delivery_date")
}

fn shipping_limit<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    timestamp(d, "shipping_limit_date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at,order_purchase_timestamp
o2,p2,c2,rio de janeiro,bed_bath_table,boleto,35.50,4.0,2018-01-03 09:00:00,2018-01-02 21:10:00
o1,p1,c1,sao paulo,health_beauty,credit_card,120.00,5,2018-01-02 14:30:00,2018-01-02 14:00:00
o3,p3,c3,curitiba,,voucher,,,,2018-01-04 08:00:00
o4,p4,c1,sao paulo,toys,credit_card,1.5e2,3,2018-01-02 14:30:00,
";

    #[test]
    fn loads_and_orders_by_approval_time() {
        let records = load_orders(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);

        let order_ids: Vec<_> = records.iter().map(|r| r.order_id.as_str()).collect();
        // Same approval instant keeps file order, unapproved rows go last.
        assert_eq!(order_ids, vec!["o1", "o4", "o2", "o3"]);
    }

    #[test]
    fn empty_cells_become_none() {
        let records = load_orders(SAMPLE_CSV.as_bytes()).unwrap();
        let unapproved = records.iter().find(|r| r.order_id == "o3").unwrap();
        assert_eq!(unapproved.product_category_name_english, None);
        assert_eq!(unapproved.payment_value, None);
        assert_eq!(unapproved.review_score, None);
        assert_eq!(unapproved.order_approved_at, None);
        assert!(unapproved.order_purchase_timestamp.is_some());
        assert_eq!(unapproved.shipping_limit_date, None);
    }

    #[test]
    fn numeric_cells_are_parsed() {
        let records = load_orders(SAMPLE_CSV.as_bytes()).unwrap();
        let o2 = records.iter().find(|r| r.order_id == "o2").unwrap();
        assert_eq!(o2.payment_value, Some(dec!(35.50)));
        assert_eq!(o2.review_score, Some(4));

        let o4 = records.iter().find(|r| r.order_id == "o4").unwrap();
        assert_eq!(o4.payment_value, Some(dec!(150)));
    }

    #[test]
    fn missing_column_is_named() {
        let csv = "order_id,product_id,customer_id,customer_city,product_category_name_english,payment_value,review_score,order_approved_at\n";
        let err = load_orders(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column: "payment_type" }
        ));
        assert!(err.to_string().contains("payment_type"));
    }

    #[test]
    fn malformed_timestamp_reports_line_and_column() {
        let csv = "\
order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at
o1,p1,c1,sao paulo,toys,boleto,10,5,2018-01-02 14:30:00
o2,p2,c2,sao paulo,toys,boleto,10,5,yesterday
";
        let err = load_orders(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::InvalidField { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("order_approved_at"), "{reason}");
                assert!(reason.contains("yesterday"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_optional_timestamp_names_its_column() {
        let csv = "\
order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at,shipping_limit_date
o1,p1,c1,sao paulo,toys,boleto,10,5,2018-01-02 14:30:00,soon
";
        let err = load_orders(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidField { line: 2, .. }));
        assert!(err.to_string().contains("shipping_limit_date"));
    }

    #[test]
    fn fractional_review_score_is_rejected() {
        assert_eq!(parse_score("4.5"), None);
        assert_eq!(parse_score("2.0"), Some(2));

        let csv = "\
order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at
o1,p1,c1,sao paulo,toys,boleto,10,4.5,2018-01-02 14:30:00
";
        let err = load_orders(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("review_score"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
seller_id,order_id,product_id,customer_id,customer_city,product_category_name_english,payment_type,payment_value,review_score,order_approved_at
s9,o1,p1,c1,sao paulo,toys,boleto,10,5,2018-01-02T14:30:00
";
        let records = load_orders(csv.as_bytes()).unwrap();
        assert_eq!(records[0].order_id, "o1");
        assert!(records[0].order_approved_at.is_some());
    }

    #[test]
    fn loads_from_file_and_reports_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(load_orders_file(file.path()).unwrap().len(), 4);

        let err = load_orders_file(Path::new("no/such/orders.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
