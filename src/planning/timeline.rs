//! Gantt layout of production orders over a month-aligned date range.

use crate::model::{OrderStatus, ProductionOrder};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// Time unit of one timeline column, chosen from the length of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Granularity for a range spanning `elapsed_days` between its first and last day.
    pub fn for_span(elapsed_days: i64) -> Self {
        if elapsed_days <= 31 {
            Granularity::Day
        } else if elapsed_days <= 180 {
            Granularity::Week
        } else if elapsed_days <= 1825 {
            Granularity::Month
        } else {
            Granularity::Year
        }
    }

    /// Pixels per column.
    pub fn column_width(&self) -> f64 {
        match self {
            Granularity::Day => 30.0,
            Granularity::Week => 40.0,
            Granularity::Month => 60.0,
            Granularity::Year => 80.0,
        }
    }

    /// Narrowest bar, in columns.
    fn min_span(&self) -> f64 {
        match self {
            Granularity::Day => 0.9,
            _ => 0.1,
        }
    }

    /// Position of the start of `date`, in columns from `origin`.
    fn offset(&self, origin: NaiveDate, date: NaiveDate) -> f64 {
        match self {
            Granularity::Day => (date - origin).num_days() as f64,
            Granularity::Week => (date - origin).num_days() as f64 / 7.0,
            Granularity::Month => {
                let months = (date.year() - origin.year()) * 12 + date.month0() as i32
                    - origin.month0() as i32;
                f64::from(months) + f64::from(date.day0()) / f64::from(days_in_month(date))
            }
            Granularity::Year => {
                let days_in_year = NaiveDate::from_ymd_opt(date.year(), 12, 31)
                    .map(|last| last.ordinal())
                    .unwrap_or(365);
                f64::from(date.year() - origin.year())
                    + f64::from(date.ordinal0()) / f64::from(days_in_year)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub start: NaiveDate,
    pub label: String,
}

/// Horizontal placement of an order bar, in pixels from the left edge of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub order_id: String,
    pub product_name: String,
    pub reference: String,
    pub status: OrderStatus,
    pub progress: u8,
    /// `None` when the order span is inverted.
    pub bar: Option<Bar>,
}

/// The Gantt layout of the orders for a range of whole months.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub granularity: Granularity,
    pub column_width: f64,
    pub columns: Vec<Column>,
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Total grid width in pixels.
    pub fn width(&self) -> f64 {
        self.columns.len() as f64 * self.column_width
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Lays out `orders` over the months from `start` to `end` (only the year and
/// month of each date matter), keeping the orders that overlap the range and
/// match `search`.
pub fn layout(orders: &[ProductionOrder], start: NaiveDate, end: NaiveDate, search: &str) -> Timeline {
    let first_day = first_of_month(start);
    let last_day = last_of_month(end);
    let elapsed = (last_day - first_day).num_days();
    let granularity = Granularity::for_span(elapsed.max(0));

    let mut timeline = Timeline {
        first_day,
        last_day,
        granularity,
        column_width: granularity.column_width(),
        columns: Vec::new(),
        rows: Vec::new(),
    };
    if last_day < first_day {
        return timeline;
    }

    timeline.columns = columns(granularity, first_day, last_day);

    let mut visible: Vec<&ProductionOrder> = orders
        .iter()
        .filter(|o| o.start_date <= last_day && o.due_date >= first_day)
        .filter(|o| o.matches(search))
        .collect();
    visible.sort_by_key(|o| o.start_date);

    timeline.rows = visible
        .into_iter()
        .map(|order| TimelineRow {
            order_id: order.id.clone(),
            product_name: order.product_name.clone(),
            reference: order.reference.clone(),
            status: order.status,
            progress: order.progress,
            bar: bar(granularity, first_day, last_day, order),
        })
        .collect();
    timeline
}

fn columns(granularity: Granularity, first_day: NaiveDate, last_day: NaiveDate) -> Vec<Column> {
    let mut columns = Vec::new();
    let mut current = match granularity {
        Granularity::Year => NaiveDate::from_ymd_opt(first_day.year(), 1, 1).unwrap_or(first_day),
        _ => first_day,
    };

    while current <= last_day {
        let label = match granularity {
            Granularity::Day => current.format("%d").to_string(),
            Granularity::Week => current.format("%d/%m").to_string(),
            Granularity::Month => current.format("%b %Y").to_string(),
            Granularity::Year => current.format("%Y").to_string(),
        };
        columns.push(Column { start: current, label });

        let next = match granularity {
            Granularity::Day => current.checked_add_days(Days::new(1)),
            Granularity::Week => current.checked_add_days(Days::new(7)),
            Granularity::Month => current.checked_add_months(Months::new(1)),
            Granularity::Year => current.checked_add_months(Months::new(12)),
        };
        match next {
            Some(next) => current = next,
            None => break,
        }
    }
    columns
}

fn bar(
    granularity: Granularity,
    first_day: NaiveDate,
    last_day: NaiveDate,
    order: &ProductionOrder,
) -> Option<Bar> {
    // Year columns start on January 1st of the first year.
    let origin = match granularity {
        Granularity::Year => NaiveDate::from_ymd_opt(first_day.year(), 1, 1).unwrap_or(first_day),
        _ => first_day,
    };

    // Bars run to the end of the due day.
    let start = order.start_date.max(first_day);
    let end = order.due_date.min(last_day).checked_add_days(Days::new(1))?;
    if end <= start {
        return None;
    }

    let left = granularity.offset(origin, start);
    let span = (granularity.offset(origin, end) - left).max(granularity.min_span());
    let width = granularity.column_width();
    Some(Bar {
        left: left * width,
        width: span * width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{fixture, Collection};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn orders() -> Vec<ProductionOrder> {
        fixture(Collection::Orders).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn granularity_thresholds() {
        assert_eq!(Granularity::for_span(0), Granularity::Day);
        assert_eq!(Granularity::for_span(31), Granularity::Day);
        assert_eq!(Granularity::for_span(32), Granularity::Week);
        assert_eq!(Granularity::for_span(180), Granularity::Week);
        assert_eq!(Granularity::for_span(181), Granularity::Month);
        assert_eq!(Granularity::for_span(1825), Granularity::Month);
        assert_eq!(Granularity::for_span(1826), Granularity::Year);
    }

    #[test]
    fn single_month_uses_day_columns() {
        let timeline = layout(&orders(), day(2023, 10, 14), day(2023, 10, 2), "");

        assert_eq!(timeline.first_day, day(2023, 10, 1));
        assert_eq!(timeline.last_day, day(2023, 10, 31));
        assert_eq!(timeline.granularity, Granularity::Day);
        assert_eq!(timeline.columns.len(), 31);
        assert_eq!(timeline.width(), 31.0 * 30.0);

        let ids: Vec<_> = timeline.rows.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, ["OP-2023-003", "OP-2023-001", "OP-2023-004"]);

        // 20th to 24th inclusive: five days from offset 19.
        let bar = timeline.rows[0].bar.as_ref().unwrap();
        assert_close(bar.left, 19.0 * 30.0);
        assert_close(bar.width, 5.0 * 30.0);
    }

    #[test]
    fn bars_are_clamped_to_the_range() {
        let mut orders = orders();
        orders[0].due_date = day(2023, 11, 30);
        let timeline = layout(&orders, day(2023, 10, 1), day(2023, 10, 1), "OP-2023-001");

        // Due on Nov 30th, cut at the end of October.
        let bar = timeline.rows[0].bar.as_ref().unwrap();
        assert_close(bar.left, 24.0 * 30.0);
        assert_close(bar.width, 7.0 * 30.0);
    }

    #[test]
    fn two_months_use_week_columns() {
        let timeline = layout(&orders(), day(2023, 10, 1), day(2023, 11, 1), "");

        assert_eq!(timeline.granularity, Granularity::Week);
        assert_eq!(timeline.column_width, 40.0);
        // Oct 1st to Nov 30th: 61 days, nine columns started every seven days.
        assert_eq!(timeline.columns.len(), 9);
        assert_eq!(timeline.columns[1].start, day(2023, 10, 8));
        assert_eq!(timeline.rows.len(), 4);

        // OP-2023-002 covers Nov 1st and 2nd.
        let row = timeline.rows.iter().find(|r| r.order_id == "OP-2023-002").unwrap();
        let bar = row.bar.as_ref().unwrap();
        assert_close(bar.left, 31.0 / 7.0 * 40.0);
        assert_close(bar.width, 2.0 / 7.0 * 40.0);
    }

    #[test]
    fn a_year_uses_month_columns() {
        let timeline = layout(&orders(), day(2023, 1, 1), day(2023, 12, 1), "vis");

        assert_eq!(timeline.granularity, Granularity::Month);
        assert_eq!(timeline.columns.len(), 12);
        assert_eq!(timeline.columns[9].label, "Oct 2023");
        assert_eq!(timeline.rows.len(), 1);

        // Oct 20th to 24th: month 9, days 19 to 24 of 31.
        let bar = timeline.rows[0].bar.as_ref().unwrap();
        assert_close(bar.left, (9.0 + 19.0 / 31.0) * 60.0);
        assert_close(bar.width, 5.0 / 31.0 * 60.0);
    }

    #[test]
    fn long_ranges_use_year_columns_with_a_minimum_width() {
        let timeline = layout(&orders(), day(2020, 1, 1), day(2024, 12, 1), "REF-SP-A1");

        assert_eq!(timeline.granularity, Granularity::Year);
        assert_eq!(timeline.columns.len(), 5);
        assert_eq!(timeline.columns[0].start, day(2020, 1, 1));

        let bar = timeline.rows[0].bar.as_ref().unwrap();
        assert_close(bar.left, (3.0 + 304.0 / 365.0) * 80.0);
        assert_close(bar.width, 0.1 * 80.0);
    }

    #[test]
    fn inverted_range_is_empty() {
        let timeline = layout(&orders(), day(2023, 11, 1), day(2023, 10, 1), "");
        assert!(timeline.columns.is_empty());
        assert!(timeline.rows.is_empty());
    }

    #[test]
    fn inverted_order_has_no_bar() {
        let mut orders = orders();
        orders[0].due_date = day(2023, 10, 20);
        let timeline = layout(&orders, day(2023, 10, 1), day(2023, 10, 1), "OP-2023-001");
        assert_eq!(timeline.rows.len(), 1);
        assert!(timeline.rows[0].bar.is_none());
    }
}
