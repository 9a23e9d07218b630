//! Dataset summaries for the display layer.

use chrono::NaiveDate;
use polars::prelude::*;

use donation_model::{EnrichedRecord, columns, hijri_month_name};

use crate::error::Result;

const DONATIONS: &str = "donations";
const TOTAL: &str = "total";

/// Donation count and amount of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub label: String,
    pub donations: usize,
    pub amount: f64,
}

/// Headline figures of a (possibly filtered) dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetSummary {
    pub donations: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    pub unique_donors: usize,
    pub unique_categories: usize,
    pub ramadan_donations: usize,
    pub ramadan_amount: f64,
    /// Percentage of donations made during Ramadan.
    pub ramadan_share: f64,
    pub ramadan_average: f64,
    pub other_average: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Event totals, largest amount first.
    pub events: Vec<GroupTotal>,
    /// Category totals by display label, largest amount first.
    pub top_categories: Vec<GroupTotal>,
    /// Totals per Hijri month, in calendar order.
    pub hijri_months: Vec<GroupTotal>,
}

fn any_to_f64(value: AnyValue<'_>) -> f64 {
    match value {
        AnyValue::Float64(v) => v,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::UInt32(v) => f64::from(v),
        _ => 0.0,
    }
}

fn any_to_usize(value: AnyValue<'_>) -> usize {
    match value {
        AnyValue::UInt32(v) => v as usize,
        AnyValue::UInt64(v) => usize::try_from(v).unwrap_or(usize::MAX),
        AnyValue::Int32(v) => usize::try_from(v).unwrap_or(0),
        AnyValue::Int64(v) => usize::try_from(v).unwrap_or(0),
        _ => 0,
    }
}

fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// One row per record with the columns the summaries aggregate over.
pub fn records_frame(records: &[&EnrichedRecord]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = records.iter().map(|r| r.raw.id.as_str()).collect();
    let amounts: Vec<f64> = records.iter().map(|r| r.raw.amount).collect();
    let categories: Vec<&str> = records.iter().map(|r| r.category_en.as_str()).collect();
    let ramadan: Vec<bool> = records.iter().map(|r| r.is_ramadan()).collect();
    let hijri_months: Vec<Option<u32>> = records
        .iter()
        .map(|r| r.hijri.map(|h| h.month))
        .collect();
    let events: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.islamic_event().map(|e| e.as_str()))
        .collect();
    DataFrame::new(vec![
        Series::new(columns::ID.into(), ids).into_column(),
        Series::new(columns::AMOUNT.into(), amounts).into_column(),
        Series::new(columns::CATEGORY_EN.into(), categories).into_column(),
        Series::new(columns::IS_RAMADAN.into(), ramadan).into_column(),
        Series::new(columns::HIJRI_MONTH.into(), hijri_months).into_column(),
        Series::new(columns::ISLAMIC_EVENT.into(), events).into_column(),
    ])
}

fn grouped(frame: &DataFrame, key: &str) -> LazyFrame {
    frame
        .clone()
        .lazy()
        .filter(col(key).is_not_null())
        .group_by([col(key)])
        .agg([len().alias(DONATIONS), col(columns::AMOUNT).sum().alias(TOTAL)])
}

fn largest_first(frame: &DataFrame, key: &str) -> PolarsResult<DataFrame> {
    grouped(frame, key)
        .sort_by_exprs(
            [col(TOTAL), col(key)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()
}

fn group_totals(
    frame: &DataFrame,
    key: &str,
    label: impl Fn(AnyValue<'_>) -> String,
) -> PolarsResult<Vec<GroupTotal>> {
    let keys = frame.column(key)?;
    let donations = frame.column(DONATIONS)?;
    let totals = frame.column(TOTAL)?;
    (0..frame.height())
        .map(|i| {
            Ok(GroupTotal {
                label: label(keys.get(i)?),
                donations: any_to_usize(donations.get(i)?),
                amount: any_to_f64(totals.get(i)?),
            })
        })
        .collect()
}

fn scalar_f64(frame: &DataFrame, name: &str) -> PolarsResult<f64> {
    Ok(any_to_f64(frame.column(name)?.get(0)?))
}

fn scalar_usize(frame: &DataFrame, name: &str) -> PolarsResult<usize> {
    Ok(any_to_usize(frame.column(name)?.get(0)?))
}

/// Summarize `records`; `top` bounds the category list.
pub fn summarize(records: &[&EnrichedRecord], top: usize) -> Result<DatasetSummary> {
    let frame = records_frame(records)?;
    let ramadan = || col(columns::IS_RAMADAN);
    let totals = frame
        .clone()
        .lazy()
        .select([
            len().alias(DONATIONS),
            col(columns::AMOUNT).sum().alias(TOTAL),
            col(columns::AMOUNT).mean().alias("average"),
            col(columns::ID).n_unique().alias("donors"),
            col(columns::CATEGORY_EN).n_unique().alias("categories"),
            ramadan().sum().alias("ramadan_donations"),
            col(columns::AMOUNT)
                .filter(ramadan())
                .sum()
                .alias("ramadan_total"),
            col(columns::AMOUNT)
                .filter(ramadan())
                .mean()
                .alias("ramadan_average"),
            col(columns::AMOUNT)
                .filter(ramadan().not())
                .mean()
                .alias("other_average"),
        ])
        .collect()?;

    let donations = scalar_usize(&totals, DONATIONS)?;
    let ramadan_donations = scalar_usize(&totals, "ramadan_donations")?;
    let ramadan_share = if donations == 0 {
        0.0
    } else {
        ramadan_donations as f64 / donations as f64 * 100.0
    };

    let events = group_totals(
        &largest_first(&frame, columns::ISLAMIC_EVENT)?,
        columns::ISLAMIC_EVENT,
        any_to_string,
    )?;
    let mut top_categories = group_totals(
        &largest_first(&frame, columns::CATEGORY_EN)?,
        columns::CATEGORY_EN,
        any_to_string,
    )?;
    top_categories.truncate(top);
    let hijri_months = group_totals(
        &grouped(&frame, columns::HIJRI_MONTH)
            .sort_by_exprs([col(columns::HIJRI_MONTH)], SortMultipleOptions::default())
            .collect()?,
        columns::HIJRI_MONTH,
        |value| {
            let month = any_to_usize(value) as u32;
            hijri_month_name(month).unwrap_or("Unknown").to_string()
        },
    )?;

    Ok(DatasetSummary {
        donations,
        total_amount: scalar_f64(&totals, TOTAL)?,
        average_amount: scalar_f64(&totals, "average")?,
        unique_donors: scalar_usize(&totals, "donors")?,
        unique_categories: scalar_usize(&totals, "categories")?,
        ramadan_donations,
        ramadan_amount: scalar_f64(&totals, "ramadan_total")?,
        ramadan_share,
        ramadan_average: scalar_f64(&totals, "ramadan_average")?,
        other_average: scalar_f64(&totals, "other_average")?,
        first_date: records.iter().map(|r| r.gregorian.date).min(),
        last_date: records.iter().map(|r| r.gregorian.date).max(),
        events,
        top_categories,
        hijri_months,
    })
}
