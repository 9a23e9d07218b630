//! Enriched dataset output and the display-side view of it.

pub mod error;
pub mod filter;
pub mod reader;
pub mod summary;
pub mod writer;

pub use error::{OutputError, Result};
pub use filter::RecordFilter;
pub use reader::{Dataset, load_dataset, read_enriched};
pub use summary::{DatasetSummary, GroupTotal, records_frame, summarize};
pub use writer::{WriteSummary, render_enriched, write_enriched};

#[cfg(test)]
mod tests {
    use super::*;
    use donation_model::OutputOptions;

    #[test]
    fn header_layout() {
        let options = OutputOptions {
            write_bom: false,
            ..OutputOptions::default()
        };
        let bytes = render_enriched(&[], &options).unwrap();
        let header = String::from_utf8(bytes).unwrap();
        insta::assert_snapshot!(header.trim_end(), @"id,donationdate,amount,donationtype,donationtype_en,year,month,month_name,quarter,day,weekday,weekday_name,week,hour,date,hijri_year,hijri_month,hijri_day,hijri_month_name,hijri_month_length,is_ramadan,ramadan_period,islamic_event");
    }

    #[test]
    fn bom_is_optional() {
        let with_bom = render_enriched(&[], &OutputOptions::default()).unwrap();
        assert!(with_bom.starts_with(b"\xEF\xBB\xBF"));
        let without = render_enriched(
            &[],
            &OutputOptions {
                write_bom: false,
                dry_run: false,
            },
        )
        .unwrap();
        assert!(without.starts_with(b"id,"));
    }
}
