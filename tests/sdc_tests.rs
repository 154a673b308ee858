#![cfg(feature = "sdc")]

use chrono::NaiveDate;
use posfeed::core::*;
use posfeed::sdc::SdcExtract;
use posfeed::sink::MemorySink;
use posfeed::source::MemorySource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(amount: Decimal, quantity: Decimal) -> LineItem {
    LineItem {
        department_id: "1-200-4511-0".into(),
        item_sell_type: "SALES".into(),
        actual_amount: Money::new(amount),
        quantity: Quantity { quantity },
        ..Default::default()
    }
}

fn sale_log(store: &str, items: Vec<LineItem>) -> TransactionLog {
    TransactionLog {
        id: format!("{store}-{}", items.len()),
        site_info: SiteInfo {
            id: store.into(),
            ..Default::default()
        },
        business_day: Some(TimeStamp {
            date_time: "2024-03-10T00:00:00Z".into(),
        }),
        transaction_category: "SALE_OR_RETURN".into(),
        tlog: Tlog {
            items,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn daily_run_renders_net_totals_per_store_sorted() {
    let sink = MemorySink::new();
    let logs = vec![
        sale_log("0100", vec![item(dec!(5.00), dec!(1))]),
        sale_log("0042", vec![item(dec!(2.50), dec!(1)), item(dec!(7.50), dec!(2))]),
    ];
    let extract = SdcExtract::new(MemorySource::new(logs), &sink)
        .run_at(&RunRequest::daily(), date(2024, 3, 11))
        .await
        .unwrap();

    let lines: Vec<&str> = extract.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.len() == LINE_BYTES));

    // Aggregation-route ordering: store ascending, 0042 before 0100.
    assert!(lines[0].starts_with("+0000000003+0000001000+0001000000+0000000001+0001000000"));
    assert!(lines[0].ends_with("NET TOTALS        202403100042SDC"));
    assert!(lines[1].ends_with("NET TOTALS        202403100100SDC"));

    assert_eq!(sink.uploads()[0].0, "dly_SDC_20240310.dat");
}

#[tokio::test]
async fn returns_subtract_and_media_department_is_excluded() {
    let mut returned = item(dec!(4.00), dec!(1));
    returned.is_return = true;
    let mut media = item(dec!(50.00), dec!(1));
    media.department_id = "1-200-1123-0".into();

    let logs = vec![sale_log("0042", vec![item(dec!(10.00), dec!(3)), returned, media])];
    let extract = SdcExtract::new(MemorySource::new(logs), MemorySink::new())
        .run_at(&RunRequest::daily(), date(2024, 3, 11))
        .await
        .unwrap();

    // 3 - 1 items, 10.00 - 4.00 net, one customer.
    assert!(extract.starts_with("+0000000002+0000000600+0001000000+0000000001+0001000000"));
}

#[tokio::test]
async fn training_and_wrong_category_logs_are_filtered_out() {
    let mut training = sale_log("0042", vec![item(dec!(10.00), dec!(1))]);
    training.is_training_mode = true;
    let mut other = sale_log("0042", vec![item(dec!(10.00), dec!(1))]);
    other.transaction_category = "TENDER_EXCHANGE".into();

    let extract = SdcExtract::new(MemorySource::new(vec![training, other]), MemorySink::new())
        .run_at(&RunRequest::daily(), date(2024, 3, 11))
        .await
        .unwrap();
    assert_eq!(extract, "");
}
