//! Shared test fixtures: a miniature Delivery Center data directory
//!
//! Six orders across three stores and two hubs, with deliberate quirks:
//! mixed encodings (stores and hubs ship as Latin-1 with semicolons), a
//! missing order amount, a missing payment fee, a missing driver, an
//! unmatched store, and two all-distinct columns (order_moment and
//! delivery_id) that must fall to degenerate-column removal.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ORDERS_CSV: &str = "\
order_id,store_id,channel_id,payment_order_id,delivery_order_id,order_moment,order_amount,order_status
1,10,300,1001,501,2021-01-01 10:00:00,52.0,DELIVERED
2,10,300,1002,502,2021-01-01 11:30:00,,CANCELED
3,20,301,1003,503,2021-01-02 09:15:00,18.5,DELIVERED
4,20,301,1004,504,2021-01-02 14:45:00,31.0,DELIVERED
5,30,302,1005,505,2021-01-03 19:20:00,24.9,CANCELED
6,99,302,1006,506,2021-01-03 21:05:00,12.0,DELIVERED
";

// Latin-1 bytes, semicolon-delimited: 0xe3 = a-tilde, 0xf3 = o-acute,
// 0xea = e-circumflex
const STORES_CSV: &[u8] = b"\
store_id;store_name;store_segment;hub_id
10;Padaria S\xe3o Jo\xe3o;FOOD;1
20;Emp\xf3rio Center;GOOD;2
30;Mercado Tr\xeas;FOOD;1
";

const HUBS_CSV: &[u8] = b"\
hub_id;hub_name;hub_city;hub_state
1;Hub Centro;S\xe3o Paulo;SP
2;Hub Leste;Rio de Janeiro;RJ
";

const DELIVERIES_CSV: &str = "\
delivery_id,delivery_order_id,driver_id,delivery_distance_meters,delivery_status
9001,501,7001,2500,DELIVERED
9002,502,7002,,CANCELLED
9003,503,7001,1200,DELIVERED
9004,504,,3100,DELIVERED
9005,505,7003,900,CANCELLED
9006,506,7002,4700,DELIVERED
";

const CHANNELS_CSV: &str = "\
channel_id,channel_name,channel_type
300,APP GULA,OWN CHANNEL
301,FOME DELIVERY,MARKETPLACE
302,COMA BEM,MARKETPLACE
";

const PAYMENTS_CSV: &str = "\
payment_id,payment_order_id,payment_amount,payment_fee,payment_method,payment_status
2001,1001,52.0,1.0,ONLINE,PAID
2002,1002,30.0,,VOUCHER,AWAITING
2003,1003,18.5,0.5,ONLINE,PAID
2004,1004,31.0,0.9,STORE_DIRECT,PAID
2005,1005,24.9,0.7,ONLINE,PAID
2006,1006,12.0,0.3,VOUCHER,PAID
";

const DRIVERS_CSV: &str = "\
driver_id,driver_modal,driver_type
7001,MOTOBOY,LOGISTIC OPERATOR
7002,BIKER,FREELANCE
7003,MOTOBOY,FREELANCE
";

/// Write the seven fixture extracts into `dir`.
pub fn write_fixture_tables(dir: &Path) {
    std::fs::write(dir.join("orders.csv"), ORDERS_CSV).unwrap();
    std::fs::write(dir.join("stores.csv"), STORES_CSV).unwrap();
    std::fs::write(dir.join("hubs.csv"), HUBS_CSV).unwrap();
    std::fs::write(dir.join("deliveries.csv"), DELIVERIES_CSV).unwrap();
    std::fs::write(dir.join("channels.csv"), CHANNELS_CSV).unwrap();
    std::fs::write(dir.join("payments.csv"), PAYMENTS_CSV).unwrap();
    std::fs::write(dir.join("drivers.csv"), DRIVERS_CSV).unwrap();
}

/// Create a temp directory populated with the fixture extracts.
pub fn fixture_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    write_fixture_tables(&path);
    (temp_dir, path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
