use serde_json::{Value, json};

use crate::cache::QueryCache;
use crate::error::{PustakaError, Result};
use crate::grid::field_value;
use crate::payment::{apply_payment, remaining_balance};
use crate::types::Resource;

fn amount_field(record: &Value, path: &str) -> Result<i64> {
    field_value(record, path)
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            PustakaError::ResponseShape(format!("sale record missing integer '{}'", path))
        })
}

/// Amount field that may legitimately be absent. Absent or null reads as
/// zero; a present value of the wrong type is a shape error, never zero.
fn optional_amount_field(record: &Value, path: &str) -> Result<i64> {
    match field_value(record, path) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v.as_i64().ok_or_else(|| {
            PustakaError::ResponseShape(format!("sale record field '{}' is not an integer", path))
        }),
    }
}

/// Record an installment against a credit sale.
///
/// The balance check runs client-side before the request so an overpayment
/// is rejected with the current remaining balance instead of a backend
/// round-trip.
pub async fn cmd_pay(cache: &QueryCache, sale_id: u64, amount: i64) -> Result<()> {
    let sale = cache.api().get(Resource::Sales, sale_id).await?;

    let principal = amount_field(&sale, "total_amount")?;
    let prior = optional_amount_field(&sale, "paid_amount")?;
    let remaining = remaining_balance(principal, prior).map_err(PustakaError::Payment)?;

    let outcome = apply_payment(amount, remaining).map_err(PustakaError::Payment)?;

    cache
        .create_sub(Resource::Sales, sale_id, "installments", json!({"amount": amount}))
        .await?;

    if outcome.fully_paid {
        println!("sale {} fully paid", sale_id);
    } else {
        println!("sale {}: {} remaining", sale_id, outcome.remaining_after);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_field() {
        let sale = json!({"total_amount": 2_000_000, "paid_amount": 500_000});
        assert_eq!(amount_field(&sale, "total_amount").unwrap(), 2_000_000);
        assert_eq!(amount_field(&sale, "paid_amount").unwrap(), 500_000);
        assert!(amount_field(&sale, "missing").is_err());
    }

    #[test]
    fn test_amount_field_rejects_non_integer() {
        let sale = json!({"total_amount": "2000000"});
        assert!(amount_field(&sale, "total_amount").is_err());
    }

    #[test]
    fn test_optional_amount_field_defaults_only_when_absent() {
        assert_eq!(optional_amount_field(&json!({}), "paid_amount").unwrap(), 0);
        assert_eq!(
            optional_amount_field(&json!({"paid_amount": null}), "paid_amount").unwrap(),
            0
        );
        assert_eq!(
            optional_amount_field(&json!({"paid_amount": 500_000}), "paid_amount").unwrap(),
            500_000
        );
        // A malformed value must surface, not read as zero.
        assert!(optional_amount_field(&json!({"paid_amount": "500000"}), "paid_amount").is_err());
    }
}
