//! Installment balance arithmetic for credit sales.
//!
//! All amounts are whole rupiah (`i64`). Validation rejects out-of-range
//! payments outright rather than clamping them: a silently clamped amount
//! would misrepresent what was actually charged.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment amount must be greater than zero")]
    NonPositiveAmount,

    #[error("payment exceeds remaining balance of {remaining}")]
    ExceedsRemainingBalance { remaining: i64 },

    #[error("prior payments ({prior}) exceed principal ({principal})")]
    OverpaidPrincipal { principal: i64, prior: i64 },

    #[error("negative amount in balance computation")]
    NegativeInput,
}

/// Outcome of an accepted installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Balance left after this installment. Never negative: validation
    /// rejects amounts above the remaining balance before we get here.
    pub remaining_after: i64,
    /// True when this installment settles the balance exactly. Informational
    /// only; the actual status transition happens server-side on submit.
    pub fully_paid: bool,
}

/// Check a proposed installment against the remaining balance.
///
/// Accepts any amount in `(0, remaining]`; everything else is an error
/// carrying enough context for inline display.
pub fn validate_payment(amount: i64, remaining: i64) -> Result<(), PaymentError> {
    if amount <= 0 {
        return Err(PaymentError::NonPositiveAmount);
    }
    if amount > remaining {
        return Err(PaymentError::ExceedsRemainingBalance { remaining });
    }
    Ok(())
}

/// Validate and apply an installment, producing the post-payment balance.
pub fn apply_payment(amount: i64, remaining: i64) -> Result<PaymentOutcome, PaymentError> {
    validate_payment(amount, remaining)?;
    let remaining_after = remaining - amount;
    Ok(PaymentOutcome {
        remaining_after,
        fully_paid: remaining_after == 0,
    })
}

/// Remaining balance from the principal and the sum of prior installments.
///
/// Rejects negative inputs and prior payments above the principal instead of
/// producing a negative balance.
pub fn remaining_balance(principal: i64, prior_payments: i64) -> Result<i64, PaymentError> {
    if principal < 0 || prior_payments < 0 {
        return Err(PaymentError::NegativeInput);
    }
    if prior_payments > principal {
        return Err(PaymentError::OverpaidPrincipal {
            principal,
            prior: prior_payments,
        });
    }
    Ok(principal - prior_payments)
}
