use charges_parser::{finalize, ExtractedPair, Row};
use serde::{Deserialize, Serialize};

use crate::error::{ChargesError, Result};
use crate::heads::HeadTable;

/// A hand-keyed line item stored next to a parsed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub code: String,
    pub label: String,
    pub month_amount: Option<f64>,
    pub prior_total: Option<f64>,
}

impl LedgerEntry {
    pub fn from_head(
        heads: &HeadTable,
        code: &str,
        month_amount: Option<f64>,
        prior_total: Option<f64>,
    ) -> Result<Self> {
        let head = heads
            .lookup(code)
            .ok_or_else(|| ChargesError::UnknownHead(code.trim().to_string()))?;

        if month_amount.is_none() && prior_total.is_none() {
            return Err(ChargesError::Validation(format!(
                "entry for head '{}' needs a month amount or a prior total",
                head.label
            )));
        }
        if let Some(bad) = [month_amount, prior_total]
            .into_iter()
            .flatten()
            .find(|value| !value.is_finite())
        {
            return Err(ChargesError::Validation(format!(
                "entry for head '{}' has a non-finite amount {bad}",
                head.label
            )));
        }

        Ok(Self {
            code: head.code.clone(),
            label: head.label.clone(),
            month_amount,
            prior_total,
        })
    }

    pub fn to_row(&self) -> Row {
        finalize(ExtractedPair::new(
            self.label.clone(),
            self.month_amount,
            self.prior_total,
        ))
    }
}
