//! Expense entity: what an imported record becomes once a user accepts it.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::monetary::{Installment, MonetaryValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Fixed,
    Installment,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub purchased_at: NaiveDate,
    pub name: String,
    pub kind: ExpenseType,
    pub amount: f64,
    pub installment: Option<Installment>,
}

impl Expense {
    pub fn new(
        purchased_at: NaiveDate,
        name: impl Into<String>,
        kind: ExpenseType,
        amount: f64,
        installment: Option<Installment>,
    ) -> Result<Self, ExpenseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExpenseError::EmptyName);
        }

        if kind == ExpenseType::Installment {
            let Some(i) = installment else {
                return Err(ExpenseError::MissingInstallment);
            };
            if i.current > i.total {
                return Err(ExpenseError::InstallmentOverflow {
                    current: i.current,
                    total: i.total,
                });
            }
        }

        Ok(Self {
            purchased_at,
            name,
            kind,
            amount,
            installment,
        })
    }

    /// Records with an installment marker are installment expenses; the rest get `fallback`.
    pub fn from_monetary_value(
        value: &MonetaryValue,
        fallback: ExpenseType,
    ) -> Result<Self, ExpenseError> {
        let kind = if value.installment.is_some() {
            ExpenseType::Installment
        } else {
            fallback
        };
        Self::new(
            value.purchased_at,
            value.name.clone(),
            kind,
            value.amount,
            value.installment,
        )
    }

    /// One expense per remaining installment, `current..=total`, a month apart.
    ///
    /// Non-installment expenses yield just themselves. Dates that fall past the
    /// end of a shorter month are clamped to its last day.
    pub fn installment_schedule(&self) -> Vec<Expense> {
        let Some(inst) = self.installment.filter(|_| self.kind == ExpenseType::Installment) else {
            return vec![self.clone()];
        };

        (inst.current..=inst.total)
            .filter_map(|n| {
                let offset = Months::new(n - inst.current);
                let date = self.purchased_at.checked_add_months(offset)?;
                Some(Expense {
                    purchased_at: date,
                    installment: Some(Installment {
                        current: n,
                        total: inst.total,
                    }),
                    ..self.clone()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_installment_requires_both_numbers() {
        let err = Expense::new(date(2023, 7, 1), "TV", ExpenseType::Installment, 100.0, None);
        assert_eq!(err, Err(ExpenseError::MissingInstallment));
    }

    #[test]
    fn test_installment_of_cannot_exceed_total() {
        let err = Expense::new(
            date(2023, 7, 1),
            "TV",
            ExpenseType::Installment,
            100.0,
            Some(Installment { current: 4, total: 3 }),
        );
        assert_eq!(
            err,
            Err(ExpenseError::InstallmentOverflow { current: 4, total: 3 })
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Expense::new(date(2023, 7, 1), "  ", ExpenseType::Fixed, 1.0, None);
        assert_eq!(err, Err(ExpenseError::EmptyName));
    }

    #[test]
    fn test_from_monetary_value_labels_installments() {
        let with = MonetaryValue::from_raw("2023-08-04", "Pag*Riotgame", "41,64", Some("1/3")).unwrap();
        let without = MonetaryValue::from_raw("2023-08-04", "Pag*Zig", "10,00", None).unwrap();

        let e = Expense::from_monetary_value(&with, ExpenseType::Variable).unwrap();
        assert_eq!(e.kind, ExpenseType::Installment);

        let e = Expense::from_monetary_value(&without, ExpenseType::Fixed).unwrap();
        assert_eq!(e.kind, ExpenseType::Fixed);
        assert_eq!(e.installment, None);
    }

    #[test]
    fn test_schedule_expands_remaining_installments() {
        let e = Expense::new(
            date(2023, 1, 31),
            "Notebook",
            ExpenseType::Installment,
            250.0,
            Some(Installment { current: 2, total: 4 }),
        )
        .unwrap();

        let schedule = e.installment_schedule();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].purchased_at, date(2023, 1, 31));
        assert_eq!(schedule[1].purchased_at, date(2023, 2, 28));
        assert_eq!(schedule[2].purchased_at, date(2023, 3, 31));
        assert_eq!(schedule[2].installment, Some(Installment { current: 4, total: 4 }));
        assert!(schedule.iter().all(|s| s.amount == 250.0 && s.name == "Notebook"));
    }

    #[test]
    fn test_schedule_of_plain_expense_is_itself() {
        let e = Expense::new(date(2023, 5, 2), "Rent", ExpenseType::Fixed, 900.0, None).unwrap();
        assert_eq!(e.installment_schedule(), vec![e.clone()]);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExpenseType::Installment).unwrap(),
            "\"installment\""
        );
    }
}
