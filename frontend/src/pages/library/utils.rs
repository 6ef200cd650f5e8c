use chrono::NaiveDate;

use crate::api::{Loan, Penalty};

pub const BORROWED_STATUS: &str = "borrowed";
pub const WARNING_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanUrgency {
    Normal,
    Warning,
    Overdue,
}

impl LoanUrgency {
    pub fn row_class(self) -> &'static str {
        match self {
            LoanUrgency::Normal => "",
            LoanUrgency::Warning => "warning-row",
            LoanUrgency::Overdue => "overdue-row",
        }
    }
}

pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days()
}

/// Only borrowed loans can be late.
pub fn loan_urgency(loan: &Loan, today: NaiveDate) -> LoanUrgency {
    if loan.status != BORROWED_STATUS {
        return LoanUrgency::Normal;
    }
    match days_until_due(loan.due_date, today) {
        days if days < 0 => LoanUrgency::Overdue,
        days if days <= WARNING_DAYS => LoanUrgency::Warning,
        _ => LoanUrgency::Normal,
    }
}

pub fn status_label(loan: &Loan, today: NaiveDate) -> String {
    match loan.status.as_str() {
        "requested" => "Pending".into(),
        "approved" => "Approved".into(),
        "returned" => "Returned".into(),
        "late" => "Returned late".into(),
        "rejected" => "Rejected".into(),
        BORROWED_STATUS => {
            let days = days_until_due(loan.due_date, today);
            match loan_urgency(loan, today) {
                LoanUrgency::Overdue => format!("Overdue ({} days)", days.abs()),
                LoanUrgency::Warning => format!("Due soon ({} days)", days),
                LoanUrgency::Normal => "Borrowed".into(),
            }
        }
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltySummary {
    pub active: usize,
    pub longest_days_remaining: i64,
}

impl PenaltySummary {
    pub fn label(&self) -> String {
        if self.active > 0 {
            format!(
                "You cannot borrow books for {} more days",
                self.longest_days_remaining
            )
        } else {
            "No active penalty".into()
        }
    }
}

/// `None` when the user has no penalty records at all.
pub fn summarize_penalties(penalties: &[Penalty]) -> Option<PenaltySummary> {
    if penalties.is_empty() {
        return None;
    }
    let active = penalties.iter().filter(|p| p.is_active);
    Some(PenaltySummary {
        active: active.clone().count(),
        longest_days_remaining: active.map(|p| p.days_remaining).max().unwrap_or(0),
    })
}

pub fn penalty_summary_label(penalties: &[Penalty]) -> String {
    summarize_penalties(penalties)
        .map(|summary| summary.label())
        .unwrap_or_else(|| "None".into())
}

pub fn penalty_status_label(penalty: &Penalty) -> String {
    if penalty.is_active {
        format!("Active ({} days left)", penalty.days_remaining)
    } else {
        "Ended".into()
    }
}

pub fn penalty_restriction_label(penalty: &Penalty) -> String {
    if penalty.is_active {
        format!("Cannot borrow for {} more days", penalty.days_remaining)
    } else {
        "Penalty period ended".into()
    }
}

pub fn borrow_label(is_admin: bool) -> &'static str {
    if is_admin {
        "Borrow"
    } else {
        "Request"
    }
}

pub fn borrow_notice(is_admin: bool) -> &'static str {
    if is_admin {
        "Book loaned!"
    } else {
        "Loan request sent! Waiting for admin approval."
    }
}
