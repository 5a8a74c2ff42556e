//! Partnership readiness scorecard.
//!
//! Candidates applying for a coaching partnership are scored across five
//! categories, combined with fixed weights, and mapped to a tier by
//! thresholds. The formulas mirror the underwriting sheet the partnerships
//! team maintains; keep the inline comments in sync with it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScoringError;

/// Valid credit score range.
pub const CREDIT_SCORE_RANGE: std::ops::RangeInclusive<u16> = 300..=850;

/// Candidate figures, as collected on the application form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadinessInput {
    /// Liquid capital available to invest, in dollars.
    pub liquid_capital: f64,
    /// FICO-style credit score (300–850).
    pub credit_score: u16,
    /// Verified annual income, in dollars.
    pub annual_income: f64,
    /// Years of coaching or adjacent industry experience.
    pub experience_years: f64,
    /// Hours per week the candidate can commit.
    pub hours_per_week: f64,
}

/// Per-category scores, each 0–100.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryScores {
    pub capital: f64,
    pub credit: f64,
    pub income: f64,
    pub experience: f64,
    pub availability: f64,
}

/// Tier assigned from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    FastTrack,
    Qualified,
    Conditional,
    NotReady,
}

impl ReadinessTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FastTrack => "fast_track",
            Self::Qualified => "qualified",
            Self::Conditional => "conditional",
            Self::NotReady => "not_ready",
        }
    }
}

impl fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full scorecard for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadinessReport {
    pub scores: CategoryScores,
    pub composite: f64,
    pub tier: ReadinessTier,
}

/// Score a partnership candidate.
///
/// # Errors
///
/// Returns [`ScoringError::Validation`] for negative dollar/time figures or
/// a credit score outside 300–850.
pub fn score(input: &ReadinessInput) -> Result<ReadinessReport, ScoringError> {
    validate(input)?;

    let scores = CategoryScores {
        capital: capital_score(input.liquid_capital),
        credit: credit_score(input.credit_score),
        income: income_score(input.annual_income),
        experience: experience_score(input.experience_years),
        availability: availability_score(input.hours_per_week),
    };

    // Composite = 0.30*capital + 0.25*credit + 0.20*income
    //           + 0.15*experience + 0.10*availability
    let composite = round1(
        0.30 * scores.capital
            + 0.25 * scores.credit
            + 0.20 * scores.income
            + 0.15 * scores.experience
            + 0.10 * scores.availability,
    );

    Ok(ReadinessReport {
        scores,
        tier: tier_for(composite),
        composite,
    })
}

fn validate(input: &ReadinessInput) -> Result<(), ScoringError> {
    if input.liquid_capital < 0.0 {
        return Err(ScoringError::invalid("liquid_capital", "must be non-negative"));
    }
    if !CREDIT_SCORE_RANGE.contains(&input.credit_score) {
        return Err(ScoringError::invalid(
            "credit_score",
            format!("{} outside 300-850", input.credit_score),
        ));
    }
    if input.annual_income < 0.0 {
        return Err(ScoringError::invalid("annual_income", "must be non-negative"));
    }
    if input.experience_years < 0.0 {
        return Err(ScoringError::invalid("experience_years", "must be non-negative"));
    }
    if input.hours_per_week < 0.0 || input.hours_per_week > 168.0 {
        return Err(ScoringError::invalid("hours_per_week", "must be within 0-168"));
    }
    Ok(())
}

// Capital: >=150k 100, >=100k 85, >=50k 70, >=25k 50, >=10k 30, else 10
fn capital_score(capital: f64) -> f64 {
    match capital {
        c if c >= 150_000.0 => 100.0,
        c if c >= 100_000.0 => 85.0,
        c if c >= 50_000.0 => 70.0,
        c if c >= 25_000.0 => 50.0,
        c if c >= 10_000.0 => 30.0,
        _ => 10.0,
    }
}

// Credit: >=780 100, >=740 90, >=700 75, >=660 60, >=620 40, else 20
fn credit_score(score: u16) -> f64 {
    match score {
        s if s >= 780 => 100.0,
        s if s >= 740 => 90.0,
        s if s >= 700 => 75.0,
        s if s >= 660 => 60.0,
        s if s >= 620 => 40.0,
        _ => 20.0,
    }
}

// Income: >=200k 100, >=120k 85, >=80k 70, >=50k 50, else 30
fn income_score(income: f64) -> f64 {
    match income {
        i if i >= 200_000.0 => 100.0,
        i if i >= 120_000.0 => 85.0,
        i if i >= 80_000.0 => 70.0,
        i if i >= 50_000.0 => 50.0,
        _ => 30.0,
    }
}

// Experience: 10 points per year, capped at 100
fn experience_score(years: f64) -> f64 {
    (years * 10.0).min(100.0)
}

// Availability: >=30h 100, >=20h 80, >=10h 55, >=5h 35, else 15
fn availability_score(hours: f64) -> f64 {
    match hours {
        h if h >= 30.0 => 100.0,
        h if h >= 20.0 => 80.0,
        h if h >= 10.0 => 55.0,
        h if h >= 5.0 => 35.0,
        _ => 15.0,
    }
}

// Tiers: >=80 fast_track, >=65 qualified, >=45 conditional, else not_ready
fn tier_for(composite: f64) -> ReadinessTier {
    match composite {
        c if c >= 80.0 => ReadinessTier::FastTrack,
        c if c >= 65.0 => ReadinessTier::Qualified,
        c if c >= 45.0 => ReadinessTier::Conditional,
        _ => ReadinessTier::NotReady,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
