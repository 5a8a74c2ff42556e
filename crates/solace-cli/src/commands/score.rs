//! Handle `slc score readiness|projection`.

use solace_scoring::{ProjectionInput, ReadinessInput, project, score};

use crate::cli::GlobalFlags;
use crate::cli::commands::{ProjectionArgs, ReadinessArgs, ScoreCommands};
use crate::output;

pub fn handle(command: &ScoreCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        ScoreCommands::Readiness(args) => handle_readiness(args, flags),
        ScoreCommands::Projection(args) => handle_projection(args, flags),
    }
}

fn handle_readiness(args: &ReadinessArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = score(&ReadinessInput {
        liquid_capital: args.capital,
        credit_score: args.credit,
        annual_income: args.income,
        experience_years: args.experience,
        hours_per_week: args.hours,
    })?;
    output::output(&report, flags.format)
}

fn handle_projection(args: &ProjectionArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = project(&ProjectionInput {
        members: args.members,
        monthly_fee: args.fee,
        monthly_churn: args.churn,
        fixed_costs: args.fixed_costs,
        expense_rate: args.expense_rate,
        startup_cost: args.startup_cost,
        horizon_months: args.horizon,
    })?;
    output::output(&report, flags.format)
}
