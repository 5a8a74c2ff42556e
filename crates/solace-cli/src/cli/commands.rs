//! Command tree for the `slc` binary.

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize a knowledge-base export for parsing
    Normalize(NormalizeArgs),

    /// Parse a normalized export into knowledge chunks
    #[command(subcommand)]
    Parse(ParseCommands),

    /// Cut small test fixtures out of staged source files
    Fixtures(FixturesArgs),

    /// Attach embeddings to parsed chunks
    Embed(EmbedArgs),

    /// Glossary and readability tooling
    #[command(subcommand)]
    Glossary(GlossaryCommands),

    /// Classify the emotional register of a member message
    #[command(subcommand)]
    Affect(AffectCommands),

    /// Partnership scoring calculators
    #[command(subcommand)]
    Score(ScoreCommands),
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Source file to normalize
    pub input: PathBuf,

    /// Output path (defaults to `<input stem>-normalized.<ext>`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ParseCommands {
    /// Combined research-protocol export (kb-01 through kb-08)
    Research(ParseArgs),
    /// Pattern × temperament rewiring matrix
    Rewiring(ParseArgs),
    /// Daily practice library
    Deductible(ParseArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Normalized source file
    pub input: PathBuf,

    /// Output JSON path (defaults to `<output_dir>/<input stem>-parsed.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FixturesArgs {
    /// Staged research-protocol export
    #[arg(long)]
    pub research: Option<PathBuf>,

    /// Staged rewiring matrix file
    #[arg(long)]
    pub rewiring: Option<PathBuf>,

    /// Staged daily practice library
    #[arg(long)]
    pub deductible: Option<PathBuf>,

    /// Directory fixtures are written to
    #[arg(short, long, default_value = "fixtures")]
    pub output_dir: PathBuf,

    /// Practices per fixture
    #[arg(short, long, default_value_t = solace_protocol::fixtures::DEFAULT_FIXTURE_COUNT)]
    pub count: usize,
}

#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Parsed chunk files (JSON array or parse envelope)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output JSON path (defaults to `<output_dir>/chunks-embedded.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Batch size override (defaults to the configured value)
    #[arg(short, long)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum GlossaryCommands {
    /// Remove case-insensitive duplicate terms
    Dedupe(GlossaryDedupeArgs),
    /// Readability report over parsed chunks
    Validate(GlossaryValidateArgs),
    /// Inject glossary tooltips into chunk text
    Inject(GlossaryInjectArgs),
    /// Repair chunks degraded by tooltip injection
    Repair(GlossaryRepairArgs),
}

#[derive(Debug, Args)]
pub struct GlossaryDedupeArgs {
    /// Glossary JSON (array of entries)
    pub input: PathBuf,

    /// Output path (defaults to `<input stem>-deduped.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GlossaryValidateArgs {
    /// Parsed chunk file
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct GlossaryInjectArgs {
    /// Parsed chunk file
    pub input: PathBuf,

    /// Glossary JSON to inject from
    #[arg(short, long)]
    pub glossary: PathBuf,

    /// Output path (defaults to `<input stem>-tooltips.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GlossaryRepairArgs {
    /// Chunk file with tooltips injected
    pub input: PathBuf,

    /// Definitions reading above this grade are removed outright
    #[arg(long, default_value_t = solace_glossary::repair::DEFAULT_MAX_DEFINITION_GRADE)]
    pub max_grade: f64,

    /// Output path (defaults to `<input stem>-repaired.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum AffectCommands {
    /// Classify one message
    Classify(AffectClassifyArgs),
}

#[derive(Debug, Args)]
pub struct AffectClassifyArgs {
    /// Message text
    pub text: String,

    /// Prior intensity readings, oldest first (e.g. `4,5,7`)
    #[arg(long)]
    pub history: Option<String>,

    /// Let the hosted classifier override the local reading
    #[arg(long)]
    pub remote: bool,
}

#[derive(Debug, Subcommand)]
pub enum ScoreCommands {
    /// Partnership readiness scorecard
    Readiness(ReadinessArgs),
    /// Launch projection with sensitivity sweep
    Projection(ProjectionArgs),
}

#[derive(Debug, Args)]
pub struct ReadinessArgs {
    /// Liquid capital in dollars
    #[arg(long)]
    pub capital: f64,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit: u16,

    /// Annual income in dollars
    #[arg(long)]
    pub income: f64,

    /// Years of relevant experience
    #[arg(long)]
    pub experience: f64,

    /// Hours per week available
    #[arg(long)]
    pub hours: f64,
}

#[derive(Debug, Args)]
pub struct ProjectionArgs {
    /// Paying members at steady state
    #[arg(long)]
    pub members: f64,

    /// Monthly fee per member in dollars
    #[arg(long)]
    pub fee: f64,

    /// Monthly churn fraction (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub churn: f64,

    /// Fixed monthly costs in dollars
    #[arg(long, default_value_t = 0.0)]
    pub fixed_costs: f64,

    /// Variable expenses as a fraction of revenue (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub expense_rate: f64,

    /// One-time startup cost in dollars
    #[arg(long, default_value_t = 0.0)]
    pub startup_cost: f64,

    /// ROI horizon in months
    #[arg(long, default_value_t = 12)]
    pub horizon: u32,
}
