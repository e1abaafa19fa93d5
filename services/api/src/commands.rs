use crate::infra::{invalid_data, open_service};
use civic_index::config::IccConfig;
use civic_index::error::AppError;
use civic_index::workflows::icc::topics::to_csv_string;
use civic_index::workflows::icc::{
    AssessmentRequest, Rubric, RubricSubmission, Suggestion, TopicContribution,
};
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Name of the person submitting the proposal
    #[arg(long)]
    pub(crate) respondent: String,
    /// Theme used to look up suggested activities
    #[arg(long)]
    pub(crate) topic: String,
    /// Ratings (1-4) in rubric order, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        required_unless_present = "submission",
        conflicts_with = "submission"
    )]
    pub(crate) ratings: Vec<i64>,
    /// Optional weights in rubric order; missing entries use the rubric default
    #[arg(long, value_delimiter = ',', requires = "ratings")]
    pub(crate) weights: Vec<f64>,
    /// JSON file with a `responses` array of {criterion, rating, weight?}
    #[arg(long)]
    pub(crate) submission: Option<PathBuf>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SuggestArgs {
    /// Free-text theme, e.g. "reciclagem na escola"
    pub(crate) topic: String,
    /// Emit suggestions as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TopicsListArgs {
    /// Export as CSV (topic,keywords,activities)
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TopicsAddArgs {
    /// Topic name; stored lower-cased
    #[arg(long)]
    pub(crate) topic: String,
    /// Trigger keywords, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) keywords: Vec<String>,
    /// Suggested activity; repeat for several
    #[arg(long)]
    pub(crate) activity: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RubricArgs {
    /// Emit the rubric as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs, config: &IccConfig) -> Result<(), AppError> {
    let service = open_service(config)?;
    let request = AssessmentRequest {
        respondent: args.respondent.clone(),
        topic: args.topic.clone(),
        submission: load_submission(&args, service.rubric())?,
    };

    let report = service.assess(request)?;
    if args.json {
        let payload = serde_json::to_string_pretty(&report).map_err(invalid_data)?;
        println!("{payload}");
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

pub(crate) fn load_submission(
    args: &ScoreArgs,
    rubric: &Rubric,
) -> Result<RubricSubmission, AppError> {
    match &args.submission {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(|source| AppError::Submission {
                path: path.clone(),
                source,
            })
        }
        None => Ok(RubricSubmission::from_ordered(
            rubric,
            &args.ratings,
            &args.weights,
        )),
    }
}

pub(crate) fn run_suggest(args: SuggestArgs, config: &IccConfig) -> Result<(), AppError> {
    let service = open_service(config)?;
    let suggestions = service.suggest(&args.topic)?;

    if args.json {
        let payload = serde_json::to_string_pretty(&suggestions).map_err(invalid_data)?;
        println!("{payload}");
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No activities found for '{}'.", args.topic);
    } else {
        println!("Suggested activities for '{}':", args.topic);
        for line in suggestion_lines(&suggestions) {
            println!("{line}");
        }
    }
    Ok(())
}

fn suggestion_lines(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions
        .iter()
        .map(|suggestion| match suggestion.impact {
            Some(impact) => format!(
                "  - {} [{}] impact {:.2}",
                suggestion.activity, suggestion.topic, impact
            ),
            None => format!("  - {} [{}]", suggestion.activity, suggestion.topic),
        })
        .collect()
}

pub(crate) fn run_topics_list(args: TopicsListArgs, config: &IccConfig) -> Result<(), AppError> {
    let service = open_service(config)?;

    if args.csv {
        let csv = to_csv_string(&service.snapshot()?).map_err(std::io::Error::from)?;
        print!("{csv}");
        return Ok(());
    }

    for view in service.topics()? {
        println!("{}", view.topic);
        println!("  keywords: {}", view.keywords.join(", "));
        for activity in &view.activities {
            println!("  - {activity}");
        }
    }
    Ok(())
}

pub(crate) fn run_topics_add(args: TopicsAddArgs, config: &IccConfig) -> Result<(), AppError> {
    let service = open_service(config)?;
    let outcome = service.contribute(TopicContribution {
        topic: args.topic,
        keywords: args.keywords,
        activities: args.activity,
    })?;

    let verb = if outcome.created { "Created" } else { "Updated" };
    println!(
        "{verb} topic '{}' (+{} keywords, +{} activities) in {}",
        outcome.topic,
        outcome.keywords_added,
        outcome.activities_added,
        config.topic_store_path.display()
    );
    Ok(())
}

pub(crate) fn run_rubric(args: RubricArgs, config: &IccConfig) -> Result<(), AppError> {
    let service = open_service(config)?;
    let engine = service.engine();

    if args.json {
        let payload = serde_json::json!({
            "criteria": engine.rubric().criteria(),
            "weight_policy": engine.weight_policy(),
            "rating_policy": engine.rating_policy(),
        });
        let rendered = serde_json::to_string_pretty(&payload).map_err(invalid_data)?;
        println!("{rendered}");
        return Ok(());
    }

    let bounds = engine.weight_policy();
    println!(
        "Weights accepted between {:.1} and {:.1}; ratings: 4 Excelente, 3 Bom, 2 Regular, 1 Insuficiente",
        bounds.min, bounds.max
    );
    for (position, candidate) in service.curation_candidates().iter().enumerate() {
        println!("{:>2}. {}", position + 1, candidate.criterion);
        println!("    curation activity: {}", candidate.activity);
    }
    Ok(())
}
