use crate::commands::{
    run_rubric, run_score, run_suggest, run_topics_add, run_topics_list, RubricArgs, ScoreArgs,
    SuggestArgs, TopicsAddArgs, TopicsListArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use civic_index::config::AppConfig;
use civic_index::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Civic Contribution Index",
    about = "Score pedagogical proposals and browse the collaborative topic bank",
    version
)]
struct Cli {
    /// Override the topic bank file (ICC_TOPIC_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a rubric response and print the report
    Score(ScoreArgs),
    /// List suggested activities for a theme
    Suggest(SuggestArgs),
    /// Inspect or feed the collaborative topic bank
    Topics {
        #[command(subcommand)]
        command: TopicsCommand,
    },
    /// Print the rubric criteria, weight bounds and curation activities
    Rubric(RubricArgs),
}

#[derive(Subcommand, Debug)]
enum TopicsCommand {
    /// Show every topic with its keywords and activities
    List(TopicsListArgs),
    /// Add or extend a topic and persist the bank
    Add(TopicsAddArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let mut config = AppConfig::load()?;
    if let Some(store) = cli.store {
        config.icc.topic_store_path = store;
    }

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Score(args) => run_score(args, &config.icc),
        Command::Suggest(args) => run_suggest(args, &config.icc),
        Command::Topics {
            command: TopicsCommand::List(args),
        } => run_topics_list(args, &config.icc),
        Command::Topics {
            command: TopicsCommand::Add(args),
        } => run_topics_add(args, &config.icc),
        Command::Rubric(args) => run_rubric(args, &config.icc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["civic-index-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_comma_separated_ratings() {
        let cli = Cli::try_parse_from([
            "civic-index-api",
            "score",
            "--respondent",
            "Ana",
            "--topic",
            "reciclagem",
            "--ratings",
            "4,3,2",
            "--weights",
            "1.5,1,1",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.ratings, [4, 3, 2]);
                assert_eq!(args.weights, [1.5, 1.0, 1.0]);
                assert!(!args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_requires_ratings_or_a_submission_file() {
        let result = Cli::try_parse_from([
            "civic-index-api",
            "score",
            "--respondent",
            "Ana",
            "--topic",
            "reciclagem",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn topics_add_collects_repeated_activities() {
        let cli = Cli::try_parse_from([
            "civic-index-api",
            "--store",
            "bank.json",
            "topics",
            "add",
            "--topic",
            "horta",
            "--keywords",
            "plantio,compostagem",
            "--activity",
            "Plantio coletivo",
            "--activity",
            "Oficina de compostagem",
        ])
        .expect("parses");

        assert_eq!(cli.store, Some(PathBuf::from("bank.json")));
        match cli.command {
            Some(Command::Topics {
                command: TopicsCommand::Add(args),
            }) => {
                assert_eq!(args.keywords, ["plantio", "compostagem"]);
                assert_eq!(args.activity.len(), 2);
            }
            other => panic!("expected topics add, got {other:?}"),
        }
    }
}
