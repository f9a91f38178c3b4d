//! Coursemind CLI - Command-line interface for course recommendations.
//!
//! # Usage
//!
//! ```bash
//! # Hybrid recommendations from the merged dataset
//! cm recommend --user u1 "Python Basics"
//! cm recommend --user u1 "python basics" -n 3 --weight-cf 0.7 --weight-cb 0.3
//!
//! # Same-category courses from the catalog (Moodle or a JSON file)
//! cm similar "Python Basics"
//! cm similar py101 --catalog courses.json --json
//!
//! # List dataset courses
//! cm courses
//!
//! # Run as MCP server (for AI assistants)
//! cm --mcp
//! ```

mod config;
mod mcp;
mod output;
mod recommend;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursemind_core::config::{
    CATEGORY_MATCH_LIMIT, DEFAULT_NUM_RECOMMENDATIONS, DEFAULT_WEIGHT_CB, DEFAULT_WEIGHT_CF,
};
use coursemind_core::recommend::RecommendOptions;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Coursemind course recommendation CLI.
///
/// Recommends courses by blending content similarity with the rating
/// patterns of similar users, or lists catalog courses from the same
/// category.
#[derive(Parser)]
#[command(name = "cm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Merged dataset CSV (default: $COURSEMIND_DATASET or the platform data directory)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Course catalog JSON file (default: Moodle web service from the environment)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Catalog request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run as MCP (Model Context Protocol) server for AI assistants
    #[arg(long)]
    mcp: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Hybrid recommendations for a user who liked a course
    Recommend {
        /// Title of the liked course (case-insensitive)
        course_title: String,

        /// User id from the dataset
        #[arg(short, long)]
        user: String,

        /// Maximum number of recommendations
        #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_RECOMMENDATIONS)]
        limit: usize,

        /// Share of results from collaborative filtering
        #[arg(long, default_value_t = DEFAULT_WEIGHT_CF)]
        weight_cf: f32,

        /// Share of results from content similarity
        #[arg(long, default_value_t = DEFAULT_WEIGHT_CB)]
        weight_cb: f32,
    },
    /// Catalog courses in the same category as a liked course
    Similar {
        /// Short name, full name or id of the liked course
        liked_course: String,

        /// Maximum number of courses
        #[arg(short = 'n', long, default_value_t = CATEGORY_MATCH_LIMIT)]
        limit: usize,
    },
    /// List the courses in the dataset
    Courses,
}

fn init_logging(verbose: bool, mcp: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // stdout carries the MCP protocol
    if mcp {
        builder.with_writer(std::io::stderr).with_ansi(false).init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.mcp);

    let timeout = cli.timeout_secs.map(Duration::from_secs);

    if cli.mcp {
        return mcp::run_mcp_server(cli.dataset, cli.catalog, timeout).await;
    }

    let output = match &cli.command {
        Some(Command::Recommend {
            course_title,
            user,
            limit,
            weight_cf,
            weight_cb,
        }) => {
            let model = recommend::load_model(cli.dataset.as_ref())?;
            let options = RecommendOptions {
                num_recommendations: *limit,
                weight_cf: *weight_cf,
                weight_cb: *weight_cb,
            };
            let titles = recommend::execute_recommend(&model, user, course_title, options)?;

            if cli.json {
                output::format_recommend_json(user, course_title, &titles)
            } else {
                output::format_recommend_human(user, course_title, &titles)
            }
        }
        Some(Command::Similar {
            liked_course,
            limit,
        }) => {
            let provider = recommend::catalog_provider(cli.catalog.as_ref(), timeout)?;
            let matches =
                recommend::execute_similar(provider.as_ref(), liked_course, *limit).await?;

            if cli.json {
                output::format_similar_json(liked_course, &matches)
            } else {
                output::format_similar_human(liked_course, &matches)
            }
        }
        Some(Command::Courses) => {
            let model = recommend::load_model(cli.dataset.as_ref())?;
            if cli.json {
                output::format_courses_json(model.courses())
            } else {
                output::format_courses_human(model.courses())
            }
        }
        None => {
            eprintln!("No command provided. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::parse_from(["cm", "recommend", "--user", "u1", "Python Basics", "-n", "3"]);
        match cli.command {
            Some(Command::Recommend {
                course_title,
                user,
                limit,
                weight_cf,
                ..
            }) => {
                assert_eq!(course_title, "Python Basics");
                assert_eq!(user, "u1");
                assert_eq!(limit, 3);
                assert_eq!(weight_cf, DEFAULT_WEIGHT_CF);
            }
            _ => panic!("expected recommend command"),
        }
    }

    #[test]
    fn test_parse_similar_with_global_flags() {
        let cli = Cli::parse_from(["cm", "similar", "py101", "--json", "--catalog", "c.json"]);
        assert!(cli.json);
        assert_eq!(cli.catalog, Some(PathBuf::from("c.json")));
        assert!(matches!(
            cli.command,
            Some(Command::Similar { limit, .. }) if limit == CATEGORY_MATCH_LIMIT
        ));
    }

    #[test]
    fn test_parse_mcp() {
        let cli = Cli::parse_from(["cm", "--mcp"]);
        assert!(cli.mcp);
        assert!(cli.command.is_none());
    }
}
