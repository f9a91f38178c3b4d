//! Command implementations.
//!
//! Loads the recommendation model from the merged dataset and runs the two
//! strategies: the dataset-backed hybrid ranker and the catalog-backed
//! same-category matcher.

use crate::config;
use anyhow::{anyhow, Context, Result};
use coursemind_core::catalog::{
    recommend_same_category, CatalogProvider, CategoryMatch, JsonFileCatalog, MoodleCatalog,
};
use coursemind_core::dataset::{load_merged_csv, UserId};
use coursemind_core::recommend::{HybridRanker, RecommendOptions, RecommendationModel};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Loads the merged dataset and builds the model.
pub fn load_model(dataset: Option<&PathBuf>) -> Result<RecommendationModel> {
    let path = config::dataset_path(dataset)?;

    if !path.exists() {
        return Err(anyhow!(
            "No dataset found at {}.\n\
             Pass --dataset or set $COURSEMIND_DATASET.",
            path.display()
        ));
    }

    info!("Loading dataset: {}", path.display());
    let raw = load_merged_csv(&path)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))?;

    let model = RecommendationModel::from_raw(raw);
    info!(
        "Model ready: {} courses, {} users",
        model.courses().len(),
        model.interaction_matrix().n_users()
    );
    Ok(model)
}

/// Runs the hybrid strategy.
pub fn execute_recommend(
    model: &RecommendationModel,
    user_id: &str,
    liked_course: &str,
    options: RecommendOptions,
) -> Result<Vec<String>> {
    let titles = HybridRanker::new(model).recommend(&UserId::from(user_id), liked_course, options)?;
    info!("Recommended {} courses", titles.len());
    Ok(titles)
}

/// Chooses the catalog source: a JSON file if given, otherwise Moodle.
pub fn catalog_provider(
    catalog_file: Option<&PathBuf>,
    timeout: Option<Duration>,
) -> Result<Box<dyn CatalogProvider>> {
    if let Some(path) = catalog_file {
        info!("Using catalog file: {}", path.display());
        return Ok(Box::new(JsonFileCatalog::open(path)?));
    }

    let moodle = MoodleCatalog::new(config::moodle_config(timeout)?)?;
    Ok(Box::new(moodle))
}

/// Runs the same-category strategy.
pub async fn execute_similar(
    provider: &dyn CatalogProvider,
    liked_course: &str,
    limit: usize,
) -> Result<Vec<CategoryMatch>> {
    let catalog = provider.fetch_all_courses().await?;
    let matches = recommend_same_category(&catalog, liked_course, limit)?;
    info!("Found {} courses in the same category", matches.len());
    Ok(matches)
}
