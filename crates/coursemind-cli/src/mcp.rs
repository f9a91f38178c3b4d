//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes both recommendation strategies as MCP tools for AI assistants:
//! `recommend_courses` (hybrid) and `similar_courses` (same category).

use crate::recommend;
use anyhow::{Context, Result};
use coursemind_core::catalog::{recommend_same_category, CatalogProvider, CategoryMatch};
use coursemind_core::config::CATEGORY_MATCH_LIMIT;
use coursemind_core::dataset::UserId;
use coursemind_core::error::RecommendError;
use coursemind_core::recommend::{HybridRanker, RecommendOptions, RecommendationModel};
use coursemind_core::Strategy;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Hybrid recommendation request parameters.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendParams {
    /// Identifier of the user asking for recommendations.
    user_id: String,
    /// Title of a course the user liked (case-insensitive).
    course_title: String,
    /// Maximum number of recommendations (default: 5).
    #[serde(default)]
    num_recommendations: Option<usize>,
    /// Share of results drawn from similar users (default: 0.5).
    #[serde(default)]
    weight_cf: Option<f32>,
    /// Share of results drawn from similar course content (default: 0.5).
    #[serde(default)]
    weight_cb: Option<f32>,
}

/// Same-category request parameters.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SimilarParams {
    /// Short name, full name or numeric id of a course the user liked.
    liked_course: String,
    /// Maximum number of courses (default: 3).
    #[serde(default)]
    limit: Option<usize>,
}

/// Hybrid recommendation response.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct RecommendResponse {
    /// Strategy that produced the results.
    strategy: String,
    user_id: String,
    liked_course: String,
    /// Recommended course titles, best first.
    recommendations: Vec<String>,
}

/// Same-category response.
#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    strategy: String,
    liked_course: String,
    recommendations: Vec<CategoryMatch>,
}

fn make_error(code: ErrorCode, message: impl Into<String>) -> ErrorData {
    ErrorData {
        code,
        message: Cow::from(message.into()),
        data: None,
    }
}

fn recommend_error(err: RecommendError) -> ErrorData {
    let code = match err {
        RecommendError::MalformedRequest(_) | RecommendError::InvalidWeight { .. } => {
            ErrorCode::INVALID_PARAMS
        }
        RecommendError::CourseNotFound | RecommendError::UserNotFound { .. } => {
            ErrorCode::RESOURCE_NOT_FOUND
        }
    };
    make_error(code, err.to_string())
}

fn require_non_empty(name: &str, value: &str) -> Result<(), RecommendError> {
    if value.trim().is_empty() {
        return Err(RecommendError::MalformedRequest(format!(
            "'{name}' must not be empty"
        )));
    }
    Ok(())
}

/// Runs the hybrid strategy for a tool call.
fn recommend_response(
    model: &RecommendationModel,
    params: &RecommendParams,
) -> Result<RecommendResponse, RecommendError> {
    require_non_empty("user_id", &params.user_id)?;
    require_non_empty("course_title", &params.course_title)?;

    let defaults = RecommendOptions::default();
    let options = RecommendOptions {
        num_recommendations: params
            .num_recommendations
            .unwrap_or(defaults.num_recommendations),
        weight_cf: params.weight_cf.unwrap_or(defaults.weight_cf),
        weight_cb: params.weight_cb.unwrap_or(defaults.weight_cb),
    };

    let recommendations = HybridRanker::new(model).recommend(
        &UserId::from(params.user_id.as_str()),
        &params.course_title,
        options,
    )?;

    Ok(RecommendResponse {
        strategy: Strategy::Hybrid.to_string(),
        user_id: params.user_id.clone(),
        liked_course: params.course_title.clone(),
        recommendations,
    })
}

/// MCP server that exposes Coursemind recommendations.
#[derive(Clone)]
pub struct CoursemindMcpServer {
    /// Immutable model shared across clones.
    model: Arc<RecommendationModel>,
    /// Catalog for the same-category tool, if configured.
    catalog: Option<Arc<dyn CatalogProvider>>,
    /// Tool router generated by the macro.
    tool_router: ToolRouter<Self>,
}

impl CoursemindMcpServer {
    fn new(model: RecommendationModel, catalog: Option<Arc<dyn CatalogProvider>>) -> Self {
        Self {
            model: Arc::new(model),
            catalog,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl CoursemindMcpServer {
    #[tool(
        description = "Recommend courses for a user who liked a given course. Blends courses with similar descriptions and courses popular with users who rate like this user. Returns course titles, best first."
    )]
    fn recommend_courses(
        &self,
        Parameters(params): Parameters<RecommendParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = recommend_response(&self.model, &params).map_err(recommend_error)?;

        let json = serde_json::to_string_pretty(&response).map_err(|e| {
            make_error(
                ErrorCode::INTERNAL_ERROR,
                format!("Failed to serialize response: {}", e),
            )
        })?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "List other catalog courses in the same category as a liked course (matched by short name, full name or id). Requires a configured course catalog."
    )]
    fn similar_courses(
        &self,
        Parameters(params): Parameters<SimilarParams>,
    ) -> Result<CallToolResult, ErrorData> {
        require_non_empty("liked_course", &params.liked_course).map_err(recommend_error)?;

        let catalog = self.catalog.as_ref().ok_or_else(|| {
            make_error(
                ErrorCode::INTERNAL_ERROR,
                "No course catalog configured. Start the server with --catalog or Moodle settings.",
            )
        })?;

        // Use block_in_place to safely run async code from a sync context
        let courses = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(catalog.fetch_all_courses())
        })
        .map_err(|e| make_error(ErrorCode::INTERNAL_ERROR, e.to_string()))?;

        let limit = params.limit.unwrap_or(CATEGORY_MATCH_LIMIT);
        let recommendations = recommend_same_category(&courses, &params.liked_course, limit)
            .map_err(recommend_error)?;

        let response = SimilarResponse {
            strategy: Strategy::Category.to_string(),
            liked_course: params.liked_course,
            recommendations,
        };
        let json = serde_json::to_string_pretty(&response).map_err(|e| {
            make_error(
                ErrorCode::INTERNAL_ERROR,
                format!("Failed to serialize response: {}", e),
            )
        })?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for CoursemindMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "coursemind".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Coursemind Course Recommendations".to_string()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Coursemind recommends learning courses. Use 'recommend_courses' with a user id \
                 and a liked course title for personalized results, or 'similar_courses' to list \
                 catalog courses from the same category."
                    .to_string(),
            ),
        }
    }
}

/// Runs the MCP server on stdio.
///
/// The model is built before serving. The catalog is optional: without a
/// catalog file or Moodle settings only `recommend_courses` succeeds.
pub async fn run_mcp_server(
    dataset: Option<PathBuf>,
    catalog_file: Option<PathBuf>,
    timeout: Option<Duration>,
) -> Result<()> {
    use rmcp::transport::stdio;

    info!("Initializing Coursemind recommendation model");
    let model = recommend::load_model(dataset.as_ref())?;

    let catalog: Option<Arc<dyn CatalogProvider>> =
        match recommend::catalog_provider(catalog_file.as_ref(), timeout) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(e) => {
                warn!("Course catalog unavailable: {:#}", e);
                None
            }
        };

    info!("Model ready. Starting MCP server");
    let server = CoursemindMcpServer::new(model, catalog);

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;

    service.waiting().await?;

    Ok(())
}
