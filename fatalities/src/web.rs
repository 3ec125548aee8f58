pub(crate) mod error;
pub(crate) mod state;
mod static_content;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use fatality_charts::{build_chart, render_svg, Chart, Dataset, Dimension, UnknownDimension};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

use self::error::WebError;
use self::state::WebState;
use self::templates::components::chart_embed::EmbeddedChart;
use self::templates::page::RenderPage;
use self::templates::pages::fatalities_page::FatalitiesPage;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompareParams {
    item_for_compare: Option<String>,
}

impl CompareParams {
    /// The requested dimension, `Year` when none was given.
    fn dimension(&self) -> Result<Dimension, UnknownDimension> {
        match self.item_for_compare.as_deref() {
            None => Ok(Dimension::default()),
            Some(name) => name.parse(),
        }
    }
}

fn fatalities_page(dataset: &Dataset, dimension: Dimension) -> Result<FatalitiesPage, WebError> {
    let chart = build_chart(dataset, dimension);
    let rendered = render_svg(&chart)?;
    let script_json = EmbeddedChart {
        chart: &chart,
        hover_points: &rendered.hover_points,
    }
    .to_script_json()?;
    Ok(FatalitiesPage {
        chart,
        rendered,
        script_json,
    })
}

async fn index(
    State(dataset): State<Arc<Dataset>>,
    Query(params): Query<CompareParams>,
) -> Result<RenderPage<FatalitiesPage>, WebError> {
    let dimension = params.dimension()?;
    debug!("rendering fatalities page grouped by {dimension}");
    Ok(RenderPage(fatalities_page(&dataset, dimension)?))
}

async fn chart_json(
    State(dataset): State<Arc<Dataset>>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Chart>, WebError> {
    let dimension = params.dimension()?;
    Ok(Json(build_chart(&dataset, dimension)))
}

async fn chart_svg(
    State(dataset): State<Arc<Dataset>>,
    Query(params): Query<CompareParams>,
) -> Result<impl IntoResponse, WebError> {
    let dimension = params.dimension()?;
    let rendered = render_svg(&build_chart(&dataset, dimension))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], rendered.svg))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

pub(crate) fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chart", get(chart_json))
        .route("/chart.svg", get(chart_svg))
        .route("/static/{*path}", get(static_content::static_path))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start_web(state: WebState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use maud::Render;

    use super::*;

    const CSV: &str = "\
State,Month,Year,Road User,Age
NSW,1,2019,Driver,45
NSW,2,2019,Passenger,19
VIC,2,2018,Pedestrian,80
QLD,12,2017,Driver,-9
";

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_reader(CSV.as_bytes()).unwrap())
    }

    fn params(item: Option<&str>) -> Query<CompareParams> {
        Query(CompareParams {
            item_for_compare: item.map(str::to_string),
        })
    }

    async fn page_html(item: Option<&str>) -> String {
        index(State(dataset()), params(item))
            .await
            .unwrap()
            .render()
            .into_string()
    }

    #[tokio::test]
    async fn default_page_matches_explicit_year() {
        let default = page_html(None).await;
        let year = page_html(Some("Year")).await;
        assert_eq!(default, year);
        assert!(default.contains("Fatalities according to Year"));
    }

    #[tokio::test]
    async fn page_lists_every_dimension_and_selects_the_current_one() {
        let html = page_html(Some("State")).await;
        for dimension in Dimension::ALL {
            assert!(html.contains(&format!("<option value=\"{dimension}\"")));
        }
        assert!(html.contains("<option value=\"State\" selected>"));
        assert!(html.contains("id=\"chart-data\""));
        assert!(html.contains("<svg"));
    }

    #[tokio::test]
    async fn unknown_dimension_is_rejected() {
        let response = index(State(dataset()), params(Some("Weekday")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chart_json_matches_builder() {
        let Json(chart) = chart_json(State(dataset()), params(Some("Month")))
            .await
            .unwrap();
        assert_eq!(chart, build_chart(&dataset(), Dimension::Month));
        assert_eq!(chart.source.total(), 4);
    }

    #[tokio::test]
    async fn chart_svg_is_served_as_svg() {
        let response = chart_svg(State(dataset()), params(None))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    }

    #[tokio::test]
    async fn fallback_is_not_found() {
        assert_eq!(fallback().await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn bundled_dataset_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/clean_data.csv");
        let dataset = Dataset::load(path).unwrap();
        assert_eq!(dataset.len(), 24);
        for dimension in Dimension::ALL {
            assert_eq!(build_chart(&dataset, dimension).source.total(), 24);
        }
    }

    #[test]
    fn router_builds() {
        let _ = router(WebState { dataset: dataset() });
    }
}
