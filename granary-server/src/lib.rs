use std::sync::Arc;

use crate::app::create_app;
use crate::configs::Settings;

pub mod app;
pub mod configs;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;


/// Opens storage and reports what the database currently holds.
pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let app = create_app(settings).await?;

    let (depots, granaries, readings): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM depots),
            (SELECT COUNT(*) FROM granaries),
            (SELECT COUNT(*) FROM granary_data)
        "#,
    )
    .fetch_one(app.storage.get_pool())
    .await?;

    tracing::info!(
        url = %settings.database.url,
        depots,
        granaries,
        readings,
        "granary storage ready"
    );

    Ok(())
}
