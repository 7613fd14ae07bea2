use crate::api::error::AppError;
use crate::entities::{prelude::*, *};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::VideoService;

impl VideoService {
    /// Overwrites both metadata columns of record `id`.
    ///
    /// No existence check and no filesystem side effect: an unknown id updates
    /// nothing, and `filepath` is stored as given.
    pub async fn update_video(
        &self,
        id: i32,
        filename: Option<String>,
        filepath: Option<String>,
    ) -> Result<u64, AppError> {
        let result = Videos::update_many()
            .col_expr(videos::Column::Filename, Expr::value(filename))
            .col_expr(videos::Column::Filepath, Expr::value(filepath))
            .filter(videos::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::debug!("Updated video {} ({} rows)", id, result.rows_affected);
        Ok(result.rows_affected)
    }
}
