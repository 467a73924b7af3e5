use axum::{extract::State, response::Json};
use sea_orm::{EntityTrait, QueryOrder};

use crate::database::entities::{irac_groups, irac_groups::Entity as IracGroups};
use crate::errors::AdvisoryError;
use crate::server::app::AppState;

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<irac_groups::Model>>, AdvisoryError> {
    let groups = IracGroups::find()
        .order_by_asc(irac_groups::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(groups))
}
