use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::domain::{User, UserFilter};
use crate::error::AppError;

/// `GET /users[?id=<value>]`
///
/// Only the first `id` counts when the parameter repeats. An empty match is
/// `200 []`, never 404.
pub async fn get_users(
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let id = first_param(&params, "id");
    let filter = UserFilter::from_param(id);
    let users = state.store.fetch_users(&filter).await?;
    Ok(Json(users))
}

fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_param_takes_first_occurrence() {
        let params = pairs(&[("page", "3"), ("id", "1"), ("id", "2")]);
        assert_eq!(first_param(&params, "id"), Some("1"));
    }

    #[test]
    fn test_first_param_absent() {
        let params = pairs(&[("page", "3")]);
        assert_eq!(first_param(&params, "id"), None);
    }
}
