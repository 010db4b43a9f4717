use axum::Json;
use serde::Serialize;

/// Конверт успешного ответа: `{"success": true, "result": <T>}`.
/// Клиент различает исходы только по флагу `success`.
#[derive(Debug, Serialize)]
pub struct ApiOk<T: Serialize> {
    pub success: bool,
    pub result: T,
}

pub fn ok<T: Serialize>(result: T) -> Json<ApiOk<T>> {
    Json(ApiOk { success: true, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_success_flag_and_result() {
        let Json(body) = ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["result"], serde_json::json!([1, 2, 3]));
    }
}
