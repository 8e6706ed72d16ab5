use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct WelcomeResponse {
    pub msg: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is reachable", body = WelcomeResponse)
    )
)]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(WelcomeResponse {
        msg: "welcome to user management api".to_string(),
    })
}
