/// Liveness probe
#[utoipa::path(
    get,
    path = "/status",
    responses((status = 200, description = "Server is up", body = String)),
    tag = "health"
)]
pub async fn status() -> &'static str {
    "Server is running!"
}
