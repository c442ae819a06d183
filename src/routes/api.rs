pub async fn handle_healthz() -> &'static str {
    "ok\n"
}
