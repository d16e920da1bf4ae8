use std::time::Duration;

use badgewheel_bridge::notification::NotificationType;
use badgewheel_remote::HttpSession;

/// Handles a login request (see
/// [`badgewheel_bridge::MessageToBackend::LoginRequest`]).
///
/// On success the session is stored in state and the ready gate flips,
/// releasing the background randomize loop. Failures are journaled and leave
/// the gate untouched so the operator can retry.
pub async fn handle_login(context: super::AppContextHandle, username: String, password: String) {
    if username.is_empty() || password.is_empty() {
        context.reject("Username and password are required").await;
        return;
    }

    let remote = {
        let state = context.state.read().await;
        state.config.remote.clone()
    };

    match HttpSession::login(
        &remote.login_url,
        &remote.assign_url,
        &remote.catalog_url,
        &username,
        &password,
        Duration::from_secs(remote.timeout_secs),
    )
    .await
    {
        Ok(session) => {
            {
                let mut state = context.state.write().await;
                state.session = Some(session);
            }
            context
                .notify(NotificationType::Success, "Login successful. Reload page")
                .await;
            let _ = context.ready.send(true);
        }
        Err(e) => {
            context.notify(NotificationType::Error, e.to_string()).await;
        }
    }
}
