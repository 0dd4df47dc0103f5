//! Async effect handlers.
//!
//! Each handler is a pure async function: it takes a client plus owned
//! parameters and returns the `UiEvent` carrying the call's result. The
//! runtime owns spawning and the TaskStarted/TaskCompleted lifecycle, so
//! nothing here touches state or channels.

use cwala_core::api::types::{AddMemberRequest, OtpPurpose, RegisterRequest, UpdateProfileRequest};
use cwala_core::api::{self, ApiClient, ApiError, ApiErrorKind};
use tokio_util::sync::CancellationToken;

use crate::events::{AuthUiEvent, DataUiEvent, UiEvent};

/// Signs in through the user endpoint, or the admin endpoint when the
/// admin toggle is on.
pub async fn login(client: ApiClient, email: String, password: String, admin: bool) -> UiEvent {
    let result = if admin {
        api::auth::admin_login(&client, &email, &password).await
    } else {
        api::auth::login(&client, &email, &password).await
    };
    UiEvent::Auth(AuthUiEvent::LoginResult(result))
}

pub async fn register(client: ApiClient, request: RegisterRequest) -> UiEvent {
    let result = api::auth::register(&client, &request).await;
    UiEvent::Auth(AuthUiEvent::RegisterResult(result))
}

/// Verifies a one-time code.
///
/// Races the request against the cancellation token so closing the code
/// popup abandons the in-flight call instead of letting it land later.
pub async fn verify_otp(
    client: ApiClient,
    email: String,
    otp: String,
    purpose: OtpPurpose,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let call = api::auth::verify_otp(&client, &email, &otp, purpose);
    let result = match cancel {
        Some(token) => {
            tokio::select! {
                () = token.cancelled() => {
                    Err(ApiError::new(ApiErrorKind::Network, "Verification cancelled"))
                }
                result = call => result,
            }
        }
        None => call.await,
    };
    UiEvent::Auth(AuthUiEvent::VerifyResult(result))
}

pub async fn send_reset_code(client: ApiClient, email: String) -> UiEvent {
    let result = api::auth::forgot_password(&client, &email).await;
    UiEvent::Auth(AuthUiEvent::ResetCodeResult(result))
}

pub async fn reset_password(
    client: ApiClient,
    email: String,
    otp: String,
    new_password: String,
) -> UiEvent {
    let result = api::auth::reset_password(&client, &email, &otp, &new_password).await;
    UiEvent::Auth(AuthUiEvent::ResetResult(result))
}

/// Best-effort server-side logout. The local session is already gone by
/// the time this runs.
pub async fn logout(client: ApiClient) -> UiEvent {
    let result = api::auth::logout(&client).await;
    UiEvent::Auth(AuthUiEvent::LogoutResult(result))
}

/// One poll of the profile endpoint while an account awaits approval.
pub async fn check_approval(client: ApiClient) -> UiEvent {
    let result = api::account::fetch_profile(&client).await;
    UiEvent::Auth(AuthUiEvent::ApprovalResult(result))
}

pub async fn fetch_profile(client: ApiClient) -> UiEvent {
    let result = api::account::fetch_profile(&client).await;
    UiEvent::Data(DataUiEvent::ProfileLoaded(result))
}

pub async fn save_profile(client: ApiClient, request: UpdateProfileRequest) -> UiEvent {
    let result = api::account::update_profile(&client, &request).await;
    UiEvent::Data(DataUiEvent::ProfileSaved(result))
}

pub async fn change_password(
    client: ApiClient,
    old_password: String,
    new_password: String,
) -> UiEvent {
    let result = api::account::change_password(&client, &old_password, &new_password).await;
    UiEvent::Data(DataUiEvent::PasswordChanged(result))
}

pub async fn fetch_team(client: ApiClient) -> UiEvent {
    let result = api::team::list_members(&client).await;
    UiEvent::Data(DataUiEvent::TeamLoaded(result))
}

pub async fn add_member(client: ApiClient, request: AddMemberRequest) -> UiEvent {
    let result = api::team::add_member(&client, &request).await;
    UiEvent::Data(DataUiEvent::MemberAdded(result))
}

pub async fn remove_member(client: ApiClient, id: String) -> UiEvent {
    let result = api::team::remove_member(&client, &id).await;
    UiEvent::Data(DataUiEvent::MemberRemoved { id, result })
}

pub async fn fetch_wallet(client: ApiClient) -> UiEvent {
    let result = api::wallet::fetch_balance(&client).await;
    UiEvent::Data(DataUiEvent::WalletLoaded(result))
}

pub async fn fetch_notifications(client: ApiClient) -> UiEvent {
    let result = api::notifications::fetch_notifications(&client).await;
    UiEvent::Data(DataUiEvent::NotificationsLoaded(result))
}
