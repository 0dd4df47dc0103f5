//! Wallet endpoint.

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::WalletBalance;

/// Fetches the current wallet balance.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn fetch_balance(client: &ApiClient) -> Result<WalletBalance, ApiError> {
    client.get("/api/wallet/balance").await
}
