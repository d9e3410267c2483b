//! Gateway settings as read from the host platform configuration.

/// Card payment method settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GatewayConfig {
    /// When true the gateway captures immediately; otherwise the
    /// transaction is authorized only.
    pub capture: bool,
    /// Store cards with the gateway for logged-in customers.
    pub create_card_enabled: bool,
    pub tds: TdsConfig,
}

/// 3-D-Secure configuration block, copied verbatim into the session
/// payload apart from URL scheme normalization.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TdsConfig {
    pub is_active: bool,
    pub challenge_preference: ChallengePreference,
    /// Merchant contact URL shown during the challenge flow.
    pub contact_url: String,
}

/// Challenge preference sent in the `tds` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengePreference {
    #[default]
    NoPreference,
    NoChallengeRequested,
    ChallengePreferred,
    ChallengeMandated,
}
