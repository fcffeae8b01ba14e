//! Query projection of a delegation.

use std::fmt;

use serde::{Deserialize, Serialize};
use staking_core::{AccAddress, Coin, Dec, OperAddress};

use crate::error::{StakingError, StakingResult};
use crate::types::Delegation;

/// A delegation together with the liquid tokens its shares are worth.
///
/// Held as two fields in memory but encoded as one flat object:
///
/// ```json
/// {"delegator_address": "...", "operator_address": "...", "shares": "1.5...", "balance": {...}}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DelegationResponseWire", try_from = "DelegationResponseWire")]
pub struct DelegationResponse {
    delegation: Delegation,
    balance: Coin,
}

/// Flat external encoding of [`DelegationResponse`].
#[derive(Serialize, Deserialize)]
struct DelegationResponseWire {
    delegator_address: AccAddress,
    operator_address: OperAddress,
    shares: Dec,
    balance: Coin,
}

impl DelegationResponse {
    /// Build a response from the raw delegation fields.
    pub fn new(
        delegator: AccAddress,
        operator: OperAddress,
        shares: Dec,
        balance: Coin,
    ) -> StakingResult<Self> {
        Self::from_delegation(Delegation::new(delegator, operator, shares)?, balance)
    }

    /// Pair an existing delegation with its balance.
    pub fn from_delegation(delegation: Delegation, balance: Coin) -> StakingResult<Self> {
        balance.validate()?;
        Ok(DelegationResponse { delegation, balance })
    }

    /// The wrapped delegation.
    pub fn delegation(&self) -> &Delegation {
        &self.delegation
    }

    /// Token value of the delegation's shares.
    pub fn balance(&self) -> &Coin {
        &self.balance
    }
}

impl From<DelegationResponse> for DelegationResponseWire {
    fn from(response: DelegationResponse) -> Self {
        let (delegator_address, operator_address, shares) = response.delegation.into_parts();
        DelegationResponseWire {
            delegator_address,
            operator_address,
            shares,
            balance: response.balance,
        }
    }
}

impl TryFrom<DelegationResponseWire> for DelegationResponse {
    type Error = StakingError;

    fn try_from(wire: DelegationResponseWire) -> Result<Self, Self::Error> {
        DelegationResponse::new(
            wire.delegator_address,
            wire.operator_address,
            wire.shares,
            wire.balance,
        )
    }
}

impl fmt::Display for DelegationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  balance: {}", self.delegation, self.balance)
    }
}

define_collection!(
    /// Collection of delegation responses.
    DelegationResponses,
    DelegationResponse
);

#[cfg(test)]
mod tests {
    use super::*;
    use staking_core::Int;

    fn sample() -> DelegationResponse {
        DelegationResponse::new(
            AccAddress::from_bytes([1u8; 20]),
            OperAddress::from_bytes([2u8; 20]),
            "1.5".parse::<Dec>().unwrap(),
            Coin::new("stake", Int::from(1000u64)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_json_is_flat() {
        let response = sample();
        let value = serde_json::to_value(&response).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["balance", "delegator_address", "operator_address", "shares"]);
        assert_eq!(object["shares"], "1.500000000000000000");
        assert_eq!(object["balance"]["denom"], "stake");
        assert_eq!(object["balance"]["amount"], "1000");
        assert_eq!(
            object["delegator_address"],
            response.delegation().delegator_address().to_string().as_str()
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let response = sample();
        let json = serde_json::to_string(&response).unwrap();
        let back: DelegationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
        assert_eq!(back.delegation().shares(), &"1.5".parse::<Dec>().unwrap());
        assert_eq!(back.balance().amount, Int::from(1000u64));
    }

    #[test]
    fn test_json_rejects_nested_form() {
        let nested = serde_json::json!({
            "delegation": {
                "delegator_address": AccAddress::from_bytes([1u8; 20]).to_string(),
                "operator_address": OperAddress::from_bytes([2u8; 20]).to_string(),
                "shares": "1.5",
            },
            "balance": {"denom": "stake", "amount": "1000"},
        });
        assert!(serde_json::from_value::<DelegationResponse>(nested).is_err());
    }

    #[test]
    fn test_json_rejects_negative_shares() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["shares"] = serde_json::Value::from("-1");
        assert!(serde_json::from_value::<DelegationResponse>(value).is_err());
    }

    #[test]
    fn test_invalid_balance_rejected() {
        let balance = Coin {
            denom: "x".into(),
            amount: Int::from(1u64),
        };
        let delegation = sample().delegation().clone();
        assert!(matches!(
            DelegationResponse::from_delegation(delegation, balance),
            Err(StakingError::Coin(_))
        ));
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.contains("shares: \"1.500000000000000000\""));
        assert!(text.ends_with("balance: 1000stake"));
    }

    #[test]
    fn test_collection_display() {
        let responses: DelegationResponses = vec![sample()].into();
        assert_eq!(responses.to_string(), sample().to_string());
        assert_eq!(DelegationResponses::default().to_string(), "");
    }
}
