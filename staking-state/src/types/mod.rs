//! Delegation state records.
//!
//! - [`Delegation`]: shares a delegator holds in an operator's pool
//! - [`UnbondingDelegation`]: in-flight unbonding entries for one pair
//! - [`DelegationResponse`]: query projection of a delegation and its balance
//! - [`DelegatorStartingInfo`]: reward-accounting snapshot

/// Ordered collection whose text form joins each element's own rendering
/// with newlines, trimmed of trailing whitespace.
macro_rules! define_collection {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl std::ops::Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut out = String::new();
                for item in &self.0 {
                    out.push_str(&item.to_string());
                    out.push('\n');
                }
                f.write_str(out.trim_end())
            }
        }
    };
}

mod delegation;
mod response;
mod starting_info;
mod unbonding;

pub use delegation::{Delegation, Delegations};
pub use response::{DelegationResponse, DelegationResponses};
pub use starting_info::DelegatorStartingInfo;
pub use unbonding::{UnbondingDelegation, UnbondingDelegationEntry, UnbondingDelegations};
