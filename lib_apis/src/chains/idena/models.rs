//! Argument records for the Idena methods that take an object parameter.
//!
//! Field names serialise camelCase and unset optionals are omitted, so the
//! node applies its own defaults (nonce, epoch, fee).

use serde::{Deserialize, Serialize};

/// Parameters of `dna_sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTxArgs {
    /// Transaction type; `0` (send) when omitted.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<u16>,
    /// Sender; must be the node's coinbase address.
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Amount in iDNA.
    pub amount: f64,
    /// Fee ceiling in iDNA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<f64>,
    /// Hex-encoded payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u16>,
}

/// Parameters of `dna_sendInvite`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInviteArgs {
    /// Invitee address; the node generates a key when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Amount transferred with the invite, in iDNA.
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u16>,
}

/// Parameters of `dna_activateInvite`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateInviteArgs {
    /// Invitation key.
    pub key: String,
    /// Address to activate; the node's own when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u16>,
}

/// Parameters of `dna_becomeOnline` / `dna_becomeOffline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTxArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u16>,
}

/// Parameters of `bcn_transactions` / `bcn_pendingTransactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsArgs {
    pub address: String,
    /// Page size.
    pub count: u32,
    /// Continuation token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl TransactionsArgs {
    /// First page of `count` transactions for `address`.
    pub fn new(address: impl Into<String>, count: u32) -> Self {
        Self {
            address: address.into(),
            count,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_tx_serialises_camel_case_without_unset_fields() {
        let args = SendTxArgs {
            from: "0xfrom".into(),
            to: Some("0xto".into()),
            amount: 1.5,
            max_fee: Some(0.1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({"from": "0xfrom", "to": "0xto", "amount": 1.5, "maxFee": 0.1})
        );
    }

    #[test]
    fn tx_type_uses_wire_name() {
        let args = SendTxArgs {
            tx_type: Some(3),
            from: "0xfrom".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&args).unwrap();
        assert_eq!(v["type"], json!(3));
        assert!(v.get("txType").is_none());
    }

    #[test]
    fn transactions_args_paging_token() {
        let mut args = TransactionsArgs::new("0xabc", 10);
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({"address": "0xabc", "count": 10})
        );
        args.token = Some("0x1f".into());
        assert_eq!(serde_json::to_value(&args).unwrap()["token"], json!("0x1f"));
    }
}
