use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InstantiateMsg {
    pub count: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    Increment {},
    Reset { count: i32 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetCount {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CountResponse {
    pub count: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Outcome of a successful execute on the local chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub height: u64,
    pub sender: Address,
    pub contract: Address,
    pub attributes: Vec<Attribute>,
}

impl Receipt {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payloads_are_nullary_tagged_objects() {
        assert_eq!(
            serde_json::to_value(QueryMsg::GetCount {}).unwrap(),
            json!({ "get_count": {} })
        );
        assert_eq!(
            serde_json::to_value(ExecuteMsg::Increment {}).unwrap(),
            json!({ "increment": {} })
        );
    }

    #[test]
    fn reset_carries_its_count() {
        let msg: ExecuteMsg = serde_json::from_value(json!({ "reset": { "count": 5 } })).unwrap();
        assert_eq!(msg, ExecuteMsg::Reset { count: 5 });
    }

    #[test]
    fn receipt_attribute_lookup() {
        let receipt = Receipt {
            height: 1,
            sender: Address::ZERO,
            contract: Address::ZERO,
            attributes: vec![Attribute::new("method", "try_increment")],
        };
        assert_eq!(receipt.attribute("method"), Some("try_increment"));
        assert_eq!(receipt.attribute("owner"), None);
    }
}
