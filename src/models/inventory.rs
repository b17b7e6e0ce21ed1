use serde::{Deserialize, Serialize};

/// One inventory line item as accepted by `POST /api/inventory`.
///
/// Quantities and money amounts are whole numbers on the wire; the receiving
/// API stores every numeric column as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub division: String,
    pub category: String,
    pub product_name: String,
    pub specification: String,
    pub carried_over: i64,
    pub incoming: i64,
    pub outgoing: i64,
    pub remaining: i64,
    pub unit_price: i64,
    pub total_amount: i64,
}

impl InventoryRecord {
    /// The fixed record every probe run submits. Built from literals only, so
    /// repeated runs always send the same payload.
    pub fn probe_fixture() -> Self {
        Self {
            division: "SKT".to_string(),
            category: "TestPy".to_string(),
            product_name: "Test Item Python".to_string(),
            specification: "Spec".to_string(),
            carried_over: 10,
            incoming: 5,
            outgoing: 2,
            remaining: 13,
            unit_price: 100,
            total_amount: 1300,
        }
    }
}

/// A stored inventory row as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    #[serde(flatten)]
    pub record: InventoryRecord,
}
