//! Place-of-supply classification for GST
//!
//! GST splits differently depending on where a supply is delivered: within
//! the seller's state the tax is shared between centre and state (CGST +
//! SGST), across state lines a single integrated tax applies (IGST). This
//! module carries the Indian state/UT codes and the rule that picks the
//! supply type for a transaction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::InvoiceError;

/// Indian states and union territories recognised for GST registration.
///
/// Each code carries the postal abbreviation used in addresses and the
/// two-digit numeric code that prefixes every GSTIN issued in that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCode {
    #[serde(rename = "AN")]
    AndamanNicobarIslands,
    #[serde(rename = "AP")]
    AndhraPradesh,
    #[serde(rename = "AR")]
    ArunachalPradesh,
    #[serde(rename = "AS")]
    Assam,
    #[serde(rename = "BR")]
    Bihar,
    #[serde(rename = "CH")]
    Chandigarh,
    #[serde(rename = "CT")]
    Chhattisgarh,
    #[serde(rename = "DD")]
    DamanDiu,
    #[serde(rename = "DL")]
    Delhi,
    #[serde(rename = "GA")]
    Goa,
    #[serde(rename = "GJ")]
    Gujarat,
    #[serde(rename = "HP")]
    HimachalPradesh,
    #[serde(rename = "HR")]
    Haryana,
    #[serde(rename = "JH")]
    Jharkhand,
    #[serde(rename = "JK")]
    JammuKashmir,
    #[serde(rename = "KA")]
    Karnataka,
    #[serde(rename = "KL")]
    Kerala,
    #[serde(rename = "LA")]
    Ladakh,
    #[serde(rename = "LD")]
    Lakshadweep,
    #[serde(rename = "MH")]
    Maharashtra,
    #[serde(rename = "ML")]
    Meghalaya,
    #[serde(rename = "MN")]
    Manipur,
    #[serde(rename = "MP")]
    MadhyaPradesh,
    #[serde(rename = "MZ")]
    Mizoram,
    #[serde(rename = "NL")]
    Nagaland,
    #[serde(rename = "OD")]
    Odisha,
    #[serde(rename = "PB")]
    Punjab,
    #[serde(rename = "PY")]
    Puducherry,
    #[serde(rename = "RJ")]
    Rajasthan,
    #[serde(rename = "SK")]
    Sikkim,
    #[serde(rename = "TN")]
    TamilNadu,
    #[serde(rename = "TS")]
    Telangana,
    #[serde(rename = "TR")]
    Tripura,
    #[serde(rename = "UK")]
    Uttarakhand,
    #[serde(rename = "UP")]
    UttarPradesh,
    #[serde(rename = "WB")]
    WestBengal,
}

impl StateCode {
    /// All recognised state codes, in abbreviation order.
    pub const ALL: [StateCode; 36] = [
        StateCode::AndamanNicobarIslands,
        StateCode::AndhraPradesh,
        StateCode::ArunachalPradesh,
        StateCode::Assam,
        StateCode::Bihar,
        StateCode::Chandigarh,
        StateCode::Chhattisgarh,
        StateCode::DamanDiu,
        StateCode::Delhi,
        StateCode::Goa,
        StateCode::Gujarat,
        StateCode::HimachalPradesh,
        StateCode::Haryana,
        StateCode::Jharkhand,
        StateCode::JammuKashmir,
        StateCode::Karnataka,
        StateCode::Kerala,
        StateCode::Ladakh,
        StateCode::Lakshadweep,
        StateCode::Maharashtra,
        StateCode::Meghalaya,
        StateCode::Manipur,
        StateCode::MadhyaPradesh,
        StateCode::Mizoram,
        StateCode::Nagaland,
        StateCode::Odisha,
        StateCode::Punjab,
        StateCode::Puducherry,
        StateCode::Rajasthan,
        StateCode::Sikkim,
        StateCode::TamilNadu,
        StateCode::Telangana,
        StateCode::Tripura,
        StateCode::Uttarakhand,
        StateCode::UttarPradesh,
        StateCode::WestBengal,
    ];

    /// Postal abbreviation used in addresses and stored records (e.g. "KA").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StateCode::AndamanNicobarIslands => "AN",
            StateCode::AndhraPradesh => "AP",
            StateCode::ArunachalPradesh => "AR",
            StateCode::Assam => "AS",
            StateCode::Bihar => "BR",
            StateCode::Chandigarh => "CH",
            StateCode::Chhattisgarh => "CT",
            StateCode::DamanDiu => "DD",
            StateCode::Delhi => "DL",
            StateCode::Goa => "GA",
            StateCode::Gujarat => "GJ",
            StateCode::HimachalPradesh => "HP",
            StateCode::Haryana => "HR",
            StateCode::Jharkhand => "JH",
            StateCode::JammuKashmir => "JK",
            StateCode::Karnataka => "KA",
            StateCode::Kerala => "KL",
            StateCode::Ladakh => "LA",
            StateCode::Lakshadweep => "LD",
            StateCode::Maharashtra => "MH",
            StateCode::Meghalaya => "ML",
            StateCode::Manipur => "MN",
            StateCode::MadhyaPradesh => "MP",
            StateCode::Mizoram => "MZ",
            StateCode::Nagaland => "NL",
            StateCode::Odisha => "OD",
            StateCode::Punjab => "PB",
            StateCode::Puducherry => "PY",
            StateCode::Rajasthan => "RJ",
            StateCode::Sikkim => "SK",
            StateCode::TamilNadu => "TN",
            StateCode::Telangana => "TS",
            StateCode::Tripura => "TR",
            StateCode::Uttarakhand => "UK",
            StateCode::UttarPradesh => "UP",
            StateCode::WestBengal => "WB",
        }
    }

    /// Two-digit numeric code that prefixes GSTINs issued in this state.
    ///
    /// Kept as a string to preserve the leading zero ("04", "07", ...).
    pub fn gst_code(&self) -> &'static str {
        match self {
            StateCode::AndamanNicobarIslands => "35",
            StateCode::AndhraPradesh => "37",
            StateCode::ArunachalPradesh => "12",
            StateCode::Assam => "18",
            StateCode::Bihar => "10",
            StateCode::Chandigarh => "04",
            StateCode::Chhattisgarh => "22",
            StateCode::DamanDiu => "25",
            StateCode::Delhi => "07",
            StateCode::Goa => "30",
            StateCode::Gujarat => "24",
            StateCode::HimachalPradesh => "02",
            StateCode::Haryana => "06",
            StateCode::Jharkhand => "20",
            StateCode::JammuKashmir => "01",
            StateCode::Karnataka => "29",
            StateCode::Kerala => "32",
            StateCode::Ladakh => "38",
            StateCode::Lakshadweep => "31",
            StateCode::Maharashtra => "27",
            StateCode::Meghalaya => "17",
            StateCode::Manipur => "14",
            StateCode::MadhyaPradesh => "23",
            StateCode::Mizoram => "15",
            StateCode::Nagaland => "13",
            StateCode::Odisha => "21",
            StateCode::Punjab => "03",
            StateCode::Puducherry => "34",
            StateCode::Rajasthan => "08",
            StateCode::Sikkim => "11",
            StateCode::TamilNadu => "33",
            StateCode::Telangana => "36",
            StateCode::Tripura => "16",
            StateCode::Uttarakhand => "05",
            StateCode::UttarPradesh => "09",
            StateCode::WestBengal => "19",
        }
    }

    /// Full display name of the state or union territory.
    pub fn name(&self) -> &'static str {
        match self {
            StateCode::AndamanNicobarIslands => "Andaman and Nicobar Islands",
            StateCode::AndhraPradesh => "Andhra Pradesh",
            StateCode::ArunachalPradesh => "Arunachal Pradesh",
            StateCode::Assam => "Assam",
            StateCode::Bihar => "Bihar",
            StateCode::Chandigarh => "Chandigarh",
            StateCode::Chhattisgarh => "Chhattisgarh",
            StateCode::DamanDiu => "Daman and Diu",
            StateCode::Delhi => "Delhi",
            StateCode::Goa => "Goa",
            StateCode::Gujarat => "Gujarat",
            StateCode::HimachalPradesh => "Himachal Pradesh",
            StateCode::Haryana => "Haryana",
            StateCode::Jharkhand => "Jharkhand",
            StateCode::JammuKashmir => "Jammu and Kashmir",
            StateCode::Karnataka => "Karnataka",
            StateCode::Kerala => "Kerala",
            StateCode::Ladakh => "Ladakh",
            StateCode::Lakshadweep => "Lakshadweep",
            StateCode::Maharashtra => "Maharashtra",
            StateCode::Meghalaya => "Meghalaya",
            StateCode::Manipur => "Manipur",
            StateCode::MadhyaPradesh => "Madhya Pradesh",
            StateCode::Mizoram => "Mizoram",
            StateCode::Nagaland => "Nagaland",
            StateCode::Odisha => "Odisha",
            StateCode::Punjab => "Punjab",
            StateCode::Puducherry => "Puducherry",
            StateCode::Rajasthan => "Rajasthan",
            StateCode::Sikkim => "Sikkim",
            StateCode::TamilNadu => "Tamil Nadu",
            StateCode::Telangana => "Telangana",
            StateCode::Tripura => "Tripura",
            StateCode::Uttarakhand => "Uttarakhand",
            StateCode::UttarPradesh => "Uttar Pradesh",
            StateCode::WestBengal => "West Bengal",
        }
    }

    /// Look up a state by its postal abbreviation, case-insensitively.
    pub fn from_abbreviation(code: &str) -> Option<StateCode> {
        let upper = code.to_ascii_uppercase();
        StateCode::ALL
            .iter()
            .find(|state| state.abbreviation() == upper)
            .copied()
    }
}

impl FromStr for StateCode {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCode::from_abbreviation(s).ok_or_else(|| InvoiceError::UnknownStateCode(s.to_string()))
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Whether a transaction stays within one state or crosses state lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Supply within the business's home state; CGST + SGST apply
    IntraState,
    /// Supply to another state; IGST applies
    InterState,
}

impl SupplyType {
    /// Classify a transaction from the two party states.
    ///
    /// Inter-state exactly when the states differ. A missing state on
    /// either side compares as its own value, so two unset states are
    /// treated as intra-state while one unset side against a known state
    /// is inter-state.
    pub fn for_transaction(
        business_state: Option<StateCode>,
        customer_state: Option<StateCode>,
    ) -> Self {
        if customer_state != business_state {
            SupplyType::InterState
        } else {
            SupplyType::IntraState
        }
    }

    /// True for inter-state supplies.
    pub fn is_inter_state(&self) -> bool {
        matches!(self, SupplyType::InterState)
    }
}
