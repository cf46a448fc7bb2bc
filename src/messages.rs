/// Messages exchanged between the content script, popup and background

use crate::dork::DorkRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Message {
    /// Fire-and-forget notice from the detector; answered with `undefined`
    #[serde(rename = "DORK_SAVED")]
    DorkSaved { dork: DorkRecord },

    #[serde(rename = "GET_CURRENT_TAB_URL")]
    GetCurrentTabUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
