use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};

/// One travel record. Immutable once stored; recomputed views are built on top.
///
/// `days` is lenient on the wire: numeric strings still parse, anything
/// non-numeric or missing contributes 0 rather than failing the request.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    #[serde_as(deserialize_as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
