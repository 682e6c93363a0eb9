use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One planned-or-actual measurement for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PlanFact {
    #[serde(default)]
    pub income: f64,
    #[serde(default, rename = "activePartners")]
    pub active_partners: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MonthData {
    pub plan: PlanFact,
    pub fact: PlanFact,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manager {
    #[serde(default, rename = "adminName", deserialize_with = "lenient_name")]
    pub admin_name: String,
    /// Indexed by calendar month, 0 = January.
    #[serde(default, deserialize_with = "lenient_months")]
    pub months: Vec<Option<MonthData>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    /// Aggregate across all managers, indexed by calendar month.
    #[serde(default, deserialize_with = "lenient_months")]
    pub total: Vec<Option<MonthData>>,
    #[serde(default, deserialize_with = "lenient_managers")]
    pub table: Vec<Manager>,
}

/// Envelope returned by the board endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Payload>,
}

/// Month slot lookup that treats out-of-range indices as absent.
pub fn month_at(months: &[Option<MonthData>], index: usize) -> Option<&MonthData> {
    months.get(index).and_then(Option::as_ref)
}

/// Decode a month array element by element. `null` and elements that are not
/// shaped like `MonthData` become `None`; a non-array value becomes empty.
fn lenient_months<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<MonthData>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|v| serde_json::from_value::<MonthData>(v).ok())
        .collect())
}

/// Keep the `table` entries that decode as `Manager`; a non-array value
/// becomes empty.
fn lenient_managers<'de, D>(deserializer: D) -> std::result::Result<Vec<Manager>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Manager>(v).ok())
        .collect())
}

/// Names that are `null` or not strings become empty.
fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_fields() {
        let json = r#"{
            "adminName": "Alice",
            "months": [{"plan": {"income": 1000, "activePartners": 5},
                        "fact": {"income": 1200.5, "activePartners": 6}}, null]
        }"#;
        let m: Manager = serde_json::from_str(json).unwrap();
        assert_eq!(m.admin_name, "Alice");
        assert_eq!(m.months.len(), 2);
        let jan = m.months[0].unwrap();
        assert_eq!(jan.plan.income, 1000.0);
        assert_eq!(jan.plan.active_partners, 5.0);
        assert_eq!(jan.fact.income, 1200.5);
        assert!(m.months[1].is_none());
    }

    #[test]
    fn malformed_month_becomes_absent() {
        let json = r#"{"adminName": "Bob", "months": [42, "x", {"plan": 1}, {}]}"#;
        let m: Manager = serde_json::from_str(json).unwrap();
        assert_eq!(m.months, vec![None, None, None, None]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.total.is_empty());
        assert!(p.table.is_empty());

        let p: Payload = serde_json::from_str(r#"{"total": "nope", "table": [{}]}"#).unwrap();
        assert!(p.total.is_empty());
        assert_eq!(p.table[0].admin_name, "");
        assert!(p.table[0].months.is_empty());
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let m: MonthData = serde_json::from_str(r#"{"plan": {}, "fact": {"income": 7}}"#).unwrap();
        assert_eq!(m.plan, PlanFact::default());
        assert_eq!(m.fact.income, 7.0);
        assert_eq!(m.fact.active_partners, 0.0);
    }

    #[test]
    fn envelope_success_defaults_to_false() {
        let r: ApiResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(!r.success);
        assert!(r.data.is_some());
    }

    #[test]
    fn month_at_handles_short_arrays() {
        let months = vec![Some(MonthData::default()), None];
        assert!(month_at(&months, 0).is_some());
        assert!(month_at(&months, 1).is_none());
        assert!(month_at(&months, 11).is_none());
    }

    #[test]
    fn null_or_non_string_name_becomes_empty() {
        let m: Manager = serde_json::from_str(r#"{"adminName": null, "months": []}"#).unwrap();
        assert_eq!(m.admin_name, "");
        let m: Manager = serde_json::from_str(r#"{"adminName": 7}"#).unwrap();
        assert_eq!(m.admin_name, "");
    }

    #[test]
    fn null_table_becomes_empty() {
        let p: Payload = serde_json::from_str(r#"{"total": [], "table": null}"#).unwrap();
        assert!(p.table.is_empty());
    }

    #[test]
    fn non_object_table_entries_are_skipped() {
        let json = r#"{"table": [42, {"adminName": "Alice", "months": [null]}, "x", null]}"#;
        let p: Payload = serde_json::from_str(json).unwrap();
        assert_eq!(p.table.len(), 1);
        assert_eq!(p.table[0].admin_name, "Alice");
    }
}
