use serde::{Deserialize, Serialize};

/// OpenMRS list response: `{"results": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ResultList<T> {
    /// First result, if any
    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }
}

/// Minimal view of a location search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
}

/// Fields of a person record read by the deceased listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dead: Option<bool>,
    #[serde(default)]
    pub preferred_address: Option<PreferredAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferredAddress {
    #[serde(default)]
    pub display: Option<String>,
}

impl PersonSummary {
    /// A missing or null `dead` flag counts as alive
    pub fn is_dead(&self) -> bool {
        self.dead.unwrap_or(false)
    }

    /// Display string of the preferred address, when the server sent one
    pub fn address_display(&self) -> Option<&str> {
        self.preferred_address.as_ref()?.display.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_results_is_empty() {
        let list: ResultList<LocationSummary> = serde_json::from_value(json!({})).unwrap();
        assert!(list.first().is_none());
    }

    #[test]
    fn person_summary_defaults() {
        let person: PersonSummary = serde_json::from_value(json!({
            "display": "John Smith",
            "gender": "M",
            "preferredAddress": null
        }))
        .unwrap();

        assert!(!person.is_dead());
        assert_eq!(person.address_display(), None);
    }

    #[test]
    fn null_fields_do_not_fail_the_list() {
        let list: ResultList<PersonSummary> = serde_json::from_value(json!({"results": [
            {"display": "Bob Buried", "dead": true, "preferredAddress": {"display": "Kampala"}},
            {"display": "Ann Unknown", "dead": null},
            {"display": null, "dead": true}
        ]}))
        .unwrap();

        assert_eq!(list.results.len(), 3);
        assert!(list.results[0].is_dead());
        assert!(!list.results[1].is_dead());
        assert!(list.results[2].display.is_none());
    }
}
