use serde::Deserialize;
use std::collections::BTreeMap;

const EMBEDDED_SITE_CONTENT: &str = include_str!("../content/site.json");
const UNKNOWN_AGE_CONTEXT: &str = "Age development context information not available.";
const STACKED_TOTAL_PERCENT: f64 = 100.0;
const STACK_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub profile: Profile,
    #[serde(default)]
    pub tech_icons: Vec<TechIcon>,
    #[serde(default)]
    pub logos: Vec<Logo>,
    pub time_distribution: ActivityChart,
    pub age_activity: ActivityChart,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub age_contexts: BTreeMap<String, String>,
    pub travel: TravelLog,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub status: String,
    pub contact_href: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechIcon {
    pub title: String,
    pub icon_url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    pub title: Option<String>,
    pub href: Option<String>,
}

impl Logo {
    pub fn link_label(&self) -> String {
        self.title
            .clone()
            .filter(|title| !title.is_empty())
            .or_else(|| Some(self.alt.clone()).filter(|alt| !alt.is_empty()))
            .unwrap_or_else(|| "logo link".to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ActivityChart {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub data: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Activity {
    pub category: String,
    pub title: String,
    pub timeline: String,
    pub stats: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Milestone {
    pub age: u32,
    pub label: String,
    pub activities: String,
    pub learning: String,
    pub events: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TravelStop {
    pub name: String,
    pub age: u32,
    pub year: u32,
    #[serde(flatten)]
    pub point: GeoPoint,
    pub description: String,
    #[serde(default)]
    pub highlights: String,
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl TravelStop {
    pub fn age_label(&self) -> String {
        format!("Age {}", self.age)
    }

    pub fn marker_html(&self) -> String {
        format!(
            r#"<div class="marker-container"><div class="marker-pulse"></div><div class="marker-glow"></div><div class="marker-core"></div><div class="marker-label">{}</div></div>"#,
            self.age
        )
    }

    pub fn popup_html(&self) -> String {
        format!(
            r#"<div class="travel-popup-content"><div class="popup-header"><h3>{name}</h3><span class="age-badge">{age}</span></div><div class="popup-year">{year}</div><div class="popup-description">{description}</div><div class="popup-coordinates"><small>{lat:.4}, {lng:.4}</small></div></div>"#,
            name = escape_html(&self.name),
            age = escape_html(&self.age_label()),
            year = self.year,
            description = escape_html(&self.description),
            lat = self.point.lat,
            lng = self.point.lng,
        )
    }
}

impl Residence {
    pub fn popup_html(&self) -> String {
        format!(
            r#"<div class="residence-popup-content"><div class="popup-header"><h3>{name}</h3><span class="residence-badge">Hometown</span></div><div class="popup-description">{description}</div><div class="popup-coordinates"><small>{lat:.4}, {lng:.4}</small></div></div>"#,
            name = escape_html(&self.name),
            description = escape_html(&self.description),
            lat = self.point.lat,
            lng = self.point.lng,
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Residence {
    pub name: String,
    #[serde(flatten)]
    pub point: GeoPoint,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TravelStat {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TravelLog {
    pub stops: Vec<TravelStop>,
    pub residence: Residence,
    #[serde(default)]
    pub stats: Vec<TravelStat>,
}

impl TravelLog {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn stop_named(&self, name: &str) -> Option<&TravelStop> {
        self.stops.iter().find(|stop| stop.name == name)
    }
}

impl SiteContent {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EMBEDDED_SITE_CONTENT)
    }

    pub fn activity(&self, category: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.category == category)
    }

    pub fn milestone(&self, age: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|milestone| milestone.age == age)
    }

    pub fn age_context(&self, label: &str) -> &str {
        self.age_contexts
            .get(label)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_AGE_CONTEXT)
    }

    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, chart) in [
            ("timeDistribution", &self.time_distribution),
            ("ageActivity", &self.age_activity),
        ] {
            for series in &chart.series {
                if series.data.len() != chart.labels.len() {
                    issues.push(format!(
                        "{name}: series `{}` has {} values for {} labels",
                        series.label,
                        series.data.len(),
                        chart.labels.len()
                    ));
                }
            }
        }

        for (index, label) in self.age_activity.labels.iter().enumerate() {
            let total: f64 = self
                .age_activity
                .series
                .iter()
                .filter_map(|series| series.data.get(index))
                .sum();
            if total > STACKED_TOTAL_PERCENT + STACK_TOLERANCE {
                issues.push(format!("ageActivity: `{label}` adds up to {total}%"));
            }
        }

        for stop in &self.travel.stops {
            if !(-90.0..=90.0).contains(&stop.point.lat) || !(-180.0..=180.0).contains(&stop.point.lng) {
                issues.push(format!("travel: `{}` has coordinates off the globe", stop.name));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses_and_is_consistent() {
        let content = SiteContent::embedded().expect("embedded content parses");

        assert!(!content.profile.name.is_empty());
        assert_eq!(content.tech_icons.len(), 10);
        assert_eq!(content.time_distribution.labels.len(), 15);
        assert_eq!(content.age_activity.series.len(), 8);
        assert!(content.issues().is_empty(), "{:?}", content.issues());
    }

    #[test]
    fn lookups_fall_back_gracefully() {
        let content = SiteContent::embedded().expect("embedded content parses");

        assert_eq!(
            content.activity("swimming-card").map(|activity| activity.title.as_str()),
            Some("Swimming")
        );
        assert!(content.activity("unknown-card").is_none());
        assert_eq!(content.milestone(15).map(|milestone| milestone.label.as_str()), Some("Moving Abroad"));
        assert_eq!(content.age_context("Age 99"), UNKNOWN_AGE_CONTEXT);
    }

    #[test]
    fn travel_stops_flatten_coordinates() {
        let log = TravelLog::from_json(
            r#"{
                "stops": [{ "name": "Dubai", "age": 12, "year": 2019, "lat": 25.2, "lng": 55.27, "description": "Desert" }],
                "residence": { "name": "Home", "lat": 30.5, "lng": 104.0 }
            }"#,
        )
        .expect("valid travel log");

        let dubai = log.stop_named("Dubai").expect("stop exists");
        assert_eq!(dubai.point, GeoPoint { lat: 25.2, lng: 55.27 });
        assert_eq!(dubai.age_label(), "Age 12");
        assert!(dubai.highlights.is_empty());
        assert!(log.stats.is_empty());
    }

    #[test]
    fn popups_escape_markup_from_content() {
        let stop = TravelStop {
            name: "Xi'an".to_string(),
            age: 8,
            year: 2015,
            point: GeoPoint { lat: 34.26553, lng: 108.9508 },
            description: "<b>Terracotta</b> & more".to_string(),
            highlights: String::new(),
        };
        let popup = stop.popup_html();

        assert!(popup.contains("<h3>Xi&#39;an</h3>"));
        assert!(popup.contains("&lt;b&gt;Terracotta&lt;/b&gt; &amp; more"));
        assert!(popup.contains("34.2655, 108.9508"));
        assert!(popup.contains(r#"<span class="age-badge">Age 8</span>"#));
    }

    #[test]
    fn mismatched_series_and_overfull_stacks_are_reported() {
        let mut content = SiteContent::embedded().expect("embedded content parses");
        content.age_activity.series[1].data[0] = 5.0;
        content.time_distribution.series[0].data.pop();

        let issues = content.issues();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|issue| issue.contains("Age 0-2")));
        assert!(issues.iter().any(|issue| issue.contains("Learning")));
    }

    #[test]
    fn stacks_that_sum_to_full_with_rounding_noise_are_accepted() {
        let mut content = SiteContent::embedded().expect("embedded content parses");
        for series in &mut content.age_activity.series {
            series.data[0] = 0.0;
        }
        content.age_activity.series[0].data[0] = 0.2;
        content.age_activity.series[1].data[0] = 83.9;
        content.age_activity.series[2].data[0] = 15.9;
        assert!(0.2 + 83.9 + 15.9 > 100.0);

        assert!(content.issues().is_empty());
    }

    #[test]
    fn logo_label_prefers_title_then_alt() {
        let logo = Logo {
            src: "/a.svg".to_string(),
            alt: "Alt".to_string(),
            title: None,
            href: None,
        };
        assert_eq!(logo.link_label(), "Alt");

        let untitled = Logo {
            alt: String::new(),
            ..logo
        };
        assert_eq!(untitled.link_label(), "logo link");
    }
}
